//! Zipped ESRI shapefile bundle export.

use std::{
    fs,
    io::{Cursor, Write},
    path::Path,
};

use anyhow::{anyhow, Context, Result};
use shapefile::dbase::{FieldName, FieldValue, Record, TableWriterBuilder};
use zip::{write::SimpleFileOptions, CompressionMethod, ZipWriter};

use crate::{common::write_atomic, feature::record::COLUMNS, store::FeatureCollection};

/// WGS84 (EPSG:4326) projection in ESRI WKT form.
const WGS84_PRJ: &str = concat!(
    r#"GEOGCS["GCS_WGS_1984",DATUM["D_WGS_1984",SPHEROID["WGS_1984",6378137.0,298.257223563]],"#,
    r#"PRIMEM["Greenwich",0.0],UNIT["Degree",0.0174532925199433]]"#,
);

/// Sibling files bundled next to the `.shp`.
const BUNDLE_EXTENSIONS: [&str; 5] = ["shp", "shx", "dbf", "prj", "cpg"];

/// dBase limits: field names up to 10 bytes, character values up to 254 bytes.
const DBF_NAME_MAX: usize = 10;
const DBF_VALUE_MAX: usize = 254;

/// Attribute columns: every record column except the coordinates.
fn attribute_columns() -> &'static [&'static str] {
    &COLUMNS[..COLUMNS.len() - 2]
}

/// Cut `text` to at most `max` bytes on a char boundary.
fn truncate_bytes(text: &str, max: usize) -> &str {
    if text.len() <= max {
        return text;
    }
    let mut cut = max;
    while !text.is_char_boundary(cut) {
        cut -= 1;
    }
    &text[..cut]
}

fn dbf_field_name(column: &str) -> Result<FieldName> {
    let name = truncate_bytes(column, DBF_NAME_MAX);
    FieldName::try_from(name).map_err(|e| anyhow!("[io::shp] Invalid dBase field name {name:?}: {e:?}"))
}

/// Write `<stem>.shp/.shx/.dbf/.prj/.cpg` into `dir`.
pub fn write_shapefile(collection: &FeatureCollection<'_>, dir: &Path, stem: &str) -> Result<()> {
    let mut table = TableWriterBuilder::new();
    for column in attribute_columns() {
        table = table.add_character_field(dbf_field_name(column)?, DBF_VALUE_MAX as u8);
    }

    let shp_path = dir.join(format!("{stem}.shp"));
    let mut writer = shapefile::Writer::from_path(&shp_path, table)
        .with_context(|| format!("[io::shp] Failed to create shapefile: {}", shp_path.display()))?;

    for entry in collection.iter() {
        let feature = entry.feature;
        let point = shapefile::Point::new(feature.lon(), feature.lat());

        let mut record = Record::default();
        for (column, value) in attribute_columns().iter().zip(feature.to_record(entry.color)) {
            let name = truncate_bytes(column, DBF_NAME_MAX).to_string();
            let value = truncate_bytes(&value, DBF_VALUE_MAX).to_string();
            record.insert(name, FieldValue::Character(Some(value)));
        }

        writer.write_shape_and_record(&point, &record)
            .with_context(|| format!("[io::shp] Failed to write feature {}", feature.id()))?;
    }
    drop(writer); // flushes headers

    fs::write(dir.join(format!("{stem}.prj")), WGS84_PRJ)
        .context("[io::shp] Failed to write projection file")?;
    fs::write(dir.join(format!("{stem}.cpg")), "UTF-8")
        .context("[io::shp] Failed to write code page file")?;
    Ok(())
}

/// Build the zipped shapefile bundle in memory.
pub fn write_shapefile_zip_bytes(collection: &FeatureCollection<'_>, stem: &str) -> Result<Vec<u8>> {
    let tmp = tempfile::tempdir().context("[io::shp] Failed to create temp directory")?;
    write_shapefile(collection, tmp.path(), stem)?;

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    for ext in BUNDLE_EXTENSIONS {
        let name = format!("{stem}.{ext}");
        let path = tmp.path().join(&name);
        if !path.exists() {
            continue;
        }
        let bytes = fs::read(&path)
            .with_context(|| format!("[io::shp] Failed to read {}", path.display()))?;
        zip.start_file(name.as_str(), options)
            .with_context(|| format!("[io::shp] Failed to add {name} to archive"))?;
        zip.write_all(&bytes)
            .with_context(|| format!("[io::shp] Failed to write {name} to archive"))?;
    }
    let cursor = zip.finish().context("[io::shp] Failed to finish archive")?;
    Ok(cursor.into_inner())
}

/// Write the zipped shapefile bundle to `path`.
pub fn write_shapefile_zip(collection: &FeatureCollection<'_>, path: &Path, stem: &str, force: bool) -> Result<()> {
    let bytes = write_shapefile_zip_bytes(collection, stem)?;
    write_atomic(path, &bytes, force)
        .with_context(|| format!("[io::shp] Failed to write shapefile bundle to {}", path.display()))
}
