//! CSV writing operations.

use std::path::Path;

use anyhow::{Context, Result};

use crate::{common::write_atomic, feature::record::COLUMNS, store::FeatureCollection};

/// Write raw rows to CSV bytes. Rows may have differing lengths.
pub fn write_raw_rows(rows: &[Vec<String>]) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new().flexible(true).from_writer(Vec::new());
    for row in rows {
        writer.write_record(row).context("[io::csv::write] Failed to write record")?;
    }
    writer.into_inner()
        .map_err(|e| anyhow::anyhow!("[io::csv::write] Failed to flush CSV buffer: {}", e.error()))
}

/// Export a collection as CSV bytes: header row, then one row per feature,
/// non-geometry properties first and `lat`, `lon` trailing.
pub fn write_collection_csv_bytes(collection: &FeatureCollection<'_>) -> Result<Vec<u8>> {
    let mut rows = Vec::with_capacity(collection.len() + 1);
    rows.push(COLUMNS.iter().map(|c| c.to_string()).collect());
    rows.extend(collection.iter().map(|entry| entry.feature.to_record(entry.color)));
    write_raw_rows(&rows)
}

/// Export a collection to a CSV file.
pub fn write_collection_csv(collection: &FeatureCollection<'_>, path: &Path, force: bool) -> Result<()> {
    let bytes = write_collection_csv_bytes(collection)?;
    write_atomic(path, &bytes, force)
        .with_context(|| format!("[io::csv::write] Failed to write CSV to {}", path.display()))
}
