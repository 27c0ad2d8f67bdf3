use anyhow::Result;
use casemap::io::{csv::write_collection_csv, geojson::write_geojson, project::ProjectSnapshot, shp::write_shapefile_zip};
use tracing::info;

use crate::cli::{Cli, ExportArgs, ExportFormat};

pub fn run(cli: &Cli, args: &ExportArgs) -> Result<()> {
    let session = super::load_session(cli)?;
    let collection = session.store.flatten();
    info!("[export] {:?} with {} cases -> {}", args.format, collection.len(), args.output.display());

    match args.format {
        ExportFormat::Geojson => write_geojson(&collection, &args.output, args.force)?,
        ExportFormat::Csv => write_collection_csv(&collection, &args.output, args.force)?,
        ExportFormat::Shapefile => {
            let stem = format!("{}_puntos", session.name);
            write_shapefile_zip(&collection, &args.output, &stem, args.force)?
        }
        ExportFormat::Project => {
            ProjectSnapshot::from_store(&session.name, &session.store).write_to_file(&args.output, args.force)?
        }
    }

    println!("Exported {} cases -> {}", collection.len(), args.output.display());
    Ok(())
}
