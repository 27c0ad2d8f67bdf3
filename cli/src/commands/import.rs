use anyhow::Result;
use casemap::io::{geojson::read_geojson, project::ProjectSnapshot};

use crate::cli::{Cli, ImportArgs, ImportFormat};

/// Replaces the session's layers with the imported ones; the project name is kept
/// unless the file carries its own.
pub fn run(cli: &Cli, args: &ImportArgs) -> Result<()> {
    let mut session = super::load_session(cli)?;

    match args.format {
        ImportFormat::Geojson => {
            let (store, report) = read_geojson(&args.input)?;
            println!("Imported {} cases in {} layers ({} skipped)", report.imported, report.layers, report.skipped);
            session.store = store;
        }
        ImportFormat::Project => {
            let snapshot = ProjectSnapshot::read_from_file(&args.input)?;
            session.store = snapshot.to_store();
            session.name = snapshot.name_or(&session.name).to_string();
            println!("Imported {} cases in {} layers", session.store.feature_count(), session.store.num_layers());
        }
    }

    super::save_session(cli, &mut session)
}
