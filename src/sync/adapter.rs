use thiserror::Error;
use tracing::info;

use crate::{
    feature::{record::header, Feature},
    store::LayerStore,
};

use super::{export_rows, import_rows, ExternalTable, ImportReport, TableError};

/// Failure of a sync operation. The Layer Store is never modified when one is returned.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("could not read the external table: {0}")]
    Read(#[source] TableError),

    #[error("could not write the external table: {0}")]
    Write(#[source] TableError),
}

/// Result of [`pull_replace`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PullOutcome {
    /// The table was empty or held only a header; the local store was left alone.
    NoData,
    /// The table had data rows but none could be parsed; the local store was left alone.
    NothingValid(ImportReport),
    /// The local store was replaced by the table content.
    Replaced(ImportReport),
}

/// Overwrite the whole table with the store content.
///
/// This is a destructive replace, not a merge: rows that exist only in the
/// table are lost.
pub fn push_replace(store: &LayerStore, table: &mut dyn ExternalTable) -> Result<usize, SyncError> {
    let rows = export_rows(store);
    table.overwrite_all(&rows).map_err(SyncError::Write)?;
    info!("[sync] pushed {} feature rows", rows.len() - 1);
    Ok(rows.len() - 1)
}

/// Reload the store from the table.
///
/// When the table holds data, the entire in-memory store is replaced: layers
/// and features missing from the table are lost locally. An empty or
/// header-only table leaves the store untouched.
pub fn pull_replace(store: &mut LayerStore, table: &mut dyn ExternalTable) -> Result<PullOutcome, SyncError> {
    let rows = table.read_all_rows().map_err(SyncError::Read)?;
    let Some((rebuilt, report)) = import_rows(&rows) else {
        info!("[sync] table holds no data; keeping local store");
        return Ok(PullOutcome::NoData);
    };

    if report.imported == 0 {
        info!("[sync] none of {} table rows were valid; keeping local store", report.skipped);
        return Ok(PullOutcome::NothingValid(report));
    }

    info!("[sync] pulled {} features into {} layers ({} rows skipped)", report.imported, report.layers, report.skipped);
    *store = rebuilt;
    Ok(PullOutcome::Replaced(report))
}

/// Append one feature as a single row, writing the header first if the table is empty.
/// Duplicate ids are not detected: appending the same feature twice yields two rows.
pub fn append_one(table: &mut dyn ExternalTable, feature: &Feature, color: &str) -> Result<(), SyncError> {
    if table.row_count().map_err(SyncError::Read)? == 0 {
        table.append_row(&header()).map_err(SyncError::Write)?;
    }
    table.append_row(&feature.to_record(color)).map_err(SyncError::Write)
}
