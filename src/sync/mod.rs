//! Synchronization of a Layer Store with an external fixed-column table.
//!
//! The table is addressed through the [`ExternalTable`] trait. Rows follow
//! [`crate::feature::record::COLUMNS`]; the header row is written whenever the
//! adapter creates table content from scratch.

mod adapter;
mod csv_table;
mod rows;
mod table;

pub use adapter::{append_one, pull_replace, push_replace, PullOutcome, SyncError};
pub use csv_table::CsvFileTable;
pub use rows::{export_rows, import_rows, ImportReport};
pub use table::{ExternalTable, MemoryTable, TableError};
