use thiserror::Error;

/// Failure reaching or writing an external table.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("table unavailable: {0}")]
    Unavailable(String),

    #[error("table I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("table encoding failed: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// A fixed-column tabular backend (typically a shared spreadsheet).
///
/// The adapter only relies on whole-table reads, whole-table overwrites and
/// single-row appends. No versioning or conflict detection is assumed:
/// concurrent writers overwrite each other.
pub trait ExternalTable {
    /// Every row, header included, in table order.
    fn read_all_rows(&mut self) -> Result<Vec<Vec<String>>, TableError>;

    /// Replace the whole table content with `rows`.
    fn overwrite_all(&mut self, rows: &[Vec<String>]) -> Result<(), TableError>;

    /// Add one row at the end of the table.
    fn append_row(&mut self, row: &[String]) -> Result<(), TableError>;

    /// Number of rows, header included. Override when it can be found without a full read.
    fn row_count(&mut self) -> Result<usize, TableError> {
        Ok(self.read_all_rows()?.len())
    }
}

/// In-process table, useful for tests and for callers that buffer rows themselves.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryTable {
    rows: Vec<Vec<String>>,
}

impl MemoryTable {
    pub fn new() -> Self { Self::default() }

    pub fn from_rows(rows: Vec<Vec<String>>) -> Self { Self { rows } }

    pub fn rows(&self) -> &[Vec<String>] { &self.rows }
}

impl ExternalTable for MemoryTable {
    fn read_all_rows(&mut self) -> Result<Vec<Vec<String>>, TableError> {
        Ok(self.rows.clone())
    }

    fn overwrite_all(&mut self, rows: &[Vec<String>]) -> Result<(), TableError> {
        self.rows = rows.to_vec();
        Ok(())
    }

    fn append_row(&mut self, row: &[String]) -> Result<(), TableError> {
        self.rows.push(row.to_vec());
        Ok(())
    }

    fn row_count(&mut self) -> Result<usize, TableError> {
        Ok(self.rows.len())
    }
}
