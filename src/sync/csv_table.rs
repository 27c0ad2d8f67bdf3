use std::{
    fs::{File, OpenOptions},
    io::{Read, Seek, SeekFrom, Write},
    path::{Path, PathBuf},
};

use tracing::debug;

use crate::{common::write_atomic, io::csv::{read_raw_rows, write_raw_rows}};

use super::{ExternalTable, TableError};

/// External table backed by a local CSV file.
///
/// A missing file reads as an empty table. Overwrites go through a temp file
/// and a rename; appends write straight to the end of the file, first
/// terminating a last line that lacks its newline.
#[derive(Debug, Clone)]
pub struct CsvFileTable {
    path: PathBuf,
}

impl CsvFileTable {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path { &self.path }
}

impl ExternalTable for CsvFileTable {
    fn read_all_rows(&mut self) -> Result<Vec<Vec<String>>, TableError> {
        if !self.path.exists() {
            debug!("[sync::csv_table] {} does not exist yet; reading as empty", self.path.display());
            return Ok(Vec::new());
        }
        let file = File::open(&self.path)?;
        Ok(read_raw_rows(file)?)
    }

    fn overwrite_all(&mut self, rows: &[Vec<String>]) -> Result<(), TableError> {
        let bytes = write_raw_rows(rows)?;
        write_atomic(&self.path, &bytes, true)?;
        Ok(())
    }

    fn append_row(&mut self, row: &[String]) -> Result<(), TableError> {
        let mut file = OpenOptions::new().create(true).read(true).append(true).open(&self.path)?;
        if file.metadata()?.len() > 0 {
            let mut last = [0u8; 1];
            file.seek(SeekFrom::End(-1))?;
            file.read_exact(&mut last)?;
            if last[0] != b'\n' {
                file.write_all(b"\n")?;
            }
        }
        let mut writer = csv::WriterBuilder::new().flexible(true).from_writer(file);
        writer.write_record(row)?;
        writer.flush()?;
        Ok(())
    }

    /// Rows holding at least one non-blank cell.
    fn row_count(&mut self) -> Result<usize, TableError> {
        let rows = self.read_all_rows()?;
        Ok(rows.iter().filter(|row| row.iter().any(|cell| !cell.trim().is_empty())).count())
    }
}
