//! CSV reading operations.

use std::io::Read;

use anyhow::{Context, Result};

/// Read every record as raw strings. Rows may have differing lengths;
/// no row is treated as a header.
pub fn read_raw_rows<R: Read>(reader: R) -> Result<Vec<Vec<String>>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut rows = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("[io::csv::read] Failed to read record {i}"))?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::read_raw_rows;

    #[test]
    fn ragged_rows_are_kept() {
        let rows = read_raw_rows("a,b,c\n1,2\n\"x,y\",z,w,v\n".as_bytes()).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1], vec!["1", "2"]);
        assert_eq!(rows[2][0], "x,y");
        assert_eq!(rows[2].len(), 4);
    }
}
