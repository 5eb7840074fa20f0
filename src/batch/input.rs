//! Batch input file ingestion

use std::path::Path;

use anyhow::{Context, Result};
use csv::StringRecord;

/// Read a batch input file into its data rows, dropping the header row.
///
/// The reader is strict: ragged rows and unbalanced quoting are parse
/// errors. Column meaning is the caller's business.
pub fn read_batch_file(path: &Path) -> Result<Vec<StringRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("Failed to open batch file: {}", path.display()))?;

    reader
        .records()
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("Failed to parse batch file: {}", path.display()))
}

/// Fetch one positional column, failing with the 1-based data row number
pub(crate) fn column(record: &StringRecord, row: usize, index: usize) -> Result<String> {
    record.get(index).map(str::to_string).ok_or_else(|| {
        anyhow::anyhow!(
            "Row {}: expected at least 5 columns, got {}",
            row,
            record.len()
        )
    })
}
