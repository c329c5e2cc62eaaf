//! CSV export.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::info;

use crate::models::Dataset;

/// Serializes `dataset` as CSV: a header row, then one row per record.
///
/// Absent values are written as empty fields.
pub fn export_csv(dataset: &Dataset) -> Result<Vec<u8>> {
    let columns = dataset.output_columns();
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer
        .write_record(columns.iter().map(|c| c.header()))
        .context("Failed to write CSV header")?;

    for (index, record) in dataset.records().iter().enumerate() {
        writer
            .write_record(columns.iter().map(|c| record.value(c).unwrap_or("")))
            .context(format!("Failed to write CSV row {}", index + 1))?;
    }

    writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to flush CSV output: {e}"))
}

/// Writes `dataset` as a CSV file.
pub fn write_csv(dataset: &Dataset, path: &Path) -> Result<()> {
    let bytes = export_csv(dataset)?;
    fs::write(path, bytes).context(format!("Failed to write CSV file: {}", path.display()))?;
    info!("Wrote {} records to {}", dataset.len(), path.display());
    Ok(())
}
