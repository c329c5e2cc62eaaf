//! Loading color datasets from CSV files and spreadsheets.
//!
//! The first row is the header. `Name`, `HEX`, `RGB`, `ColorFamily`, and
//! `ColorSubFamily` are recognized case-insensitively; other columns pass
//! through with their values untouched; repeated headers are suffixed so no
//! column is lost. At least one of `HEX` or `RGB` must be present. Any
//! failure aborts the load, so a dataset is either complete or not returned
//! at all.

use anyhow::{Context, Result};
use calamine::{open_workbook_auto, Data, Reader};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::info;

use crate::models::{ColorRecord, Column, Dataset};

/// Supported input file kinds, detected from the extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// Comma-separated values
    Csv,
    /// Excel or OpenDocument workbook (first sheet is read)
    Workbook,
}

impl InputKind {
    /// Detects the input kind from a file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match ext.as_str() {
            "csv" => Ok(Self::Csv),
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Ok(Self::Workbook),
            _ => anyhow::bail!(
                "Unsupported input file '{}'. Expected .csv, .xlsx, .xls, or .ods",
                path.display()
            ),
        }
    }
}

/// Loads a dataset from a `.csv` or spreadsheet file.
pub fn load_dataset(path: &Path) -> Result<Dataset> {
    let dataset = match InputKind::from_path(path)? {
        InputKind::Csv => {
            let file = File::open(path)
                .context(format!("Failed to open input file: {}", path.display()))?;
            read_csv(file)
        }
        InputKind::Workbook => read_workbook(path),
    }
    .context(format!("Failed to load dataset from {}", path.display()))?;

    info!(
        "Loaded {} records from {}",
        dataset.len(),
        path.display()
    );
    Ok(dataset)
}

/// Reads a dataset from CSV text.
pub fn read_csv<R: Read>(reader: R) -> Result<Dataset> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()
        .context("Failed to read CSV header row")?
        .iter()
        .map(str::to_string)
        .collect();

    let mut rows = Vec::new();
    for (index, row) in csv_reader.records().enumerate() {
        let row = row.context(format!("Malformed CSV row {}", index + 2))?;
        rows.push(row.iter().map(str::to_string).collect());
    }

    build_dataset(&headers, rows)
}

/// Reads the first sheet of a workbook.
pub fn read_workbook(path: &Path) -> Result<Dataset> {
    let mut workbook = open_workbook_auto(path)
        .context(format!("Failed to open workbook: {}", path.display()))?;

    let range = workbook
        .worksheet_range_at(0)
        .context("Workbook contains no sheets")?
        .context("Failed to read first sheet")?;

    let mut rows = range.rows();
    let headers: Vec<String> = rows
        .next()
        .context("Sheet is empty, expected a header row")?
        .iter()
        .map(cell_text)
        .collect();

    let rows: Vec<Vec<String>> = rows
        .map(|row| row.iter().map(cell_text).collect::<Vec<String>>())
        .collect();

    build_dataset(&headers, rows)
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Maps a header row to columns, keeping every column distinct.
///
/// A header that repeats an earlier column gets a numeric suffix (`Tag`,
/// `Tag.1`, `Tag.2`) and passes through as an ordinary column, so a second
/// `HEX` column never replaces the first. Blank headers become
/// `Unnamed: <index>`.
fn unique_columns(headers: &[String]) -> Vec<Column> {
    let mut columns: Vec<Column> = Vec::with_capacity(headers.len());
    for (index, header) in headers.iter().enumerate() {
        let header = header.trim();
        let base = if header.is_empty() {
            format!("Unnamed: {index}")
        } else {
            header.to_string()
        };

        let mut column = Column::from_header(&base);
        let mut suffix = 1;
        while columns.contains(&column) {
            column = Column::Other(format!("{base}.{suffix}"));
            suffix += 1;
        }
        columns.push(column);
    }
    columns
}

/// Builds a dataset from a header row and data rows of cell text.
///
/// Every data row becomes a record, including rows with no values at all;
/// those classify as black with a warning. Short rows are padded with absent
/// values and cells beyond the header are ignored.
pub fn build_dataset(headers: &[String], rows: Vec<Vec<String>>) -> Result<Dataset> {
    let columns = unique_columns(headers);

    let dataset_has_color = columns
        .iter()
        .any(|c| matches!(c, Column::Hex | Column::Rgb));
    if !dataset_has_color {
        anyhow::bail!(
            "Input must contain a HEX or RGB column (found: {})",
            headers.join(", ")
        );
    }

    let records = rows
        .into_iter()
        .map(|row| {
            let mut record = ColorRecord::new();
            for (column, value) in columns.iter().zip(row) {
                record.set_value(column, value);
            }
            record
        })
        .collect();

    Ok(Dataset::new(columns, records))
}
