//! Writing classified datasets to spreadsheet files.
//!
//! XLSX is the primary format: one sheet, a header row, one row per record,
//! and every resolvable HEX cell filled with the color it names. CSV carries
//! the same table without styling.

pub mod csv;
pub mod xlsx;

use anyhow::Result;
use std::path::Path;

use crate::constants::DEFAULT_SHEET_NAME;
use crate::models::Dataset;

pub use self::csv::{export_csv, write_csv};
pub use xlsx::{export_xlsx, write_xlsx};

/// Presentation settings for XLSX output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    /// Worksheet title
    pub sheet_name: String,
    /// Fill HEX cells with their color
    pub style_hex_cells: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            sheet_name: DEFAULT_SHEET_NAME.to_string(),
            style_hex_cells: true,
        }
    }
}

/// Output file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Office Open XML workbook
    Xlsx,
    /// Comma-separated values
    Csv,
}

impl OutputFormat {
    /// Picks the format from a file extension (`.csv` or `.xlsx`).
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match ext.as_str() {
            "xlsx" => Ok(Self::Xlsx),
            "csv" => Ok(Self::Csv),
            _ => anyhow::bail!(
                "Unsupported output file '{}'. Expected .xlsx or .csv",
                path.display()
            ),
        }
    }
}

/// Writes `dataset` to `path`, choosing the format from its extension.
pub fn write_dataset(dataset: &Dataset, path: &Path, options: &ExportOptions) -> Result<()> {
    match OutputFormat::from_path(path)? {
        OutputFormat::Xlsx => write_xlsx(dataset, path, options),
        OutputFormat::Csv => write_csv(dataset, path),
    }
}
