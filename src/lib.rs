//! Color family classification library.
//!
//! Maps colors given as hex or `rgb(...)` strings to one of twelve main
//! families (Red, Orange, ..., Black, White) and a finer sub-family such as
//! "Crimson" or "Navy". Classification works on HSL through a fixed, ordered
//! rule table. On top of the classifier sit a batch pipeline for tabular
//! datasets, CSV/spreadsheet loading, and XLSX/CSV export with HEX cells
//! filled in the color they name.

pub mod classifier;
pub mod cli;
pub mod config;
pub mod constants;
pub mod export;
pub mod models;
pub mod parser;
pub mod services;

pub use classifier::{classify, classify_rgb};
pub use models::{ColorFamily, Dataset, Hsl, MainFamily, RgbColor};
pub use parser::{hex_to_rgb, parse_color};
