//! Parsing of color strings and tabular color datasets.
//!
//! This module turns free-form color text into RGB and reads CSV and
//! spreadsheet files into a [`Dataset`](crate::models::Dataset).

pub mod color;
pub mod dataset;

// Re-export commonly used functions
pub use color::{detect_format, hex_to_rgb, parse_color, try_parse_color, ColorFormat};
pub use dataset::load_dataset;
