//! Data models for colors, classifications, and color datasets.
//!
//! This module contains the core data structures used throughout the crate.
//! Models are independent of parsing, classification, and I/O.

pub mod family;
pub mod hsl;
pub mod record;
pub mod rgb;

// Re-export all model types
pub use family::{ColorFamily, MainFamily};
pub use hsl::Hsl;
pub use record::{ColorRecord, Column, Dataset};
pub use rgb::RgbColor;
