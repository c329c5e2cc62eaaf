//! Parsing of textual color representations into RGB.
//!
//! Accepted grammar:
//!
//! - hex: `#?[0-9a-fA-F]{3}` or `#?[0-9a-fA-F]{6}`
//! - rgb: `rgb(<int>, <int>, <int>)`, case-insensitive, any whitespace
//!   around the commas and parentheses
//!
//! [`parse_color`] and [`hex_to_rgb`] are total: unrecognized input logs a
//! warning and yields black. Use [`try_parse_color`] to get the reason instead.

use anyhow::{Context, Result};
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::OnceLock;
use tracing::warn;

use crate::models::RgbColor;

/// Detected textual color format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorFormat {
    /// 3 or 6 hex digits, optionally prefixed with `#`
    Hex,
    /// `rgb(r, g, b)`
    Rgb,
    /// Neither
    Unknown,
}

impl fmt::Display for ColorFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hex => write!(f, "hex"),
            Self::Rgb => write!(f, "rgb"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

fn bare_hex_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").expect("hex pattern is valid")
    })
}

fn rgb_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)^rgb\(\s*(\d+)\s*,\s*(\d+)\s*,\s*(\d+)\s*\)$").expect("rgb pattern is valid")
    })
}

/// Detects which grammar a color string matches, without parsing it.
///
/// An `rgb(...)` string with a component above 255 is `Unknown`, the same
/// input [`try_parse_color`] rejects.
///
/// # Examples
///
/// ```
/// use colorfamily::parser::color::{detect_format, ColorFormat};
///
/// assert_eq!(detect_format("#FF5733"), ColorFormat::Hex);
/// assert_eq!(detect_format("RGB(1, 2, 3)"), ColorFormat::Rgb);
/// assert_eq!(detect_format("teal"), ColorFormat::Unknown);
/// ```
#[must_use]
pub fn detect_format(input: &str) -> ColorFormat {
    let cleaned = input.trim();
    let bare = cleaned.strip_prefix('#').unwrap_or(cleaned);

    if bare_hex_regex().is_match(bare) {
        ColorFormat::Hex
    } else if rgb_regex()
        .captures(cleaned)
        .is_some_and(|c| (1..=3).all(|i| c[i].parse::<u8>().is_ok()))
    {
        ColorFormat::Rgb
    } else {
        ColorFormat::Unknown
    }
}

/// Parses a color string, reporting why it could not be recognized.
///
/// Formats are tried in order: `#`-prefixed hex, bare hex, `rgb(...)`.
/// RGB components are taken as written; a component above 255 does not fit
/// the RGB model and is rejected.
///
/// # Errors
///
/// Returns an error if the input matches no supported grammar.
pub fn try_parse_color(input: &str) -> Result<RgbColor> {
    let cleaned = input.trim();

    if cleaned.starts_with('#') || bare_hex_regex().is_match(cleaned) {
        return RgbColor::from_hex(cleaned);
    }

    if let Some(captures) = rgb_regex().captures(cleaned) {
        let channel = |index: usize, name: &str| -> Result<u8> {
            captures[index].parse::<u8>().context(format!(
                "{name} channel '{}' in '{cleaned}' is outside 0-255",
                &captures[index]
            ))
        };
        return Ok(RgbColor::new(
            channel(1, "Red")?,
            channel(2, "Green")?,
            channel(3, "Blue")?,
        ));
    }

    anyhow::bail!("Unknown color format: '{cleaned}'")
}

/// Parses a color string, substituting black for anything unrecognized.
///
/// # Examples
///
/// ```
/// use colorfamily::models::RgbColor;
/// use colorfamily::parser::color::parse_color;
///
/// assert_eq!(parse_color("#f00"), RgbColor::new(255, 0, 0));
/// assert_eq!(parse_color("rgb(135, 206, 235)"), RgbColor::new(135, 206, 235));
/// assert_eq!(parse_color("notacolor"), RgbColor::new(0, 0, 0));
/// ```
#[must_use]
pub fn parse_color(input: &str) -> RgbColor {
    try_parse_color(input).unwrap_or_else(|e| {
        warn!("{e:#}. Defaulting to black.");
        RgbColor::BLACK
    })
}

/// Parses a field already known to hold hex, substituting black on failure.
///
/// Uses the same expansion rules as [`parse_color`]'s hex branch.
#[must_use]
pub fn hex_to_rgb(hex: &str) -> RgbColor {
    RgbColor::from_hex(hex).unwrap_or_else(|e| {
        warn!("{e:#}. Defaulting to black.");
        RgbColor::BLACK
    })
}
