//! Detailed analysis of a single color for inspection and tooling.

use serde::Serialize;

use super::{classify, matching_rule};
use crate::models::{ColorFamily, Hsl, RgbColor};
use crate::parser::color::hex_to_rgb;

/// Saturation at or below which a color reads as grayish.
const GRAYISH_MAX_SATURATION: u8 = 15;
/// Lightness at or below which a color reads as dark.
const DARK_MAX_LIGHTNESS: u8 = 30;
/// Saturation at or above which a color reads as vibrant.
const VIBRANT_MIN_SATURATION: u8 = 70;

/// Everything the engine knows about one color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColorAnalysis {
    /// Canonical "#RRGGBB" form
    pub hex: String,
    /// Parsed channels
    pub rgb: RgbColor,
    /// Derived HSL
    pub hsl: Hsl,
    /// Classification result
    pub family: ColorFamily,
    /// Name of the decision rule that produced `family`
    pub rule: &'static str,
    /// Low saturation
    pub is_grayish: bool,
    /// Low lightness
    pub is_dark: bool,
    /// High saturation
    pub is_vibrant: bool,
}

/// Analyzes an RGB color.
#[must_use]
pub fn analyze(rgb: RgbColor) -> ColorAnalysis {
    let hsl = rgb.to_hsl();
    ColorAnalysis {
        hex: rgb.to_hex(),
        rgb,
        hsl,
        family: classify(&hsl),
        rule: matching_rule(&hsl).map_or("fallback-unknown", |rule| rule.name()),
        is_grayish: hsl.saturation() <= GRAYISH_MAX_SATURATION,
        is_dark: hsl.lightness() <= DARK_MAX_LIGHTNESS,
        is_vibrant: hsl.saturation() >= VIBRANT_MIN_SATURATION,
    }
}

/// Analyzes a list of hex strings, in order. Invalid entries analyze as black.
#[must_use]
pub fn batch_analyze<S: AsRef<str>>(hex_colors: &[S]) -> Vec<ColorAnalysis> {
    hex_colors
        .iter()
        .map(|hex| analyze(hex_to_rgb(hex.as_ref())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MainFamily;

    #[test]
    fn test_analyze_flags() {
        let navy = analyze(RgbColor::new(0, 0, 128));
        assert_eq!(navy.hex, "#000080");
        assert_eq!(navy.family.main, MainFamily::Blue);
        assert_eq!(navy.rule, "band-blue");
        assert!(navy.is_dark);
        assert!(navy.is_vibrant);
        assert!(!navy.is_grayish);

        let gray = analyze(RgbColor::new(200, 200, 200));
        assert!(gray.is_grayish);
        assert!(!gray.is_dark);
        assert!(!gray.is_vibrant);
        assert_eq!(gray.rule, "neutral-gray");
    }

    #[test]
    fn test_batch_analyze_preserves_order() {
        let results = batch_analyze(&["#fff", "000000", "nope"]);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].family.main, MainFamily::White);
        assert_eq!(results[1].family.main, MainFamily::Black);
        assert_eq!(results[2].rgb, RgbColor::BLACK);
    }
}
