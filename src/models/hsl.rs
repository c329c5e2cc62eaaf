//! HSL (Hue, Saturation, Lightness) color values.

use serde::Serialize;
use std::fmt;

/// A color in the HSL cylinder, in whole degrees and percent.
///
/// Values are only produced by [`RgbColor::to_hsl`](super::RgbColor::to_hsl),
/// so the invariants below always hold:
///
/// - `hue` is in `[0, 360)`
/// - `saturation` and `lightness` are in `[0, 100]`
/// - an achromatic color has `hue == 0` and `saturation == 0`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Hsl {
    hue: u16,
    saturation: u8,
    lightness: u8,
}

impl Hsl {
    /// Builds an HSL value. Callers outside the crate go through `RgbColor::to_hsl`.
    pub(crate) const fn new(hue: u16, saturation: u8, lightness: u8) -> Self {
        Self {
            hue,
            saturation,
            lightness,
        }
    }

    /// Hue angle in degrees, `0..360`.
    #[must_use]
    pub const fn hue(&self) -> u16 {
        self.hue
    }

    /// Saturation in percent, `0..=100`.
    #[must_use]
    pub const fn saturation(&self) -> u8 {
        self.saturation
    }

    /// Lightness in percent, `0..=100`.
    #[must_use]
    pub const fn lightness(&self) -> u8 {
        self.lightness
    }
}

impl fmt::Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hsl({}, {}%, {}%)",
            self.hue, self.saturation, self.lightness
        )
    }
}
