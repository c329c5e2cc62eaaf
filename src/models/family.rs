//! Color family taxonomy: main families and their sub-family vocabularies.

use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Top-level color family.
///
/// The set is closed. `Unknown` is a terminal fallback that the classifier
/// only returns if a hue escapes every hue band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MainFamily {
    /// Hue 355-10 (wrapping)
    Red,
    /// Hue 10-40
    Orange,
    /// Hue 40-65
    Yellow,
    /// Hue 65-160
    Green,
    /// Hue 160-190
    AquaTeal,
    /// Hue 190-260
    Blue,
    /// Hue 260-330
    Purple,
    /// Hue 330-355
    Pink,
    /// Muted warm hues at medium lightness
    Brown,
    /// Low saturation, medium lightness
    Gray,
    /// Low saturation, very dark
    Black,
    /// Low saturation, very light
    White,
    /// Defensive fallback
    Unknown,
}

impl MainFamily {
    /// Every family in canonical display order (chromatic first, then neutrals).
    pub const ALL: [Self; 13] = [
        Self::Red,
        Self::Orange,
        Self::Yellow,
        Self::Green,
        Self::AquaTeal,
        Self::Blue,
        Self::Purple,
        Self::Pink,
        Self::Brown,
        Self::Gray,
        Self::Black,
        Self::White,
        Self::Unknown,
    ];

    /// Display name, as written to the `ColorFamily` column.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Red => "Red",
            Self::Orange => "Orange",
            Self::Yellow => "Yellow",
            Self::Green => "Green",
            Self::AquaTeal => "Aqua/Teal",
            Self::Blue => "Blue",
            Self::Purple => "Purple",
            Self::Pink => "Pink",
            Self::Brown => "Brown",
            Self::Gray => "Gray",
            Self::Black => "Black",
            Self::White => "White",
            Self::Unknown => "Unknown",
        }
    }

    /// The fixed vocabulary of sub-family labels this family can produce.
    ///
    /// Note that "Teal" (Green) and "Turquoise" (Aqua/Teal and Blue) appear
    /// under more than one family.
    #[must_use]
    pub const fn sub_families(self) -> &'static [&'static str] {
        match self {
            Self::Red => &[
                "Maroon", "Ruby", "Burgundy", "Scarlet", "Crimson", "Cherry", "Cardinal",
            ],
            Self::Orange => &[
                "Coral",
                "Vermilion",
                "Amber",
                "Terracotta",
                "Peach",
                "Tangerine",
                "Rust",
            ],
            Self::Yellow => &["Ochre", "Gold", "Honey", "Mustard", "Lemon", "Canary"],
            Self::Green => &[
                "Chartreuse",
                "Teal",
                "Forest",
                "Sage",
                "Mint",
                "Olive",
                "Hunter",
                "Lime",
                "Emerald",
            ],
            Self::AquaTeal => &["Deep Teal", "Light Aqua", "Muted Teal", "Turquoise"],
            Self::Blue => &[
                "Turquoise",
                "Indigo",
                "Ultramarine",
                "Navy",
                "Sky",
                "Azure",
                "Cobalt",
                "Royal",
            ],
            Self::Purple => &[
                "Violet",
                "Periwinkle",
                "Magenta",
                "Eggplant",
                "Lavender",
                "Lilac",
                "Amethyst",
                "Mauve",
            ],
            Self::Pink => &[
                "Light Pink",
                "Hot Pink",
                "Deep Pink",
                "Blush",
                "Rose",
                "Magenta",
                "Fuchsia",
            ],
            Self::Brown => &["Chocolate", "Tan", "Caramel", "Sienna", "Coffee", "Mocha"],
            Self::Gray => &["Charcoal", "Silver", "Ash", "Slate", "Graphite"],
            Self::Black => &["Black"],
            Self::White => &["White"],
            Self::Unknown => &["Unknown"],
        }
    }

    /// Position in [`MainFamily::ALL`], used for stable grouping order.
    #[must_use]
    pub fn display_rank(self) -> usize {
        Self::ALL
            .iter()
            .position(|family| *family == self)
            .unwrap_or(Self::ALL.len())
    }
}

impl fmt::Display for MainFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MainFamily {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|family| family.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| anyhow::anyhow!("Unknown color family '{trimmed}'"))
    }
}

impl Serialize for MainFamily {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// Classification result: a main family plus a descriptive sub-family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ColorFamily {
    /// Top-level family (e.g. Blue)
    pub main: MainFamily,
    /// Sub-family label drawn from `main.sub_families()` (e.g. "Navy")
    pub sub: &'static str,
}

impl ColorFamily {
    /// Creates a classification result.
    #[must_use]
    pub const fn new(main: MainFamily, sub: &'static str) -> Self {
        Self { main, sub }
    }

    /// The defensive fallback for a hue outside every band.
    pub const UNKNOWN: Self = Self::new(MainFamily::Unknown, "Unknown");
}

impl fmt::Display for ColorFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.main, self.sub)
    }
}
