//! Sub-family decision tables, one per main family.
//!
//! Each table is evaluated top to bottom and the first matching rule wins.
//! The last rule of every table matches unconditionally.

use crate::models::Hsl;

/// One row of a sub-family table.
#[derive(Clone, Copy)]
pub struct ShadeRule {
    applies: fn(&Hsl) -> bool,
    label: &'static str,
}

impl ShadeRule {
    const fn new(label: &'static str, applies: fn(&Hsl) -> bool) -> Self {
        Self { applies, label }
    }

    /// Whether this row matches.
    #[must_use]
    pub fn matches(&self, hsl: &Hsl) -> bool {
        (self.applies)(hsl)
    }

    /// The sub-family this row produces.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        self.label
    }
}

impl std::fmt::Debug for ShadeRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShadeRule").field("label", &self.label).finish()
    }
}

/// Resolves a sub-family from a table.
///
/// Tables always end in a catch-all, so the fallback is never reached.
pub fn resolve(table: &[ShadeRule], hsl: &Hsl) -> &'static str {
    table
        .iter()
        .find(|rule| rule.matches(hsl))
        .map_or("Unknown", ShadeRule::label)
}

const fn any(_: &Hsl) -> bool {
    true
}

fn near_red_core(hsl: &Hsl) -> bool {
    hsl.hue() < 5 || hsl.hue() >= 355
}

/// Black sub-families.
pub const BLACK: &[ShadeRule] = &[ShadeRule::new("Black", any)];

/// White sub-families.
pub const WHITE: &[ShadeRule] = &[ShadeRule::new("White", any)];

/// Gray sub-families.
pub const GRAY: &[ShadeRule] = &[
    ShadeRule::new("Charcoal", |c| c.lightness() < 20),
    ShadeRule::new("Silver", |c| c.lightness() > 80),
    ShadeRule::new("Ash", |c| c.lightness() > 60),
    ShadeRule::new("Slate", |c| c.lightness() > 40),
    ShadeRule::new("Graphite", any),
];

/// Brown sub-families.
pub const BROWN: &[ShadeRule] = &[
    ShadeRule::new("Chocolate", |c| c.lightness() < 25),
    ShadeRule::new("Tan", |c| c.lightness() > 45 && c.saturation() < 30),
    ShadeRule::new("Caramel", |c| c.lightness() > 45),
    ShadeRule::new("Sienna", |c| c.hue() > 25),
    ShadeRule::new("Coffee", |c| c.saturation() > 40),
    ShadeRule::new("Mocha", any),
];

/// Red sub-families.
pub const RED: &[ShadeRule] = &[
    ShadeRule::new("Maroon", |c| c.lightness() < 30),
    ShadeRule::new("Ruby", |c| c.lightness() < 45 && c.saturation() > 75),
    ShadeRule::new("Burgundy", |c| c.lightness() < 45),
    ShadeRule::new("Scarlet", |c| near_red_core(c) && c.lightness() > 60),
    ShadeRule::new("Crimson", near_red_core),
    ShadeRule::new("Cherry", |c| c.lightness() > 60),
    ShadeRule::new("Cardinal", any),
];

/// Orange sub-families.
pub const ORANGE: &[ShadeRule] = &[
    ShadeRule::new("Coral", |c| c.hue() < 20 && c.lightness() < 50),
    ShadeRule::new("Vermilion", |c| c.hue() < 20),
    ShadeRule::new("Amber", |c| c.hue() > 30),
    ShadeRule::new("Terracotta", |c| c.saturation() < 60),
    ShadeRule::new("Peach", |c| c.lightness() > 70),
    ShadeRule::new("Tangerine", |c| c.lightness() > 60),
    ShadeRule::new("Rust", any),
];

/// Yellow sub-families.
pub const YELLOW: &[ShadeRule] = &[
    ShadeRule::new("Ochre", |c| c.hue() < 50 && c.lightness() < 50),
    ShadeRule::new("Gold", |c| c.hue() < 50 && c.saturation() > 80),
    ShadeRule::new("Honey", |c| c.hue() < 50),
    ShadeRule::new("Mustard", |c| c.saturation() < 50),
    ShadeRule::new("Lemon", |c| c.lightness() > 80),
    ShadeRule::new("Canary", any),
];

/// Green sub-families.
pub const GREEN: &[ShadeRule] = &[
    ShadeRule::new("Chartreuse", |c| c.hue() < 80),
    ShadeRule::new("Teal", |c| c.hue() > 140),
    ShadeRule::new("Forest", |c| c.hue() > 100 && c.lightness() < 40),
    ShadeRule::new("Sage", |c| c.lightness() > 70 && c.saturation() < 50),
    ShadeRule::new("Mint", |c| c.lightness() > 70),
    ShadeRule::new("Olive", |c| c.saturation() < 50),
    ShadeRule::new("Hunter", |c| c.lightness() < 40),
    ShadeRule::new("Lime", |c| c.hue() < 100),
    ShadeRule::new("Emerald", any),
];

/// Aqua/Teal sub-families.
pub const AQUA_TEAL: &[ShadeRule] = &[
    ShadeRule::new("Deep Teal", |c| c.lightness() < 30),
    ShadeRule::new("Light Aqua", |c| c.lightness() > 70),
    ShadeRule::new("Muted Teal", |c| c.saturation() < 40),
    ShadeRule::new("Turquoise", any),
];

/// Blue sub-families.
pub const BLUE: &[ShadeRule] = &[
    ShadeRule::new("Turquoise", |c| c.hue() < 205),
    ShadeRule::new("Indigo", |c| c.hue() > 225 && c.lightness() < 50),
    ShadeRule::new("Ultramarine", |c| c.hue() > 225),
    ShadeRule::new("Navy", |c| c.lightness() < 30),
    ShadeRule::new("Sky", |c| c.lightness() > 70),
    ShadeRule::new("Azure", |c| c.lightness() > 50 && c.saturation() > 60),
    ShadeRule::new("Cobalt", |c| c.saturation() > 70),
    ShadeRule::new("Royal", any),
];

/// Purple sub-families.
pub const PURPLE: &[ShadeRule] = &[
    ShadeRule::new("Violet", |c| c.hue() < 280 && c.lightness() < 50),
    ShadeRule::new("Periwinkle", |c| c.hue() < 280),
    ShadeRule::new("Magenta", |c| c.hue() > 300),
    ShadeRule::new("Eggplant", |c| c.lightness() < 30),
    ShadeRule::new("Lavender", |c| c.lightness() > 80),
    ShadeRule::new("Lilac", |c| c.lightness() > 65),
    ShadeRule::new("Amethyst", |c| c.saturation() > 70),
    ShadeRule::new("Mauve", any),
];

/// Pink sub-families.
pub const PINK: &[ShadeRule] = &[
    ShadeRule::new("Light Pink", |c| c.lightness() > 80),
    ShadeRule::new("Hot Pink", |c| c.saturation() > 80),
    ShadeRule::new("Deep Pink", |c| c.lightness() < 50),
    ShadeRule::new("Blush", |c| c.saturation() < 60),
    ShadeRule::new("Rose", |c| c.hue() > 345),
    ShadeRule::new("Magenta", |c| c.hue() < 335),
    ShadeRule::new("Fuchsia", any),
];

#[cfg(test)]
mod tests {
    use super::*;

    fn shade(table: &[ShadeRule], h: u16, s: u8, l: u8) -> &'static str {
        resolve(table, &Hsl::new(h, s, l))
    }

    #[test]
    fn test_every_table_ends_in_catch_all() {
        for table in [
            BLACK, WHITE, GRAY, BROWN, RED, ORANGE, YELLOW, GREEN, AQUA_TEAL, BLUE, PURPLE, PINK,
        ] {
            let last = table.last().unwrap();
            for (h, s, l) in [(0, 0, 0), (359, 100, 100), (180, 50, 50)] {
                assert!(last.matches(&Hsl::new(h, s, l)), "{last:?} is not a catch-all");
            }
        }
    }

    #[test]
    fn test_gray_tones() {
        assert_eq!(shade(GRAY, 0, 0, 19), "Charcoal");
        assert_eq!(shade(GRAY, 0, 0, 20), "Graphite");
        assert_eq!(shade(GRAY, 0, 0, 40), "Graphite");
        assert_eq!(shade(GRAY, 0, 0, 41), "Slate");
        assert_eq!(shade(GRAY, 0, 0, 61), "Ash");
        assert_eq!(shade(GRAY, 0, 0, 81), "Silver");
    }

    #[test]
    fn test_brown_shades() {
        assert_eq!(shade(BROWN, 20, 40, 20), "Chocolate");
        assert_eq!(shade(BROWN, 20, 29, 50), "Tan");
        assert_eq!(shade(BROWN, 20, 30, 50), "Caramel");
        assert_eq!(shade(BROWN, 26, 40, 35), "Sienna");
        assert_eq!(shade(BROWN, 25, 41, 35), "Coffee");
        assert_eq!(shade(BROWN, 20, 40, 35), "Mocha");
    }

    #[test]
    fn test_red_shades() {
        assert_eq!(shade(RED, 0, 90, 29), "Maroon");
        assert_eq!(shade(RED, 0, 76, 40), "Ruby");
        assert_eq!(shade(RED, 0, 75, 40), "Burgundy");
        assert_eq!(shade(RED, 357, 90, 61), "Scarlet");
        assert_eq!(shade(RED, 4, 90, 50), "Crimson");
        assert_eq!(shade(RED, 7, 90, 61), "Cherry");
        assert_eq!(shade(RED, 7, 90, 50), "Cardinal");
    }

    #[test]
    fn test_orange_shades() {
        assert_eq!(shade(ORANGE, 15, 90, 49), "Coral");
        assert_eq!(shade(ORANGE, 15, 90, 50), "Vermilion");
        assert_eq!(shade(ORANGE, 31, 90, 50), "Amber");
        assert_eq!(shade(ORANGE, 25, 59, 50), "Terracotta");
        assert_eq!(shade(ORANGE, 25, 90, 71), "Peach");
        assert_eq!(shade(ORANGE, 25, 90, 61), "Tangerine");
        assert_eq!(shade(ORANGE, 25, 90, 50), "Rust");
    }

    #[test]
    fn test_yellow_shades() {
        assert_eq!(shade(YELLOW, 45, 90, 49), "Ochre");
        assert_eq!(shade(YELLOW, 45, 81, 50), "Gold");
        assert_eq!(shade(YELLOW, 45, 80, 50), "Honey");
        assert_eq!(shade(YELLOW, 55, 49, 50), "Mustard");
        assert_eq!(shade(YELLOW, 55, 90, 81), "Lemon");
        assert_eq!(shade(YELLOW, 55, 90, 50), "Canary");
    }

    #[test]
    fn test_green_shades() {
        assert_eq!(shade(GREEN, 79, 90, 50), "Chartreuse");
        assert_eq!(shade(GREEN, 141, 90, 50), "Teal");
        assert_eq!(shade(GREEN, 101, 90, 39), "Forest");
        assert_eq!(shade(GREEN, 90, 49, 71), "Sage");
        assert_eq!(shade(GREEN, 90, 50, 71), "Mint");
        assert_eq!(shade(GREEN, 90, 49, 50), "Olive");
        assert_eq!(shade(GREEN, 90, 60, 39), "Hunter");
        assert_eq!(shade(GREEN, 99, 60, 50), "Lime");
        assert_eq!(shade(GREEN, 100, 60, 50), "Emerald");
    }

    #[test]
    fn test_aqua_teal_shades() {
        assert_eq!(shade(AQUA_TEAL, 175, 90, 29), "Deep Teal");
        assert_eq!(shade(AQUA_TEAL, 175, 90, 71), "Light Aqua");
        assert_eq!(shade(AQUA_TEAL, 175, 39, 50), "Muted Teal");
        assert_eq!(shade(AQUA_TEAL, 175, 40, 50), "Turquoise");
    }

    #[test]
    fn test_blue_shades() {
        assert_eq!(shade(BLUE, 204, 90, 50), "Turquoise");
        assert_eq!(shade(BLUE, 226, 90, 49), "Indigo");
        assert_eq!(shade(BLUE, 226, 90, 50), "Ultramarine");
        assert_eq!(shade(BLUE, 215, 90, 29), "Navy");
        assert_eq!(shade(BLUE, 215, 90, 71), "Sky");
        assert_eq!(shade(BLUE, 215, 61, 51), "Azure");
        assert_eq!(shade(BLUE, 215, 71, 50), "Cobalt");
        assert_eq!(shade(BLUE, 215, 70, 50), "Royal");
    }

    #[test]
    fn test_purple_shades() {
        assert_eq!(shade(PURPLE, 270, 90, 49), "Violet");
        assert_eq!(shade(PURPLE, 270, 90, 50), "Periwinkle");
        assert_eq!(shade(PURPLE, 301, 90, 50), "Magenta");
        assert_eq!(shade(PURPLE, 290, 90, 29), "Eggplant");
        assert_eq!(shade(PURPLE, 290, 90, 81), "Lavender");
        assert_eq!(shade(PURPLE, 290, 90, 66), "Lilac");
        assert_eq!(shade(PURPLE, 290, 71, 50), "Amethyst");
        assert_eq!(shade(PURPLE, 290, 70, 50), "Mauve");
    }

    #[test]
    fn test_pink_shades() {
        assert_eq!(shade(PINK, 340, 90, 81), "Light Pink");
        assert_eq!(shade(PINK, 340, 81, 50), "Hot Pink");
        assert_eq!(shade(PINK, 340, 70, 49), "Deep Pink");
        assert_eq!(shade(PINK, 340, 59, 50), "Blush");
        assert_eq!(shade(PINK, 346, 70, 50), "Rose");
        assert_eq!(shade(PINK, 334, 70, 50), "Magenta");
        assert_eq!(shade(PINK, 340, 70, 50), "Fuchsia");
    }
}
