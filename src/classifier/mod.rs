//! Color family classification.
//!
//! Classification is a fixed, ordered decision table over HSL. Rules are
//! evaluated top to bottom and the first match wins; several bands overlap
//! numerically (e.g. Brown and Red/Orange), so order carries meaning:
//!
//! 1. Neutrals: saturation ≤ 15 splits into Black, White, or Gray
//! 2. Brown: muted, medium-lightness warm hues
//! 3. Hue bands covering `[0, 360)`, with Red wrapping across 0
//! 4. `Unknown` if nothing matched
//!
//! Every function here is pure and stateless.

pub mod analysis;
pub mod shades;

use crate::models::{ColorFamily, Hsl, MainFamily, RgbColor};
use shades::ShadeRule;

pub use analysis::{analyze, batch_analyze, ColorAnalysis};

/// One row of the top-level family table.
#[derive(Clone, Copy)]
pub struct FamilyRule {
    name: &'static str,
    applies: fn(&Hsl) -> bool,
    family: MainFamily,
    shades: &'static [ShadeRule],
}

impl FamilyRule {
    const fn new(
        name: &'static str,
        family: MainFamily,
        applies: fn(&Hsl) -> bool,
        shades: &'static [ShadeRule],
    ) -> Self {
        Self {
            name,
            applies,
            family,
            shades,
        }
    }

    /// Short identifier of the rule (e.g. "neutral-black", "band-blue").
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// The main family this rule assigns.
    #[must_use]
    pub const fn family(&self) -> MainFamily {
        self.family
    }

    /// Whether this rule's predicate holds for `hsl`.
    #[must_use]
    pub fn matches(&self, hsl: &Hsl) -> bool {
        (self.applies)(hsl)
    }

    /// The sub-family table consulted once this rule matches.
    #[must_use]
    pub const fn shades(&self) -> &'static [ShadeRule] {
        self.shades
    }

    /// Applies the rule, resolving the sub-family.
    #[must_use]
    pub fn classify(&self, hsl: &Hsl) -> ColorFamily {
        ColorFamily::new(self.family, shades::resolve(self.shades, hsl))
    }
}

impl std::fmt::Debug for FamilyRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FamilyRule")
            .field("name", &self.name)
            .field("family", &self.family)
            .finish_non_exhaustive()
    }
}

/// Highest saturation still treated as a neutral.
const NEUTRAL_MAX_SATURATION: u8 = 15;

fn is_neutral(hsl: &Hsl) -> bool {
    hsl.saturation() <= NEUTRAL_MAX_SATURATION
}

fn is_brown(hsl: &Hsl) -> bool {
    let warm = hsl.hue() <= 40 || hsl.hue() >= 355;
    hsl.saturation() < 50 && hsl.lightness() > 15 && hsl.lightness() < 60 && warm
}

fn in_band(hsl: &Hsl, start: u16, end: u16) -> bool {
    (start..end).contains(&hsl.hue())
}

/// The top-level decision table, in evaluation order.
pub const FAMILY_RULES: &[FamilyRule] = &[
    FamilyRule::new(
        "neutral-black",
        MainFamily::Black,
        |c| is_neutral(c) && c.lightness() <= 15,
        shades::BLACK,
    ),
    FamilyRule::new(
        "neutral-white",
        MainFamily::White,
        |c| is_neutral(c) && c.lightness() >= 85,
        shades::WHITE,
    ),
    FamilyRule::new("neutral-gray", MainFamily::Gray, is_neutral, shades::GRAY),
    FamilyRule::new("brown", MainFamily::Brown, is_brown, shades::BROWN),
    FamilyRule::new(
        "band-red",
        MainFamily::Red,
        |c| c.hue() >= 355 || c.hue() < 10,
        shades::RED,
    ),
    FamilyRule::new(
        "band-orange",
        MainFamily::Orange,
        |c| in_band(c, 10, 40),
        shades::ORANGE,
    ),
    FamilyRule::new(
        "band-yellow",
        MainFamily::Yellow,
        |c| in_band(c, 40, 65),
        shades::YELLOW,
    ),
    FamilyRule::new(
        "band-green",
        MainFamily::Green,
        |c| in_band(c, 65, 160),
        shades::GREEN,
    ),
    FamilyRule::new(
        "band-aqua-teal",
        MainFamily::AquaTeal,
        |c| in_band(c, 160, 190),
        shades::AQUA_TEAL,
    ),
    FamilyRule::new(
        "band-blue",
        MainFamily::Blue,
        |c| in_band(c, 190, 260),
        shades::BLUE,
    ),
    FamilyRule::new(
        "band-purple",
        MainFamily::Purple,
        |c| in_band(c, 260, 330),
        shades::PURPLE,
    ),
    FamilyRule::new(
        "band-pink",
        MainFamily::Pink,
        |c| in_band(c, 330, 355),
        shades::PINK,
    ),
];

/// Returns the first rule in [`FAMILY_RULES`] that matches, if any.
#[must_use]
pub fn matching_rule(hsl: &Hsl) -> Option<&'static FamilyRule> {
    FAMILY_RULES.iter().find(|rule| rule.matches(hsl))
}

/// Classifies an HSL color into a main family and sub-family.
///
/// # Examples
///
/// ```
/// use colorfamily::classifier::classify;
/// use colorfamily::models::{MainFamily, RgbColor};
///
/// let family = classify(&RgbColor::new(135, 206, 235).to_hsl());
/// assert_eq!(family.main, MainFamily::Blue);
/// assert_eq!(family.sub, "Turquoise");
/// ```
#[must_use]
pub fn classify(hsl: &Hsl) -> ColorFamily {
    matching_rule(hsl).map_or(ColorFamily::UNKNOWN, |rule| rule.classify(hsl))
}

/// Converts to HSL and classifies.
#[must_use]
pub fn classify_rgb(rgb: RgbColor) -> ColorFamily {
    classify(&rgb.to_hsl())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn family(h: u16, s: u8, l: u8) -> ColorFamily {
        classify(&Hsl::new(h, s, l))
    }

    fn rule_name(h: u16, s: u8, l: u8) -> &'static str {
        matching_rule(&Hsl::new(h, s, l)).unwrap().name()
    }

    #[test]
    fn test_black_and_white() {
        assert_eq!(
            classify_rgb(RgbColor::new(0, 0, 0)),
            ColorFamily::new(MainFamily::Black, "Black")
        );
        assert_eq!(
            classify_rgb(RgbColor::new(255, 255, 255)),
            ColorFamily::new(MainFamily::White, "White")
        );
    }

    #[test]
    fn test_neutral_rules() {
        assert_eq!(rule_name(200, 15, 15), "neutral-black");
        assert_eq!(rule_name(200, 15, 85), "neutral-white");
        assert_eq!(rule_name(200, 15, 50), "neutral-gray");
        assert_eq!(rule_name(200, 16, 50), "band-blue");
        assert_eq!(family(0, 0, 50), ColorFamily::new(MainFamily::Gray, "Slate"));
    }

    #[test]
    fn test_brown_rule_bounds() {
        assert_eq!(rule_name(20, 49, 40), "brown");
        assert_eq!(rule_name(20, 50, 40), "band-orange");
        assert_eq!(rule_name(20, 40, 15), "band-orange");
        assert_eq!(rule_name(20, 40, 16), "brown");
        assert_eq!(rule_name(20, 40, 59), "brown");
        assert_eq!(rule_name(20, 40, 60), "band-orange");
        assert_eq!(rule_name(40, 40, 40), "brown");
        assert_eq!(rule_name(41, 40, 40), "band-yellow");
        assert_eq!(rule_name(354, 40, 40), "band-pink");
        assert_eq!(rule_name(355, 40, 40), "brown");
        assert_eq!(rule_name(0, 40, 40), "brown");
    }

    #[test]
    fn test_hue_band_edges() {
        // Saturated and bright enough to skip the neutral and brown rules
        assert_eq!(family(355, 100, 50).main, MainFamily::Red);
        assert_eq!(family(354, 100, 50).main, MainFamily::Pink);
        assert_eq!(family(0, 100, 50).main, MainFamily::Red);
        assert_eq!(family(9, 100, 50).main, MainFamily::Red);
        assert_eq!(family(10, 100, 50).main, MainFamily::Orange);
        assert_eq!(family(39, 100, 50).main, MainFamily::Orange);
        assert_eq!(family(40, 100, 50).main, MainFamily::Yellow);
        assert_eq!(family(64, 100, 50).main, MainFamily::Yellow);
        assert_eq!(family(65, 100, 50).main, MainFamily::Green);
        assert_eq!(family(159, 100, 50).main, MainFamily::Green);
        assert_eq!(family(160, 100, 50).main, MainFamily::AquaTeal);
        assert_eq!(family(189, 100, 50).main, MainFamily::AquaTeal);
        assert_eq!(family(190, 100, 50).main, MainFamily::Blue);
        assert_eq!(family(259, 100, 50).main, MainFamily::Blue);
        assert_eq!(family(260, 100, 50).main, MainFamily::Purple);
        assert_eq!(family(329, 100, 50).main, MainFamily::Purple);
        assert_eq!(family(330, 100, 50).main, MainFamily::Pink);
    }

    #[test]
    fn test_bands_cover_every_hue() {
        for hue in 0..360 {
            let hsl = Hsl::new(hue, 100, 50);
            let rule = matching_rule(&hsl).expect("every hue belongs to a band");
            assert!(rule.name().starts_with("band-"), "hue {hue} hit {}", rule.name());

            let bands = FAMILY_RULES
                .iter()
                .filter(|r| r.name().starts_with("band-") && r.matches(&hsl))
                .count();
            assert_eq!(bands, 1, "hue {hue} matched {bands} bands");
        }
    }

    #[test]
    fn test_overlapping_labels_are_preserved() {
        assert_eq!(family(150, 100, 50), ColorFamily::new(MainFamily::Green, "Teal"));
        assert_eq!(
            family(175, 50, 50),
            ColorFamily::new(MainFamily::AquaTeal, "Turquoise")
        );
        assert_eq!(family(195, 80, 50), ColorFamily::new(MainFamily::Blue, "Turquoise"));
    }

    #[test]
    fn test_sub_family_is_in_family_vocabulary() {
        for r in (0..=255u8).step_by(17) {
            for g in (0..=255u8).step_by(17) {
                for b in (0..=255u8).step_by(17) {
                    let result = classify_rgb(RgbColor::new(r, g, b));
                    assert_ne!(result.main, MainFamily::Unknown);
                    assert!(
                        result.main.sub_families().contains(&result.sub),
                        "{} not in {} vocabulary",
                        result.sub,
                        result.main
                    );
                }
            }
        }
    }

    #[test]
    fn test_known_colors() {
        let cases = [
            ((255, 0, 0), MainFamily::Red, "Crimson"),
            ((34, 139, 34), MainFamily::Green, "Forest"),
            ((255, 255, 0), MainFamily::Yellow, "Canary"),
            ((135, 206, 235), MainFamily::Blue, "Turquoise"),
            ((120, 80, 60), MainFamily::Brown, "Mocha"),
            ((128, 128, 128), MainFamily::Gray, "Slate"),
        ];
        for ((r, g, b), main, sub) in cases {
            assert_eq!(
                classify_rgb(RgbColor::new(r, g, b)),
                ColorFamily::new(main, sub),
                "rgb({r}, {g}, {b})"
            );
        }
    }

    #[test]
    fn test_classification_is_deterministic() {
        let hsl = RgbColor::new(12, 200, 90).to_hsl();
        assert_eq!(classify(&hsl), classify(&hsl));
    }
}
