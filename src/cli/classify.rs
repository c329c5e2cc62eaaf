//! `classify` command: classify colors given on the command line.

use clap::Args;
use serde::Serialize;
use tracing::warn;

use crate::classifier::classify_rgb;
use crate::cli::common::{print_json, CliResult};
use crate::models::RgbColor;
use crate::parser::try_parse_color;

/// Classify one or more colors
#[derive(Args, Debug)]
pub struct ClassifyArgs {
    /// Colors as "#RRGGBB", "RGB", or "rgb(r, g, b)"
    #[arg(value_name = "COLOR", required = true)]
    colors: Vec<String>,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize, Debug)]
struct ClassifyOutput {
    input: String,
    hex: String,
    family: String,
    sub_family: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    warning: Option<String>,
}

impl ClassifyArgs {
    /// Execute classify command
    pub fn execute(&self) -> CliResult<()> {
        let results: Vec<ClassifyOutput> = self.colors.iter().map(|c| classify_input(c)).collect();

        if self.json {
            return print_json(&results);
        }

        for result in &results {
            println!(
                "{:<20} {}  {} ({})",
                result.input, result.hex, result.family, result.sub_family
            );
        }
        Ok(())
    }
}

/// Unrecognized input classifies as black and carries a warning.
fn classify_input(input: &str) -> ClassifyOutput {
    let (rgb, warning) = match try_parse_color(input) {
        Ok(rgb) => (rgb, None),
        Err(e) => {
            let message = format!("{e:#}. Defaulting to black.");
            warn!("{}", message);
            (RgbColor::BLACK, Some(message))
        }
    };

    let family = classify_rgb(rgb);
    ClassifyOutput {
        input: input.to_string(),
        hex: rgb.to_hex(),
        family: family.main.name().to_string(),
        sub_family: family.sub.to_string(),
        warning,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_input() {
        let result = classify_input("rgb(255, 0, 0)");
        assert_eq!(result.hex, "#FF0000");
        assert_eq!(result.family, "Red");
        assert_eq!(result.sub_family, "Crimson");
        assert!(result.warning.is_none());

        let result = classify_input("chartreuse");
        assert_eq!(result.family, "Black");
        assert!(result.warning.is_some());
    }
}
