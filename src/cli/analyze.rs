//! `analyze` command: detailed breakdown of one color.

use clap::Args;

use crate::classifier::analyze;
use crate::cli::common::{print_json, CliError, CliResult};
use crate::parser::{detect_format, try_parse_color};

/// Show HSL values, classification, and traits of a color
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Color as "#RRGGBB", "RGB", or "rgb(r, g, b)"
    #[arg(value_name = "COLOR")]
    color: String,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

impl AnalyzeArgs {
    /// Execute analyze command
    pub fn execute(&self) -> CliResult<()> {
        let rgb = try_parse_color(&self.color)
            .map_err(|e| CliError::validation(format!("Invalid color '{}': {e:#}", self.color)))?;
        let analysis = analyze(rgb);

        if self.json {
            return print_json(&analysis);
        }

        println!("Input:      {} ({:?})", self.color, detect_format(&self.color));
        println!("HEX:        {}", analysis.hex);
        println!("RGB:        {}", analysis.rgb.to_rgb_string());
        println!("HSL:        {}", analysis.hsl);
        println!("Family:     {}", analysis.family.main);
        println!("Sub-family: {}", analysis.family.sub);
        println!("Rule:       {}", analysis.rule);
        println!(
            "Traits:     grayish={} dark={} vibrant={}",
            analysis.is_grayish, analysis.is_dark, analysis.is_vibrant
        );
        Ok(())
    }
}
