//! Configuration management CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;

use crate::cli::common::{print_json, CliError, CliResult};
use crate::config::Config;
use crate::constants::APP_NAME;

/// Configuration management commands
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Display current configuration
    Show(ConfigShowArgs),
    /// Set configuration values
    Set(ConfigSetArgs),
}

/// Display current configuration
#[derive(Args, Debug)]
pub struct ConfigShowArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Set configuration values
#[derive(Args, Debug)]
pub struct ConfigSetArgs {
    /// Records per progress update
    #[arg(long, value_name = "N")]
    batch_size: Option<usize>,

    /// Worksheet title for exported workbooks
    #[arg(long, value_name = "NAME")]
    sheet_name: Option<String>,

    /// Fill HEX cells with their color (true or false)
    #[arg(long, value_name = "BOOL")]
    style_hex_cells: Option<bool>,

    /// Reuse results for unchanged input files (true or false)
    #[arg(long, value_name = "BOOL")]
    cache: Option<bool>,
}

/// JSON-serializable configuration for output
#[derive(Serialize, Debug)]
struct ConfigOutput<'a> {
    config_file: String,
    #[serde(flatten)]
    config: &'a Config,
}

impl ConfigArgs {
    /// Execute config subcommand
    pub fn execute(&self) -> CliResult<()> {
        match &self.command {
            ConfigCommand::Show(args) => args.execute(),
            ConfigCommand::Set(args) => args.execute(),
        }
    }
}

impl ConfigShowArgs {
    /// Execute show command
    pub fn execute(&self) -> CliResult<()> {
        let config = Config::load()
            .map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))?;
        let config_file = Config::config_file_path()
            .map(|p| p.display().to_string())
            .map_err(|e| CliError::io(format!("{e:#}")))?;

        if self.json {
            return print_json(&ConfigOutput {
                config_file,
                config: &config,
            });
        }

        output_human_readable(&config, &config_file);
        Ok(())
    }
}

impl ConfigSetArgs {
    /// Execute set command
    pub fn execute(&self) -> CliResult<()> {
        if self.batch_size.is_none()
            && self.sheet_name.is_none()
            && self.style_hex_cells.is_none()
            && self.cache.is_none()
        {
            return Err(CliError::validation(
                "At least one configuration option must be specified: --batch-size, --sheet-name, --style-hex-cells, or --cache",
            ));
        }

        let mut config = Config::load().unwrap_or_default();

        if let Some(batch_size) = self.batch_size {
            config.batch.batch_size = batch_size;
        }
        if let Some(sheet_name) = &self.sheet_name {
            config.export.sheet_name.clone_from(sheet_name);
        }
        if let Some(style) = self.style_hex_cells {
            config.export.style_hex_cells = style;
        }
        if let Some(enabled) = self.cache {
            config.cache.enabled = enabled;
        }

        config
            .validate()
            .map_err(|e| CliError::validation(format!("{e:#}")))?;

        let path = config
            .save()
            .map_err(|e| CliError::io(format!("Failed to save configuration: {e:#}")))?;

        println!("Configuration updated: {}", path.display());
        Ok(())
    }
}

/// Output configuration in human-readable format
fn output_human_readable(config: &Config, config_file: &str) {
    let title = format!("{APP_NAME} Configuration");
    println!("{title}");
    println!("{}", "=".repeat(title.len()));
    println!("File: {config_file}");
    println!();

    println!("Batch:");
    println!("  Batch Size: {}", config.batch.batch_size);
    println!();

    println!("Export:");
    println!("  Sheet Name: {}", config.export.sheet_name);
    println!("  Style HEX Cells: {}", config.export.style_hex_cells);
    println!();

    println!("Cache:");
    println!("  Enabled: {}", config.cache.enabled);
}
