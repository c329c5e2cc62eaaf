//! `batch` command: classify a CSV or spreadsheet file and export the result.

use chrono::Local;
use clap::Args;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::cli::common::{print_json, CliError, CliResult};
use crate::config::Config;
use crate::export::{write_dataset, OutputFormat};
use crate::models::Dataset;
use crate::parser::load_dataset;
use crate::services::batch::{BatchMessage, BatchPipeline, BatchSummary};
use crate::services::cache::{content_key, CachedResult, DiskCache};

/// Classify every color in a file
#[derive(Args, Debug)]
pub struct BatchArgs {
    /// Input file (.csv, .xlsx, .xls, or .ods) with a HEX or RGB column
    #[arg(short, long, value_name = "FILE")]
    input: PathBuf,

    /// Output file (.xlsx or .csv) [default: classified_colors_<timestamp>.xlsx]
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Records per progress update (overrides config)
    #[arg(long, value_name = "N")]
    batch_size: Option<usize>,

    /// Print progress to stderr
    #[arg(long)]
    progress: bool,

    /// Ignore and do not update the result cache
    #[arg(long)]
    no_cache: bool,

    /// Output summary as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize, Debug)]
struct FamilyCount {
    family: &'static str,
    count: usize,
}

#[derive(Serialize, Debug)]
struct BatchOutput {
    input: String,
    output: String,
    total: usize,
    cached: bool,
    progress: Vec<u8>,
    warnings: usize,
    families: Vec<FamilyCount>,
}

impl BatchArgs {
    /// Execute batch command
    pub fn execute(&self) -> CliResult<()> {
        let config = Config::load()
            .map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))?;

        let batch_size = self.batch_size.unwrap_or(config.batch.batch_size);
        let pipeline = BatchPipeline::new(batch_size)
            .map_err(|e| CliError::validation(format!("Invalid batch size: {e:#}")))?;

        let output = self.output.clone().unwrap_or_else(default_output_path);
        OutputFormat::from_path(&output).map_err(|e| CliError::validation(format!("{e:#}")))?;

        let bytes = fs::read(&self.input).map_err(|e| {
            CliError::io(format!(
                "Failed to read input file {}: {e}",
                self.input.display()
            ))
        })?;

        let cache = if config.cache.enabled && !self.no_cache {
            Config::cache_dir().ok().map(DiskCache::new)
        } else {
            None
        };
        let key = content_key(&bytes);

        let cached = cache.as_ref().and_then(|c| c.load(&key));
        let is_cached = cached.is_some();
        let (dataset, summary) = match cached {
            Some(CachedResult { dataset, warnings }) => {
                for warning in &warnings {
                    warn!("Record {}: {}", warning.index, warning.message);
                }
                let summary = BatchSummary {
                    total: dataset.len(),
                    progress: vec![100],
                    warnings,
                };
                (dataset, summary)
            }
            None => {
                let dataset = load_dataset(&self.input)
                    .map_err(|e| CliError::validation(format!("{e:#}")))?;
                let (dataset, summary) = self.run_pipeline(pipeline, dataset)?;

                if let Some(cache) = &cache {
                    if let Err(e) = cache.store(&key, &dataset, &summary.warnings) {
                        warn!("Failed to cache result: {:#}", e);
                    }
                }
                (dataset, summary)
            }
        };

        if self.progress && is_cached {
            eprintln!("Input unchanged, using cached result");
        }

        write_dataset(&dataset, &output, &config.export.options())
            .map_err(|e| CliError::io(format!("{e:#}")))?;
        info!("Exported {} records to {}", dataset.len(), output.display());

        let report = BatchOutput {
            input: self.input.display().to_string(),
            output: output.display().to_string(),
            total: dataset.len(),
            cached: is_cached,
            progress: summary.progress,
            warnings: summary.warnings.len(),
            families: family_counts(&dataset),
        };

        if self.json {
            return print_json(&report);
        }

        output_human_readable(&report);
        Ok(())
    }

    /// Runs the pipeline on a worker thread, relaying progress to stderr.
    fn run_pipeline(
        &self,
        pipeline: BatchPipeline,
        dataset: Dataset,
    ) -> CliResult<(Dataset, BatchSummary)> {
        let job = pipeline.spawn(dataset);

        for message in job.receiver() {
            match message {
                BatchMessage::Progress {
                    percent,
                    processed,
                    total,
                } if self.progress => {
                    eprintln!("Progress: {percent:>3}% ({processed}/{total})");
                }
                BatchMessage::Complete {
                    processed,
                    warnings,
                } if self.progress => {
                    eprintln!("Done: {processed} records, {warnings} warnings");
                }
                _ => {}
            }
        }

        job.wait()
            .map_err(|e| CliError::io(format!("Batch classification failed: {e:#}")))
    }
}

/// `classified_colors_<timestamp>.xlsx` in the working directory.
fn default_output_path() -> PathBuf {
    PathBuf::from(format!(
        "classified_colors_{}.xlsx",
        Local::now().format("%Y%m%d_%H%M%S")
    ))
}

fn family_counts(dataset: &Dataset) -> Vec<FamilyCount> {
    dataset
        .family_counts()
        .into_iter()
        .map(|(family, count)| FamilyCount {
            family: family.name(),
            count,
        })
        .collect()
}

fn output_human_readable(report: &BatchOutput) {
    println!(
        "Classified {} records from {}",
        report.total,
        Path::new(&report.input).display()
    );
    if report.cached {
        println!("(reused cached result)");
    }
    if report.warnings > 0 {
        println!("{} records defaulted to black", report.warnings);
    }
    println!("Output: {}", report.output);
    println!();

    println!("Families:");
    for entry in &report.families {
        println!("  {:<10} {}", entry.family, entry.count);
    }
}
