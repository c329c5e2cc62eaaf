//! Batch classification of whole datasets with progress reporting.
//!
//! Records are processed in fixed-size chunks, left to right, in place.
//! Chunking only controls how often progress is reported; it never changes
//! the output. Each run is independent and keeps no state between calls.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::sync::mpsc::{channel, Receiver};
use std::thread::{self, JoinHandle};
use tracing::{debug, info, warn};

use crate::classifier::classify_rgb;
use crate::constants::DEFAULT_BATCH_SIZE;
use crate::models::{ColorFamily, ColorRecord, Dataset, RgbColor};
use crate::parser::color::try_parse_color;

/// Which field a record's color was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorSource {
    /// The `RGB` field (preferred when present)
    Rgb,
    /// The `HEX` field
    Hex,
    /// Neither field was present; black was substituted
    Default,
}

/// A non-fatal problem with one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordWarning {
    /// Zero-based record index
    pub index: usize,
    /// What went wrong
    pub message: String,
}

/// Messages emitted while a batch runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchMessage {
    /// A chunk finished
    Progress {
        /// Completion percentage, `processed * 100 / total` rounded down
        percent: u8,
        /// Records processed so far
        processed: usize,
        /// Records in the dataset
        total: usize,
    },
    /// A record was classified using the black fallback
    Warning(RecordWarning),
    /// The run finished
    Complete {
        /// Records processed
        processed: usize,
        /// Number of warnings raised
        warnings: usize,
    },
}

/// Outcome of a batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    /// Records processed
    pub total: usize,
    /// Every progress percentage emitted, in order
    pub progress: Vec<u8>,
    /// Records that fell back to black
    pub warnings: Vec<RecordWarning>,
}

/// Resolves the color of a record.
///
/// Prefers `RGB`, then `HEX`, then black. Returns the warning text when the
/// chosen field could not be parsed or no field was present.
pub fn resolve_color(record: &ColorRecord) -> (RgbColor, ColorSource, Option<String>) {
    if let Some(rgb) = record.rgb.as_deref() {
        return match try_parse_color(rgb) {
            Ok(color) => (color, ColorSource::Rgb, None),
            Err(e) => (
                RgbColor::BLACK,
                ColorSource::Rgb,
                Some(format!("{e:#}. Defaulting to black.")),
            ),
        };
    }

    if let Some(hex) = record.hex.as_deref() {
        return match RgbColor::from_hex(hex) {
            Ok(color) => (color, ColorSource::Hex, None),
            Err(e) => (
                RgbColor::BLACK,
                ColorSource::Hex,
                Some(format!("{e:#}. Defaulting to black.")),
            ),
        };
    }

    (
        RgbColor::BLACK,
        ColorSource::Default,
        Some("Record has neither a HEX nor an RGB value. Defaulting to black.".to_string()),
    )
}

/// Classifies a single record in place and returns its family.
pub fn classify_record(record: &mut ColorRecord) -> (ColorFamily, Option<String>) {
    let (color, _, warning) = resolve_color(record);
    let family = classify_rgb(color);
    record.apply_family(&family);
    (family, warning)
}

/// Chunked, order-preserving classifier for datasets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchPipeline {
    batch_size: usize,
}

impl Default for BatchPipeline {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

impl BatchPipeline {
    /// Creates a pipeline that reports progress every `batch_size` records.
    ///
    /// # Errors
    ///
    /// Returns an error if `batch_size` is zero.
    pub fn new(batch_size: usize) -> Result<Self> {
        if batch_size == 0 {
            anyhow::bail!("Batch size must be at least 1");
        }
        Ok(Self { batch_size })
    }

    /// Records per chunk.
    #[must_use]
    pub const fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Classifies every record of `dataset` in place.
    ///
    /// `on_message` receives a `Warning` for every record that fell back to
    /// black, a `Progress` after each chunk, and a final `Complete`. Progress
    /// is non-decreasing and the last value is 100; an empty dataset reports
    /// a single 100.
    pub fn run<F>(&self, dataset: &mut Dataset, mut on_message: F) -> BatchSummary
    where
        F: FnMut(&BatchMessage),
    {
        let total = dataset.len();
        let mut summary = BatchSummary {
            total,
            ..BatchSummary::default()
        };

        info!(
            "Classifying {} records in batches of {}",
            total, self.batch_size
        );

        if total == 0 {
            summary.progress.push(100);
            on_message(&BatchMessage::Progress {
                percent: 100,
                processed: 0,
                total,
            });
        }

        let mut processed = 0;
        for chunk in dataset.records_mut().chunks_mut(self.batch_size) {
            for record in chunk.iter_mut() {
                let (_, warning) = classify_record(record);
                if let Some(message) = warning {
                    warn!("Record {}: {}", processed, message);
                    let warning = RecordWarning {
                        index: processed,
                        message,
                    };
                    on_message(&BatchMessage::Warning(warning.clone()));
                    summary.warnings.push(warning);
                }
                processed += 1;
            }

            let percent = progress_percent(processed, total);
            debug!("Batch progress: {}% ({}/{})", percent, processed, total);
            summary.progress.push(percent);
            on_message(&BatchMessage::Progress {
                percent,
                processed,
                total,
            });
        }

        info!(
            "Classified {} records ({} warnings)",
            processed,
            summary.warnings.len()
        );
        on_message(&BatchMessage::Complete {
            processed,
            warnings: summary.warnings.len(),
        });

        summary
    }

    /// Runs the pipeline on a background thread.
    ///
    /// Messages arrive on the returned job's receiver while the thread runs;
    /// [`BatchJob::wait`] returns the classified dataset.
    pub fn spawn(self, mut dataset: Dataset) -> BatchJob {
        let (sender, receiver) = channel();

        let handle = thread::spawn(move || {
            let summary = self.run(&mut dataset, |message| {
                // The receiver may have been dropped; the run still completes.
                let _ = sender.send(message.clone());
            });
            (dataset, summary)
        });

        BatchJob { handle, receiver }
    }
}

/// Completion percentage after `processed` of `total` records, rounded down.
fn progress_percent(processed: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    // processed <= total, so the quotient is at most 100
    u8::try_from(processed.min(total) * 100 / total).unwrap_or(100)
}

/// A batch running on a background thread.
pub struct BatchJob {
    handle: JoinHandle<(Dataset, BatchSummary)>,
    receiver: Receiver<BatchMessage>,
}

impl BatchJob {
    /// Channel of progress, warning, and completion messages.
    pub fn receiver(&self) -> &Receiver<BatchMessage> {
        &self.receiver
    }

    /// Polls for the next message without blocking.
    pub fn poll(&self) -> Option<BatchMessage> {
        self.receiver.try_recv().ok()
    }

    /// Waits for the worker thread and returns the classified dataset.
    ///
    /// # Errors
    ///
    /// Returns an error if the worker thread panicked.
    pub fn wait(self) -> Result<(Dataset, BatchSummary)> {
        self.handle
            .join()
            .map_err(|_| anyhow::anyhow!("Batch classification thread panicked"))
    }
}

/// Classifies a dataset and returns it with the progress values emitted.
///
/// # Errors
///
/// Returns an error if `batch_size` is zero.
pub fn classify_dataset(mut dataset: Dataset, batch_size: usize) -> Result<(Dataset, Vec<u8>)> {
    let pipeline = BatchPipeline::new(batch_size)?;
    let summary = pipeline.run(&mut dataset, |_| {});
    Ok((dataset, summary.progress))
}
