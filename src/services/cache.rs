//! Reuse of classification results for unchanged input.
//!
//! Results are keyed by the SHA-256 of the raw input bytes. The batch size
//! only affects progress granularity, so it is not part of the key. When the
//! input changes, the stored result is replaced.

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::batch::{BatchMessage, BatchPipeline, BatchSummary, RecordWarning};
use crate::export::csv::export_csv;
use crate::models::Dataset;
use crate::parser::dataset::read_csv;

/// Hex-encoded SHA-256 of `bytes`.
#[must_use]
pub fn content_key(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

/// Whether a result came from the cache or a fresh run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    /// Stored result reused
    Hit,
    /// Pipeline ran
    Miss,
}

#[derive(Debug, Clone)]
struct CacheEntry {
    key: String,
    dataset: Dataset,
    summary: BatchSummary,
}

/// Holds the most recent classification result.
///
/// One entry is kept, matching a front end that works on one upload at a
/// time.
#[derive(Debug, Clone, Default)]
pub struct ClassificationCache {
    entry: Option<CacheEntry>,
}

impl ClassificationCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Key of the stored result, if any.
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        self.entry.as_ref().map(|e| e.key.as_str())
    }

    /// Drops the stored result.
    pub fn invalidate(&mut self) {
        if let Some(entry) = self.entry.take() {
            debug!("Invalidated cached result {}", entry.key);
        }
    }

    /// Returns the classified dataset for `input`.
    ///
    /// When `input` hashes to the stored key, the stored result is returned
    /// without calling `load` or running the pipeline. Otherwise `load`
    /// parses the input, the pipeline classifies it, and the result replaces
    /// whatever was stored.
    pub fn get_or_classify<L, F>(
        &mut self,
        input: &[u8],
        load: L,
        pipeline: &BatchPipeline,
        on_message: F,
    ) -> Result<(&Dataset, &BatchSummary, CacheStatus)>
    where
        L: FnOnce() -> Result<Dataset>,
        F: FnMut(&BatchMessage),
    {
        let key = content_key(input);

        let status = if self.key() == Some(key.as_str()) {
            debug!("Cache hit for {}", key);
            CacheStatus::Hit
        } else {
            self.invalidate();
            let mut dataset = load()?;
            let summary = pipeline.run(&mut dataset, on_message);
            self.entry = Some(CacheEntry {
                key,
                dataset,
                summary,
            });
            CacheStatus::Miss
        };

        let entry = self
            .entry
            .as_ref()
            .context("Classification cache is empty after classification")?;
        Ok((&entry.dataset, &entry.summary, status))
    }
}

/// A classified dataset loaded from disk, with the warnings its run raised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedResult {
    /// Classified records
    pub dataset: Dataset,
    /// Records that fell back to black when the dataset was classified
    pub warnings: Vec<RecordWarning>,
}

/// Classified datasets stored on disk, named by content key.
///
/// Each entry is a `<key>.csv` with the classified table and a `<key>.json`
/// with the warnings of the run, so a hit reports the same outcome as the
/// original run. An entry missing either file is a miss.
#[derive(Debug, Clone)]
pub struct DiskCache {
    dir: PathBuf,
}

impl DiskCache {
    /// Uses `dir` for cache files. The directory is created on first store.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Cache directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn dataset_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.csv"))
    }

    fn warnings_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    /// Loads the entry stored under `key`, if present.
    ///
    /// An unreadable or incomplete entry is treated as a miss and removed.
    pub fn load(&self, key: &str) -> Option<CachedResult> {
        let dataset_path = self.dataset_path(key);
        let warnings_path = self.warnings_path(key);
        if !dataset_path.exists() && !warnings_path.exists() {
            return None;
        }

        match self.read_entry(&dataset_path, &warnings_path) {
            Ok(result) => {
                info!("Using cached result {}", dataset_path.display());
                Some(result)
            }
            Err(e) => {
                warn!("Discarding unreadable cache entry: {:#}", e);
                let _ = fs::remove_file(&dataset_path);
                let _ = fs::remove_file(&warnings_path);
                None
            }
        }
    }

    fn read_entry(&self, dataset_path: &Path, warnings_path: &Path) -> Result<CachedResult> {
        let dataset = fs::File::open(dataset_path)
            .context(format!(
                "Failed to open cache entry: {}",
                dataset_path.display()
            ))
            .and_then(read_csv)?;

        let content = fs::read_to_string(warnings_path).context(format!(
            "Failed to read cache entry: {}",
            warnings_path.display()
        ))?;
        let warnings: Vec<RecordWarning> = serde_json::from_str(&content).context(format!(
            "Failed to parse cache entry: {}",
            warnings_path.display()
        ))?;

        Ok(CachedResult { dataset, warnings })
    }

    /// Stores `dataset` and its run's `warnings` under `key`, replacing any
    /// previous entry.
    pub fn store(&self, key: &str, dataset: &Dataset, warnings: &[RecordWarning]) -> Result<()> {
        fs::create_dir_all(&self.dir).context(format!(
            "Failed to create cache directory: {}",
            self.dir.display()
        ))?;

        let warnings_json =
            serde_json::to_string(warnings).context("Failed to serialize cached warnings")?;
        write_atomic(&self.warnings_path(key), warnings_json.as_bytes())?;
        write_atomic(&self.dataset_path(key), &export_csv(dataset)?)?;

        debug!("Stored cache entry {}", self.dataset_path(key).display());
        Ok(())
    }

    /// Removes every cache entry.
    pub fn clear(&self) -> Result<()> {
        if self.dir.exists() {
            fs::remove_dir_all(&self.dir).context(format!(
                "Failed to clear cache directory: {}",
                self.dir.display()
            ))?;
        }
        Ok(())
    }
}

/// Writes through a temp file and renames it into place.
fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    let mut temp_name = path.as_os_str().to_owned();
    temp_name.push(".tmp");
    let temp_path = PathBuf::from(temp_name);

    fs::write(&temp_path, content).context(format!(
        "Failed to write cache entry: {}",
        temp_path.display()
    ))?;
    fs::rename(&temp_path, path).context(format!(
        "Failed to rename cache entry to: {}",
        path.display()
    ))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ColorRecord;
    use std::cell::Cell;
    use tempfile::TempDir;

    const INPUT: &str = "Name,HEX\nRed,#FF0000\nNavy,#000080\n";

    fn load(text: &str) -> Result<Dataset> {
        read_csv(text.as_bytes())
    }

    #[test]
    fn test_content_key_is_sha256() {
        assert_eq!(
            content_key(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_ne!(content_key(b"a"), content_key(b"b"));
    }

    #[test]
    fn test_unchanged_input_skips_reprocessing() {
        let mut cache = ClassificationCache::new();
        let pipeline = BatchPipeline::default();
        let loads = Cell::new(0);

        let (_, _, status) = cache
            .get_or_classify(
                INPUT.as_bytes(),
                || {
                    loads.set(loads.get() + 1);
                    load(INPUT)
                },
                &pipeline,
                |_| {},
            )
            .unwrap();
        assert_eq!(status, CacheStatus::Miss);

        let (dataset, summary, status) = cache
            .get_or_classify(
                INPUT.as_bytes(),
                || {
                    loads.set(loads.get() + 1);
                    load(INPUT)
                },
                &BatchPipeline::new(1).unwrap(),
                |_| {},
            )
            .unwrap();
        assert_eq!(status, CacheStatus::Hit);
        assert_eq!(loads.get(), 1);
        assert_eq!(dataset.len(), 2);
        assert_eq!(summary.progress, vec![100]);
    }

    #[test]
    fn test_changed_input_replaces_entry() {
        let mut cache = ClassificationCache::new();
        let pipeline = BatchPipeline::default();
        let other = "HEX\n#FFFFFF\n";

        cache
            .get_or_classify(INPUT.as_bytes(), || load(INPUT), &pipeline, |_| {})
            .unwrap();
        let (dataset, _, status) = cache
            .get_or_classify(other.as_bytes(), || load(other), &pipeline, |_| {})
            .unwrap();
        assert_eq!(status, CacheStatus::Miss);
        assert_eq!(dataset.records()[0].color_family.as_deref(), Some("White"));
        assert_eq!(cache.key(), Some(content_key(other.as_bytes()).as_str()));

        cache.invalidate();
        assert_eq!(cache.key(), None);
    }

    #[test]
    fn test_failed_load_leaves_cache_empty() {
        let mut cache = ClassificationCache::new();
        let result = cache.get_or_classify(
            b"Name\nx\n",
            || load("Name\nx\n"),
            &BatchPipeline::default(),
            |_| {},
        );
        assert!(result.is_err());
        assert_eq!(cache.key(), None);
    }

    #[test]
    fn test_disk_cache_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let cache = DiskCache::new(temp_dir.path().join("cache"));
        let mut record = ColorRecord::new().with_name("Navy").with_hex("#000080");
        record.color_family = Some("Blue".into());
        record.color_sub_family = Some("Navy".into());
        let dataset = Dataset::from_records(vec![record, ColorRecord::new().with_name("Blank")]);
        let warnings = vec![RecordWarning {
            index: 1,
            message: "Record has neither a HEX nor an RGB value. Defaulting to black.".into(),
        }];

        assert!(cache.load("abc").is_none());
        cache.store("abc", &dataset, &warnings).unwrap();

        let loaded = cache.load("abc").unwrap();
        assert_eq!(loaded.dataset.len(), 2);
        assert_eq!(
            loaded.dataset.records()[0].color_family.as_deref(),
            Some("Blue")
        );
        assert_eq!(
            loaded.dataset.records()[0].color_sub_family.as_deref(),
            Some("Navy")
        );
        assert_eq!(loaded.warnings, warnings);
        assert!(!temp_dir.path().join("cache").join("abc.json.tmp").exists());

        cache.clear().unwrap();
        assert!(cache.load("abc").is_none());
    }

    #[test]
    fn test_disk_cache_discards_corrupt_entry() {
        let temp_dir = TempDir::new().unwrap();
        let cache = DiskCache::new(temp_dir.path());
        fs::write(temp_dir.path().join("bad.csv"), "Name\nno color column\n").unwrap();
        fs::write(temp_dir.path().join("bad.json"), "[]").unwrap();

        assert!(cache.load("bad").is_none());
        assert!(!temp_dir.path().join("bad.csv").exists());
        assert!(!temp_dir.path().join("bad.json").exists());
    }

    #[test]
    fn test_disk_cache_entry_without_warnings_is_a_miss() {
        let temp_dir = TempDir::new().unwrap();
        let cache = DiskCache::new(temp_dir.path());
        fs::write(temp_dir.path().join("old.csv"), "HEX\n#FFFFFF\n").unwrap();

        assert!(cache.load("old").is_none());
        assert!(!temp_dir.path().join("old.csv").exists());
    }
}
