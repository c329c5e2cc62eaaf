//! Dataset-level services built on the classifier.
//!
//! The batch pipeline classifies whole datasets; the cache lets callers skip
//! that work when the input has not changed.

pub mod batch;
pub mod cache;

pub use batch::{
    classify_dataset, BatchJob, BatchMessage, BatchPipeline, BatchSummary, RecordWarning,
};
pub use cache::{content_key, CacheStatus, CachedResult, ClassificationCache, DiskCache};
