pub mod backend;
pub mod compare;
pub mod config_file;
pub mod error;
pub mod extract;
pub mod store;

// Re-export for convenience
pub use backend::{BackendError, PdfBackend};
pub use compare::{
    CompareConfig, Comparison, ComparisonReport, SizeSummary, classify, compare_files,
};
pub use error::CoreError;
pub use extract::{ExtractConfig, Extraction, extract_to_file, join_pages};
pub use store::{FileStore, LocalFs, MemoryStore};
