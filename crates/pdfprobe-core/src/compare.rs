use std::fmt;
use std::path::PathBuf;

use crate::CoreError;
use crate::store::FileStore;

/// Inputs and output of a comparison run.
#[derive(Debug, Clone)]
pub struct CompareConfig {
    pub first: PathBuf,
    pub second: PathBuf,
    /// Where the size summary line is written.
    pub summary_path: PathBuf,
}

/// Byte lengths of the two compared files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeSummary {
    pub first: u64,
    pub second: u64,
}

impl SizeSummary {
    /// The summary artifact: one line, newline-terminated.
    pub fn to_line(&self) -> String {
        format!("{}\n", self)
    }
}

impl fmt::Display for SizeSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Size 1: {}, Size 2: {}", self.first, self.second)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    DifferentSize,
    Identical,
    DifferentContent {
        /// Offset of the first byte that differs.
        first_difference: u64,
    },
}

#[derive(Debug)]
pub struct ComparisonReport {
    pub sizes: SizeSummary,
    pub comparison: Comparison,
    /// Outcome of the summary write. A failure here does not affect
    /// `comparison`.
    pub summary_written: Result<(), CoreError>,
}

/// Compare two files by size, then byte for byte.
///
/// The size summary is written to `config.summary_path` as soon as both
/// lengths are known and before any content is read, whatever the outcome.
/// A failed summary write is logged and reported in the returned report.
/// Contents are only read when the lengths match.
pub fn compare_files(
    store: &dyn FileStore,
    config: &CompareConfig,
) -> Result<ComparisonReport, CoreError> {
    let sizes = SizeSummary {
        first: store.len(&config.first)?,
        second: store.len(&config.second)?,
    };
    tracing::debug!(first = sizes.first, second = sizes.second, "file sizes");

    let summary_written = store.write(&config.summary_path, sizes.to_line().as_bytes());
    if let Err(ref e) = summary_written {
        tracing::warn!(path = %config.summary_path.display(), error = %e, "failed to write size summary");
    }

    let comparison = if sizes.first != sizes.second {
        Comparison::DifferentSize
    } else {
        let first = store.read(&config.first)?;
        let second = store.read(&config.second)?;
        classify(&first, &second)
    };
    tracing::info!(?comparison, "comparison finished");

    Ok(ComparisonReport {
        sizes,
        comparison,
        summary_written,
    })
}

/// Classify two fully loaded files.
pub fn classify(first: &[u8], second: &[u8]) -> Comparison {
    if first.len() != second.len() {
        return Comparison::DifferentSize;
    }
    match first.iter().zip(second).position(|(a, b)| a != b) {
        None => Comparison::Identical,
        Some(offset) => Comparison::DifferentContent {
            first_difference: offset as u64,
        },
    }
}
