//! Ranking and loading error types.

use std::path::PathBuf;
use thiserror::Error;

/// Conditions signalled by the ranking engine.
///
/// None of these are fatal; the caller picks the user-facing fallback.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RankError {
    #[error("Dataset is empty, nothing to rank")]
    EmptyDataset,

    #[error("Unknown probability column: {0}")]
    UnknownColumn(String),

    #[error("Top-N must be a positive integer, got {0}")]
    InvalidTopN(i64),

    #[error("Unknown model variant: {0}")]
    UnknownModelVariant(String),
}

pub type Result<T> = std::result::Result<T, RankError>;

/// Failures while reading an export snapshot from disk.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Missing file: {}", .0.display())]
    Missing(PathBuf),

    #[error("IO error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
