//! biohotspot-ranker: Hotspot ranking engine and export snapshot loading.
//!
//! The engine is a pure function over prediction records: pick a
//! probability column, sort descending (stable), keep the top N.

pub mod error;
pub mod records;
pub mod engine;
pub mod loader;
pub mod snapshot;

pub use engine::{rank, rank_by, select_column_for_model, MissingFieldWarning, RankingRequest, RankingResult};
pub use error::{LoadError, RankError};
pub use records::{FeatureImportanceEntry, HotspotDataset, HotspotRecord, ModelVariant, ProbabilityColumn, SummaryTable};
pub use snapshot::{ExportSnapshot, GeneSnapshot};
