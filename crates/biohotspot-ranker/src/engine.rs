//! Hotspot ranking engine.
//!
//! Turns a prediction dataset plus the caller's display choices (probability
//! column, top-N) into the ordered subset shown in the predictions table and
//! bar chart. Stateless: every call ranks from scratch.

use serde::Serialize;
use std::cmp::Ordering;
use tracing::{debug, warn};

use crate::error::{RankError, Result};
use crate::records::{HotspotRecord, ModelVariant, ProbabilityColumn};

/// A record left out of a ranking because it has no value for the column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissingFieldWarning {
    pub codon: String,
    pub column: ProbabilityColumn,
    /// Zero-based position of the record in the source dataset
    pub position: usize,
}

/// Ordered top-N records, highest probability first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankingResult {
    pub column: ProbabilityColumn,
    pub entries: Vec<HotspotRecord>,
    pub warnings: Vec<MissingFieldWarning>,
    /// Number of records that had a value for `column`
    pub eligible: usize,
}

impl RankingResult {
    /// (codon, probability) pairs in rank order, for the bar chart.
    pub fn bar_series(&self) -> Vec<(&str, f64)> {
        self.entries
            .iter()
            .filter_map(|r| r.probability(self.column).map(|p| (r.codon.as_str(), p)))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One ranking invocation, built fresh from the current UI selection.
#[derive(Debug, Clone, Copy)]
pub struct RankingRequest<'a> {
    pub records: &'a [HotspotRecord],
    pub column: &'a str,
    pub top_n: i64,
}

impl RankingRequest<'_> {
    pub fn run(&self) -> Result<RankingResult> {
        rank(self.records, self.column, self.top_n)
    }
}

/// Rank `records` by the named probability column, descending, and keep the
/// first `top_n`.
///
/// Equal probabilities keep their source order. A `top_n` larger than the
/// number of eligible records returns all of them. Probabilities are passed
/// through untouched.
pub fn rank(records: &[HotspotRecord], column: &str, top_n: i64) -> Result<RankingResult> {
    let column: ProbabilityColumn = column.parse()?;
    rank_by(records, column, top_n)
}

/// [`rank`] with an already-resolved column.
pub fn rank_by(records: &[HotspotRecord], column: ProbabilityColumn, top_n: i64) -> Result<RankingResult> {
    if top_n <= 0 {
        return Err(RankError::InvalidTopN(top_n));
    }
    if records.is_empty() {
        return Err(RankError::EmptyDataset);
    }

    let mut warnings = Vec::new();
    let mut candidates: Vec<(&HotspotRecord, f64)> = Vec::with_capacity(records.len());
    for (position, record) in records.iter().enumerate() {
        match record.probability(column) {
            Some(p) => candidates.push((record, p)),
            None => warnings.push(MissingFieldWarning {
                codon: record.codon.clone(),
                column,
                position,
            }),
        }
    }
    if !warnings.is_empty() {
        warn!(
            column = column.as_str(),
            excluded = warnings.len(),
            "Records without a probability value excluded from ranking"
        );
    }

    // sort_by is stable: ties stay in source order
    candidates.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

    let eligible = candidates.len();
    let limit = usize::try_from(top_n).unwrap_or(usize::MAX).min(eligible);
    let entries: Vec<HotspotRecord> = candidates
        .into_iter()
        .take(limit)
        .map(|(record, _)| record.clone())
        .collect();

    debug!(column = column.as_str(), top_n, eligible, returned = entries.len(), "Ranked hotspots");

    Ok(RankingResult {
        column,
        entries,
        warnings,
        eligible,
    })
}

/// Map a model-variant identifier ("LR", "Deep Learning", ...) to the
/// probability column that model writes.
pub fn select_column_for_model(model: &str) -> Result<ProbabilityColumn> {
    let variant: ModelVariant = model.parse()?;
    Ok(variant.probability_column())
}
