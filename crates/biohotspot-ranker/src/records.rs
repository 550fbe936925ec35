//! Prediction records, model variants and their probability columns.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::RankError;

/// The predictive models whose outputs the dashboard can display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelVariant {
    LogisticRegression,
    DeepLearning,
}

impl ModelVariant {
    pub const ALL: [ModelVariant; 2] = [ModelVariant::LogisticRegression, ModelVariant::DeepLearning];

    /// Human-readable label, as offered in the model selector.
    pub fn label(self) -> &'static str {
        match self {
            ModelVariant::LogisticRegression => "Logistic Regression",
            ModelVariant::DeepLearning => "Deep Learning",
        }
    }

    pub fn short_code(self) -> &'static str {
        match self {
            ModelVariant::LogisticRegression => "LR",
            ModelVariant::DeepLearning => "DL",
        }
    }

    pub fn probability_column(self) -> ProbabilityColumn {
        match self {
            ModelVariant::LogisticRegression => ProbabilityColumn::LogisticRegression,
            ModelVariant::DeepLearning => ProbabilityColumn::DeepLearning,
        }
    }
}

impl fmt::Display for ModelVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ModelVariant {
    type Err = RankError;

    /// Accepts the short code ("LR", "DL") or the label, ignoring case and
    /// treating `_`/`-` as spaces.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalised = s.trim().to_ascii_lowercase().replace(['_', '-'], " ");
        match normalised.as_str() {
            "lr" | "logistic regression" => Ok(ModelVariant::LogisticRegression),
            "dl" | "deep learning" => Ok(ModelVariant::DeepLearning),
            _ => Err(RankError::UnknownModelVariant(s.to_string())),
        }
    }
}

/// Closed set of probability-column selectors, one per model variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ProbabilityColumn {
    #[serde(rename = "AI_Hotspot_Prob_LR")]
    LogisticRegression,
    #[serde(rename = "DL_Hotspot_Prob")]
    DeepLearning,
}

impl ProbabilityColumn {
    /// Header of this column in the prediction export files.
    pub fn as_str(self) -> &'static str {
        match self {
            ProbabilityColumn::LogisticRegression => "AI_Hotspot_Prob_LR",
            ProbabilityColumn::DeepLearning => "DL_Hotspot_Prob",
        }
    }

    /// Stable selector id, independent of the export file header.
    pub fn selector(self) -> &'static str {
        match self {
            ProbabilityColumn::LogisticRegression => "LR_PROBABILITY",
            ProbabilityColumn::DeepLearning => "DL_PROBABILITY",
        }
    }

    pub fn model_variant(self) -> ModelVariant {
        match self {
            ProbabilityColumn::LogisticRegression => ModelVariant::LogisticRegression,
            ProbabilityColumn::DeepLearning => ModelVariant::DeepLearning,
        }
    }
}

impl fmt::Display for ProbabilityColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProbabilityColumn {
    type Err = RankError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        [ProbabilityColumn::LogisticRegression, ProbabilityColumn::DeepLearning]
            .into_iter()
            .find(|c| s.eq_ignore_ascii_case(c.as_str()) || s.eq_ignore_ascii_case(c.selector()))
            .ok_or_else(|| RankError::UnknownColumn(s.to_string()))
    }
}

/// One row of prediction output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotspotRecord {
    pub codon: String,
    /// Logistic-regression hotspot probability, when the export carries it
    pub lr_probability: Option<f64>,
    /// Deep-model hotspot probability, when the export carries it
    pub dl_probability: Option<f64>,
    /// Descriptive columns; `None` when the cell was blank or unreadable
    pub literature_mentions: Option<u32>,
    pub conservation_score: Option<f64>,
    pub mutation_count: Option<u32>,
}

impl HotspotRecord {
    /// Value of the given probability column. NaN counts as absent.
    pub fn probability(&self, column: ProbabilityColumn) -> Option<f64> {
        let value = match column {
            ProbabilityColumn::LogisticRegression => self.lr_probability,
            ProbabilityColumn::DeepLearning => self.dl_probability,
        };
        value.filter(|p| !p.is_nan())
    }
}

/// Prediction records for one (gene, model variant), in source order.
///
/// Source order is the tie-break key for ranking, so it is never re-sorted
/// in place.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HotspotDataset {
    gene: String,
    model: ModelVariant,
    records: Vec<HotspotRecord>,
}

impl HotspotDataset {
    pub fn new(gene: impl Into<String>, model: ModelVariant, records: Vec<HotspotRecord>) -> Self {
        Self {
            gene: gene.into(),
            model,
            records,
        }
    }

    pub fn gene(&self) -> &str {
        &self.gene
    }

    pub fn model(&self) -> ModelVariant {
        self.model
    }

    pub fn records(&self) -> &[HotspotRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Absolute logistic-regression coefficient for one input feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureImportanceEntry {
    pub feature: String,
    #[serde(rename = "abs_coef")]
    pub abs_coefficient: f64,
}

/// A free-form table (runtime log, HDE summary) displayed verbatim.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SummaryTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_variant_parsing() {
        assert_eq!("LR".parse::<ModelVariant>().unwrap(), ModelVariant::LogisticRegression);
        assert_eq!("Deep Learning".parse::<ModelVariant>().unwrap(), ModelVariant::DeepLearning);
        assert_eq!("deep_learning".parse::<ModelVariant>().unwrap(), ModelVariant::DeepLearning);
        assert_eq!(
            "SVM".parse::<ModelVariant>(),
            Err(RankError::UnknownModelVariant("SVM".to_string()))
        );
    }

    #[test]
    fn test_column_accepts_header_and_selector() {
        assert_eq!(
            "AI_Hotspot_Prob_LR".parse::<ProbabilityColumn>().unwrap(),
            ProbabilityColumn::LogisticRegression
        );
        assert_eq!(
            "DL_PROBABILITY".parse::<ProbabilityColumn>().unwrap(),
            ProbabilityColumn::DeepLearning
        );
        assert!(matches!(
            "BOGUS_COL".parse::<ProbabilityColumn>(),
            Err(RankError::UnknownColumn(_))
        ));
    }

    #[test]
    fn test_column_and_variant_are_inverse() {
        for model in ModelVariant::ALL {
            assert_eq!(model.probability_column().model_variant(), model);
        }
    }

    #[test]
    fn test_nan_probability_is_absent() {
        let record = HotspotRecord {
            codon: "R273".to_string(),
            lr_probability: Some(f64::NAN),
            dl_probability: Some(0.4),
            literature_mentions: None,
            conservation_score: None,
            mutation_count: None,
        };
        assert_eq!(record.probability(ProbabilityColumn::LogisticRegression), None);
        assert_eq!(record.probability(ProbabilityColumn::DeepLearning), Some(0.4));
    }
}
