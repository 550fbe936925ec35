//! CSV readers for the prediction export files.
//!
//! File contract (one header row each):
//!
//! | File | Columns |
//! |------|---------|
//! | `enhanced_hotspot_predictions_{lr,dl}.csv` | `codon`, `AI_Hotspot_Prob_LR` and/or `DL_Hotspot_Prob`, `literature_mentions`, `conservation_score`, `mutation_count` |
//! | `feature_importance_lr.csv` | `feature`, `abs_coef` |
//! | `runtime_log.csv`, `HDE_summary.csv` | any |
//!
//! Empty or unparsable cells load as `None` and the row is kept. The ranking
//! engine reports records without a probability instead of ranking them.

use serde::Deserialize;
use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

use crate::error::LoadError;
use crate::records::{FeatureImportanceEntry, HotspotDataset, HotspotRecord, ModelVariant, SummaryTable};

type Result<T> = std::result::Result<T, LoadError>;

/// Raw prediction row as written by the upstream prediction job.
///
/// Counts are read as floats because pandas writes `55.0` once a column
/// holds any NaN.
#[derive(Debug, Deserialize)]
struct PredictionRow {
    codon: String,
    #[serde(rename = "AI_Hotspot_Prob_LR", default, deserialize_with = "csv::invalid_option")]
    lr_probability: Option<f64>,
    #[serde(rename = "DL_Hotspot_Prob", default, deserialize_with = "csv::invalid_option")]
    dl_probability: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    literature_mentions: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    conservation_score: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    mutation_count: Option<f64>,
}

impl PredictionRow {
    fn into_record(self, gene: &str) -> HotspotRecord {
        let codon = self.codon.as_str();
        let literature_mentions = count(gene, codon, "literature_mentions", self.literature_mentions);
        let mutation_count = count(gene, codon, "mutation_count", self.mutation_count);
        let conservation_score = self.conservation_score.filter(|v| !v.is_nan());
        if conservation_score.is_none() {
            warn!(gene, codon, field = "conservation_score", "Blank or unreadable cell in prediction export");
        }

        HotspotRecord {
            lr_probability: self.lr_probability,
            dl_probability: self.dl_probability,
            literature_mentions,
            conservation_score,
            mutation_count,
            codon: self.codon,
        }
    }
}

/// Integral, non-negative floats are accepted as counts.
fn count(gene: &str, codon: &str, field: &str, value: Option<f64>) -> Option<u32> {
    let parsed = value
        .filter(|v| v.fract() == 0.0 && *v >= 0.0 && *v <= f64::from(u32::MAX))
        .map(|v| v as u32);
    if parsed.is_none() {
        warn!(gene, codon, field, "Blank or unreadable cell in prediction export");
    }
    parsed
}

fn open(path: &Path) -> Result<File> {
    if !path.exists() {
        return Err(LoadError::Missing(path.to_path_buf()));
    }
    File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Load a prediction export for one (gene, model).
pub fn load_predictions(path: &Path, gene: &str, model: ModelVariant) -> Result<HotspotDataset> {
    debug!("Loading {} predictions for {} from {:?}", model.short_code(), gene, path);
    read_predictions(open(path)?, gene, model)
}

pub fn read_predictions<R: Read>(reader: R, gene: &str, model: ModelVariant) -> Result<HotspotDataset> {
    let mut reader = csv::Reader::from_reader(reader);
    let mut records = Vec::new();
    let mut seen = HashSet::new();

    for row in reader.deserialize::<PredictionRow>() {
        let record = row?.into_record(gene);
        if !seen.insert(record.codon.clone()) {
            warn!(gene, codon = %record.codon, "Duplicate codon in prediction export");
        }
        records.push(record);
    }

    Ok(HotspotDataset::new(gene, model, records))
}

pub fn load_feature_importance(path: &Path) -> Result<Vec<FeatureImportanceEntry>> {
    read_feature_importance(open(path)?)
}

pub fn read_feature_importance<R: Read>(reader: R) -> Result<Vec<FeatureImportanceEntry>> {
    let mut reader = csv::Reader::from_reader(reader);
    let entries = reader
        .deserialize::<FeatureImportanceEntry>()
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(entries)
}

/// Load a free-form table; every cell is kept as text.
pub fn load_summary_table(path: &Path) -> Result<SummaryTable> {
    read_summary_table(open(path)?)
}

pub fn read_summary_table<R: Read>(reader: R) -> Result<SummaryTable> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers: Vec<String> = reader.headers()?.iter().map(|s| s.to_string()).collect();

    let mut rows: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        rows.push(record?.iter().map(|s| s.to_string()).collect());
    }

    Ok(SummaryTable { headers, rows })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::ProbabilityColumn;

    const DL_CSV: &str = "\
codon,DL_Hotspot_Prob,literature_mentions,conservation_score,mutation_count
175,0.92,41,0.98,120
248,0.97,55,0.99,150
220,,3,0.71,12
";

    #[test]
    fn test_read_predictions() {
        let dataset = read_predictions(DL_CSV.as_bytes(), "TP53", ModelVariant::DeepLearning).unwrap();
        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.gene(), "TP53");

        let first = &dataset.records()[0];
        assert_eq!(first.codon, "175");
        assert_eq!(first.dl_probability, Some(0.92));
        assert_eq!(first.lr_probability, None);
        assert_eq!(first.literature_mentions, Some(41));
        assert_eq!(first.mutation_count, Some(120));

        assert_eq!(dataset.records()[2].probability(ProbabilityColumn::DeepLearning), None);
    }

    #[test]
    fn test_read_predictions_with_both_columns() {
        let csv = "\
codon,AI_Hotspot_Prob_LR,DL_Hotspot_Prob,literature_mentions,conservation_score,mutation_count
R273,0.81,0.88,60,0.97,140
";
        let dataset = read_predictions(csv.as_bytes(), "TP53", ModelVariant::LogisticRegression).unwrap();
        let record = &dataset.records()[0];
        assert_eq!(record.lr_probability, Some(0.81));
        assert_eq!(record.dl_probability, Some(0.88));
    }

    #[test]
    fn test_read_predictions_keeps_rows_with_bad_counts() {
        let csv = "\
codon,DL_Hotspot_Prob,literature_mentions,conservation_score,mutation_count
R175,0.92,41,0.98,120
R248,0.97,55.0,0.99,150.0
Y220,0.92,,,many
";
        let dataset = read_predictions(csv.as_bytes(), "TP53", ModelVariant::DeepLearning).unwrap();
        assert_eq!(dataset.len(), 3);

        let r248 = &dataset.records()[1];
        assert_eq!(r248.literature_mentions, Some(55));
        assert_eq!(r248.mutation_count, Some(150));

        let y220 = &dataset.records()[2];
        assert_eq!(y220.dl_probability, Some(0.92));
        assert_eq!(y220.literature_mentions, None);
        assert_eq!(y220.conservation_score, None);
        assert_eq!(y220.mutation_count, None);
    }

    #[test]
    fn test_read_predictions_rejects_fractional_count() {
        let csv = "\
codon,DL_Hotspot_Prob,literature_mentions,conservation_score,mutation_count
R175,0.92,4.5,0.98,-3
";
        let dataset = read_predictions(csv.as_bytes(), "TP53", ModelVariant::DeepLearning).unwrap();
        let record = &dataset.records()[0];
        assert_eq!(record.literature_mentions, None);
        assert_eq!(record.mutation_count, None);
        assert_eq!(record.conservation_score, Some(0.98));
    }

    #[test]
    fn test_read_predictions_requires_codon_column() {
        let csv = "DL_Hotspot_Prob,literature_mentions\n0.9,1\n";
        let err = read_predictions(csv.as_bytes(), "TP53", ModelVariant::DeepLearning).unwrap_err();
        assert!(matches!(err, LoadError::Csv(_)));
    }

    #[test]
    fn test_read_feature_importance() {
        let csv = "feature,abs_coef\nconservation_score,1.42\nliterature_mentions,0.37\n";
        let entries = read_feature_importance(csv.as_bytes()).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].feature, "conservation_score");
        assert!((entries[0].abs_coefficient - 1.42).abs() < 1e-12);
    }

    #[test]
    fn test_read_summary_table_keeps_cells_verbatim() {
        let csv = "stage,seconds,energy_kwh\ntrain_lr,12.5,0.002\ntrain_dl,340.1,0.09\n";
        let table = read_summary_table(csv.as_bytes()).unwrap();
        assert_eq!(table.headers, vec!["stage", "seconds", "energy_kwh"]);
        assert_eq!(table.rows[1], vec!["train_dl", "340.1", "0.09"]);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.csv");
        let err = load_summary_table(&path).unwrap_err();
        assert!(matches!(err, LoadError::Missing(p) if p == path));
    }

    #[test]
    fn test_load_predictions_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("enhanced_hotspot_predictions_dl.csv");
        std::fs::write(&path, DL_CSV).unwrap();
        let dataset = load_predictions(&path, "BRCA1", ModelVariant::DeepLearning).unwrap();
        assert_eq!(dataset.gene(), "BRCA1");
        assert_eq!(dataset.model(), ModelVariant::DeepLearning);
        assert_eq!(dataset.len(), 3);
    }
}
