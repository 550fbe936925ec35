//! Session snapshot of the exports folder.
//!
//! Everything the dashboard displays is read once at startup into an
//! [`ExportSnapshot`] and never modified afterwards, so it can be shared
//! across concurrent requests without locking.
//!
//! For each configured gene the files are looked up in `exports/<GENE>/`
//! first and then in `exports/`. A file that is absent or unreadable leaves
//! that slot empty and is recorded in [`GeneSnapshot::issues`].

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{info, warn};

use biohotspot_common::DataConfig;

use crate::error::LoadError;
use crate::loader;
use crate::records::{FeatureImportanceEntry, HotspotDataset, ModelVariant, SummaryTable};

/// Loaded exports for a single gene.
#[derive(Debug, Clone, Default)]
pub struct GeneSnapshot {
    pub predictions: HashMap<ModelVariant, Arc<HotspotDataset>>,
    pub feature_importance: Option<Vec<FeatureImportanceEntry>>,
    pub runtime_log: Option<SummaryTable>,
    pub hde_summary: Option<SummaryTable>,
    /// One line per file that could not be loaded
    pub issues: Vec<String>,
}

impl GeneSnapshot {
    pub fn with_predictions(mut self, dataset: HotspotDataset) -> Self {
        self.predictions.insert(dataset.model(), Arc::new(dataset));
        self
    }

    pub fn with_feature_importance(mut self, entries: Vec<FeatureImportanceEntry>) -> Self {
        self.feature_importance = Some(entries);
        self
    }

    pub fn with_runtime_log(mut self, table: SummaryTable) -> Self {
        self.runtime_log = Some(table);
        self
    }

    pub fn with_hde_summary(mut self, table: SummaryTable) -> Self {
        self.hde_summary = Some(table);
        self
    }
}

/// All genes' exports, keyed by gene symbol in configured order.
#[derive(Debug, Clone, Default)]
pub struct ExportSnapshot {
    genes: Vec<String>,
    by_gene: HashMap<String, GeneSnapshot>,
}

impl ExportSnapshot {
    /// Read every configured gene's exports from disk.
    pub fn load(config: &DataConfig) -> Self {
        let mut snapshot = Self::default();
        for gene in &config.genes {
            let gene_snapshot = load_gene(config, gene);
            info!(
                "Loaded exports for {}: {} prediction sets, {} missing",
                gene,
                gene_snapshot.predictions.len(),
                gene_snapshot.issues.len()
            );
            snapshot.insert(gene.clone(), gene_snapshot);
        }
        snapshot
    }

    pub fn insert(&mut self, gene: impl Into<String>, gene_snapshot: GeneSnapshot) {
        let gene = gene.into();
        if !self.by_gene.contains_key(&gene) {
            self.genes.push(gene.clone());
        }
        self.by_gene.insert(gene, gene_snapshot);
    }

    pub fn genes(&self) -> &[String] {
        &self.genes
    }

    pub fn gene(&self, gene: &str) -> Option<&GeneSnapshot> {
        self.by_gene.get(gene)
    }

    pub fn predictions(&self, gene: &str, model: ModelVariant) -> Option<Arc<HotspotDataset>> {
        self.gene(gene)?.predictions.get(&model).cloned()
    }
}

/// `exports/<GENE>/<file>` when present, otherwise `exports/<file>`.
fn resolve(exports_dir: &Path, gene: &str, file: &str) -> PathBuf {
    let per_gene = exports_dir.join(gene).join(file);
    if per_gene.exists() {
        per_gene
    } else {
        exports_dir.join(file)
    }
}

/// Run a loader, turning any failure into an issue line.
fn attempt<T>(issues: &mut Vec<String>, path: &Path, load: impl FnOnce(&Path) -> Result<T, LoadError>) -> Option<T> {
    match load(path) {
        Ok(value) => Some(value),
        Err(LoadError::Missing(p)) => {
            warn!("Missing file: {}", p.display());
            issues.push(format!("Missing file: {}", p.display()));
            None
        }
        Err(e) => {
            warn!("Could not read {}: {e}", path.display());
            issues.push(format!("Could not read {}: {e}", path.display()));
            None
        }
    }
}

fn load_gene(config: &DataConfig, gene: &str) -> GeneSnapshot {
    let dir = config.exports_dir.as_path();
    let mut issues = Vec::new();
    let mut predictions = HashMap::new();

    for (model, file) in [
        (ModelVariant::LogisticRegression, &config.lr_predictions_file),
        (ModelVariant::DeepLearning, &config.dl_predictions_file),
    ] {
        let path = resolve(dir, gene, file);
        if let Some(dataset) = attempt(&mut issues, &path, |p| loader::load_predictions(p, gene, model)) {
            predictions.insert(model, Arc::new(dataset));
        }
    }

    let feature_importance = attempt(
        &mut issues,
        &resolve(dir, gene, &config.feature_importance_file),
        loader::load_feature_importance,
    );
    let runtime_log = attempt(
        &mut issues,
        &resolve(dir, gene, &config.runtime_log_file),
        loader::load_summary_table,
    );
    let hde_summary = attempt(
        &mut issues,
        &resolve(dir, gene, &config.hde_summary_file),
        loader::load_summary_table,
    );

    GeneSnapshot {
        predictions,
        feature_importance,
        runtime_log,
        hde_summary,
        issues,
    }
}
