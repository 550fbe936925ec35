//! Explainability panel: logistic-regression feature importance.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use biohotspot_ranker::{ExportSnapshot, FeatureImportanceEntry};

use crate::charts::{bar_chart, info_box};
use crate::error::ApiError;
use crate::handlers::dashboard::Selection;
use crate::state::SharedState;

pub fn explainability_panel(snapshot: &ExportSnapshot, selection: &Selection) -> String {
    let entries = snapshot
        .gene(&selection.gene)
        .and_then(|g| g.feature_importance.as_ref());

    match entries {
        Some(entries) if selection.show_explainability => {
            let bars: Vec<(&str, f64)> = entries
                .iter()
                .map(|e| (e.feature.as_str(), e.abs_coefficient))
                .collect();
            bar_chart("Importance", &bars)
        }
        _ => info_box("Feature importance not available."),
    }
}

#[derive(Debug, Deserialize)]
pub struct GeneQuery {
    pub gene: Option<String>,
}

/// GET /api/features
pub async fn api_features(
    State(state): State<SharedState>,
    Query(query): Query<GeneQuery>,
) -> Result<Json<Vec<FeatureImportanceEntry>>, ApiError> {
    let gene = query.gene.unwrap_or_else(|| state.config.display.default_gene.clone());
    state
        .snapshot
        .gene(&gene)
        .and_then(|g| g.feature_importance.clone())
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Feature importance not available for {gene}")))
}
