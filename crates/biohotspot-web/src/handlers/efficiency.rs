//! Efficiency & Sustainability panel: HDE summary and runtime log tables.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Serialize;

use biohotspot_ranker::{ExportSnapshot, SummaryTable};

use crate::charts::{info_box, table};
use crate::error::ApiError;
use crate::handlers::dashboard::Selection;
use crate::handlers::explainability::GeneQuery;
use crate::state::SharedState;

fn summary_html(title: &str, summary: &SummaryTable) -> String {
    format!("<h3>{title}</h3>{}", table(&summary.headers, &summary.rows))
}

/// The HDE summary follows the efficiency toggle; the runtime log is shown
/// whenever it was loaded.
pub fn efficiency_panel(snapshot: &ExportSnapshot, selection: &Selection) -> String {
    let Some(gene) = snapshot.gene(&selection.gene) else {
        return info_box("Efficiency data not available.");
    };

    let mut html = String::new();
    if selection.show_efficiency {
        if let Some(hde) = &gene.hde_summary {
            html.push_str(&summary_html("HDE Summary", hde));
        }
    }
    if let Some(runtime) = &gene.runtime_log {
        html.push_str(&summary_html("Runtime", runtime));
    }

    if html.is_empty() {
        info_box("Efficiency data not available.")
    } else {
        html
    }
}

#[derive(Debug, Serialize)]
pub struct EfficiencyResponse {
    pub gene: String,
    pub hde_summary: Option<SummaryTable>,
    pub runtime_log: Option<SummaryTable>,
}

/// GET /api/efficiency
pub async fn api_efficiency(
    State(state): State<SharedState>,
    Query(query): Query<GeneQuery>,
) -> Result<Json<EfficiencyResponse>, ApiError> {
    let gene = query.gene.unwrap_or_else(|| state.config.display.default_gene.clone());
    let snapshot = state
        .snapshot
        .gene(&gene)
        .ok_or_else(|| ApiError::NotFound(format!("Unknown gene {gene}")))?;

    Ok(Json(EfficiencyResponse {
        hde_summary: snapshot.hde_summary.clone(),
        runtime_log: snapshot.runtime_log.clone(),
        gene,
    }))
}

