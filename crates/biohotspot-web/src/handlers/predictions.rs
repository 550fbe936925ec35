//! Predictions panel and `/api/predictions`: the ranked top-N hotspots for
//! the selected gene and model.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use biohotspot_ranker::{select_column_for_model, ExportSnapshot, ModelVariant, RankingRequest, RankingResult};

use crate::charts::{column_chart, info_box, table, warning_box};
use crate::error::ApiError;
use crate::handlers::dashboard::Selection;
use crate::state::SharedState;

const NO_DATA: &str = "No data found. Upload exports folder.";

/// Resolve the model's column, find the dataset and rank it.
pub fn rank_selection(snapshot: &ExportSnapshot, gene: &str, model: &str, top_n: i64) -> Result<RankingResult, ApiError> {
    let column = select_column_for_model(model)?;
    let dataset = snapshot.predictions(gene, column.model_variant()).ok_or_else(|| {
        ApiError::NotFound(format!(
            "No {} predictions loaded for {gene}",
            column.model_variant().short_code()
        ))
    })?;

    let request = RankingRequest {
        records: dataset.records(),
        column: column.as_str(),
        top_n,
    };
    Ok(request.run()?)
}

pub fn predictions_panel(snapshot: &ExportSnapshot, selection: &Selection) -> String {
    let result = match rank_selection(snapshot, &selection.gene, &selection.model, selection.top_n) {
        Ok(result) => result,
        Err(ApiError::NotFound(_)) => return info_box(NO_DATA),
        Err(e) => return info_box(&e.to_string()),
    };

    let column = result.column;
    let mut html = String::new();

    if result.is_empty() {
        html.push_str(&info_box(&format!("No records carry a {column} value.")));
    } else {
        let headers = ["codon", column.as_str(), "literature_mentions", "conservation_score", "mutation_count"];
        let rows: Vec<Vec<String>> = result
            .entries
            .iter()
            .map(|r| {
                vec![
                    r.codon.clone(),
                    r.probability(column).map(|p| format!("{p:.4}")).unwrap_or_default(),
                    r.literature_mentions.map(|n| n.to_string()).unwrap_or_default(),
                    r.conservation_score.map(|c| format!("{c:.3}")).unwrap_or_default(),
                    r.mutation_count.map(|n| n.to_string()).unwrap_or_default(),
                ]
            })
            .collect();
        html.push_str(&table(&headers, &rows));
        html.push_str(&column_chart(
            &format!("Top {} predicted hotspots", selection.top_n),
            "Codon",
            "Predicted Probability",
            &result.bar_series(),
        ));
    }

    if !result.warnings.is_empty() {
        let codons: Vec<&str> = result.warnings.iter().map(|w| w.codon.as_str()).collect();
        html.push_str(&warning_box(&format!(
            "{} record(s) have no {column} value and were not ranked: {}",
            codons.len(),
            codons.join(", ")
        )));
    }

    html
}

// === API ===

#[derive(Debug, Deserialize)]
pub struct PredictionsQuery {
    pub gene: Option<String>,
    pub model: Option<String>,
    pub top_n: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct PredictionsResponse {
    pub gene: String,
    pub model: ModelVariant,
    #[serde(flatten)]
    pub result: RankingResult,
}

/// GET /api/predictions: ranked hotspots as JSON. `top_n` is passed to the
/// engine as given, so non-positive values are rejected.
pub async fn api_predictions(
    State(state): State<SharedState>,
    Query(query): Query<PredictionsQuery>,
) -> Result<Json<PredictionsResponse>, ApiError> {
    let display = &state.config.display;
    let gene = query.gene.unwrap_or_else(|| display.default_gene.clone());
    let model = query.model.unwrap_or_else(|| display.default_model.clone());
    let top_n = query.top_n.unwrap_or(i64::from(display.top_n_default));

    let result = rank_selection(&state.snapshot, &gene, &model, top_n)?;
    Ok(Json(PredictionsResponse {
        gene,
        model: result.column.model_variant(),
        result,
    }))
}
