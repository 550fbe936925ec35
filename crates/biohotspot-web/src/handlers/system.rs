//! Health check and model catalogue.

use axum::Json;
use serde::Serialize;

use biohotspot_ranker::ModelVariant;

pub async fn health() -> &'static str {
    "ok"
}

#[derive(Debug, Serialize)]
pub struct ModelInfo {
    pub id: ModelVariant,
    pub code: &'static str,
    pub label: &'static str,
    pub column: &'static str,
    pub selector: &'static str,
}

/// GET /api/models: every model variant and the column it ranks by.
pub async fn api_models() -> Json<Vec<ModelInfo>> {
    let models = ModelVariant::ALL
        .into_iter()
        .map(|m| {
            let column = m.probability_column();
            ModelInfo {
                id: m,
                code: m.short_code(),
                label: m.label(),
                column: column.as_str(),
                selector: column.selector(),
            }
        })
        .collect();
    Json(models)
}
