//! JSON API error responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use biohotspot_ranker::RankError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Rank(#[from] RankError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Rank(RankError::EmptyDataset) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Rank(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            ApiError::NotFound(_) => "not_found",
            ApiError::Rank(RankError::EmptyDataset) => "empty_dataset",
            ApiError::Rank(RankError::UnknownColumn(_)) => "unknown_column",
            ApiError::Rank(RankError::InvalidTopN(_)) => "invalid_top_n",
            ApiError::Rank(RankError::UnknownModelVariant(_)) => "unknown_model_variant",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": self.kind(),
            "message": self.to_string(),
        }));
        (self.status(), body).into_response()
    }
}
