//! Axum router: maps all URL paths to handlers.

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{
    dashboard::dashboard,
    efficiency::api_efficiency,
    explainability::api_features,
    predictions::api_predictions,
    system::{api_models, health},
};
use crate::state::{AppState, SharedState};

/// Build and return the full Axum router.
pub fn build_router(state: AppState) -> Router {
    let shared: SharedState = Arc::new(state);

    Router::new()
        // Pages
        .route("/",       get(dashboard))
        .route("/health", get(health))

        // API endpoints
        .route("/api/predictions", get(api_predictions))
        .route("/api/features",    get(api_features))
        .route("/api/efficiency",  get(api_efficiency))
        .route("/api/models",      get(api_models))

        // Middleware
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(shared)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use biohotspot_common::DashboardConfig;
    use biohotspot_ranker::{
        ExportSnapshot, FeatureImportanceEntry, GeneSnapshot, HotspotDataset, HotspotRecord, ModelVariant,
        SummaryTable,
    };
    use tower::ServiceExt;

    fn record(codon: &str, dl: Option<f64>) -> HotspotRecord {
        HotspotRecord {
            codon: codon.to_string(),
            lr_probability: None,
            dl_probability: dl,
            literature_mentions: Some(4),
            conservation_score: Some(0.9),
            mutation_count: Some(10),
        }
    }

    fn app() -> Router {
        let tp53 = GeneSnapshot::default()
            .with_predictions(HotspotDataset::new(
                "TP53",
                ModelVariant::DeepLearning,
                vec![
                    record("R175", Some(0.92)),
                    record("R248", Some(0.97)),
                    record("Y220", Some(0.92)),
                    record("R273", None),
                ],
            ))
            .with_predictions(HotspotDataset::new("TP53", ModelVariant::LogisticRegression, vec![]))
            .with_feature_importance(vec![FeatureImportanceEntry {
                feature: "conservation_score".to_string(),
                abs_coefficient: 1.2,
            }])
            .with_runtime_log(SummaryTable {
                headers: vec!["stage".to_string(), "seconds".to_string()],
                rows: vec![vec!["train_dl".to_string(), "340.1".to_string()]],
            })
            .with_hde_summary(SummaryTable {
                headers: vec!["model".to_string(), "hde".to_string()],
                rows: vec![vec!["DL".to_string(), "0.82".to_string()]],
            });

        let mut snapshot = ExportSnapshot::default();
        snapshot.insert("TP53", tp53);
        snapshot.insert("BRCA1", GeneSnapshot {
            issues: vec!["Missing file: exports/enhanced_hotspot_predictions_dl.csv".to_string()],
            ..GeneSnapshot::default()
        });

        build_router(AppState::new(DashboardConfig::default(), snapshot).unwrap())
    }

    async fn fetch(uri: &str) -> (StatusCode, String) {
        let response = app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = fetch("/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "ok");
    }

    #[tokio::test]
    async fn test_dashboard_ranks_default_selection() {
        let (status, body) = fetch("/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Top 8 predicted hotspots"));
        let r248 = body.find("<td>R248</td>").unwrap();
        let r175 = body.find("<td>R175</td>").unwrap();
        let y220 = body.find("<td>Y220</td>").unwrap();
        assert!(r248 < r175 && r175 < y220);
        assert!(body.contains("were not ranked: R273"));
        assert!(body.contains("conservation_score"));
        assert!(body.contains("<h3>HDE Summary</h3>"));
        assert!(body.contains("<h3>Runtime</h3>"));
    }

    #[tokio::test]
    async fn test_dashboard_missing_dataset_shows_notice() {
        let (status, body) = fetch("/?gene=BRCA1").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("No data found. Upload exports folder."));
        assert!(body.contains("Missing file: exports/enhanced_hotspot_predictions_dl.csv"));
        assert!(body.contains("Feature importance not available."));
    }

    #[tokio::test]
    async fn test_dashboard_empty_dataset_and_unknown_model() {
        let (_, body) = fetch("/?model=LR").await;
        assert!(body.contains("Dataset is empty"));

        let (status, body) = fetch("/?model=Random+Forest").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Unknown model variant: Random Forest"));
    }

    #[tokio::test]
    async fn test_dashboard_toggles_hide_panels() {
        let (_, body) = fetch("/?submitted=1&gene=TP53&model=DL&top_n=5").await;
        assert!(body.contains("Feature importance not available."));
        assert!(!body.contains("<h3>HDE Summary</h3>"));
        // runtime log ignores the efficiency toggle
        assert!(body.contains("<h3>Runtime</h3>"));

        let (_, body) = fetch("/?submitted=1&gene=TP53&show_eff=on").await;
        assert!(body.contains("<h3>HDE Summary</h3>"));
        assert!(body.contains("Feature importance not available."));
    }

    #[tokio::test]
    async fn test_api_predictions() {
        let (status, body) = fetch("/api/predictions?gene=TP53&model=DL&top_n=2").await;
        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["model"], "deep_learning");
        assert_eq!(json["column"], "DL_Hotspot_Prob");
        let codons: Vec<&str> = json["entries"]
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["codon"].as_str().unwrap())
            .collect();
        assert_eq!(codons, vec!["R248", "R175"]);
        assert_eq!(json["warnings"][0]["codon"], "R273");
    }

    #[tokio::test]
    async fn test_api_predictions_errors() {
        let (status, body) = fetch("/api/predictions?model=SVM").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("unknown_model_variant"));

        let (status, _) = fetch("/api/predictions?top_n=0").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = fetch("/api/predictions?model=LR").await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let (status, _) = fetch("/api/predictions?gene=BRCA1").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_api_features_and_efficiency() {
        let (status, body) = fetch("/api/features?gene=TP53").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(r#""abs_coef":1.2"#));

        let (status, _) = fetch("/api/features?gene=BRCA1").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = fetch("/api/efficiency").await;
        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["hde_summary"]["headers"][1], "hde");
        assert_eq!(json["runtime_log"]["rows"][0][0], "train_dl");
    }

    #[tokio::test]
    async fn test_api_models() {
        let (_, body) = fetch("/api/models").await;
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json[0]["column"], "AI_Hotspot_Prob_LR");
        assert_eq!(json[1]["selector"], "DL_PROBABILITY");
    }

    #[test]
    fn test_state_rejects_unknown_default_model() {
        let mut config = DashboardConfig::default();
        config.display.default_model = "GBM".to_string();
        let err = AppState::new(config, ExportSnapshot::default()).err().unwrap();
        assert!(matches!(err, biohotspot_common::ConfigError::Invalid(ref m) if m.contains("GBM")));
    }
}
