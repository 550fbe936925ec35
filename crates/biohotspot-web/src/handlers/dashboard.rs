//! Dashboard handler: the single-page explorer with sidebar controls and
//! the Predictions, Explainability and Efficiency panels.

use axum::{
    extract::{Query, State},
    response::Html,
};
use html_escape::{encode_double_quoted_attribute, encode_text};
use serde::Deserialize;
use tracing::debug;

use biohotspot_common::DisplayConfig;
use biohotspot_ranker::ModelVariant;

use crate::charts::warning_box;
use crate::handlers::{efficiency, explainability, predictions};
use crate::state::{AppState, SharedState};

const DASHBOARD_CSS: &str = include_str!("../../templates/dashboard.css");

/// Raw sidebar form values. Everything is optional so a bare `GET /`
/// falls back to the configured defaults.
#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    pub gene: Option<String>,
    pub model: Option<String>,
    pub top_n: Option<String>,
    pub show_exp: Option<String>,
    pub show_eff: Option<String>,
    /// Present when the sidebar form was submitted; unchecked boxes are
    /// then absent from the query rather than defaulted
    pub submitted: Option<String>,
}

/// The user's display choices for one page render.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub gene: String,
    /// Model identifier as sent by the client, resolved by the predictions panel
    pub model: String,
    pub top_n: i64,
    pub show_explainability: bool,
    pub show_efficiency: bool,
}

fn flag(value: Option<&str>, submitted: bool, default: bool) -> bool {
    match value {
        Some(v) => !matches!(v.trim().to_ascii_lowercase().as_str(), "0" | "false" | "off" | "no"),
        None if submitted => false,
        None => default,
    }
}

impl Selection {
    pub fn resolve(query: &DashboardQuery, display: &DisplayConfig) -> Self {
        let submitted = query.submitted.is_some();
        let top_n = query
            .top_n
            .as_deref()
            .and_then(|v| v.trim().parse::<i64>().ok())
            .unwrap_or(i64::from(display.top_n_default));

        Self {
            gene: query.gene.clone().unwrap_or_else(|| display.default_gene.clone()),
            model: query.model.clone().unwrap_or_else(|| display.default_model.clone()),
            top_n: display.clamp_top_n(top_n),
            show_explainability: flag(query.show_exp.as_deref(), submitted, display.show_explainability),
            show_efficiency: flag(query.show_eff.as_deref(), submitted, display.show_efficiency),
        }
    }
}

pub async fn dashboard(State(state): State<SharedState>, Query(query): Query<DashboardQuery>) -> Html<String> {
    let selection = Selection::resolve(&query, &state.config.display);
    debug!(gene = %selection.gene, model = %selection.model, top_n = selection.top_n, "Rendering dashboard");
    Html(render_dashboard(&state, &selection))
}

fn render_sidebar(state: &AppState, selection: &Selection) -> String {
    let display = &state.config.display;

    let gene_options: String = state
        .config
        .data
        .genes
        .iter()
        .map(|g| {
            let selected = if *g == selection.gene { " selected" } else { "" };
            format!(
                r#"<option value="{}"{selected}>{}</option>"#,
                encode_double_quoted_attribute(g),
                encode_text(g)
            )
        })
        .collect();

    let chosen = selection.model.parse::<ModelVariant>().ok();
    let model_radios: String = ModelVariant::ALL
        .iter()
        .map(|m| {
            let checked = if chosen == Some(*m) { " checked" } else { "" };
            format!(
                r#"<div><input type="radio" name="model" id="model-{code}" value="{label}"{checked}> <label for="model-{code}" style="display:inline">{label}</label></div>"#,
                code = m.short_code(),
                label = m.label()
            )
        })
        .collect();

    let exp_checked = if selection.show_explainability { " checked" } else { "" };
    let eff_checked = if selection.show_efficiency { " checked" } else { "" };

    format!(
        r#"<aside class="sidebar">
    <h2>AI-BioHotspot Explorer</h2>
    <form method="get" action="/">
        <input type="hidden" name="submitted" value="1">
        <label for="gene">Select Gene</label>
        <select name="gene" id="gene">{gene_options}</select>
        <label>Select Model</label>
        {model_radios}
        <label for="top_n">Top N hotspots</label>
        <input type="range" name="top_n" id="top_n" min="{min}" max="{max}" value="{top_n}" oninput="this.nextElementSibling.value=this.value">
        <output>{top_n}</output>
        <label><input type="checkbox" name="show_exp"{exp_checked}> Show Explainability</label>
        <label><input type="checkbox" name="show_eff"{eff_checked}> Show Efficiency</label>
        <button class="btn" type="submit">Update</button>
    </form>
</aside>"#,
        min = display.top_n_min,
        max = display.top_n_max,
        top_n = selection.top_n,
    )
}

/// Full page for one selection.
pub fn render_dashboard(state: &AppState, selection: &Selection) -> String {
    let issues: String = state
        .snapshot
        .gene(&selection.gene)
        .map(|g| g.issues.iter().map(|i| warning_box(i)).collect())
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>AI-BioHotspot Explorer</title>
    <style>{css}</style>
</head>
<body>
<div class="app-container">
{sidebar}
<main class="main-content">
    <h1>AI-BioHotspot Explorer Dashboard</h1>
    {issues}
    <details class="panel" open>
        <summary>Predictions</summary>
        {predictions}
    </details>
    <details class="panel">
        <summary>Explainability</summary>
        {explainability}
    </details>
    <details class="panel">
        <summary>Efficiency &amp; Sustainability</summary>
        {efficiency}
    </details>
    <footer>AI-BioHotspot Explorer – Lab Mode</footer>
</main>
</div>
</body>
</html>"#,
        css = DASHBOARD_CSS,
        sidebar = render_sidebar(state, selection),
        predictions = predictions::predictions_panel(&state.snapshot, selection),
        explainability = explainability::explainability_panel(&state.snapshot, selection),
        efficiency = efficiency::efficiency_panel(&state.snapshot, selection),
    )
}
