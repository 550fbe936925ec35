//! Dashboard configuration.
//!
//! Read from `biohotspot.toml` in the current directory, or from the path in
//! the `BIOHOTSPOT_CONFIG` env var. Every field has a default, so an absent
//! default file yields a working dashboard over `./exports`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

pub const CONFIG_ENV_VAR: &str = "BIOHOTSPOT_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "biohotspot.toml";

/// Complete dashboard configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub display: DisplayConfig,
}

// ── Server ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16    { 3001 }

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

// ── Data (export snapshots) ───────────────────────────────────────────────────

/// Where the precomputed export files live and what they are called.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Root of the exports folder
    #[serde(default = "default_exports_dir")]
    pub exports_dir: PathBuf,

    /// Genes offered in the gene selector
    #[serde(default = "default_genes")]
    pub genes: Vec<String>,

    #[serde(default = "default_lr_predictions")]
    pub lr_predictions_file: String,

    #[serde(default = "default_dl_predictions")]
    pub dl_predictions_file: String,

    #[serde(default = "default_feature_importance")]
    pub feature_importance_file: String,

    #[serde(default = "default_runtime_log")]
    pub runtime_log_file: String,

    #[serde(default = "default_hde_summary")]
    pub hde_summary_file: String,
}

fn default_exports_dir()        -> PathBuf     { PathBuf::from("exports") }
fn default_genes()              -> Vec<String> { vec!["TP53".to_string(), "BRCA1".to_string()] }
fn default_lr_predictions()     -> String      { "enhanced_hotspot_predictions_lr.csv".to_string() }
fn default_dl_predictions()     -> String      { "enhanced_hotspot_predictions_dl.csv".to_string() }
fn default_feature_importance() -> String      { "feature_importance_lr.csv".to_string() }
fn default_runtime_log()        -> String      { "runtime_log.csv".to_string() }
fn default_hde_summary()        -> String      { "HDE_summary.csv".to_string() }

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            exports_dir: default_exports_dir(),
            genes: default_genes(),
            lr_predictions_file: default_lr_predictions(),
            dl_predictions_file: default_dl_predictions(),
            feature_importance_file: default_feature_importance(),
            runtime_log_file: default_runtime_log(),
            hde_summary_file: default_hde_summary(),
        }
    }
}

// ── Display ───────────────────────────────────────────────────────────────────

/// Initial sidebar state and the bounds of the top-N slider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_gene")]
    pub default_gene: String,

    /// Model label, e.g. "Deep Learning" or "LR"
    #[serde(default = "default_model")]
    pub default_model: String,

    #[serde(default = "default_top_n_min")]
    pub top_n_min: u32,
    #[serde(default = "default_top_n_max")]
    pub top_n_max: u32,
    #[serde(default = "default_top_n")]
    pub top_n_default: u32,

    #[serde(default = "default_true")]
    pub show_explainability: bool,
    #[serde(default = "default_true")]
    pub show_efficiency: bool,
}

fn default_gene()      -> String { "TP53".to_string() }
fn default_model()     -> String { "Deep Learning".to_string() }
fn default_top_n_min() -> u32    { 3 }
fn default_top_n_max() -> u32    { 20 }
fn default_top_n()     -> u32    { 8 }
fn default_true()      -> bool   { true }

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            default_gene: default_gene(),
            default_model: default_model(),
            top_n_min: default_top_n_min(),
            top_n_max: default_top_n_max(),
            top_n_default: default_top_n(),
            show_explainability: true,
            show_efficiency: true,
        }
    }
}

impl DisplayConfig {
    /// Clamp a requested top-N into the slider range.
    pub fn clamp_top_n(&self, requested: i64) -> i64 {
        requested.clamp(i64::from(self.top_n_min), i64::from(self.top_n_max))
    }
}

// ── Loading ───────────────────────────────────────────────────────────────────

impl DashboardConfig {
    /// Load configuration.
    ///
    /// An explicit `BIOHOTSPOT_CONFIG` path must exist. Without it,
    /// `biohotspot.toml` is read when present and defaults are used otherwise.
    pub fn load() -> Result<Self> {
        match std::env::var(CONFIG_ENV_VAR) {
            Ok(path) => Self::from_path(&path),
            Err(_) if Path::new(DEFAULT_CONFIG_FILE).exists() => Self::from_path(DEFAULT_CONFIG_FILE),
            Err(_) => {
                tracing::info!("No {DEFAULT_CONFIG_FILE} found, using built-in defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let d = &self.display;
        if d.top_n_min == 0 {
            return Err(ConfigError::Invalid("display.top_n_min must be at least 1".into()));
        }
        if d.top_n_min > d.top_n_max {
            return Err(ConfigError::Invalid(format!(
                "display.top_n_min ({}) exceeds display.top_n_max ({})",
                d.top_n_min, d.top_n_max
            )));
        }
        if !(d.top_n_min..=d.top_n_max).contains(&d.top_n_default) {
            return Err(ConfigError::Invalid(format!(
                "display.top_n_default ({}) is outside {}..={}",
                d.top_n_default, d.top_n_min, d.top_n_max
            )));
        }
        if self.data.genes.is_empty() {
            return Err(ConfigError::Invalid("data.genes must list at least one gene".into()));
        }
        if !self.data.genes.iter().any(|g| g == &d.default_gene) {
            return Err(ConfigError::Invalid(format!(
                "display.default_gene {} is not in data.genes",
                d.default_gene
            )));
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DashboardConfig::default();
        assert_eq!(config.data.genes, vec!["TP53", "BRCA1"]);
        assert_eq!(config.display.default_model, "Deep Learning");
        assert_eq!(config.display.top_n_default, 8);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config = DashboardConfig::from_toml_str(
            r#"
            [server]
            port = 8080

            [display]
            top_n_default = 12
            "#,
        )
        .unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.display.top_n_default, 12);
        assert_eq!(config.data.hde_summary_file, "HDE_summary.csv");
    }

    #[test]
    fn test_rejects_inverted_range() {
        let err = DashboardConfig::from_toml_str(
            r#"
            [display]
            top_n_min = 10
            top_n_max = 5
            top_n_default = 7
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_default_gene_not_listed() {
        let err = DashboardConfig::from_toml_str(
            r#"
            [data]
            genes = ["BRCA1"]
            "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("TP53"));
    }

    #[test]
    fn test_clamp_top_n() {
        let display = DisplayConfig::default();
        assert_eq!(display.clamp_top_n(1), 3);
        assert_eq!(display.clamp_top_n(50), 20);
        assert_eq!(display.clamp_top_n(8), 8);
    }

    #[test]
    fn test_missing_explicit_path() {
        let err = DashboardConfig::from_path("/nonexistent/biohotspot.toml").unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }
}
