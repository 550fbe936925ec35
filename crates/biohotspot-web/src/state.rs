//! Shared application state for the web server.

use std::sync::Arc;

use biohotspot_common::{ConfigError, DashboardConfig};
use biohotspot_ranker::{ExportSnapshot, ModelVariant};

/// Shared state injected into every Axum handler.
///
/// Both fields are read-only after startup.
pub struct AppState {
    pub config: DashboardConfig,
    pub snapshot: ExportSnapshot,
}

impl AppState {
    /// Fails when the configured default model is not a known variant.
    pub fn new(config: DashboardConfig, snapshot: ExportSnapshot) -> Result<Self, ConfigError> {
        config
            .display
            .default_model
            .parse::<ModelVariant>()
            .map_err(|e| ConfigError::Invalid(format!("display.default_model: {e}")))?;
        Ok(Self { config, snapshot })
    }

    /// Read the exports folder named in `config` and build the state.
    pub fn load(config: DashboardConfig) -> Result<Self, ConfigError> {
        let snapshot = ExportSnapshot::load(&config.data);
        Self::new(config, snapshot)
    }
}

pub type SharedState = Arc<AppState>;
