//! biohotspot-common: Configuration and error types shared across the BioHotspot crates.

pub mod error;
pub mod dashboard_config;

// Re-export commonly used types
pub use dashboard_config::{DashboardConfig, ServerConfig, DataConfig, DisplayConfig};
pub use error::ConfigError;
