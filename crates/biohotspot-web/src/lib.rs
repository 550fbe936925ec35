//! biohotspot-web: Web dashboard for BioHotspot prediction exports.
//! Provides:
//!   - Predictions panel (ranked top-N table + bar chart)
//!   - Explainability panel (feature importance)
//!   - Efficiency & sustainability tables
//!   - JSON API over the same data

pub mod router;
pub mod handlers;
pub mod state;
pub mod error;
pub mod charts;
