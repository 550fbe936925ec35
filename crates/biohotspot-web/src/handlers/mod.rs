//! HTTP handlers for all web routes.

pub mod dashboard;
pub mod predictions;
pub mod explainability;
pub mod efficiency;
pub mod system;
