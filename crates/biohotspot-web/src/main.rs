//! BioHotspot Explorer web server
//!
//! Run with: cargo run -p biohotspot-web

use tracing::info;
use tracing_subscriber::EnvFilter;

use biohotspot_common::DashboardConfig;
use biohotspot_web::{router::build_router, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialise structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("biohotspot_web=debug,biohotspot_ranker=debug,info")),
        )
        .init();

    info!("Starting BioHotspot Explorer v{}", env!("CARGO_PKG_VERSION"));

    let config = DashboardConfig::load()?;
    info!(
        "Exports: {}, genes: {}",
        config.data.exports_dir.display(),
        config.data.genes.join(", ")
    );

    let addr = config.bind_addr();
    let state = AppState::load(config)?;
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
