use anyhow::Result;
use std::sync::Arc;

use homeservices_backend::{
    app, config, logging, seed,
    services::{Marketplace, MarketplaceConfig, SystemClock},
};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let settings = config::Settings::from_env()?;

    logging::init_logging(&settings.env);

    tracing::info!(
        env = ?settings.env,
        server_addr = %settings.server_addr,
        "Starting home services backend"
    );

    let mut marketplace = Marketplace::new(MarketplaceConfig::from(&settings), Arc::new(SystemClock));
    if settings.seed_demo_data {
        seed::seed_demo_data(&mut marketplace)?;
    }

    let state = app::AppState::new(marketplace.into_shared(), settings.clone());
    let app = app::create_app(state);

    let listener = tokio::net::TcpListener::bind(&settings.server_addr).await?;
    tracing::info!("Listening on {}", settings.server_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
