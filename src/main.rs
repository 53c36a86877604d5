mod api;
mod app;
mod config;
mod db;
mod domain;
mod error;
mod logging;
mod middleware;
mod routes;
mod scheduling;
mod services;
mod store;

use anyhow::Result;
use std::sync::Arc;

use config::StoreBackend;
use services::{ItineraryService, SystemClock};
use store::{ItineraryStore, MemoryItineraryStore, PgItineraryStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let settings = config::Settings::from_env()?;

    // Initialize logging
    logging::init_logging(&settings);

    tracing::info!(
        env = ?settings.env,
        server_addr = %settings.server_addr,
        auto_apply_promotions = settings.auto_apply_promotions,
        "Starting itinerary backend"
    );

    // Create the itinerary store
    let store: Arc<dyn ItineraryStore> = match &settings.store {
        StoreBackend::Postgres {
            url,
            max_connections,
        } => Arc::new(PgItineraryStore::new(
            db::create_pool(url, *max_connections).await?,
        )),
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store; itineraries are lost on restart");
            Arc::new(MemoryItineraryStore::new())
        }
    };

    let itineraries = ItineraryService::new(store, Arc::new(SystemClock));

    // Create application state
    let state = app::AppState::new(settings.clone(), itineraries);

    // Build application
    let app = app::create_app(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&settings.server_addr).await?;
    tracing::info!("Listening on {}", settings.server_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
