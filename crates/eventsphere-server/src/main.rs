mod config;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use eventsphere_api::{AppState, AppStateInner, routes};
use eventsphere_storage::Storage;
use eventsphere_storage::catalog::sample_catalog;

use crate::config::Config;

/// Largest accepted request body; bounds profile picture uploads.
const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "eventsphere=debug,tower_http=debug".into()),
        )
        .init();

    let config = Config::from_env()?;

    // Resolved once; a later database outage is not re-detected.
    let storage = Storage::open(&config.storage)?;

    match storage.store.seed_if_empty(&sample_catalog()) {
        Ok(0) => info!("Event catalog already populated"),
        Ok(n) => info!("Seeded {} sample events", n),
        Err(e) => error!("Seeding sample events failed: {}", e),
    }

    let state: AppState = Arc::new(AppStateInner {
        store: storage.store,
        mode: storage.mode,
        static_dir: config.static_dir.clone(),
        upload_dir: config.upload_dir.clone(),
    });

    let app = routes(state)
        .fallback_service(ServeDir::new(&config.static_dir))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    info!("EventSphere listening on http://{}", config.addr);
    info!("Serving static files from {}", config.static_dir.display());

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = tokio::signal::ctrl_c();
    #[cfg(unix)]
    {
        let mut sigterm =
            tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
                .expect("failed to install SIGTERM handler");
        tokio::select! {
            _ = ctrl_c => info!("Received Ctrl+C, shutting down..."),
            _ = sigterm.recv() => info!("Received SIGTERM, shutting down..."),
        }
    }
    #[cfg(not(unix))]
    {
        ctrl_c.await.ok();
        info!("Received Ctrl+C, shutting down...");
    }
}
