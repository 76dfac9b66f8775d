pub mod accounts;
pub mod error;
pub mod events;
pub mod pages;
pub mod password;
pub mod uploads;

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use tracing::error;

use eventsphere_storage::{Store, StoreResult, StorageMode};
use eventsphere_types::api::HealthResponse;

use crate::error::ApiError;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub store: Arc<dyn Store>,
    /// Resolved once at startup; only reported, never branched on.
    pub mode: StorageMode,
    pub static_dir: PathBuf,
    pub upload_dir: PathBuf,
}

/// Application routes. Static file fallback, CORS and tracing layers are
/// added by the server binary.
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/api/events", get(events::list_events))
        .route("/api/events/register", post(events::register_for_event))
        .route(
            "/register",
            get(pages::register_page).post(accounts::register_account),
        )
        .route("/thank-you", get(pages::thank_you))
        .route("/health", get(health))
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        storage: state.mode.to_string(),
    })
}

/// Run a store operation on the blocking pool.
pub(crate) async fn run_blocking<T, F>(state: &AppState, f: F) -> Result<T, ApiError>
where
    F: FnOnce(&dyn Store) -> StoreResult<T> + Send + 'static,
    T: Send + 'static,
{
    let store = state.store.clone();
    let result = tokio::task::spawn_blocking(move || f(store.as_ref()))
        .await
        .map_err(|e| {
            error!("spawn_blocking join error: {}", e);
            ApiError::Join(e)
        })?;
    Ok(result?)
}
