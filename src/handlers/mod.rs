mod dictionary;
mod intervals;
mod service_info;
mod variants;

pub use dictionary::get_dictionary;
pub use intervals::get_intervals;
pub use service_info::service_info;
pub use variants::get_variants;

use crate::storage::Storage;
use crate::{Error, Result};
use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn Storage>,
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/intervals/{id}", get(get_intervals))
        .route("/dictionary/{id}", get(get_dictionary))
        .route("/variants/{id}", get(get_variants))
        .route("/", get(service_info))
        .route("/service-info", get(service_info))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Run reader work off the async executor.
async fn blocking<T, F>(f: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| Error::Io(std::io::Error::other(e)))?
}
