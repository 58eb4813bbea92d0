pub mod auth;
pub mod error;
pub mod messages;
pub mod routes;
pub mod services;

use axum::http::StatusCode;
use serde::de::DeserializeOwned;
use tracing::{debug, error};

pub use auth::{AppState, AppStateInner};
pub use error::{ServiceError, ValidationError};
pub use routes::router;

/// Run blocking DB work off the async runtime.
pub(crate) async fn run_blocking<F, T>(f: F) -> Result<T, StatusCode>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f).await.map_err(|e| {
        error!("spawn_blocking join error: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })
}

/// Decode a JSON request body regardless of its Content-Type header; existing
/// clients don't always send one. An unreadable body fails with `rejected`.
pub(crate) fn parse_body<T: DeserializeOwned>(
    op: &str,
    body: &[u8],
    rejected: StatusCode,
) -> Result<T, StatusCode> {
    serde_json::from_slice(body).map_err(|e| {
        debug!("{}: bad body: {}", op, e);
        rejected
    })
}
