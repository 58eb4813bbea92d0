use std::sync::Arc;

use axum::{Json, body::Bytes, extract::State, http::StatusCode, response::IntoResponse};

use murmur_db::Database;
use murmur_types::api::AccountCredentials;

use crate::{parse_body, run_blocking};
use crate::services::{AccountService, MessageService};

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub accounts: AccountService,
    pub messages: MessageService,
}

impl AppStateInner {
    pub fn new(db: Arc<Database>) -> Self {
        Self {
            accounts: AccountService::new(db.clone()),
            messages: MessageService::new(db),
        }
    }
}

/// Every failure, including an unreadable body, is a plain 400.
pub async fn register(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, StatusCode> {
    let req: AccountCredentials = parse_body("register", &body, StatusCode::BAD_REQUEST)?;

    let accounts = state.accounts.clone();
    let account = run_blocking(move || accounts.register(req)).await?.map_err(|e| {
        e.log("register");
        StatusCode::BAD_REQUEST
    })?;

    Ok(Json(account))
}

/// Every failure, including an unreadable body, is a plain 401.
pub async fn login(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, StatusCode> {
    let req: AccountCredentials = parse_body("login", &body, StatusCode::UNAUTHORIZED)?;

    let accounts = state.accounts.clone();
    let account = run_blocking(move || accounts.login(req)).await?.map_err(|e| {
        e.log("login");
        StatusCode::UNAUTHORIZED
    })?;

    Ok(Json(account))
}
