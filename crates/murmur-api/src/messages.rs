use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use murmur_types::Message;
use murmur_types::api::{NewMessage, UpdateMessageRequest};

use crate::auth::AppState;
use crate::error::ServiceError;
use crate::{parse_body, run_blocking};

pub async fn create_message(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, StatusCode> {
    let req: NewMessage = parse_body("create_message", &body, StatusCode::BAD_REQUEST)?;

    let messages = state.messages.clone();
    let message = run_blocking(move || messages.create(req)).await?.map_err(|e| {
        e.log("create_message");
        StatusCode::BAD_REQUEST
    })?;

    Ok(Json(message))
}

pub async fn list_messages(State(state): State<AppState>) -> Result<impl IntoResponse, StatusCode> {
    let messages = state.messages.clone();
    let all = run_blocking(move || messages.all())
        .await?
        .map_err(|e| internal("list_messages", e))?;

    Ok(Json(all))
}

/// 200 with the message, or 200 with an empty body when it does not exist.
pub async fn get_message(
    State(state): State<AppState>,
    Path(message_id): Path<i64>,
) -> Result<Response, StatusCode> {
    let messages = state.messages.clone();
    let found = run_blocking(move || messages.get(message_id)).await?;
    found_or_empty("get_message", found)
}

/// 200 with the deleted message, or 200 with an empty body when nothing was
/// deleted.
pub async fn delete_message(
    State(state): State<AppState>,
    Path(message_id): Path<i64>,
) -> Result<Response, StatusCode> {
    let messages = state.messages.clone();
    let deleted = run_blocking(move || messages.delete(message_id)).await?;
    found_or_empty("delete_message", deleted)
}

pub async fn update_message(
    State(state): State<AppState>,
    Path(message_id): Path<i64>,
    body: Bytes,
) -> Result<impl IntoResponse, StatusCode> {
    let req: UpdateMessageRequest = parse_body("update_message", &body, StatusCode::BAD_REQUEST)?;

    let messages = state.messages.clone();
    let updated = run_blocking(move || messages.update_text(message_id, req.message_text))
        .await?
        .map_err(|e| {
            e.log("update_message");
            StatusCode::BAD_REQUEST
        })?;

    Ok(Json(updated))
}

pub async fn list_account_messages(
    State(state): State<AppState>,
    Path(account_id): Path<i64>,
) -> Result<impl IntoResponse, StatusCode> {
    let messages = state.messages.clone();
    let posted = run_blocking(move || messages.by_account(account_id))
        .await?
        .map_err(|e| internal("list_account_messages", e))?;

    Ok(Json(posted))
}

fn found_or_empty(op: &str, result: Result<Message, ServiceError>) -> Result<Response, StatusCode> {
    match result {
        Ok(message) => Ok(Json(message).into_response()),
        Err(ServiceError::NotFound) => Ok(StatusCode::OK.into_response()),
        Err(e) => Err(internal(op, e)),
    }
}

fn internal(op: &str, e: ServiceError) -> StatusCode {
    e.log(op);
    StatusCode::INTERNAL_SERVER_ERROR
}
