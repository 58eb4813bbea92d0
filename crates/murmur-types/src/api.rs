use serde::Deserialize;

// Request bodies tolerate extra fields: existing clients echo back
// `account_id`, `message_id` and `time_posted_epoch` alongside the fields
// that matter.

// -- Accounts --

/// Body of `POST /register` and `POST /login`.
#[derive(Debug, Clone, Deserialize)]
pub struct AccountCredentials {
    pub username: String,
    pub password: String,
}

// -- Messages --

/// Body of `POST /messages`.
#[derive(Debug, Clone, Deserialize)]
pub struct NewMessage {
    pub posted_by: i64,
    pub message_text: String,
}

/// Body of `PATCH /messages/{message_id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateMessageRequest {
    pub message_text: String,
}
