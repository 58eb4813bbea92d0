use serde::{Deserialize, Serialize};

/// A persisted account. Only ever constructed from a stored row, so the id is
/// always present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    #[serde(rename = "account_id")]
    pub id: i64,
    pub username: String,
    /// Stored and compared as plain text.
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    #[serde(rename = "message_id")]
    pub id: i64,
    pub posted_by: i64,
    pub message_text: String,
    /// Epoch seconds, fixed at creation.
    #[serde(rename = "time_posted_epoch")]
    pub posted_at: i64,
}
