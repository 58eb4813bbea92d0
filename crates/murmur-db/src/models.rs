//! Database row types — these map directly to SQLite rows.
//! Converted into murmur-types models at the service boundary.

use murmur_types::{Account, Message};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountRow {
    pub account_id: i64,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageRow {
    pub message_id: i64,
    pub posted_by: i64,
    pub message_text: String,
    pub time_posted_epoch: i64,
}

impl From<AccountRow> for Account {
    fn from(row: AccountRow) -> Self {
        Account {
            id: row.account_id,
            username: row.username,
            password: row.password,
        }
    }
}

impl From<MessageRow> for Message {
    fn from(row: MessageRow) -> Self {
        Message {
            id: row.message_id,
            posted_by: row.posted_by,
            message_text: row.message_text,
            posted_at: row.time_posted_epoch,
        }
    }
}
