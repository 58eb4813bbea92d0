use std::sync::Arc;

use tracing::info;

use murmur_db::Database;
use murmur_types::Message;
use murmur_types::api::NewMessage;

use super::is_blank;
use crate::error::{ServiceError, ValidationError};

pub const MAX_MESSAGE_LEN: usize = 255;

type Clock = Arc<dyn Fn() -> i64 + Send + Sync>;

#[derive(Clone)]
pub struct MessageService {
    db: Arc<Database>,
    clock: Clock,
}

impl MessageService {
    pub fn new(db: Arc<Database>) -> Self {
        Self::with_clock(db, Arc::new(|| chrono::Utc::now().timestamp()))
    }

    /// Use `clock` (epoch seconds) to stamp new messages.
    pub fn with_clock(db: Arc<Database>, clock: Clock) -> Self {
        Self { db, clock }
    }

    pub fn create(&self, candidate: NewMessage) -> Result<Message, ServiceError> {
        validate_text(&candidate.message_text)?;
        if !self.db.account_exists(candidate.posted_by)? {
            return Err(ValidationError::UnknownAccount.into());
        }

        let posted_at = (self.clock)();
        let row = self
            .db
            .insert_message(candidate.posted_by, &candidate.message_text, posted_at)?;

        info!("Message {} posted by account {}", row.message_id, row.posted_by);
        Ok(row.into())
    }

    /// Every message in store order.
    pub fn all(&self) -> Result<Vec<Message>, ServiceError> {
        Ok(self.db.list_messages()?.into_iter().map(Message::from).collect())
    }

    pub fn get(&self, message_id: i64) -> Result<Message, ServiceError> {
        self.db
            .get_message(message_id)?
            .map(Message::from)
            .ok_or(ServiceError::NotFound)
    }

    /// Remove a message and hand back what it looked like.
    ///
    /// Fetch and delete are separate statements: if another request deletes
    /// the row in between, this reports `NotFound`.
    pub fn delete(&self, message_id: i64) -> Result<Message, ServiceError> {
        let message = self.get(message_id)?;
        if !self.db.delete_message(message_id)? {
            return Err(ServiceError::NotFound);
        }

        info!("Message {} deleted", message_id);
        Ok(message)
    }

    /// Replace a message's text. The returned value is the fetched message with
    /// the new text swapped in; it is not re-read from the store.
    pub fn update_text(&self, message_id: i64, new_text: String) -> Result<Message, ServiceError> {
        validate_text(&new_text)?;

        let mut message = self.get(message_id)?;
        if !self.db.update_message_text(message_id, &new_text)? {
            return Err(ServiceError::NotFound);
        }

        message.message_text = new_text;
        Ok(message)
    }

    /// Messages posted by `account_id`. An unknown account yields an empty list.
    pub fn by_account(&self, account_id: i64) -> Result<Vec<Message>, ServiceError> {
        Ok(self
            .db
            .list_messages_by_account(account_id)?
            .into_iter()
            .map(Message::from)
            .collect())
    }
}

fn validate_text(text: &str) -> Result<(), ValidationError> {
    if is_blank(text) {
        return Err(ValidationError::BlankMessage);
    }
    if text.chars().count() > MAX_MESSAGE_LEN {
        return Err(ValidationError::MessageTooLong);
    }
    Ok(())
}
