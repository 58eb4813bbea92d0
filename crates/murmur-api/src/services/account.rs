use std::sync::Arc;

use tracing::info;

use murmur_db::Database;
use murmur_types::Account;
use murmur_types::api::AccountCredentials;

use super::is_blank;
use crate::error::{ServiceError, ValidationError};

pub const MIN_PASSWORD_LEN: usize = 4;

#[derive(Clone)]
pub struct AccountService {
    db: Arc<Database>,
}

impl AccountService {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Register a new account.
    ///
    /// Structural checks run before any store access; the uniqueness lookup
    /// comes last. Two concurrent registrations of the same name can both pass
    /// the lookup, in which case the UNIQUE constraint rejects the loser and it
    /// still surfaces as `Conflict`.
    pub fn register(&self, candidate: AccountCredentials) -> Result<Account, ServiceError> {
        if is_blank(&candidate.username) {
            return Err(ValidationError::BlankUsername.into());
        }
        if candidate.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ValidationError::PasswordTooShort.into());
        }
        if self.db.username_exists(&candidate.username)? {
            return Err(ServiceError::Conflict);
        }

        let row = self
            .db
            .insert_account(&candidate.username, &candidate.password)
            .map_err(insert_error)?;

        info!("Registered account {} ({})", row.account_id, row.username);
        Ok(row.into())
    }

    /// Exact username + password match. Anything else, including a blank
    /// username, is simply a miss.
    pub fn login(&self, credentials: AccountCredentials) -> Result<Account, ServiceError> {
        self.db
            .find_account_by_credentials(&credentials.username, &credentials.password)?
            .map(Account::from)
            .ok_or(ServiceError::InvalidCredentials)
    }
}

/// A UNIQUE violation on insert means another registration took the name
/// after our lookup.
fn insert_error(e: anyhow::Error) -> ServiceError {
    if murmur_db::is_unique_violation(&e) {
        ServiceError::Conflict
    } else {
        ServiceError::Storage(e)
    }
}
