use tracing::{debug, warn};

/// Which business rule rejected a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("username must not be blank")]
    BlankUsername,
    #[error("password must be at least {min} characters", min = crate::services::account::MIN_PASSWORD_LEN)]
    PasswordTooShort,
    #[error("message text must not be blank")]
    BlankMessage,
    #[error("message text must be at most {max} characters", max = crate::services::message::MAX_MESSAGE_LEN)]
    MessageTooLong,
    #[error("posted_by does not reference an existing account")]
    UnknownAccount,
}

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),
    #[error("username or password did not match")]
    InvalidCredentials,
    #[error("not found")]
    NotFound,
    #[error("username already taken")]
    Conflict,
    #[error("storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

impl ServiceError {
    /// Log once at the handler boundary. Store faults are loud, rule
    /// rejections are routine.
    pub fn log(&self, op: &str) {
        match self {
            ServiceError::Storage(e) => warn!("{op} failed: {e:#}"),
            other => debug!("{op} rejected: {other}"),
        }
    }
}
