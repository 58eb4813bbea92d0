//! Business rules over the store. Services are cheap to clone and hold
//! nothing but the shared `Database` handle, so every call is independent.

pub mod account;
pub mod message;

pub use account::AccountService;
pub use message::MessageService;

/// Empty or whitespace-only.
pub(crate) fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}
