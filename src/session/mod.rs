//! Session Store
//!
//! The current authentication token and user identity.
//!
//! - **types**: `Session` and `UserIdentity`
//! - **store**: where a session is kept between runs (memory or JSON file)
//! - **manager**: guarded read/replace/clear operations shared with the gateway

mod manager;
mod store;
mod types;

pub use manager::SessionManager;
pub use store::{FileSessionStore, MemorySessionStore, SessionStore};
pub use types::{Session, UserIdentity};

use thiserror::Error;

/// Errors raised while loading or persisting a session
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for SessionError {
    fn from(err: serde_json::Error) -> Self {
        SessionError::Serialization(err.to_string())
    }
}

/// Result type alias for session operations
pub type SessionResult<T> = Result<T, SessionError>;
