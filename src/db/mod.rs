//! Debug Database
//!
//! SQLite-backed hospital records used by the maintenance scripts.
//!
//! - **models**: hospital, manager, and rating rows plus update payloads
//! - **repository**: the [`HospitalRepository`] seam and its SQLite
//!   implementation [`HospitalDb`]
//!
//! ```text
//! managers 1 ──< hospitals 1 ──< ratings
//! ```

mod models;
mod repository;
mod schema;

pub use models::{Hospital, HospitalRecord, HospitalUpdate, Include, Manager, NewHospital, Rating};
pub use repository::{HospitalDb, HospitalRepository};

use thiserror::Error;

/// Errors raised by the debug database
#[derive(Error, Debug)]
pub enum DbError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Hospital not found: {0}")]
    NotFound(String),
}

impl From<serde_json::Error> for DbError {
    fn from(err: serde_json::Error) -> Self {
        DbError::Serialization(err.to_string())
    }
}

/// Result type alias for database operations
pub type DbResult<T> = Result<T, DbError>;
