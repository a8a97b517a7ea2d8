//! Debug Scripts
//!
//! One-shot maintenance procedures against the debug database. Each opens a
//! connection, performs one read or one write, prints what it found, and
//! releases the connection whether or not it succeeded.

mod inspect;
mod maintenance;
mod toggle;

pub use inspect::{inspect_hospital, InspectOutcome};
pub use maintenance::{list_hospitals, seed_demo_data, SeedSummary};
pub use toggle::{toggle_first_verification, ToggleOutcome};

use std::path::Path;
use thiserror::Error;

use crate::db::{DbError, HospitalDb};

/// Errors raised by a script run
#[derive(Error, Debug)]
pub enum ScriptError {
    #[error("Database error: {0}")]
    Db(#[from] DbError),

    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for ScriptError {
    fn from(err: serde_json::Error) -> Self {
        ScriptError::Serialization(err.to_string())
    }
}

/// Result type alias for scripts
pub type ScriptResult<T> = Result<T, ScriptError>;

/// Open the database at `path`, run `script`, then disconnect
pub fn run_script<T, F>(path: &Path, script: F) -> ScriptResult<T>
where
    F: FnOnce(&HospitalDb) -> ScriptResult<T>,
{
    let db = HospitalDb::open(path)?;
    with_connection(db, script)
}

/// Run `script` on an open connection and always disconnect afterwards
///
/// A script failure takes precedence over a disconnect failure; the latter
/// is still logged.
pub fn with_connection<T, F>(db: HospitalDb, script: F) -> ScriptResult<T>
where
    F: FnOnce(&HospitalDb) -> ScriptResult<T>,
{
    let outcome = script(&db);

    if let Err(e) = &outcome {
        tracing::error!("Script failed: {}", e);
    }

    match (outcome, db.disconnect()) {
        (Ok(value), Ok(())) => Ok(value),
        (Ok(_), Err(e)) => {
            tracing::error!("Failed to disconnect: {}", e);
            Err(e.into())
        }
        (Err(e), Ok(())) => Err(e),
        (Err(e), Err(close_err)) => {
            tracing::error!("Failed to disconnect: {}", close_err);
            Err(e)
        }
    }
}
