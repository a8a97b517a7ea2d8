//! # Hospital Hub
//!
//! Client-side core of a hospital management system: an authenticated
//! gateway to the backend API, a bed statistics dashboard, and a pair of
//! database maintenance scripts.
//!
//! ## Modules
//!
//! - [`gateway`]: authenticated request gateway over a pluggable transport
//! - [`session`]: the current user's token and identity, optionally persisted
//! - [`stats`]: bed statistics model and fetcher
//! - [`views`]: terminal renditions of the dashboard components
//! - [`db`]: SQLite hospital repository used by the debug scripts
//! - [`scripts`]: inspect and toggle-verification maintenance procedures
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use hospital_hub::{Config, Gateway, SessionManager};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env();
//!     let session = Arc::new(SessionManager::in_memory());
//!     session.login("token-from-oauth", None)?;
//!
//!     let gateway = Gateway::new(config.gateway, session)?;
//!     let stats = hospital_hub::stats::fetch_bed_stats(&gateway).await?;
//!
//!     println!("{} of {} beds available", stats.available, stats.total);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod db;
pub mod gateway;
pub mod logging;
pub mod scripts;
pub mod session;
pub mod stats;
pub mod views;

// Re-export top-level types for convenience
pub use config::{
    Config, ConfigError, ConfigLoad, DatabaseConfig, GatewayConfig, LoggingConfig, SessionConfig,
};

pub use gateway::{
    ErrorKind, Gateway, GatewayError, GatewayResult, Navigator, RequestOptions, Transport,
};

pub use session::{Session, SessionError, SessionManager, UserIdentity};

pub use stats::{fetch_bed_stats, BedStats, BedTypeStats};

pub use views::{BedStatsPanel, LoginButton, StatCard};

pub use db::{DbError, DbResult, Hospital, HospitalDb, HospitalRecord, HospitalRepository};

pub use scripts::{run_script, ScriptError, ScriptResult};
