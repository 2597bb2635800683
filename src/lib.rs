//! # tvdl
//!
//! Resolves a tweet URL posted by the tvdl shortcut into a direct download
//! descriptor for the tweet's video or GIF, with daily request counters and
//! an error log kept in Postgres.

pub mod args;
pub mod config;
pub mod db_persistence;
pub mod errors;
pub mod handlers;
pub mod http_server;
pub mod metrics;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use errors::{AppError, AppResult, ErrorCode, ResolveError};
pub use http_server::AppState;
pub use services::resolver::MediaResolver;

/// Crate version, reported by `/health`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name, reported by `/health`.
pub const NAME: &str = env!("CARGO_PKG_NAME");
