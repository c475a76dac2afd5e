//! CLI command implementations (the "views").
//!
//! Every command follows the same failure policy: one attempt, and on any
//! failure a one-line notification with prior state left unchanged. The
//! notification text comes from [`stylehub_client::ApiError::notification`];
//! transport detail is logged, not shown.

use thiserror::Error;

use stylehub_client::ApiError;
use stylehub_client::config::ConfigError;
use stylehub_client::session::SessionError;

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod seller;

/// Errors surfaced by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded.
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// The session could not be persisted or cleared.
    #[error("{0}")]
    Session(#[from] SessionError),

    /// An API call failed. Displays as the user-facing notification.
    #[error("{}", .0.notification())]
    Api(#[from] ApiError),

    /// Invalid command input that clap cannot express.
    #[error("{0}")]
    Input(String),
}
