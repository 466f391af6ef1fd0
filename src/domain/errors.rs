//! Domain errors. Used by ports and use cases.
//!
//! Adapters map infrastructure errors into these.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    /// Text-completion call failed (network/auth/quota/empty reply).
    /// Never crosses the generator/validator boundary; services convert it
    /// to a value-level failure signal.
    #[error("Text completion failed: {0}")]
    Completion(String),

    #[error("Repository error: {0}")]
    Repo(String),

    #[error("Invalid input: {0}")]
    Input(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("UI error: {0}")]
    Ui(String),
}
