//! @acp:module "Errors"
//! @acp:summary "Error types for configuration and change-set loading"
//! @acp:domain cli
//! @acp:layer types
//!
//! Template resolution itself never fails: discovery problems fall through to
//! the next tier. These errors only surface at the edges, when the CLI reads
//! configuration or a change-set from disk.

use thiserror::Error;

/// @acp:summary "Errors raised while loading inputs for the engine"
#[derive(Debug, Error)]
pub enum DraftError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid change-set: {0}")]
    ChangeSet(String),
}

pub type Result<T> = std::result::Result<T, DraftError>;
