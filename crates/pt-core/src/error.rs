//! Core error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant via `#[from]`, so configuration problems surface with the same
//! message wherever they are detected.

use thiserror::Error;

use crate::{ChainId, NodeId};

/// The base error type shared by all `pt-*` crates.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("chain {0} not found")]
    ChainNotFound(ChainId),

    #[error("node {0} not found")]
    NodeNotFound(NodeId),
}

/// Shorthand result type for `pt-core`.
pub type CoreResult<T> = Result<T, CoreError>;
