//! Path-graph error type.

use thiserror::Error;

/// Errors produced while building or loading a [`PathGraph`][crate::PathGraph].
///
/// All of these are construction-time failures; a built graph is never
/// rejected later.
#[derive(Debug, Error)]
pub enum PathError {
    #[error("chain '{0}' has no nodes")]
    EmptyChain(String),

    #[error("chain '{0}' is defined more than once")]
    DuplicateChain(String),

    #[error("unknown chain '{0}'")]
    UnknownChain(String),

    #[error("node {index} of chain '{chain}' has a non-finite position")]
    InvalidPosition { chain: String, index: usize },

    #[error("path parse error: {0}")]
    Parse(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type PathResult<T> = Result<T, PathError>;
