use thiserror::Error;

use pt_core::{ChainId, CoreError};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("start index {index} out of range for chain {chain} with {len} nodes")]
    StartIndexOutOfRange {
        chain: ChainId,
        index: usize,
        len:   usize,
    },
}

pub type EngineResult<T> = Result<T, EngineError>;

/// A notification hook failed.  Reported back to the engine, which logs it
/// and carries on with the tick.
#[derive(Debug, Error)]
#[error("notification sink failed: {0}")]
pub struct NotifyError(pub String);

pub type NotifyResult = Result<(), NotifyError>;
