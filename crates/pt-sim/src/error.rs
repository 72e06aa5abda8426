use thiserror::Error;

use pt_core::{CarrierId, CoreError, Vec3};
use pt_engine::EngineError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("carrier {carrier} could not be placed: {source}")]
    Engine {
        carrier: CarrierId,
        #[source]
        source:  EngineError,
    },

    #[error("no waypoint near spawn point {0}")]
    NoNodeNear(Vec3),
}

pub type SimResult<T> = Result<T, SimError>;
