//! Error taxonomy for building and stepping an [`Engine`](super::engine::Engine)
//!
//! Construction errors are raised by `Engine::initialize` and never reach
//! `step`. Numerical errors are raised by `step` before anything is committed,
//! so the engine state is left as it was at the start of the failing step

use std::fmt;

use super::states::BodyId;

#[derive(Debug, Clone, PartialEq)]
pub enum SimError {
    /// The initial-condition list was empty
    NoBodies,
    /// A body was given a mass that is zero, negative or not finite
    NonPositiveMass { name: String, mass: f64 },
    /// A parameter (G, dt, history cap, clamp epsilon) is out of range
    InvalidParameter(String),
    /// Two bodies are exactly coincident under `SingularityPolicy::Reject`
    Singularity { body: BodyId, other: BodyId },
    /// A stage or the committed state of a body became NaN or infinite
    NonFinite { body: BodyId },
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::NoBodies => write!(f, "at least one body is required"),
            SimError::NonPositiveMass { name, mass } => {
                write!(f, "body `{name}` has non-positive mass {mass}")
            }
            SimError::InvalidParameter(msg) => write!(f, "invalid parameter: {msg}"),
            SimError::Singularity { body, other } => write!(
                f,
                "zero separation between body {} and body {}",
                body.index(),
                other.index()
            ),
            SimError::NonFinite { body } => {
                write!(f, "non-finite state computed for body {}", body.index())
            }
        }
    }
}

impl std::error::Error for SimError {}

pub type SimResult<T> = Result<T, SimError>;
