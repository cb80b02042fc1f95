//! Error types for the runner module.

use bollard::errors::Error as EngineError;
use thiserror::Error;

/// Result type alias for runner operations.
pub type RunnerResult<T> = Result<T, RunnerError>;

/// Errors that can occur while starting or stopping a container.
///
/// Every engine failure is wrapped with the lifecycle step that produced it;
/// the engine error itself stays reachable through [`std::error::Error::source`].
#[derive(Error, Debug)]
pub enum RunnerError {
    #[error("creating client: {0}")]
    CreatingClient(#[source] EngineError),

    #[error("pulling image: {0}")]
    PullingImage(#[source] EngineError),

    #[error("creating container: {0}")]
    CreatingContainer(#[source] EngineError),

    #[error("starting container: {0}")]
    StartingContainer(#[source] EngineError),

    /// `stop` was called before a container was ever created.
    #[error("container id does not exist")]
    NoContainerId,

    #[error("stopping container: {0}")]
    StoppingContainer(#[source] EngineError),

    #[error("removing container: {0}")]
    RemovingContainer(#[source] EngineError),
}

impl RunnerError {
    /// Short label of the lifecycle step that failed.
    pub fn stage(&self) -> &'static str {
        match self {
            Self::CreatingClient(_) => "creating client",
            Self::PullingImage(_) => "pulling image",
            Self::CreatingContainer(_) => "creating container",
            Self::StartingContainer(_) => "starting container",
            Self::NoContainerId => "validating container id",
            Self::StoppingContainer(_) => "stopping container",
            Self::RemovingContainer(_) => "removing container",
        }
    }

    /// The engine error behind this failure, if any.
    pub fn engine_error(&self) -> Option<&EngineError> {
        match self {
            Self::CreatingClient(e)
            | Self::PullingImage(e)
            | Self::CreatingContainer(e)
            | Self::StartingContainer(e)
            | Self::StoppingContainer(e)
            | Self::RemovingContainer(e) => Some(e),
            Self::NoContainerId => None,
        }
    }
}
