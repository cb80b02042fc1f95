//! # dockhand_runner
//!
//! Fluent builder that starts and stops a single container on the local
//! container engine.
//!
//! # Features
//!
//! - **Pure configuration**: [`RunnerConfig`] is assembled with `with_*`
//!   calls and never touches the engine
//! - **Registry qualification**: bare image names resolve to `docker.io/library`
//! - **Port publishing**: every port is bound to the same port on `127.0.0.1`
//! - **Finalization policy**: remove the container on stop (default) or keep it
//! - **Mock engine**: exercise the lifecycle without Docker
//!
//! # Example
//!
//! ```rust,no_run
//! use dockhand_runner::{ContainerRunner, RunnerOptions};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut runner = ContainerRunner::new()
//!         .with_name("mongo")
//!         .with_image("mongo")
//!         .with_ports([27017])
//!         .with_options(RunnerOptions::new().keep_container());
//!
//!     runner.start().await?;
//!     println!("Started {:?}", runner.container_id());
//!     runner.stop().await?;
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod docker;
pub mod engine;
pub mod error;
pub mod mock;
pub mod registry;
pub mod runner;

pub use config::{
    generate_container_name, HostBinding, RunnerConfig, RunnerOptions, DEFAULT_HOST_ADDRESS,
    DEFAULT_STOP_TIMEOUT_SECS,
};
pub use docker::{DockerEngine, LocalDocker};
pub use engine::{ContainerEngine, CreateRequest, CreatedContainer, EngineConnector, EngineResult};
pub use error::{RunnerError, RunnerResult};
pub use mock::{CapturedCall, MockEngine};
pub use registry::{
    qualify_image, substring_contained_in_slice, DEFAULT_REGISTRY_PREFIX,
    REGISTRY_EXTENSION_OPTIONS,
};
pub use runner::{ContainerLifecycle, ContainerRunner, RunnerState};
