//! Container runner lifecycle.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::{RunnerConfig, RunnerOptions};
use crate::docker::LocalDocker;
use crate::engine::{ContainerEngine, CreateRequest, EngineConnector};
use crate::error::{RunnerError, RunnerResult};

/// Where a runner is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunnerState {
    Unstarted,
    Starting,
    Running,
    Stopping,
    Stopped,
    Removed,
    Failed,
}

impl std::fmt::Display for RunnerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Unstarted => "unstarted",
            Self::Starting => "starting",
            Self::Running => "running",
            Self::Stopping => "stopping",
            Self::Stopped => "stopped",
            Self::Removed => "removed",
            Self::Failed => "failed",
        };
        write!(f, "{}", s)
    }
}

/// Something that can be started and stopped.
#[async_trait]
pub trait ContainerLifecycle: Send {
    async fn start(&mut self) -> RunnerResult<()>;

    async fn stop(&mut self) -> RunnerResult<()>;
}

/// Starts and stops a single container.
///
/// Configuration is accumulated with the `with_*` methods; the engine client
/// is only acquired when [`start`](Self::start) runs. Dropping a `start` or
/// `stop` future abandons the in-flight engine request.
///
/// ```rust,no_run
/// use dockhand_runner::ContainerRunner;
///
/// # async fn run() -> dockhand_runner::RunnerResult<()> {
/// let mut runner = ContainerRunner::new()
///     .with_name("mongo")
///     .with_image("mongo")
///     .with_ports([27017]);
///
/// runner.start().await?;
/// runner.stop().await?;
/// # Ok(())
/// # }
/// ```
pub struct ContainerRunner<C: EngineConnector = LocalDocker> {
    config: RunnerConfig,
    connector: C,
    client: Option<C::Engine>,
    // set once the engine has created the container
    id: Option<String>,
    state: RunnerState,
}

impl ContainerRunner<LocalDocker> {
    /// Runner against the local Docker engine, removing the container on stop.
    pub fn new() -> Self {
        Self::with_connector(LocalDocker)
    }
}

impl Default for ContainerRunner<LocalDocker> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: EngineConnector> ContainerRunner<C> {
    pub fn with_connector(connector: C) -> Self {
        Self::from_config(RunnerConfig::default(), connector)
    }

    pub fn from_config(config: RunnerConfig, connector: C) -> Self {
        Self {
            config,
            connector,
            client: None,
            id: None,
            state: RunnerState::Unstarted,
        }
    }

    /// Expose and publish ports on `127.0.0.1`, host port = container port.
    pub fn with_ports(mut self, ports: impl IntoIterator<Item = u32>) -> Self {
        self.config = self.config.with_ports(ports);
        self
    }

    /// Set the image. Bare names are qualified with `docker.io/library`.
    pub fn with_image(mut self, image: impl AsRef<str>) -> Self {
        self.config = self.config.with_image(image);
        self
    }

    /// Set the container name; an empty name gets a generated one.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.config = self.config.with_name(name);
        self
    }

    pub fn with_environment_variable(mut self, key: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        self.config = self.config.with_env(key, value);
        self
    }

    pub fn with_options(mut self, options: RunnerOptions) -> Self {
        self.config = self.config.with_options(options);
        self
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Id of the created container, if any.
    pub fn container_id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn state(&self) -> RunnerState {
        self.state
    }

    /// Pull the image, then create and start the container.
    ///
    /// Steps run in order and the first failure aborts. Nothing is rolled
    /// back: if starting fails the created container id is kept so that
    /// [`stop`](Self::stop) can clean it up.
    pub async fn start(&mut self) -> RunnerResult<()> {
        self.state = RunnerState::Starting;
        let result = self.pull_create_start().await;
        self.state = match result {
            Ok(()) => RunnerState::Running,
            Err(_) => RunnerState::Failed,
        };
        result
    }

    /// Stop the container and, unless disabled in the options, remove it.
    ///
    /// Fails with [`RunnerError::NoContainerId`] without touching the engine
    /// when no container was created. After a successful removal the id is
    /// cleared; a kept container can be stopped again.
    pub async fn stop(&mut self) -> RunnerResult<()> {
        info!("Stopping container");
        let (Some(id), Some(client)) = (self.id.clone(), self.client.as_ref()) else {
            return Err(RunnerError::NoContainerId);
        };

        self.state = RunnerState::Stopping;
        let timeout = Duration::from_secs(self.config.options.stop_timeout_secs);
        let remove = self.config.options.remove_on_finalization;

        let result = stop_and_remove(client, &id, timeout, remove).await;
        self.state = match result {
            Ok(()) if remove => {
                self.id = None;
                RunnerState::Removed
            }
            Ok(()) => RunnerState::Stopped,
            Err(_) => RunnerState::Failed,
        };
        result
    }

    async fn pull_create_start(&mut self) -> RunnerResult<()> {
        let client = self
            .connector
            .connect()
            .map_err(RunnerError::CreatingClient)?;
        let client = self.client.insert(client);

        info!("Pulling image {}", self.config.image);
        client
            .pull_image(&self.config.image)
            .await
            .map_err(RunnerError::PullingImage)?;

        info!("Creating container {}", self.config.name);
        let request = CreateRequest::from(&self.config);
        debug!(
            "Ports: {:?}, env entries: {}",
            request.exposed_ports,
            request.env.len()
        );
        let created = client
            .create_container(&request)
            .await
            .map_err(RunnerError::CreatingContainer)?;
        for warning in &created.warnings {
            warn!("Engine warning on create: {}", warning);
        }

        let id = self.id.insert(created.id);

        info!("Starting container {}", id);
        client
            .start_container(id.as_str())
            .await
            .map_err(RunnerError::StartingContainer)?;
        info!("Container started");
        Ok(())
    }
}

async fn stop_and_remove<E: ContainerEngine>(
    client: &E,
    id: &str,
    timeout: Duration,
    remove: bool,
) -> RunnerResult<()> {
    client
        .stop_container(id, timeout)
        .await
        .map_err(RunnerError::StoppingContainer)?;
    info!("Container stopped");

    if remove {
        info!("Removing container");
        client
            .remove_container(id)
            .await
            .map_err(RunnerError::RemovingContainer)?;
        info!("Container removed");
    }
    Ok(())
}

#[async_trait]
impl<C: EngineConnector> ContainerLifecycle for ContainerRunner<C> {
    async fn start(&mut self) -> RunnerResult<()> {
        ContainerRunner::start(self).await
    }

    async fn stop(&mut self) -> RunnerResult<()> {
        ContainerRunner::stop(self).await
    }
}
