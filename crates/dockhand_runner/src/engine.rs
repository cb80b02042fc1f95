//! Container engine trait and types.

use std::collections::{BTreeMap, BTreeSet};
use std::time::Duration;

use async_trait::async_trait;
use bollard::errors::Error as EngineError;
use serde::{Deserialize, Serialize};

use crate::config::{HostBinding, RunnerConfig};

/// Result of an engine call; errors are the engine client's own.
pub type EngineResult<T> = Result<T, EngineError>;

/// Parameters of a container-create call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateRequest {
    pub name: String,
    pub image: String,
    pub env: Vec<String>,
    pub exposed_ports: BTreeSet<String>,
    pub port_bindings: BTreeMap<String, HostBinding>,
}

impl From<&RunnerConfig> for CreateRequest {
    fn from(config: &RunnerConfig) -> Self {
        Self {
            name: config.name.clone(),
            image: config.image.clone(),
            env: config.env.clone(),
            exposed_ports: config.exposed_ports.clone(),
            port_bindings: config.port_bindings.clone(),
        }
    }
}

/// Container created by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedContainer {
    pub id: String,
    /// Non-fatal warnings reported by the engine
    pub warnings: Vec<String>,
}

/// The operations a runner needs from a container engine.
#[async_trait]
pub trait ContainerEngine: Send + Sync {
    /// Pull an image by reference.
    async fn pull_image(&self, image: &str) -> EngineResult<()>;

    /// Create (but do not start) a container.
    async fn create_container(&self, request: &CreateRequest) -> EngineResult<CreatedContainer>;

    /// Start a created container.
    async fn start_container(&self, id: &str) -> EngineResult<()>;

    /// Stop a container, killing it once `timeout` has elapsed.
    async fn stop_container(&self, id: &str, timeout: Duration) -> EngineResult<()>;

    /// Remove a container.
    async fn remove_container(&self, id: &str) -> EngineResult<()>;
}

/// Acquires an engine client when a runner starts.
pub trait EngineConnector: Send + Sync {
    type Engine: ContainerEngine;

    fn connect(&self) -> EngineResult<Self::Engine>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_from_config() {
        let config = RunnerConfig::new()
            .with_name("cache")
            .with_image("redis:7")
            .with_ports([6379])
            .with_env("REDIS_ARGS", "--save 60 1");

        let request = CreateRequest::from(&config);

        assert_eq!(request.name, "cache");
        assert_eq!(request.image, "docker.io/library/redis:7");
        assert_eq!(request.env, vec!["REDIS_ARGS=--save 60 1"]);
        assert!(request.exposed_ports.contains("6379/tcp"));
        assert_eq!(request.port_bindings["6379/tcp"].host_port, "6379");
    }
}
