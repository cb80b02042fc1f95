//! Docker implementation of ContainerEngine.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use bollard::container::{
    Config, CreateContainerOptions, RemoveContainerOptions, StartContainerOptions,
    StopContainerOptions,
};
use bollard::image::CreateImageOptions;
use bollard::service::{HostConfig, PortBinding};
use bollard::Docker;
use futures_util::StreamExt;
use tracing::debug;

use crate::engine::{
    ContainerEngine, CreateRequest, CreatedContainer, EngineConnector, EngineResult,
};

/// Docker Engine API client.
#[derive(Debug, Clone)]
pub struct DockerEngine {
    client: Docker,
}

impl DockerEngine {
    pub fn new(client: Docker) -> Self {
        Self { client }
    }

    /// Connect using `DOCKER_HOST` or the platform's default socket.
    pub fn connect_with_local_defaults() -> EngineResult<Self> {
        Ok(Self::new(Docker::connect_with_local_defaults()?))
    }
}

/// Split an image reference into the repository and tag the pull API expects.
///
/// References without a tag are pulled as `latest`; digest references are
/// passed whole.
fn split_reference(image: &str) -> (&str, &str) {
    if image.contains('@') {
        return (image, "");
    }
    let name_start = image.rfind('/').map_or(0, |i| i + 1);
    match image[name_start..].rfind(':') {
        Some(i) => (
            &image[..name_start + i],
            &image[name_start + i + 1..],
        ),
        None => (image, "latest"),
    }
}

#[async_trait]
impl ContainerEngine for DockerEngine {
    async fn pull_image(&self, image: &str) -> EngineResult<()> {
        let (from_image, tag) = split_reference(image);
        let options = CreateImageOptions {
            from_image,
            tag,
            ..Default::default()
        };

        let mut stream = self.client.create_image(Some(options), None, None);
        while let Some(result) = stream.next().await {
            let info = result?;
            if let Some(status) = info.status {
                debug!("Pull status: {}", status);
            }
        }
        Ok(())
    }

    async fn create_container(&self, request: &CreateRequest) -> EngineResult<CreatedContainer> {
        let exposed_ports: HashMap<String, HashMap<(), ()>> = request
            .exposed_ports
            .iter()
            .map(|port| (port.clone(), HashMap::new()))
            .collect();

        let port_bindings: HashMap<String, Option<Vec<PortBinding>>> = request
            .port_bindings
            .iter()
            .map(|(port, binding)| {
                (
                    port.clone(),
                    Some(vec![PortBinding {
                        host_ip: Some(binding.host_ip.clone()),
                        host_port: Some(binding.host_port.clone()),
                    }]),
                )
            })
            .collect();

        let config = Config {
            image: Some(request.image.clone()),
            env: Some(request.env.clone()),
            exposed_ports: Some(exposed_ports),
            host_config: Some(HostConfig {
                port_bindings: Some(port_bindings),
                ..Default::default()
            }),
            ..Default::default()
        };

        let options = CreateContainerOptions {
            name: request.name.as_str(),
            platform: None,
        };

        let response = self.client.create_container(Some(options), config).await?;
        Ok(CreatedContainer {
            id: response.id,
            warnings: response.warnings,
        })
    }

    async fn start_container(&self, id: &str) -> EngineResult<()> {
        self.client
            .start_container(id, None::<StartContainerOptions<String>>)
            .await
    }

    async fn stop_container(&self, id: &str, timeout: Duration) -> EngineResult<()> {
        let options = StopContainerOptions {
            t: i64::try_from(timeout.as_secs()).unwrap_or(i64::MAX),
        };
        self.client.stop_container(id, Some(options)).await
    }

    async fn remove_container(&self, id: &str) -> EngineResult<()> {
        self.client
            .remove_container(id, None::<RemoveContainerOptions>)
            .await
    }
}

/// Connects to the Docker engine configured in the local environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalDocker;

impl EngineConnector for LocalDocker {
    type Engine = DockerEngine;

    fn connect(&self) -> EngineResult<DockerEngine> {
        DockerEngine::connect_with_local_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_reference() {
        assert_eq!(
            split_reference("docker.io/library/mongo"),
            ("docker.io/library/mongo", "latest")
        );
        assert_eq!(
            split_reference("docker.io/library/redis:7-alpine"),
            ("docker.io/library/redis", "7-alpine")
        );
        assert_eq!(
            split_reference("localhost:5000/team/api"),
            ("localhost:5000/team/api", "latest")
        );
        assert_eq!(
            split_reference("localhost:5000/team/api:v2"),
            ("localhost:5000/team/api", "v2")
        );
        assert_eq!(
            split_reference("ghcr.io/owner/app@sha256:abc"),
            ("ghcr.io/owner/app@sha256:abc", "")
        );
    }
}
