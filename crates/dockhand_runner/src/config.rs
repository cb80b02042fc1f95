//! Container configuration types.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::registry;

/// Host address every port binding is published on.
pub const DEFAULT_HOST_ADDRESS: &str = "127.0.0.1";

/// Grace period the engine waits before killing a stopping container.
pub const DEFAULT_STOP_TIMEOUT_SECS: u64 = 60;

/// Generate a fresh container name.
///
/// Each call yields a new name; two runners that both ask for a default name
/// get different containers.
pub fn generate_container_name() -> String {
    format!("dockhand-{}", Uuid::new_v4())
}

/// Key used for both the exposed-port set and the binding map.
fn port_key(port: u32) -> String {
    format!("{}/tcp", port)
}

/// Host side of a published port.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostBinding {
    pub host_ip: String,
    pub host_port: String,
}

/// Runner behavior options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerOptions {
    /// Remove the container after it has been stopped.
    pub remove_on_finalization: bool,
    /// Seconds the engine waits for a graceful stop before killing.
    pub stop_timeout_secs: u64,
}

impl Default for RunnerOptions {
    fn default() -> Self {
        Self {
            remove_on_finalization: true,
            stop_timeout_secs: DEFAULT_STOP_TIMEOUT_SECS,
        }
    }
}

impl RunnerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn remove_on_finalization(mut self, remove: bool) -> Self {
        self.remove_on_finalization = remove;
        self
    }

    /// Keep the container around after `stop`.
    pub fn keep_container(self) -> Self {
        self.remove_on_finalization(false)
    }

    pub fn stop_timeout(mut self, seconds: u64) -> Self {
        self.stop_timeout_secs = seconds;
        self
    }
}

/// Everything needed to create one container.
///
/// Values read back through serde are taken as-is; the image qualification
/// and name generation only happen in the `with_*` methods.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Container name
    pub name: String,
    /// Fully qualified image reference
    pub image: String,
    /// Requested ports, in call order
    pub ports: Vec<String>,
    /// Exposed ports, keyed `<port>/tcp`
    pub exposed_ports: BTreeSet<String>,
    /// Host bindings, keyed like `exposed_ports`
    pub port_bindings: BTreeMap<String, HostBinding>,
    /// `KEY=VALUE` environment entries
    pub env: Vec<String>,
    pub options: RunnerOptions,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            name: generate_container_name(),
            image: String::new(),
            ports: Vec::new(),
            exposed_ports: BTreeSet::new(),
            port_bindings: BTreeMap::new(),
            env: Vec::new(),
            options: RunnerOptions::default(),
        }
    }
}

impl RunnerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Expose `ports` and publish each one on the same host port.
    ///
    /// No range check is made here; the engine rejects invalid ports.
    pub fn with_ports(mut self, ports: impl IntoIterator<Item = u32>) -> Self {
        for port in ports {
            let host_port = port.to_string();
            let key = port_key(port);
            self.ports.push(host_port.clone());
            self.exposed_ports.insert(key.clone());
            self.port_bindings.insert(
                key,
                HostBinding {
                    host_ip: DEFAULT_HOST_ADDRESS.to_string(),
                    host_port,
                },
            );
        }
        self
    }

    /// Set the image, qualifying bare names with the default registry.
    pub fn with_image(mut self, image: impl AsRef<str>) -> Self {
        self.image = registry::qualify_image(image.as_ref());
        self
    }

    /// Set the container name. An empty name gets a generated one.
    ///
    /// Starting a container whose name is already taken on the engine fails.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.name = if name.is_empty() {
            generate_container_name()
        } else {
            name
        };
        self
    }

    pub fn with_env(mut self, key: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        self.env.push(format!("{}={}", key.as_ref(), value.as_ref()));
        self
    }

    /// Replace the options wholesale.
    pub fn with_options(mut self, options: RunnerOptions) -> Self {
        self.options = options;
        self
    }
}
