//! Mock container engine for testing.
//!
//! Records every call and lets tests make individual engine operations fail,
//! so the runner lifecycle can be exercised without Docker. A `MockEngine`
//! is also its own [`EngineConnector`]; clones share state, so a test keeps
//! one handle for assertions and hands another to the runner.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bollard::errors::Error as EngineError;
use parking_lot::RwLock;

use crate::engine::{
    ContainerEngine, CreateRequest, CreatedContainer, EngineConnector, EngineResult,
};

/// Captured call information for verification.
#[derive(Debug, Clone)]
pub struct CapturedCall {
    pub method: String,
    /// Image reference or container id the call targeted
    pub target: Option<String>,
    pub request: Option<CreateRequest>,
    pub timeout: Option<Duration>,
}

impl CapturedCall {
    fn new(method: &str) -> Self {
        Self {
            method: method.to_string(),
            target: None,
            request: None,
            timeout: None,
        }
    }

    fn target(mut self, target: &str) -> Self {
        self.target = Some(target.to_string());
        self
    }
}

/// Mock container engine.
#[derive(Clone, Default)]
pub struct MockEngine {
    captured_calls: Arc<RwLock<Vec<CapturedCall>>>,
    /// Simulated failures, keyed by method name.
    failures: Arc<RwLock<HashMap<String, String>>>,
    /// Warnings returned from `create_container`.
    create_warnings: Arc<RwLock<Vec<String>>>,
    next_id: Arc<AtomicUsize>,
}

impl MockEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `method` fail with an engine server error carrying `message`.
    ///
    /// `connect` is accepted as a method name to fail client acquisition.
    pub fn fail_on(self, method: &str, message: impl Into<String>) -> Self {
        self.failures.write().insert(method.to_string(), message.into());
        self
    }

    /// Let a previously failing method succeed again.
    pub fn recover(&self, method: &str) {
        self.failures.write().remove(method);
    }

    pub fn with_create_warning(self, warning: impl Into<String>) -> Self {
        self.create_warnings.write().push(warning.into());
        self
    }

    pub fn clear_calls(&self) {
        self.captured_calls.write().clear();
    }

    pub fn get_calls(&self) -> Vec<CapturedCall> {
        self.captured_calls.read().clone()
    }

    /// Method names in call order.
    pub fn methods(&self) -> Vec<String> {
        self.captured_calls
            .read()
            .iter()
            .map(|c| c.method.clone())
            .collect()
    }

    pub fn call_count(&self) -> usize {
        self.captured_calls.read().len()
    }

    pub fn was_called(&self, method: &str) -> bool {
        self.captured_calls.read().iter().any(|c| c.method == method)
    }

    pub fn get_method_calls(&self, method: &str) -> Vec<CapturedCall> {
        self.captured_calls
            .read()
            .iter()
            .filter(|c| c.method == method)
            .cloned()
            .collect()
    }

    fn record_call(&self, call: CapturedCall) {
        self.captured_calls.write().push(call);
    }

    fn check_failure(&self, method: &str) -> EngineResult<()> {
        match self.failures.read().get(method) {
            Some(message) => Err(EngineError::DockerResponseServerError {
                status_code: 500,
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }
}

impl EngineConnector for MockEngine {
    type Engine = MockEngine;

    fn connect(&self) -> EngineResult<MockEngine> {
        self.record_call(CapturedCall::new("connect"));
        self.check_failure("connect")?;
        Ok(self.clone())
    }
}

#[async_trait]
impl ContainerEngine for MockEngine {
    async fn pull_image(&self, image: &str) -> EngineResult<()> {
        self.record_call(CapturedCall::new("pull_image").target(image));
        self.check_failure("pull_image")
    }

    async fn create_container(&self, request: &CreateRequest) -> EngineResult<CreatedContainer> {
        let mut call = CapturedCall::new("create_container").target(&request.image);
        call.request = Some(request.clone());
        self.record_call(call);
        self.check_failure("create_container")?;

        let n = self.next_id.fetch_add(1, Ordering::SeqCst);
        Ok(CreatedContainer {
            id: format!("mock-{}-{}", n, request.name),
            warnings: self.create_warnings.read().clone(),
        })
    }

    async fn start_container(&self, id: &str) -> EngineResult<()> {
        self.record_call(CapturedCall::new("start_container").target(id));
        self.check_failure("start_container")
    }

    async fn stop_container(&self, id: &str, timeout: Duration) -> EngineResult<()> {
        let mut call = CapturedCall::new("stop_container").target(id);
        call.timeout = Some(timeout);
        self.record_call(call);
        self.check_failure("stop_container")
    }

    async fn remove_container(&self, id: &str) -> EngineResult<()> {
        self.record_call(CapturedCall::new("remove_container").target(id));
        self.check_failure("remove_container")
    }
}
