//! QVM backend implementation.

use async_trait::async_trait;
use tracing::debug;

use qsweep_hal::{Adapter, AdapterError, AdapterResult, BackendId, Executable, TRIAL_SHOTS};
use qsweep_ir::CircuitSpec;

use crate::api::{MultishotRequest, QvmClient};
use crate::quil;

/// Environment variable naming the QVM endpoint.
pub const QVM_URL_ENV: &str = "QSWEEP_QVM_URL";

/// Default endpoint of a locally running `qvm -S`.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000";

/// Forest QVM daemon reached over HTTP with Quil programs.
///
/// The daemon is a shared single resource; the harness never issues
/// concurrent requests, so trials see it exclusively.
pub struct QvmBackend {
    client: QvmClient,
}

impl QvmBackend {
    /// Create a backend against `QSWEEP_QVM_URL`, defaulting to the local
    /// daemon.
    pub fn new() -> AdapterResult<Self> {
        let endpoint =
            std::env::var(QVM_URL_ENV).unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string());
        Ok(Self {
            client: QvmClient::new(endpoint)?,
        })
    }

    /// Create a backend against an explicit endpoint.
    pub fn with_endpoint(endpoint: impl Into<String>) -> AdapterResult<Self> {
        Ok(Self {
            client: QvmClient::new(endpoint)?,
        })
    }
}

#[async_trait]
impl Adapter for QvmBackend {
    fn id(&self) -> BackendId {
        BackendId::PyquilQvm
    }

    fn timed_interval(&self) -> &'static str {
        "one HTTP multishot round-trip to the QVM daemon: request parsing, Quil \
         execution and response serialization; connection setup amortized by the \
         pooled client"
    }

    async fn probe(&self) -> AdapterResult<()> {
        let version = self.client.version().await?;
        debug!(%version, endpoint = %self.client.endpoint(), "QVM reachable");
        Ok(())
    }

    async fn prepare(&self, spec: &CircuitSpec) -> AdapterResult<Box<dyn Executable>> {
        let request = MultishotRequest::new(quil::emit(spec), TRIAL_SHOTS);
        Ok(Box::new(QvmExecutable {
            client: self.client.clone(),
            request,
        }))
    }
}

struct QvmExecutable {
    client: QvmClient,
    request: MultishotRequest,
}

#[async_trait]
impl Executable for QvmExecutable {
    async fn execute(&mut self) -> AdapterResult<()> {
        let response = self.client.multishot(&self.request).await?;
        if response.ro.len() != TRIAL_SHOTS as usize {
            return Err(AdapterError::Backend(format!(
                "QVM returned {} readout rows, expected {TRIAL_SHOTS}",
                response.ro.len()
            )));
        }
        Ok(())
    }

    async fn dispose(self: Box<Self>) {
        // Nothing to tear down; dropping the clone leaves the shared pool
        // alive for the next trial.
    }
}
