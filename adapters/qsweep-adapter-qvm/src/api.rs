//! QVM HTTP API types and client.
//!
//! The Forest QVM (`qvm -S`) answers JSON-typed POST requests on a single
//! endpoint. The harness uses two of them: `version` as a liveness probe
//! and `multishot` for execution.

use serde::{Deserialize, Serialize};
use tracing::debug;

use qsweep_hal::{AdapterError, AdapterResult};

/// Readout registers requested from the QVM.
#[derive(Debug, Clone, Serialize)]
pub struct Addresses {
    /// Return the whole `ro` register.
    pub ro: bool,
}

/// JSON body for the QVM `multishot` call.
#[derive(Debug, Clone, Serialize)]
pub struct MultishotRequest {
    #[serde(rename = "type")]
    kind: &'static str,
    /// Registers to read back.
    pub addresses: Addresses,
    /// Number of executions.
    pub trials: u32,
    /// The Quil program text.
    #[serde(rename = "compiled-quil")]
    pub compiled_quil: String,
}

impl MultishotRequest {
    /// Build a request executing `quil` for `trials` shots.
    pub fn new(quil: String, trials: u32) -> Self {
        Self {
            kind: "multishot",
            addresses: Addresses { ro: true },
            trials,
            compiled_quil: quil,
        }
    }
}

/// QVM `multishot` response: one row of readout bits per trial.
#[derive(Debug, Clone, Deserialize)]
pub struct MultishotResponse {
    /// The `ro` register, outer index is the trial.
    pub ro: Vec<Vec<u8>>,
}

/// Thin client over one QVM endpoint.
///
/// Cloning shares the underlying connection pool, so every trial reuses
/// the same TCP connection and setup cost stays out of the timed window.
#[derive(Debug, Clone)]
pub struct QvmClient {
    http: reqwest::Client,
    endpoint: String,
}

impl QvmClient {
    /// Create a client for `endpoint`.
    ///
    /// Only connection setup is bounded here; request deadlines belong to
    /// the sweep runner, which owns the trial timeout.
    pub fn new(endpoint: impl Into<String>) -> AdapterResult<Self> {
        let http = reqwest::Client::builder()
            .connect_timeout(std::time::Duration::from_secs(10))
            .build()?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
        })
    }

    /// The endpoint this client talks to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Ask the daemon for its version string.
    ///
    /// An unreachable daemon is an unsupported backend, not a broken one.
    pub async fn version(&self) -> AdapterResult<String> {
        let response = self
            .http
            .post(&self.endpoint)
            .json(&serde_json::json!({ "type": "version" }))
            .send()
            .await
            .map_err(|e| {
                AdapterError::Unsupported(format!("QVM unreachable at {}: {e}", self.endpoint))
            })?;
        let status = response.status();
        if !status.is_success() {
            return Err(AdapterError::Unsupported(format!(
                "QVM version call returned HTTP {status}"
            )));
        }
        Ok(response.text().await?.trim().to_string())
    }

    /// Execute one multishot request.
    pub async fn multishot(&self, request: &MultishotRequest) -> AdapterResult<MultishotResponse> {
        let response = self
            .http
            .post(&self.endpoint)
            .json(request)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AdapterError::Backend(format!(
                "QVM returned HTTP {status}: {}",
                body.trim()
            )));
        }
        let parsed: MultishotResponse = response.json().await?;
        debug!(trials = parsed.ro.len(), "QVM multishot completed");
        Ok(parsed)
    }
}
