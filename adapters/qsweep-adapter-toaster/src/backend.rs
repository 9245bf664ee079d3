//! qubit-toaster backend implementation.

use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use qsweep_hal::{
    Adapter, AdapterError, AdapterResult, BackendId, Executable, TRIAL_SHOTS, probe_command,
};
use qsweep_ir::CircuitSpec;

use crate::format;

/// Environment variable naming the toaster binary.
pub const TOASTER_BIN_ENV: &str = "QSWEEP_TOASTER_BIN";

/// Default binary name, resolved through PATH.
pub const DEFAULT_BIN: &str = "qubit-toaster";

/// Quantastica qubit-toaster, a one-shot native binary.
pub struct ToasterBackend {
    binary: String,
}

impl ToasterBackend {
    /// Create a backend using the binary named by `QSWEEP_TOASTER_BIN`
    /// (default `qubit-toaster`).
    pub fn new() -> Self {
        Self {
            binary: std::env::var(TOASTER_BIN_ENV).unwrap_or_else(|_| DEFAULT_BIN.to_string()),
        }
    }
}

impl Default for ToasterBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Adapter for ToasterBackend {
    fn id(&self) -> BackendId {
        BackendId::Toaster
    }

    fn timed_interval(&self) -> &'static str {
        "full qubit-toaster process lifetime per shot: spawn, circuit parse, \
         simulation and exit; the binary has no warm mode"
    }

    async fn probe(&self) -> AdapterResult<()> {
        probe_command(&self.binary, &["--version"]).await
    }

    async fn prepare(&self, spec: &CircuitSpec) -> AdapterResult<Box<dyn Executable>> {
        let scratch = tempfile::TempDir::new()?;
        let circuit_path = scratch.path().join("circuit.json");
        tokio::fs::write(&circuit_path, serde_json::to_vec(&format::emit(spec))?).await?;
        debug!(qubits = spec.num_qubits(), path = %circuit_path.display(), "toaster circuit written");
        Ok(Box::new(ToasterExecutable {
            binary: self.binary.clone(),
            circuit_path,
            _scratch: scratch,
        }))
    }
}

struct ToasterExecutable {
    binary: String,
    circuit_path: PathBuf,
    // Keeps the circuit file alive across repeats.
    _scratch: tempfile::TempDir,
}

#[async_trait]
impl Executable for ToasterExecutable {
    async fn execute(&mut self) -> AdapterResult<()> {
        let output = Command::new(&self.binary)
            .arg("-s")
            .arg(TRIAL_SHOTS.to_string())
            .arg("-r")
            .arg("counts")
            .arg(&self.circuit_path)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await?;

        if output.status.success() {
            Ok(())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            Err(AdapterError::Backend(format!(
                "qubit-toaster exited with {}: {}",
                output.status,
                stderr.trim()
            )))
        }
    }

    async fn dispose(self: Box<Self>) {
        // One-shot process per execute; a timed-out child is reaped by
        // kill_on_drop when the cancelled future unwinds.
    }
}
