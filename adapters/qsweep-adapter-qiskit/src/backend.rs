//! Qiskit Aer backend implementation.

use async_trait::async_trait;
use tracing::debug;

use qsweep_hal::{
    Adapter, AdapterResult, BackendId, Executable, PyDriver, READY_TIMEOUT, probe_command,
    python_program,
};
use qsweep_ir::CircuitSpec;

const DRIVER_SCRIPT: &str = include_str!("driver.py");

/// Qiskit Aer simulator behind a warm Python driver.
pub struct QiskitBackend {
    python: String,
}

impl QiskitBackend {
    /// Create a backend using the interpreter named by `QSWEEP_PYTHON`
    /// (default `python3`).
    pub fn new() -> Self {
        Self {
            python: python_program(),
        }
    }
}

impl Default for QiskitBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Adapter for QiskitBackend {
    fn id(&self) -> BackendId {
        BackendId::QiskitAer
    }

    fn timed_interval(&self) -> &'static str {
        "AerSimulator.run of a pre-transpiled single-shot circuit inside a warm \
         interpreter; imports and transpilation excluded"
    }

    async fn probe(&self) -> AdapterResult<()> {
        probe_command(&self.python, &["-c", "import qiskit, qiskit_aer"]).await
    }

    async fn prepare(&self, spec: &CircuitSpec) -> AdapterResult<Box<dyn Executable>> {
        let circuit_json = serde_json::to_string(spec)?;
        let driver =
            PyDriver::spawn(&self.python, DRIVER_SCRIPT, &circuit_json, READY_TIMEOUT).await?;
        debug!(qubits = spec.num_qubits(), "qiskit driver warmed up");
        Ok(Box::new(driver))
    }
}
