//! Cirq backend implementation.

use async_trait::async_trait;
use tracing::debug;

use qsweep_hal::{
    Adapter, AdapterResult, BackendId, Executable, PyDriver, READY_TIMEOUT, probe_command,
    python_program,
};
use qsweep_ir::CircuitSpec;

const DRIVER_SCRIPT: &str = include_str!("driver.py");

/// Cirq simulator behind a warm Python driver, with the qsim engine when
/// qsimcirq is installed.
pub struct QsimBackend {
    python: String,
}

impl QsimBackend {
    /// Create a backend using the interpreter named by `QSWEEP_PYTHON`
    /// (default `python3`).
    pub fn new() -> Self {
        Self {
            python: python_program(),
        }
    }
}

impl Default for QsimBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Adapter for QsimBackend {
    fn id(&self) -> BackendId {
        BackendId::CirqQsim
    }

    fn timed_interval(&self) -> &'static str {
        "simulator.run of a prebuilt single-shot circuit inside a warm interpreter \
         (qsimcirq engine when installed, cirq otherwise); imports and circuit \
         construction excluded"
    }

    async fn probe(&self) -> AdapterResult<()> {
        // qsimcirq is optional; the driver falls back to the stock engine.
        probe_command(&self.python, &["-c", "import cirq"]).await
    }

    async fn prepare(&self, spec: &CircuitSpec) -> AdapterResult<Box<dyn Executable>> {
        let circuit_json = serde_json::to_string(spec)?;
        let driver =
            PyDriver::spawn(&self.python, DRIVER_SCRIPT, &circuit_json, READY_TIMEOUT).await?;
        debug!(
            qubits = spec.num_qubits(),
            engine = driver.detail().unwrap_or("unknown"),
            "cirq driver warmed up"
        );
        Ok(Box::new(driver))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_identity() {
        let backend = QsimBackend::new();
        assert_eq!(backend.id(), BackendId::CirqQsim);
        assert!(backend.timed_interval().contains("qsim"));
    }

    #[test]
    fn test_driver_script_reports_its_engine() {
        assert!(DRIVER_SCRIPT.contains("READY %s"));
        assert!(DRIVER_SCRIPT.contains("qsimcirq"));
        assert!(DRIVER_SCRIPT.contains("cirq.Simulator()"));
        assert!(DRIVER_SCRIPT.contains("repetitions=1"));
    }

    #[test]
    fn test_driver_script_handles_every_interchange_op() {
        let spec = CircuitSpec::qft(3).unwrap();
        for op in spec.ops() {
            assert!(
                DRIVER_SCRIPT.contains(&format!("\"{}\"", op.name())),
                "driver script does not handle op {}",
                op.name()
            );
        }
    }
}
