//! Reference backend implementation.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tracing::debug;

use qsweep_hal::{Adapter, AdapterError, AdapterResult, BackendId, Executable};
use qsweep_ir::CircuitSpec;

use crate::statevector::Statevector;

/// Widest circuit the reference backend accepts. 2^26 amplitudes is 1 GiB;
/// anything larger belongs on a purpose-built simulator.
pub const MAX_QUBITS: u32 = 26;

/// Always-available in-process statevector backend.
///
/// Exists so the harness runs end to end on a machine with no external
/// simulators installed, and doubles as the baseline series in reports.
#[derive(Debug, Default)]
pub struct ReferenceBackend;

impl ReferenceBackend {
    /// Create a new reference backend.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Adapter for ReferenceBackend {
    fn id(&self) -> BackendId {
        BackendId::Reference
    }

    fn timed_interval(&self) -> &'static str {
        "in-process statevector application of the full gate sequence plus one \
         terminal sample; state allocation included"
    }

    async fn probe(&self) -> AdapterResult<()> {
        Ok(())
    }

    async fn prepare(&self, spec: &CircuitSpec) -> AdapterResult<Box<dyn Executable>> {
        if spec.num_qubits() > MAX_QUBITS {
            return Err(AdapterError::Unsupported(format!(
                "reference backend caps out at {MAX_QUBITS} qubits, circuit has {}",
                spec.num_qubits()
            )));
        }
        Ok(Box::new(ReferenceExecutable {
            spec: spec.clone(),
            cancel: Arc::new(AtomicBool::new(false)),
        }))
    }
}

struct ReferenceExecutable {
    spec: CircuitSpec,
    cancel: Arc<AtomicBool>,
}

#[async_trait]
impl Executable for ReferenceExecutable {
    async fn execute(&mut self) -> AdapterResult<()> {
        let spec = self.spec.clone();
        let cancel = Arc::clone(&self.cancel);
        let outcome = tokio::task::spawn_blocking(move || {
            let mut state = Statevector::new(spec.num_qubits() as usize);
            if !state.run(spec.ops(), &cancel) {
                return Err(AdapterError::Cancelled);
            }
            let outcome = state.sample();
            Ok(state.outcome_to_bitstring(outcome))
        })
        .await
        .map_err(|e| AdapterError::Backend(format!("simulation task died: {e}")))??;
        debug!(%outcome, "sampled one shot");
        Ok(())
    }

    async fn dispose(self: Box<Self>) {
        // A timed-out trial's kernel thread is still running; this makes it
        // exit at the next op boundary instead of finishing the circuit.
        self.cancel.store(true, Ordering::Relaxed);
    }
}
