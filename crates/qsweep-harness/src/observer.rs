//! Sweep progress notifications.

use qsweep_hal::BackendId;
use qsweep_ir::QubitCount;

use crate::sample::Sample;

/// Hook for live progress reporting.
///
/// The harness itself only emits tracing events; anything user-facing
/// (spinners, per-sample lines) plugs in here. Callbacks run on the sweep
/// task between trials, so they should return quickly.
pub trait SweepObserver: Send + Sync {
    /// A trial is about to run.
    fn trial_started(&self, backend: BackendId, qubits: QubitCount) {
        let _ = (backend, qubits);
    }

    /// A sample was recorded into the table.
    fn sample_recorded(&self, sample: &Sample) {
        let _ = sample;
    }
}

/// Observer that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl SweepObserver for NoopObserver {}
