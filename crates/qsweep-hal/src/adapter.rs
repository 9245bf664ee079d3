//! Adapter and executable traits.
//!
//! The trial lifecycle every backend goes through:
//!
//! ```text
//!   probe() ──→ prepare(spec) ──→ execute() ×repeats ──→ dispose()
//!   (once per     (untimed,          (timed by the        (every exit
//!    sweep)        per trial)         runner's clock)      path)
//! ```
//!
//! ## Design principles
//!
//! - **The runner owns the clock**: adapters never report their own
//!   duration; the harness measures wall time around [`Executable::execute`]
//!   with a monotonic [`std::time::Instant`] so every backend is measured
//!   the same way.
//! - **Honest intervals**: what that wall time actually covers differs per
//!   backend (warm interpreter vs. whole process vs. HTTP round-trip), so
//!   each adapter states its interval in [`Adapter::timed_interval`] and the
//!   string travels with the results. Series are not comparable across
//!   backends and the report says so.
//! - **Probe failures are "unsupported", never "broken"**: a backend that
//!   is not installed must not count as a backend error.

use std::time::Duration;

use async_trait::async_trait;

use qsweep_ir::CircuitSpec;

use crate::backend_id::BackendId;
use crate::error::AdapterResult;

/// Upper bound on availability probes.
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(30);

/// Shots per trial. Every backend runs single-shot executions so the timed
/// work is the simulation itself, not sampling throughput.
pub const TRIAL_SHOTS: u32 = 1;

/// Interface every simulator backend implements.
#[async_trait]
pub trait Adapter: Send + Sync {
    /// Stable identifier; keys the result table and names the plot series.
    fn id(&self) -> BackendId;

    /// One-sentence statement of exactly what wall-clock interval
    /// [`Executable::execute`] spans for this backend.
    fn timed_interval(&self) -> &'static str;

    /// Availability check, run once at sweep start. Must finish within
    /// [`PROBE_TIMEOUT`] and report absence as
    /// [`AdapterError::Unsupported`](crate::AdapterError::Unsupported).
    async fn probe(&self) -> AdapterResult<()>;

    /// Untimed setup for one trial: translate the circuit into the
    /// backend's native form and stand up whatever it needs (warm driver,
    /// request body, statevector buffer).
    async fn prepare(&self, spec: &CircuitSpec) -> AdapterResult<Box<dyn Executable>>;
}

/// One prepared trial, ready to run.
#[async_trait]
pub trait Executable: Send {
    /// Exactly the simulation step being timed.
    ///
    /// Called `repeats` times per trial; each call must perform a complete
    /// fresh execution.
    async fn execute(&mut self) -> AdapterResult<()>;

    /// Tear down subprocesses and connections.
    ///
    /// The runner calls this on every trial exit path, including after a
    /// timeout cancelled a still-running `execute` future; this is where a
    /// wedged backend gets terminated. Must not fail; problems are logged.
    async fn dispose(self: Box<Self>);
}
