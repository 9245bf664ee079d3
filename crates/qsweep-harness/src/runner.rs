//! Timed trial execution.
//!
//! [`run_trial`] is the only place a backend's code runs during a sweep,
//! and the only place wall-clock time is measured. Every adapter fault,
//! hang or absence comes back out as a recorded [`Sample`]; nothing a
//! backend does can abort the sweep from here.

use std::time::{Duration, Instant};

use tokio::time::timeout;
use tracing::debug;

use qsweep_hal::Adapter;
use qsweep_ir::CircuitSpec;

use crate::sample::{FailureKind, Sample};

/// Run one trial: prepare, execute `repeats` times, tear down.
///
/// The clock starts immediately before each `execute` call and stops
/// immediately after; a successful sample carries the arithmetic mean
/// across the repeats. Preparation is bounded by the same `trial_timeout`
/// but never measured — a backend that needs a minute to warm up and a
/// millisecond to simulate reports a millisecond.
///
/// The first failing repeat wins: no elapsed time is ever reported for a
/// failed trial, and no partial averages exist. `dispose` runs on every
/// exit path, which is what terminates a still-running backend after a
/// timeout.
pub async fn run_trial(
    adapter: &dyn Adapter,
    spec: &CircuitSpec,
    trial_timeout: Duration,
    repeats: u32,
) -> Sample {
    let backend = adapter.id();
    let qubits = spec.num_qubits();

    let mut exe = match timeout(trial_timeout, adapter.prepare(spec)).await {
        Ok(Ok(exe)) => exe,
        Ok(Err(err)) => {
            return Sample::failure(
                backend,
                qubits,
                FailureKind::from_adapter_error(&err),
                err.to_string(),
            );
        }
        Err(_) => {
            return Sample::failure(
                backend,
                qubits,
                FailureKind::Timeout,
                format!("preparation exceeded {}s", trial_timeout.as_secs()),
            );
        }
    };

    let mut total = Duration::ZERO;
    let mut completed = 0u32;
    let mut failure = None;

    for repeat in 0..repeats {
        let clock = Instant::now();
        match timeout(trial_timeout, exe.execute()).await {
            Ok(Ok(())) => {
                let elapsed = clock.elapsed();
                debug!(%backend, qubits, repeat, ?elapsed, "repeat finished");
                total += elapsed;
                completed += 1;
            }
            Ok(Err(err)) => {
                failure = Some(Sample::failure(
                    backend,
                    qubits,
                    FailureKind::from_adapter_error(&err),
                    err.to_string(),
                ));
                break;
            }
            Err(_) => {
                failure = Some(Sample::failure(
                    backend,
                    qubits,
                    FailureKind::Timeout,
                    format!("execution exceeded {}s", trial_timeout.as_secs()),
                ));
                break;
            }
        }
    }

    // A timed-out execute future was dropped mid-flight; dispose is what
    // actually kills the subprocess or flags the kernel to stop.
    exe.dispose().await;

    failure.unwrap_or_else(|| {
        // Config validation guarantees repeats >= 1, so completed > 0 here.
        Sample::success(backend, qubits, total / completed.max(1), completed)
    })
}
