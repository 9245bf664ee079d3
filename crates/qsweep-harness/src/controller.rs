//! Sweep orchestration.

use tokio::time::timeout;
use tracing::{info, warn};

use qsweep_hal::{Adapter, PROBE_TIMEOUT};
use qsweep_ir::CircuitSpec;

use crate::config::SweepConfig;
use crate::error::{HarnessError, HarnessResult};
use crate::observer::SweepObserver;
use crate::runner::run_trial;
use crate::sample::{FailureKind, Sample};
use crate::table::ResultTable;

/// Drives the (backend × qubit count) grid.
///
/// Each backend is a two-state machine: it keeps Running while samples
/// succeed and moves to Stopped at its first failure, after which no larger
/// circuit is attempted — a failure is that backend's scaling ceiling for
/// this run, not a transient to retry. Backends run strictly one after
/// another and trials never overlap, so timings are taken on an otherwise
/// idle machine.
pub struct SweepController {
    config: SweepConfig,
}

impl SweepController {
    /// Create a controller for a validated configuration.
    pub fn new(config: SweepConfig) -> HarnessResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The configuration this controller runs.
    pub fn config(&self) -> &SweepConfig {
        &self.config
    }

    /// Run the full sweep.
    ///
    /// Backend trouble of any kind ends up in the table; the only errors
    /// this returns are harness faults (empty backend list, a circuit that
    /// cannot be built, a table invariant violation).
    pub async fn run(
        &self,
        adapters: &[Box<dyn Adapter>],
        observer: &dyn SweepObserver,
    ) -> HarnessResult<ResultTable> {
        if adapters.is_empty() {
            return Err(HarnessError::NoBackends);
        }

        let mut table = ResultTable::new();
        for adapter in adapters {
            self.sweep_backend(adapter.as_ref(), observer, &mut table)
                .await?;
        }
        Ok(table)
    }

    async fn sweep_backend(
        &self,
        adapter: &dyn Adapter,
        observer: &dyn SweepObserver,
        table: &mut ResultTable,
    ) -> HarnessResult<()> {
        let backend = adapter.id();

        // One availability check per sweep. A missing backend gets exactly
        // one unsupported sample at the starting size, so its truncation
        // point is visible downstream like any other failure.
        let probed = match timeout(PROBE_TIMEOUT, adapter.probe()).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(err)) => Err(err.to_string()),
            Err(_) => Err(format!(
                "probe exceeded {}s",
                PROBE_TIMEOUT.as_secs()
            )),
        };
        if let Err(message) = probed {
            warn!(%backend, %message, "backend unavailable, skipping its sweep");
            let sample = Sample::failure(
                backend,
                self.config.min_qubits,
                FailureKind::Unsupported,
                message,
            );
            observer.trial_started(backend, self.config.min_qubits);
            table.record(sample.clone())?;
            observer.sample_recorded(&sample);
            return Ok(());
        }

        for qubits in self.config.qubit_counts() {
            let spec = CircuitSpec::qft(qubits)?;
            let repeats = self.config.effective_repeats(qubits);
            observer.trial_started(backend, qubits);

            let sample = run_trial(adapter, &spec, self.config.timeout, repeats).await;
            let stop = !sample.is_success();
            match &sample.outcome {
                crate::sample::Outcome::Success { duration, repeats } => {
                    info!(%backend, qubits, ?duration, repeats, "trial succeeded");
                }
                crate::sample::Outcome::Failure { kind, message } => {
                    info!(%backend, qubits, %kind, %message, "trial failed, stopping backend");
                }
            }
            table.record(sample.clone())?;
            observer.sample_recorded(&sample);

            if stop {
                break;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;

    use qsweep_hal::{AdapterError, AdapterResult, BackendId, Executable};
    use qsweep_ir::QubitCount;

    use super::*;
    use crate::observer::NoopObserver;

    /// Succeeds below `fail_at`, errors at and above it.
    struct CeilingAdapter {
        id: BackendId,
        fail_at: QubitCount,
        attempts: Arc<Mutex<Vec<QubitCount>>>,
    }

    impl CeilingAdapter {
        fn new(id: BackendId, fail_at: QubitCount) -> Self {
            Self {
                id,
                fail_at,
                attempts: Arc::new(Mutex::new(Vec::new())),
            }
        }
    }

    #[async_trait]
    impl Adapter for CeilingAdapter {
        fn id(&self) -> BackendId {
            self.id
        }

        fn timed_interval(&self) -> &'static str {
            "mock"
        }

        async fn probe(&self) -> AdapterResult<()> {
            Ok(())
        }

        async fn prepare(&self, spec: &CircuitSpec) -> AdapterResult<Box<dyn Executable>> {
            self.attempts.lock().unwrap().push(spec.num_qubits());
            if spec.num_qubits() >= self.fail_at {
                Err(AdapterError::Backend("over the ceiling".into()))
            } else {
                Ok(Box::new(InstantExecutable))
            }
        }
    }

    struct InstantExecutable;

    #[async_trait]
    impl Executable for InstantExecutable {
        async fn execute(&mut self) -> AdapterResult<()> {
            Ok(())
        }

        async fn dispose(self: Box<Self>) {}
    }

    struct AbsentAdapter;

    #[async_trait]
    impl Adapter for AbsentAdapter {
        fn id(&self) -> BackendId {
            BackendId::Toaster
        }

        fn timed_interval(&self) -> &'static str {
            "mock"
        }

        async fn probe(&self) -> AdapterResult<()> {
            Err(AdapterError::Unsupported("binary not on PATH".into()))
        }

        async fn prepare(&self, _spec: &CircuitSpec) -> AdapterResult<Box<dyn Executable>> {
            unreachable!("prepare must not run after a failed probe")
        }
    }

    fn config(min: QubitCount, max: QubitCount, step: QubitCount) -> SweepConfig {
        SweepConfig {
            min_qubits: min,
            max_qubits: max,
            step,
            timeout: Duration::from_secs(5),
            repeats: 1,
            ..SweepConfig::default()
        }
    }

    #[tokio::test]
    async fn test_empty_backend_list_is_a_harness_fault() {
        let controller = SweepController::new(config(1, 3, 1)).unwrap();
        let err = controller.run(&[], &NoopObserver).await.unwrap_err();
        assert!(matches!(err, HarnessError::NoBackends));
    }

    #[tokio::test]
    async fn test_backend_stops_at_first_failure() {
        let adapter = CeilingAdapter::new(BackendId::Reference, 4);
        let attempts = Arc::clone(&adapter.attempts);
        let adapters: Vec<Box<dyn Adapter>> = vec![Box::new(adapter)];

        let controller = SweepController::new(config(1, 10, 1)).unwrap();
        let table = controller.run(&adapters, &NoopObserver).await.unwrap();

        // 1..3 succeed, 4 fails, 5..10 never attempted.
        assert_eq!(*attempts.lock().unwrap(), vec![1, 2, 3, 4]);
        let samples = table.samples(BackendId::Reference);
        assert_eq!(samples.len(), 4);
        assert!(samples[..3].iter().all(Sample::is_success));
        assert_eq!(
            samples[3].failure_kind(),
            Some(FailureKind::BackendError)
        );
    }

    #[tokio::test]
    async fn test_one_backend_failing_does_not_block_the_next() {
        let first = CeilingAdapter::new(BackendId::QiskitAer, 1);
        let second = CeilingAdapter::new(BackendId::Reference, 100);
        let adapters: Vec<Box<dyn Adapter>> = vec![Box::new(first), Box::new(second)];

        let controller = SweepController::new(config(1, 3, 1)).unwrap();
        let table = controller.run(&adapters, &NoopObserver).await.unwrap();

        assert_eq!(table.samples(BackendId::QiskitAer).len(), 1);
        assert!(!table.samples(BackendId::QiskitAer)[0].is_success());
        assert_eq!(table.samples(BackendId::Reference).len(), 3);
        assert_eq!(table.success_count(), 3);
    }

    #[tokio::test]
    async fn test_failed_probe_records_one_unsupported_sample() {
        let adapters: Vec<Box<dyn Adapter>> = vec![Box::new(AbsentAdapter)];

        let controller = SweepController::new(config(2, 8, 2)).unwrap();
        let table = controller.run(&adapters, &NoopObserver).await.unwrap();

        let samples = table.samples(BackendId::Toaster);
        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].qubits, 2);
        assert_eq!(samples[0].failure_kind(), Some(FailureKind::Unsupported));
    }

    #[tokio::test]
    async fn test_observer_sees_every_sample() {
        #[derive(Default)]
        struct Counting {
            started: AtomicU32,
            recorded: AtomicU32,
        }

        impl SweepObserver for Counting {
            fn trial_started(&self, _backend: BackendId, _qubits: QubitCount) {
                self.started.fetch_add(1, Ordering::SeqCst);
            }

            fn sample_recorded(&self, _sample: &Sample) {
                self.recorded.fetch_add(1, Ordering::SeqCst);
            }
        }

        let adapter = CeilingAdapter::new(BackendId::Reference, 100);
        let adapters: Vec<Box<dyn Adapter>> = vec![Box::new(adapter)];
        let observer = Counting::default();

        let controller = SweepController::new(config(1, 4, 1)).unwrap();
        controller.run(&adapters, &observer).await.unwrap();

        assert_eq!(observer.started.load(Ordering::SeqCst), 4);
        assert_eq!(observer.recorded.load(Ordering::SeqCst), 4);
    }
}
