//! End-to-end sweep scenarios.
//!
//! These drive the full controller → runner → table → report pipeline with
//! the in-process reference backend plus scripted adapters standing in for
//! external simulators.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use qsweep_adapter_reference::ReferenceBackend;
use qsweep_hal::{Adapter, AdapterError, AdapterResult, BackendId, Executable};
use qsweep_harness::{
    aggregate, write_report, FailureKind, NoopObserver, Sample, SweepConfig, SweepController,
    CSV_FILE, PLOT_FILE, TABLE_FILE,
};
use qsweep_ir::{CircuitSpec, QubitCount};

/// Succeeds quickly up to `hang_at` qubits, then sleeps past any timeout.
struct SlowsDownAdapter {
    id: BackendId,
    hang_at: QubitCount,
    attempts: Arc<Mutex<Vec<QubitCount>>>,
}

impl SlowsDownAdapter {
    fn new(id: BackendId, hang_at: QubitCount) -> Self {
        Self {
            id,
            hang_at,
            attempts: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

#[async_trait]
impl Adapter for SlowsDownAdapter {
    fn id(&self) -> BackendId {
        self.id
    }

    fn timed_interval(&self) -> &'static str {
        "scripted delay"
    }

    async fn probe(&self) -> AdapterResult<()> {
        Ok(())
    }

    async fn prepare(&self, spec: &CircuitSpec) -> AdapterResult<Box<dyn Executable>> {
        self.attempts.lock().unwrap().push(spec.num_qubits());
        Ok(Box::new(DelayExecutable {
            delay: if spec.num_qubits() >= self.hang_at {
                Duration::from_secs(3600)
            } else {
                // Larger circuits take visibly longer, like a real backend.
                Duration::from_millis(u64::from(spec.num_qubits()) * 10)
            },
        }))
    }
}

struct DelayExecutable {
    delay: Duration,
}

#[async_trait]
impl Executable for DelayExecutable {
    async fn execute(&mut self) -> AdapterResult<()> {
        tokio::time::sleep(self.delay).await;
        Ok(())
    }

    async fn dispose(self: Box<Self>) {}
}

/// Probe always reports the backend as missing.
struct MissingAdapter(BackendId);

#[async_trait]
impl Adapter for MissingAdapter {
    fn id(&self) -> BackendId {
        self.0
    }

    fn timed_interval(&self) -> &'static str {
        "never runs"
    }

    async fn probe(&self) -> AdapterResult<()> {
        Err(AdapterError::Unsupported("nothing installed here".into()))
    }

    async fn prepare(&self, _spec: &CircuitSpec) -> AdapterResult<Box<dyn Executable>> {
        unreachable!("prepare after failed probe")
    }
}

/// Every trial errors immediately.
struct BrokenAdapter(BackendId);

#[async_trait]
impl Adapter for BrokenAdapter {
    fn id(&self) -> BackendId {
        self.0
    }

    fn timed_interval(&self) -> &'static str {
        "never succeeds"
    }

    async fn probe(&self) -> AdapterResult<()> {
        Ok(())
    }

    async fn prepare(&self, _spec: &CircuitSpec) -> AdapterResult<Box<dyn Executable>> {
        Err(AdapterError::Backend("simulator dumped core".into()))
    }
}

fn config(min: QubitCount, max: QubitCount, step: QubitCount) -> SweepConfig {
    SweepConfig {
        min_qubits: min,
        max_qubits: max,
        step,
        timeout: Duration::from_millis(250),
        repeats: 2,
        ..SweepConfig::default()
    }
}

#[tokio::test]
async fn timeout_truncates_a_backend_mid_sweep() {
    // Grid 2,4,6,8,10; the backend hangs from 8 qubits on.
    let adapter = SlowsDownAdapter::new(BackendId::QiskitAer, 8);
    let attempts = Arc::clone(&adapter.attempts);
    let adapters: Vec<Box<dyn Adapter>> = vec![Box::new(adapter)];

    let controller = SweepController::new(config(2, 10, 2)).unwrap();
    let table = controller.run(&adapters, &NoopObserver).await.unwrap();

    let samples = table.samples(BackendId::QiskitAer);
    assert_eq!(samples.len(), 4);
    assert!(samples[..3].iter().all(Sample::is_success));
    assert_eq!(samples[3].qubits, 8);
    assert_eq!(samples[3].failure_kind(), Some(FailureKind::Timeout));

    // Successful durations grow with circuit size.
    let durations: Vec<_> = samples[..3].iter().map(|s| s.duration().unwrap()).collect();
    assert!(durations[0] < durations[1] && durations[1] < durations[2]);

    // 10 qubits was never attempted.
    assert_eq!(*attempts.lock().unwrap(), vec![2, 4, 6, 8]);
}

#[tokio::test]
async fn missing_backend_does_not_block_the_others() {
    let adapters: Vec<Box<dyn Adapter>> = vec![
        Box::new(MissingAdapter(BackendId::Toaster)),
        Box::new(ReferenceBackend::new()),
    ];

    let controller = SweepController::new(config(1, 4, 1)).unwrap();
    let table = controller.run(&adapters, &NoopObserver).await.unwrap();

    // One immediate unsupported record for the missing backend.
    let missing = table.samples(BackendId::Toaster);
    assert_eq!(missing.len(), 1);
    assert_eq!(missing[0].qubits, 1);
    assert_eq!(missing[0].failure_kind(), Some(FailureKind::Unsupported));

    // The reference backend still swept the whole grid.
    let reference = table.samples(BackendId::Reference);
    assert_eq!(reference.len(), 4);
    assert!(reference.iter().all(Sample::is_success));
}

#[tokio::test]
async fn all_backends_failing_still_yields_a_report() {
    let adapters: Vec<Box<dyn Adapter>> = vec![
        Box::new(BrokenAdapter(BackendId::QiskitAer)),
        Box::new(MissingAdapter(BackendId::PyquilQvm)),
    ];

    let cfg = config(3, 6, 1);
    let controller = SweepController::new(cfg.clone()).unwrap();
    let table = controller.run(&adapters, &NoopObserver).await.unwrap();

    assert_eq!(table.success_count(), 0);
    assert_eq!(table.len(), 2);

    let intervals: Vec<_> = adapters
        .iter()
        .map(|a| (a.id(), a.timed_interval()))
        .collect();
    let document = aggregate(&table, &cfg, &intervals);

    let dir = tempfile::tempdir().unwrap();
    let report = write_report(dir.path(), &document).unwrap();

    // All three artifacts exist; the plot is the placeholder frame.
    assert!(dir.path().join(TABLE_FILE).exists());
    assert!(dir.path().join(CSV_FILE).exists());
    let plot = std::fs::read_to_string(report.plot_path.unwrap()).unwrap();
    assert!(plot.contains("no successful samples"));

    // Failure rows survive into the serialized table with their kinds.
    let json = std::fs::read_to_string(dir.path().join(TABLE_FILE)).unwrap();
    assert!(json.contains("\"error\""));
    assert!(json.contains("\"unsupported\""));
    assert!(json.contains("simulator dumped core"));
}

#[tokio::test]
async fn full_pipeline_with_the_reference_backend() {
    let adapters: Vec<Box<dyn Adapter>> = vec![Box::new(ReferenceBackend::new())];

    let cfg = config(1, 6, 1);
    let controller = SweepController::new(cfg.clone()).unwrap();
    let table = controller.run(&adapters, &NoopObserver).await.unwrap();

    assert_eq!(table.success_count(), 6);

    let intervals: Vec<_> = adapters
        .iter()
        .map(|a| (a.id(), a.timed_interval()))
        .collect();
    let document = aggregate(&table, &cfg, &intervals);
    assert_eq!(document.series.len(), 1);
    assert!(document.series[0].timed_interval.contains("statevector"));

    let dir = tempfile::tempdir().unwrap();
    let report = write_report(dir.path(), &document).unwrap();
    let plot = std::fs::read_to_string(dir.path().join(PLOT_FILE)).unwrap();
    assert!(plot.contains("<polyline"));
    assert!(plot.contains("Reference"));
    assert!(report.plot_path.is_some());
}
