//! qsweep Command-Line Interface
//!
//! Sweeps every configured simulator backend over QFT circuits of growing
//! width, records a timing sample per (backend, qubit count) trial and
//! writes the result table plus a comparison plot. The exit code reflects
//! harness health only: a sweep that ran to completion exits 0 even when
//! every backend failed.

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

use qsweep_adapter_qiskit::QiskitBackend;
use qsweep_adapter_qsim::QsimBackend;
use qsweep_adapter_qvm::QvmBackend;
use qsweep_adapter_reference::ReferenceBackend;
use qsweep_adapter_toaster::ToasterBackend;
use qsweep_hal::{Adapter, AdapterResult, BackendId};
use qsweep_harness::{
    aggregate, write_report, Outcome, ResultTable, Sample, SweepConfig, SweepController,
    SweepObserver,
};
use qsweep_ir::QubitCount;

/// Benchmark quantum-circuit simulators on QFT circuits of growing width
#[derive(Parser)]
#[command(name = "qsweep")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// First qubit count on the grid
    #[arg(long, default_value_t = 1)]
    min_qubits: u32,

    /// Last qubit count on the grid (inclusive)
    #[arg(long, default_value_t = 25)]
    max_qubits: u32,

    /// Qubit-count increment between trials
    #[arg(long, default_value_t = 1)]
    step: u32,

    /// Per-trial timeout in seconds
    #[arg(long, env = "QSWEEP_TIMEOUT_SECS", default_value_t = 300)]
    timeout_secs: u64,

    /// Executions averaged per trial, for circuits up to 20 qubits
    #[arg(long, default_value_t = 4)]
    repeats: u32,

    /// Backends to sweep, comma separated (default: all)
    #[arg(long, value_delimiter = ',')]
    backends: Option<Vec<BackendId>>,

    /// Directory the result table and plot are written to
    #[arg(long, env = "QSWEEP_OUTPUT_DIR", default_value = "qsweep-results")]
    output_dir: PathBuf,

    /// List known backends and what their timed interval covers
    #[arg(long)]
    list_backends: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Map a backend id to its adapter.
fn build_adapter(id: BackendId) -> AdapterResult<Box<dyn Adapter>> {
    Ok(match id {
        BackendId::QiskitAer => Box::new(QiskitBackend::new()),
        BackendId::PyquilQvm => Box::new(QvmBackend::new()?),
        BackendId::Toaster => Box::new(ToasterBackend::new()),
        BackendId::CirqQsim => Box::new(QsimBackend::new()),
        BackendId::Reference => Box::new(ReferenceBackend::new()),
    })
}

/// Spinner plus one styled line per recorded sample.
struct ProgressObserver {
    bar: ProgressBar,
}

impl ProgressObserver {
    fn new() -> Self {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap(),
        );
        bar.enable_steady_tick(Duration::from_millis(100));
        Self { bar }
    }

    fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl SweepObserver for ProgressObserver {
    fn trial_started(&self, backend: BackendId, qubits: QubitCount) {
        self.bar
            .set_message(format!("{} · {qubits} qubits", backend.display_name()));
    }

    fn sample_recorded(&self, sample: &Sample) {
        let line = match &sample.outcome {
            Outcome::Success { duration, repeats } => format!(
                "{} {:<14} {:>2} qubits  {:>10.3} ms  (mean of {repeats})",
                style("✓").green().bold(),
                sample.backend.display_name(),
                sample.qubits,
                duration.as_secs_f64() * 1_000.0,
            ),
            Outcome::Failure { kind, message } => format!(
                "{} {:<14} {:>2} qubits  {kind}: {message}",
                style("✗").yellow().bold(),
                sample.backend.display_name(),
                sample.qubits,
            ),
        };
        self.bar.println(line);
    }
}

fn print_backend_list() -> anyhow::Result<()> {
    for &id in BackendId::all() {
        let adapter = build_adapter(id)?;
        println!(
            "{:<10} {}\n           {}",
            style(id).green().bold(),
            id.display_name(),
            style(adapter.timed_interval()).dim()
        );
    }
    Ok(())
}

fn print_summary(table: &ResultTable) {
    println!();
    for backend in table.backends() {
        let samples = table.samples(backend);
        let best = samples
            .iter()
            .filter(|s| s.is_success())
            .map(|s| s.qubits)
            .max();
        let stop = samples.iter().find(|s| !s.is_success());
        let status = match (best, stop) {
            (Some(best), Some(stop)) => match &stop.outcome {
                Outcome::Failure { kind, .. } => {
                    format!("reached {best} qubits, stopped by {kind} at {}", stop.qubits)
                }
                Outcome::Success { .. } => unreachable!(),
            },
            (Some(best), None) => format!("reached {best} qubits, completed the grid"),
            (None, Some(stop)) => match &stop.outcome {
                Outcome::Failure { kind, message } => format!("{kind}: {message}"),
                Outcome::Success { .. } => unreachable!(),
            },
            (None, None) => "no samples".to_string(),
        };
        println!(
            "  {:<14} {status}",
            style(backend.display_name()).cyan()
        );
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = SweepConfig {
        min_qubits: cli.min_qubits,
        max_qubits: cli.max_qubits,
        step: cli.step,
        timeout: Duration::from_secs(cli.timeout_secs),
        repeats: cli.repeats,
        output_dir: cli.output_dir,
    };

    let requested = cli
        .backends
        .unwrap_or_else(|| BackendId::all().to_vec());
    let mut ids: Vec<BackendId> = Vec::new();
    for id in requested {
        if !ids.contains(&id) {
            ids.push(id);
        }
    }

    let adapters: Vec<Box<dyn Adapter>> = ids
        .iter()
        .map(|&id| build_adapter(id))
        .collect::<AdapterResult<_>>()?;
    let intervals: Vec<_> = adapters
        .iter()
        .map(|a| (a.id(), a.timed_interval()))
        .collect();

    println!(
        "{} Sweeping {} backend(s), {}..={} qubits (step {}), timeout {}s",
        style("→").cyan().bold(),
        ids.len(),
        config.min_qubits,
        config.max_qubits,
        config.step,
        config.timeout.as_secs(),
    );

    let controller = SweepController::new(config.clone())?;
    let observer = ProgressObserver::new();
    let sweep = controller.run(&adapters, &observer).await;
    observer.finish();
    let table = sweep?;

    let document = aggregate(&table, &config, &intervals);
    let report = write_report(&config.output_dir, &document)?;

    print_summary(&table);
    println!(
        "\n  Results: {}\n  CSV:     {}",
        report.table_path.display(),
        report.csv_path.display()
    );
    match &report.plot_path {
        Some(path) => println!("  Plot:    {}", path.display()),
        None => println!(
            "  Plot:    {}",
            style("skipped (rendering failed, tables are intact)").yellow()
        ),
    }

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    let result = if cli.list_backends {
        print_backend_list()
    } else {
        run(cli).await
    };

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
