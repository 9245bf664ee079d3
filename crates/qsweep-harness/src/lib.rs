//! qsweep benchmark harness
//!
//! The harness sweeps every configured backend over QFT circuits of
//! strictly increasing qubit count, times each trial under a per-trial
//! timeout and turns the outcome into a report. A backend's first failure
//! ends its progression; nothing a backend does can abort the sweep.
//!
//! # Core Components
//!
//! - **Configuration**: [`SweepConfig`] (grid, timeout, repeats, output)
//! - **Timed runner**: [`run_trial`] owns the wall clock around each
//!   `execute` and converts every adapter fault into a [`Sample`]
//! - **Controller**: [`SweepController`] drives the grid sequentially,
//!   one Running→Stopped state machine per backend
//! - **Results**: [`ResultTable`] (write-once, strictly increasing per
//!   backend), aggregated by [`aggregate`] into a [`SerializedTable`]
//! - **Artifacts**: [`write_report`] writes `results.json`, `results.csv`
//!   and the SVG plot atomically; a broken plot never costs the tables
//!
//! # Example
//!
//! ```rust,no_run
//! use qsweep_harness::{aggregate, write_report, NoopObserver, SweepConfig, SweepController};
//! use qsweep_hal::Adapter;
//!
//! # async fn demo(adapters: Vec<Box<dyn Adapter>>) -> anyhow::Result<()> {
//! let config = SweepConfig::default();
//! let intervals: Vec<_> = adapters
//!     .iter()
//!     .map(|a| (a.id(), a.timed_interval()))
//!     .collect();
//!
//! let controller = SweepController::new(config.clone())?;
//! let table = controller.run(&adapters, &NoopObserver).await?;
//!
//! let document = aggregate(&table, &config, &intervals);
//! let report = write_report(&config.output_dir, &document)?;
//! println!("results in {}", report.dir.display());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod controller;
pub mod error;
pub mod observer;
pub mod render;
pub mod report;
pub mod runner;
pub mod sample;
pub mod table;

pub use config::{REPEAT_CEILING, SweepConfig};
pub use controller::SweepController;
pub use error::{HarnessError, HarnessResult};
pub use observer::{NoopObserver, SweepObserver};
pub use render::render_svg;
pub use report::{
    aggregate, to_csv, write_report, BackendSeries, ConfigSnapshot, Report, Row, SerializedTable,
    CSV_FILE, PLOT_FILE, SCHEMA_VERSION, TABLE_FILE,
};
pub use runner::run_trial;
pub use sample::{FailureKind, Outcome, Sample};
pub use table::ResultTable;
