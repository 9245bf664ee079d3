//! Report document, serialization and artifact writing.
//!
//! The serialized table is the run's durable output: schema-versioned
//! JSON with run metadata, a config snapshot and one series per backend.
//! Failed rows are preserved with their kind so a series' truncation point
//! stays visible downstream. The plot is derived from this document, never
//! from the live table.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use qsweep_hal::BackendId;
use qsweep_ir::QubitCount;

use crate::config::SweepConfig;
use crate::error::{HarnessError, HarnessResult};
use crate::render::render_svg;
use crate::sample::Outcome;
use crate::table::ResultTable;

/// Version of the report document layout.
pub const SCHEMA_VERSION: u32 = 1;

/// File names inside the output directory.
pub const TABLE_FILE: &str = "results.json";
pub const CSV_FILE: &str = "results.csv";
pub const PLOT_FILE: &str = "benchmark_qft.svg";

/// Caveat shipped inside every report.
const COMPARABILITY_NOTE: &str = "per-series timed intervals differ (warm interpreter vs \
     whole process vs HTTP round-trip); compare scaling shapes, not absolute times";

/// The configuration a table was produced under.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigSnapshot {
    pub min_qubits: QubitCount,
    pub max_qubits: QubitCount,
    pub step: QubitCount,
    pub timeout_secs: u64,
    pub repeats: u32,
}

impl From<&SweepConfig> for ConfigSnapshot {
    fn from(config: &SweepConfig) -> Self {
        Self {
            min_qubits: config.min_qubits,
            max_qubits: config.max_qubits,
            step: config.step,
            timeout_secs: config.timeout.as_secs(),
            repeats: config.repeats,
        }
    }
}

/// One (backend, qubit count) row of the report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Row {
    pub qubits: QubitCount,
    /// `success`, `timeout`, `error` or `unsupported`.
    pub outcome: String,
    /// Mean wall-clock time; present only on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<f64>,
    /// Repeats the mean covers; present only on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repeats: Option<u32>,
    /// Diagnostic; present only on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// One backend's rows, ascending by qubit count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendSeries {
    pub backend: BackendId,
    /// Legend label for the plot.
    pub label: String,
    /// What this backend's wall-clock interval covers.
    pub timed_interval: String,
    pub rows: Vec<Row>,
}

/// The complete report document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SerializedTable {
    pub schema_version: u32,
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub comparability: String,
    pub config: ConfigSnapshot,
    /// Series in canonical backend order.
    pub series: Vec<BackendSeries>,
}

/// Where the artifacts of one run landed.
#[derive(Debug, Clone)]
pub struct Report {
    pub dir: PathBuf,
    pub table_path: PathBuf,
    pub csv_path: PathBuf,
    /// Absent when rendering failed; the table artifacts still exist.
    pub plot_path: Option<PathBuf>,
}

/// Build the report document from a finished sweep.
///
/// `intervals` carries each adapter's timed-interval statement; backends
/// the sweep never configured simply do not appear. Every sample survives
/// aggregation, failures included.
pub fn aggregate(
    table: &ResultTable,
    config: &SweepConfig,
    intervals: &[(BackendId, &'static str)],
) -> SerializedTable {
    let intervals: FxHashMap<BackendId, &str> = intervals.iter().copied().collect();

    let series = table
        .backends()
        .map(|backend| BackendSeries {
            backend,
            label: backend.display_name().to_string(),
            timed_interval: intervals.get(&backend).copied().unwrap_or("").to_string(),
            rows: table
                .samples(backend)
                .iter()
                .map(|sample| match &sample.outcome {
                    Outcome::Success { duration, repeats } => Row {
                        qubits: sample.qubits,
                        outcome: "success".to_string(),
                        duration_ms: Some(duration.as_secs_f64() * 1_000.0),
                        repeats: Some(*repeats),
                        message: None,
                    },
                    Outcome::Failure { kind, message } => Row {
                        qubits: sample.qubits,
                        outcome: kind.to_string(),
                        duration_ms: None,
                        repeats: None,
                        message: Some(message.clone()),
                    },
                })
                .collect(),
        })
        .collect();

    SerializedTable {
        schema_version: SCHEMA_VERSION,
        run_id: Uuid::new_v4(),
        generated_at: Utc::now(),
        comparability: COMPARABILITY_NOTE.to_string(),
        config: ConfigSnapshot::from(config),
        series,
    }
}

/// Flatten the report into CSV, one row per (backend, qubit count).
pub fn to_csv(table: &SerializedTable) -> String {
    let mut csv = String::from("backend,qubits,outcome,duration_ms,repeats,message\n");
    for series in &table.series {
        for row in &series.rows {
            let duration = row
                .duration_ms
                .map(|ms| format!("{ms:.3}"))
                .unwrap_or_default();
            let repeats = row.repeats.map(|r| r.to_string()).unwrap_or_default();
            let message = csv_field(row.message.as_deref().unwrap_or(""));
            csv.push_str(&format!(
                "{},{},{},{},{},{}\n",
                series.backend, row.qubits, row.outcome, duration, repeats, message
            ));
        }
    }
    csv
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Write the report atomically into `dir`.
///
/// The JSON and CSV tables go first, each written next to its final name
/// and renamed into place so a crashed run never leaves a half-written
/// artifact under the real name. Only then is the plot attempted; a render
/// or plot-write failure is downgraded to a warning because the raw tables
/// are already safe on disk.
pub fn write_report(dir: &Path, table: &SerializedTable) -> HarnessResult<Report> {
    std::fs::create_dir_all(dir).map_err(|source| HarnessError::Write {
        path: dir.to_path_buf(),
        source,
    })?;

    let table_path = dir.join(TABLE_FILE);
    let mut json = serde_json::to_string_pretty(table)?;
    json.push('\n');
    write_atomic(&table_path, json.as_bytes())?;

    let csv_path = dir.join(CSV_FILE);
    write_atomic(&csv_path, to_csv(table).as_bytes())?;

    let plot_path = dir.join(PLOT_FILE);
    let plot_path = match render_svg(table).and_then(|svg| {
        write_atomic(&plot_path, svg.as_bytes()).map(|()| plot_path.clone())
    }) {
        Ok(path) => Some(path),
        Err(err) => {
            warn!(error = %err, "plot skipped; table artifacts are intact");
            None
        }
    };

    Ok(Report {
        dir: dir.to_path_buf(),
        table_path,
        csv_path,
        plot_path,
    })
}

fn write_atomic(path: &Path, contents: &[u8]) -> HarnessResult<()> {
    let mut tmp_name = path.as_os_str().to_os_string();
    tmp_name.push(".tmp");
    let tmp = PathBuf::from(tmp_name);
    let write = |p: &Path, e: std::io::Error| HarnessError::Write {
        path: p.to_path_buf(),
        source: e,
    };
    if let Err(e) = std::fs::write(&tmp, contents) {
        let _ = std::fs::remove_file(&tmp);
        return Err(write(&tmp, e));
    }
    std::fs::rename(&tmp, path).map_err(|e| {
        // A failed rename must not strand the temporary next to the
        // artifact it never became.
        let _ = std::fs::remove_file(&tmp);
        write(path, e)
    })
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::sample::{FailureKind, Sample};

    fn sample_table() -> ResultTable {
        let mut table = ResultTable::new();
        table
            .record(Sample::success(
                BackendId::Reference,
                2,
                Duration::from_millis(3),
                4,
            ))
            .unwrap();
        table
            .record(Sample::success(
                BackendId::Reference,
                4,
                Duration::from_millis(9),
                4,
            ))
            .unwrap();
        table
            .record(Sample::failure(
                BackendId::Reference,
                6,
                FailureKind::Timeout,
                "execution exceeded 300s",
            ))
            .unwrap();
        table
            .record(Sample::failure(
                BackendId::QiskitAer,
                2,
                FailureKind::Unsupported,
                "python3 not runnable",
            ))
            .unwrap();
        table
    }

    fn doc() -> SerializedTable {
        aggregate(
            &sample_table(),
            &SweepConfig::default(),
            &[
                (BackendId::Reference, "in-process"),
                (BackendId::QiskitAer, "warm interpreter"),
            ],
        )
    }

    #[test]
    fn test_aggregate_keeps_failures_and_order() {
        let doc = doc();
        assert_eq!(doc.schema_version, SCHEMA_VERSION);
        assert_eq!(doc.series.len(), 2);
        // Canonical backend order: qiskit before reference.
        assert_eq!(doc.series[0].backend, BackendId::QiskitAer);
        assert_eq!(doc.series[1].backend, BackendId::Reference);

        let reference = &doc.series[1];
        assert_eq!(reference.timed_interval, "in-process");
        let qubits: Vec<_> = reference.rows.iter().map(|r| r.qubits).collect();
        assert_eq!(qubits, vec![2, 4, 6]);
        assert_eq!(reference.rows[2].outcome, "timeout");
        assert_eq!(reference.rows[2].duration_ms, None);
        assert!(reference.rows[2].message.is_some());
    }

    #[test]
    fn test_csv_shape() {
        let csv = to_csv(&doc());
        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(
            lines[0],
            "backend,qubits,outcome,duration_ms,repeats,message"
        );
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[1], "qiskit,2,unsupported,,,python3 not runnable");
        assert_eq!(lines[2], "reference,2,success,3.000,4,");
    }

    #[test]
    fn test_csv_quotes_awkward_messages() {
        assert_eq!(csv_field("plain"), "plain");
        assert_eq!(csv_field("a,b"), "\"a,b\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_write_report_produces_all_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let report = write_report(dir.path(), &doc()).unwrap();

        assert!(report.table_path.exists());
        assert!(report.csv_path.exists());
        assert!(report.plot_path.as_ref().unwrap().exists());
        // No stale temporaries left behind.
        assert!(!dir.path().join("results.json.tmp").exists());
        assert!(!dir.path().join("results.csv.tmp").exists());

        let raw = std::fs::read_to_string(&report.table_path).unwrap();
        let parsed: SerializedTable = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed.series.len(), 2);
    }

    #[test]
    fn test_failed_plot_write_is_downgraded_and_leaves_no_temp() {
        let dir = tempfile::tempdir().unwrap();
        // A directory squatting on the plot name makes the final rename
        // fail while the tables still go through.
        std::fs::create_dir(dir.path().join(PLOT_FILE)).unwrap();

        let report = write_report(dir.path(), &doc()).unwrap();
        assert!(report.plot_path.is_none());
        assert!(report.table_path.exists());
        assert!(report.csv_path.exists());
        assert!(!dir.path().join("benchmark_qft.svg.tmp").exists());
    }

    #[test]
    fn test_write_report_rejects_unwritable_directory() {
        let dir = tempfile::tempdir().unwrap();
        let blocked = dir.path().join("occupied");
        std::fs::write(&blocked, b"file, not a directory").unwrap();

        let err = write_report(&blocked, &doc()).unwrap_err();
        assert!(matches!(err, HarnessError::Write { .. }));
    }
}
