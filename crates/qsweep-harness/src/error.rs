//! Harness error types.

use std::path::PathBuf;

use qsweep_hal::BackendId;
use qsweep_ir::QubitCount;
use thiserror::Error;

/// Faults that abort the harness itself.
///
/// Backend trouble never shows up here: a backend that fails, times out or
/// is missing becomes a recorded [`Sample`](crate::Sample) and the sweep
/// moves on.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HarnessError {
    /// The sweep configuration is unusable.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The sweep was started with no backends at all.
    #[error("No backends selected")]
    NoBackends,

    /// A sample would overwrite or reorder an already recorded entry.
    #[error("Sample for {backend} at {qubits} qubits breaks write-once ordering")]
    DuplicateSample {
        backend: BackendId,
        qubits: QubitCount,
    },

    /// Circuit construction failed.
    #[error(transparent)]
    Circuit(#[from] qsweep_ir::IrError),

    /// The report document could not be serialized.
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// An artifact could not be written.
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The plot could not be produced.
    ///
    /// Callers downgrade this to a warning: the raw table always outlives
    /// a broken plot.
    #[error("Failed to render plot: {0}")]
    Render(String),
}

/// Convenience alias used throughout the harness.
pub type HarnessResult<T> = Result<T, HarnessError>;
