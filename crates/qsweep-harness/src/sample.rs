//! Per-trial outcomes.

use std::time::Duration;

use qsweep_hal::{AdapterError, BackendId};
use qsweep_ir::QubitCount;
use serde::{Deserialize, Serialize};

/// Why a trial failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailureKind {
    /// The trial exceeded the wall-clock budget.
    Timeout,
    /// The backend broke while preparing or executing.
    #[serde(rename = "error")]
    BackendError,
    /// The backend is not installed, not reachable, or refuses the size.
    Unsupported,
}

impl FailureKind {
    /// Classify an adapter error.
    ///
    /// Timeouts never reach this point; the runner detects them itself.
    pub fn from_adapter_error(err: &AdapterError) -> Self {
        match err {
            AdapterError::Unsupported(_) => FailureKind::Unsupported,
            _ => FailureKind::BackendError,
        }
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::BackendError => write!(f, "error"),
            FailureKind::Unsupported => write!(f, "unsupported"),
        }
    }
}

/// What one trial produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Outcome {
    /// Every repeat finished within the timeout.
    Success {
        /// Mean wall-clock time across the repeats.
        duration: Duration,
        /// How many repeats the mean covers.
        repeats: u32,
    },
    /// The trial failed; the backend runs nothing larger this sweep.
    Failure { kind: FailureKind, message: String },
}

/// The recorded result of running one backend at one qubit count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub backend: BackendId,
    pub qubits: QubitCount,
    pub outcome: Outcome,
}

impl Sample {
    pub fn success(
        backend: BackendId,
        qubits: QubitCount,
        duration: Duration,
        repeats: u32,
    ) -> Self {
        Self {
            backend,
            qubits,
            outcome: Outcome::Success { duration, repeats },
        }
    }

    pub fn failure(
        backend: BackendId,
        qubits: QubitCount,
        kind: FailureKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            backend,
            qubits,
            outcome: Outcome::Failure {
                kind,
                message: message.into(),
            },
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.outcome, Outcome::Success { .. })
    }

    /// Mean duration, if the trial succeeded.
    pub fn duration(&self) -> Option<Duration> {
        match self.outcome {
            Outcome::Success { duration, .. } => Some(duration),
            Outcome::Failure { .. } => None,
        }
    }

    /// Mean duration in milliseconds, if the trial succeeded.
    pub fn duration_ms(&self) -> Option<f64> {
        self.duration().map(|d| d.as_secs_f64() * 1_000.0)
    }

    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self.outcome {
            Outcome::Success { .. } => None,
            Outcome::Failure { kind, .. } => Some(kind),
        }
    }
}
