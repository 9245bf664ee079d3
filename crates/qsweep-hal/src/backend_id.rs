//! Stable backend identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::AdapterError;

/// Identifies one simulator backend.
///
/// The string form is stable: it keys the result table, names the plot
/// series and is what `--backends` parses. Variant order is the canonical
/// sweep and report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BackendId {
    /// Qiskit Aer simulator, driven through a warm Python subprocess.
    #[serde(rename = "qiskit")]
    QiskitAer,
    /// Forest QVM daemon, reached over HTTP with Quil programs.
    #[serde(rename = "pyquil")]
    PyquilQvm,
    /// Quantastica qubit-toaster, a one-shot native binary.
    #[serde(rename = "toaster")]
    Toaster,
    /// Cirq simulator (qsim when installed), via a warm Python subprocess.
    #[serde(rename = "cirq-qsim")]
    CirqQsim,
    /// In-process statevector simulator; always available.
    #[serde(rename = "reference")]
    Reference,
}

impl BackendId {
    /// Every backend in canonical order.
    pub fn all() -> &'static [BackendId] {
        &[
            BackendId::QiskitAer,
            BackendId::PyquilQvm,
            BackendId::Toaster,
            BackendId::CirqQsim,
            BackendId::Reference,
        ]
    }

    /// Stable lowercase identifier, identical to the serde form.
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendId::QiskitAer => "qiskit",
            BackendId::PyquilQvm => "pyquil",
            BackendId::Toaster => "toaster",
            BackendId::CirqQsim => "cirq-qsim",
            BackendId::Reference => "reference",
        }
    }

    /// Human-facing series label used in the plot legend.
    pub fn display_name(&self) -> &'static str {
        match self {
            BackendId::QiskitAer => "Qiskit-Aer",
            BackendId::PyquilQvm => "pyQuil-QVM",
            BackendId::Toaster => "Qubit-Toaster",
            BackendId::CirqQsim => "Cirq-qsim",
            BackendId::Reference => "Reference",
        }
    }
}

impl fmt::Display for BackendId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BackendId {
    type Err = AdapterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "qiskit" | "aer" | "qiskit-aer" => Ok(BackendId::QiskitAer),
            "pyquil" | "qvm" | "pyquil-qvm" => Ok(BackendId::PyquilQvm),
            "toaster" | "qubit-toaster" => Ok(BackendId::Toaster),
            "cirq-qsim" | "cirq" | "qsim" => Ok(BackendId::CirqQsim),
            "reference" | "native" => Ok(BackendId::Reference),
            other => Err(AdapterError::UnknownBackend(other.to_string())),
        }
    }
}
