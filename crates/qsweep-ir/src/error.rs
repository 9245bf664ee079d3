//! Error types for the circuit model.

use thiserror::Error;

/// Errors that can occur while building a circuit.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// The requested circuit width is below the smallest buildable size.
    #[error("QFT requires at least 1 qubit, got {got}")]
    InvalidQubitCount {
        /// The rejected qubit count.
        got: u32,
    },
}

/// Result type for circuit-model operations.
pub type IrResult<T> = Result<T, IrError>;
