//! qsweep circuit model
//!
//! This crate provides the circuit representation shared by the benchmark
//! harness and every backend adapter. Circuits are flat, immutable gate
//! sequences; the only builder is the quantum Fourier transform, since the
//! QFT is the workload the whole harness measures.
//!
//! # Core Components
//!
//! - **Addressing**: [`QubitId`], [`ClbitId`], and the [`QubitCount`] alias
//! - **Operations**: [`Op`] (Hadamard, controlled phase, swap, measure) and
//!   per-kind totals via [`OpCounts`]
//! - **Circuits**: [`CircuitSpec`] with the [`CircuitSpec::qft`] builder
//!
//! The serde form of a [`CircuitSpec`] doubles as the interchange document
//! that subprocess-based backends consume, so adapters never rebuild the
//! circuit themselves.
//!
//! # Example
//!
//! ```rust
//! use qsweep_ir::CircuitSpec;
//!
//! let spec = CircuitSpec::qft(4).unwrap();
//! assert_eq!(spec.num_qubits(), 4);
//!
//! // n Hadamards, n(n-1)/2 rotations, n/2 swaps, n measurements.
//! let counts = spec.op_counts();
//! assert_eq!(counts.hadamard, 4);
//! assert_eq!(counts.cphase, 6);
//! assert_eq!(counts.swap, 2);
//! assert_eq!(counts.measure, 4);
//! ```

pub mod circuit;
pub mod error;
pub mod op;
pub mod qubit;

pub use circuit::CircuitSpec;
pub use error::{IrError, IrResult};
pub use op::{Op, OpCounts};
pub use qubit::{ClbitId, QubitCount, QubitId};
