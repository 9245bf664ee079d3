//! In-process statevector backend.
//!
//! A dense statevector simulator wired straight into the harness. It needs
//! nothing installed, so a bare machine still produces a complete benchmark
//! run, and its series gives the external backends a baseline to sit next
//! to. The kernel is deliberately plain: one amplitude vector, bitmask gate
//! loops, no parallelism.

pub mod backend;
pub mod statevector;

pub use backend::{MAX_QUBITS, ReferenceBackend};
pub use statevector::Statevector;
