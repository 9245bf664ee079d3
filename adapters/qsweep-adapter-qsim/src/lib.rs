//! Cirq/qsim backend.
//!
//! Same warm-driver arrangement as the Qiskit adapter: the Python driver
//! imports cirq, builds the circuit once and answers RUN commands with
//! fresh single-shot executions. qsimcirq is used when importable, which
//! the driver reports on its READY line so the log shows which engine a
//! series actually measured.

pub mod backend;

pub use backend::QsimBackend;
