//! Forest QVM backend.
//!
//! pyQuil programs ultimately execute on the QVM daemon, so the harness
//! skips the Python layer entirely and speaks the daemon's HTTP API
//! directly: Quil text in, readout bits back. What gets timed is therefore
//! the same request the pyQuil client would make, without pyQuil's own
//! overhead muddying the series.

pub mod api;
pub mod backend;
pub mod quil;

pub use backend::{DEFAULT_ENDPOINT, QVM_URL_ENV, QvmBackend};
