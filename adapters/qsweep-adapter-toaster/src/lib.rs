//! Quantastica qubit-toaster backend.
//!
//! The toaster is a native binary with no daemon or warm mode, so every
//! execution pays the whole process lifecycle. Its series is still useful
//! for scaling shape, and the interval description shipped with the
//! results spells out what the numbers include. Circuits travel as
//! quantum-circuit JSON written to a scratch directory, one file per
//! trial.

pub mod backend;
pub mod format;

pub use backend::{DEFAULT_BIN, TOASTER_BIN_ENV, ToasterBackend};
