//! qsweep backend abstraction
//!
//! Every simulator the harness can time sits behind the [`Adapter`] trait:
//! a probe for availability, an untimed [`Adapter::prepare`] step that
//! translates the circuit and stands the backend up, and an
//! [`Executable::execute`] step covering exactly the interval being
//! measured. The sweep runner owns the clock; adapters describe what their
//! interval means via [`Adapter::timed_interval`].
//!
//! # Core Components
//!
//! - **Identity**: [`BackendId`] names each backend stably across the
//!   result table, the CLI and the plot
//! - **Lifecycle**: [`Adapter`] and [`Executable`]
//! - **Subprocess drivers**: [`PyDriver`] keeps a warm interpreter per
//!   trial for Python-hosted simulators; [`probe_command`] checks binaries
//! - **Errors**: [`AdapterError`], with absence always reported as
//!   [`AdapterError::Unsupported`]

pub mod adapter;
pub mod backend_id;
pub mod driver;
pub mod error;

pub use adapter::{Adapter, Executable, PROBE_TIMEOUT, TRIAL_SHOTS};
pub use backend_id::BackendId;
pub use driver::{probe_command, python_program, PyDriver, PYTHON_ENV, READY_TIMEOUT};
pub use error::{AdapterError, AdapterResult};
