//! Sweep configuration.

use std::path::PathBuf;
use std::time::Duration;

use qsweep_ir::QubitCount;

use crate::error::{HarnessError, HarnessResult};

/// Largest circuit that still gets averaged over multiple repeats.
///
/// Above this size a single execution is slow enough to be representative
/// on its own, and repeating it would multiply sweep time for no gain.
pub const REPEAT_CEILING: QubitCount = 20;

/// Grid and budgets for one sweep.
#[derive(Debug, Clone)]
pub struct SweepConfig {
    /// First qubit count on the grid.
    pub min_qubits: QubitCount,
    /// Last qubit count on the grid (inclusive).
    pub max_qubits: QubitCount,
    /// Grid stride.
    pub step: QubitCount,
    /// Wall-clock budget for preparation and for each execution.
    pub timeout: Duration,
    /// Repeats per trial for circuits up to [`REPEAT_CEILING`] qubits.
    pub repeats: u32,
    /// Directory the report lands in.
    pub output_dir: PathBuf,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            min_qubits: 1,
            max_qubits: 25,
            step: 1,
            timeout: Duration::from_secs(300),
            repeats: 4,
            output_dir: PathBuf::from("qsweep-results"),
        }
    }
}

impl SweepConfig {
    /// Reject grids that cannot produce a meaningful sweep.
    pub fn validate(&self) -> HarnessResult<()> {
        if self.min_qubits < 1 {
            return Err(HarnessError::InvalidConfig(
                "min_qubits must be at least 1".into(),
            ));
        }
        if self.max_qubits < self.min_qubits {
            return Err(HarnessError::InvalidConfig(format!(
                "max_qubits {} is below min_qubits {}",
                self.max_qubits, self.min_qubits
            )));
        }
        if self.step < 1 {
            return Err(HarnessError::InvalidConfig("step must be at least 1".into()));
        }
        if self.repeats < 1 {
            return Err(HarnessError::InvalidConfig(
                "repeats must be at least 1".into(),
            ));
        }
        if self.timeout.is_zero() {
            return Err(HarnessError::InvalidConfig("timeout must be nonzero".into()));
        }
        Ok(())
    }

    /// Qubit counts the sweep visits, in ascending order.
    pub fn qubit_counts(&self) -> impl Iterator<Item = QubitCount> + '_ {
        (self.min_qubits..=self.max_qubits).step_by(self.step as usize)
    }

    /// Repeats to run at a given size.
    pub fn effective_repeats(&self, qubits: QubitCount) -> u32 {
        if qubits <= REPEAT_CEILING { self.repeats } else { 1 }
    }
}
