//! Append-only result table.

use std::collections::BTreeMap;

use qsweep_hal::BackendId;

use crate::error::{HarnessError, HarnessResult};
use crate::sample::Sample;

/// Sweep results keyed by backend.
///
/// The table enforces the write-once discipline: per backend the qubit
/// counts strictly increase and no (backend, qubits) key is recorded twice.
/// Iteration order is the canonical backend order, so serialization is
/// stable across runs of the same sweep.
#[derive(Debug, Default, Clone)]
pub struct ResultTable {
    entries: BTreeMap<BackendId, Vec<Sample>>,
}

impl ResultTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one sample.
    pub fn record(&mut self, sample: Sample) -> HarnessResult<()> {
        let samples = self.entries.entry(sample.backend).or_default();
        if let Some(last) = samples.last() {
            if sample.qubits <= last.qubits {
                return Err(HarnessError::DuplicateSample {
                    backend: sample.backend,
                    qubits: sample.qubits,
                });
            }
        }
        samples.push(sample);
        Ok(())
    }

    /// Backends present, in canonical order.
    pub fn backends(&self) -> impl Iterator<Item = BackendId> + '_ {
        self.entries.keys().copied()
    }

    /// Samples for one backend, in ascending qubit order.
    pub fn samples(&self, backend: BackendId) -> &[Sample] {
        self.entries.get(&backend).map_or(&[], Vec::as_slice)
    }

    /// Every sample, grouped by backend.
    pub fn iter(&self) -> impl Iterator<Item = &Sample> {
        self.entries.values().flatten()
    }

    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.values().all(Vec::is_empty)
    }

    /// Successful samples across every backend.
    pub fn success_count(&self) -> usize {
        self.iter().filter(|s| s.is_success()).count()
    }
}
