//! Statevector simulation engine.

use num_complex::Complex64;
use std::sync::atomic::{AtomicBool, Ordering};

use qsweep_ir::Op;

/// A dense statevector over 2^n amplitudes.
pub struct Statevector {
    /// The state amplitudes (2^n complex numbers).
    amplitudes: Vec<Complex64>,
    /// Number of qubits.
    num_qubits: usize,
}

impl Statevector {
    /// Create a new statevector initialized to |0...0⟩.
    pub fn new(num_qubits: usize) -> Self {
        let size = 1 << num_qubits;
        let mut amplitudes = vec![Complex64::new(0.0, 0.0); size];
        amplitudes[0] = Complex64::new(1.0, 0.0);
        Self {
            amplitudes,
            num_qubits,
        }
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Apply one operation to the statevector.
    ///
    /// Measurements do not modify the state; readout happens once at the
    /// end of a shot via [`Statevector::sample`].
    pub fn apply(&mut self, op: &Op) {
        match *op {
            Op::H { target } => self.apply_h(target.0 as usize),
            Op::CPhase {
                theta,
                control,
                target,
            } => self.apply_cphase(control.0 as usize, target.0 as usize, theta),
            Op::Swap { a, b } => self.apply_swap(a.0 as usize, b.0 as usize),
            Op::Measure { .. } => {}
        }
    }

    /// Apply every operation in order, checking `cancel` between ops.
    ///
    /// Returns `false` when the flag was raised and the run abandoned. The
    /// per-op check keeps an abandoned trial's thread from grinding through
    /// the rest of a large circuit.
    pub fn run(&mut self, ops: &[Op], cancel: &AtomicBool) -> bool {
        for op in ops {
            if cancel.load(Ordering::Relaxed) {
                return false;
            }
            self.apply(op);
        }
        true
    }

    fn apply_h(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        let sqrt2_inv = 1.0 / 2.0_f64.sqrt();
        for i in 0..(1 << self.num_qubits) {
            if i & mask == 0 {
                let j = i | mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = sqrt2_inv * (a + b);
                self.amplitudes[j] = sqrt2_inv * (a - b);
            }
        }
    }

    fn apply_cphase(&mut self, control: usize, target: usize, theta: f64) {
        let ctrl_mask = 1 << control;
        let tgt_mask = 1 << target;
        let phase = Complex64::from_polar(1.0, theta);
        for i in 0..(1 << self.num_qubits) {
            if (i & ctrl_mask != 0) && (i & tgt_mask != 0) {
                self.amplitudes[i] *= phase;
            }
        }
    }

    fn apply_swap(&mut self, q1: usize, q2: usize) {
        let mask1 = 1 << q1;
        let mask2 = 1 << q2;
        for i in 0..(1 << self.num_qubits) {
            let b1 = (i & mask1) != 0;
            let b2 = (i & mask2) != 0;
            if b1 && !b2 {
                let j = (i & !mask1) | mask2;
                self.amplitudes.swap(i, j);
            }
        }
    }

    /// Sample a measurement outcome in the computational basis.
    pub fn sample(&self) -> usize {
        use rand::Rng;
        let mut rng = rand::thread_rng();
        let r: f64 = rng.r#gen();

        let mut cumulative = 0.0;
        for (i, amp) in self.amplitudes.iter().enumerate() {
            cumulative += amp.norm_sqr();
            if r < cumulative {
                return i;
            }
        }

        // Fallback (shouldn't happen with normalized states)
        self.amplitudes.len() - 1
    }

    /// Convert a measurement outcome to a bitstring, qubit 0 first.
    pub fn outcome_to_bitstring(&self, outcome: usize) -> String {
        format!("{:0width$b}", outcome, width = self.num_qubits)
            .chars()
            .rev()
            .collect()
    }
}
