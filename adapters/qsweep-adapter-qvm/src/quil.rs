//! Quil text emission.

use std::fmt::Write;

use qsweep_ir::{CircuitSpec, Op};

/// Emit the Quil program for one trial, readout declared as `ro`.
///
/// Angles print in Rust's shortest round-trip form, which the QVM's float
/// parser accepts unchanged.
pub fn emit(spec: &CircuitSpec) -> String {
    let mut quil = String::new();
    let _ = writeln!(quil, "DECLARE ro BIT[{}]", spec.num_qubits());
    for op in spec.ops() {
        match *op {
            Op::H { target } => {
                let _ = writeln!(quil, "H {}", target.0);
            }
            Op::CPhase {
                theta,
                control,
                target,
            } => {
                let _ = writeln!(quil, "CPHASE({theta}) {} {}", control.0, target.0);
            }
            Op::Swap { a, b } => {
                let _ = writeln!(quil, "SWAP {} {}", a.0, b.0);
            }
            Op::Measure { qubit, clbit } => {
                let _ = writeln!(quil, "MEASURE {} ro[{}]", qubit.0, clbit.0);
            }
        }
    }
    quil
}
