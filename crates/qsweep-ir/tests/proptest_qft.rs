//! Property tests for the QFT builder.

use proptest::prelude::*;
use qsweep_ir::{CircuitSpec, Op};

proptest! {
    /// Gate counts follow the closed-form totals for every width.
    #[test]
    fn qft_gate_counts_hold(n in 1u32..=24) {
        let spec = CircuitSpec::qft(n).unwrap();
        let counts = spec.op_counts();
        let size = n as usize;
        prop_assert_eq!(counts.hadamard, size);
        prop_assert_eq!(counts.cphase, size * (size - 1) / 2);
        prop_assert_eq!(counts.swap, size / 2);
        prop_assert_eq!(counts.measure, size);
        prop_assert_eq!(counts.total(), spec.len());
    }

    /// Every operand stays inside the declared register.
    #[test]
    fn qft_operands_in_bounds(n in 1u32..=24) {
        let spec = CircuitSpec::qft(n).unwrap();
        for op in spec.ops() {
            match *op {
                Op::H { target } => prop_assert!(target.0 < n),
                Op::CPhase { control, target, theta } => {
                    prop_assert!(control.0 < n);
                    prop_assert!(target.0 < n);
                    prop_assert!(control.0 > target.0);
                    prop_assert!(theta > 0.0 && theta <= std::f64::consts::PI / 2.0);
                }
                Op::Swap { a, b } => {
                    prop_assert!(a.0 < n);
                    prop_assert!(b.0 < n);
                    prop_assert_ne!(a.0, b.0);
                }
                Op::Measure { qubit, clbit } => {
                    prop_assert!(qubit.0 < n);
                    prop_assert_eq!(qubit.0, clbit.0);
                }
            }
        }
    }

    /// Measurements come last and cover each qubit exactly once.
    #[test]
    fn qft_measures_every_qubit_last(n in 1u32..=24) {
        let spec = CircuitSpec::qft(n).unwrap();
        let size = n as usize;
        let (gates, measures) = spec.ops().split_at(spec.len() - size);
        let no_measure_gates = gates.iter().all(|op| !matches!(op, Op::Measure { .. }));
        prop_assert!(no_measure_gates);
        for (idx, op) in measures.iter().enumerate() {
            match *op {
                Op::Measure { qubit, .. } => prop_assert_eq!(qubit.0 as usize, idx),
                _ => prop_assert!(false, "tail op is not a measurement"),
            }
        }
    }
}
