//! Immutable circuit specification and the QFT builder.

use crate::error::{IrError, IrResult};
use crate::op::{Op, OpCounts};
use crate::qubit::{ClbitId, QubitCount, QubitId};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// The gate sequence for one benchmark trial.
///
/// A spec is immutable once built, so the sweep controller can hand the same
/// value to every backend adapter. Serializing a spec yields the driver
/// interchange document: `{"num_qubits": 4, "ops": [...]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircuitSpec {
    num_qubits: QubitCount,
    ops: Vec<Op>,
}

impl CircuitSpec {
    /// Build the quantum Fourier transform over `n` qubits.
    ///
    /// For each qubit `i` (most significant first): a Hadamard, then one
    /// controlled phase rotation from every later qubit `j` with angle
    /// `PI / 2^(j - i)`. A swap network then reverses the qubit order, and
    /// every qubit is measured so backends perform a real sampled run
    /// rather than a bare unitary evolution.
    ///
    /// The result is a pure function of `n`: two calls compare equal.
    pub fn qft(n: QubitCount) -> IrResult<Self> {
        if n < 1 {
            return Err(IrError::InvalidQubitCount { got: n });
        }

        let size = n as usize;
        let mut ops = Vec::with_capacity(2 * size + size * (size - 1) / 2 + size / 2);

        for i in 0..n {
            ops.push(Op::H { target: QubitId(i) });
            for j in (i + 1)..n {
                let k = j - i;
                // 2^k is exact in f64 for any distance that fits a circuit.
                let theta = PI / 2f64.powi(k as i32);
                ops.push(Op::CPhase {
                    theta,
                    control: QubitId(j),
                    target: QubitId(i),
                });
            }
        }

        // Bit-reversal swap network.
        for i in 0..n / 2 {
            ops.push(Op::Swap {
                a: QubitId(i),
                b: QubitId(n - 1 - i),
            });
        }

        for q in 0..n {
            ops.push(Op::Measure {
                qubit: QubitId(q),
                clbit: ClbitId(q),
            });
        }

        Ok(Self { num_qubits: n, ops })
    }

    /// Number of qubits the circuit addresses.
    pub fn num_qubits(&self) -> QubitCount {
        self.num_qubits
    }

    /// Operations in application order.
    pub fn ops(&self) -> &[Op] {
        &self.ops
    }

    /// Total operation count.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// True when the circuit holds no operations.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Count the operations by kind.
    pub fn op_counts(&self) -> OpCounts {
        let mut counts = OpCounts::default();
        for op in &self.ops {
            match op {
                Op::H { .. } => counts.hadamard += 1,
                Op::CPhase { .. } => counts.cphase += 1,
                Op::Swap { .. } => counts.swap += 1,
                Op::Measure { .. } => counts.measure += 1,
            }
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qft_rejects_zero_qubits() {
        let err = CircuitSpec::qft(0).unwrap_err();
        assert!(matches!(err, IrError::InvalidQubitCount { got: 0 }));
    }

    #[test]
    fn test_qft_single_qubit() {
        let spec = CircuitSpec::qft(1).unwrap();
        assert_eq!(
            spec.ops(),
            &[
                Op::H { target: QubitId(0) },
                Op::Measure {
                    qubit: QubitId(0),
                    clbit: ClbitId(0),
                },
            ]
        );
    }

    #[test]
    fn test_qft_gate_counts() {
        for n in 1..=12u32 {
            let spec = CircuitSpec::qft(n).unwrap();
            let counts = spec.op_counts();
            let size = n as usize;
            assert_eq!(counts.hadamard, size, "hadamard count for n={n}");
            assert_eq!(counts.cphase, size * (size - 1) / 2, "cphase count for n={n}");
            assert_eq!(counts.swap, size / 2, "swap count for n={n}");
            assert_eq!(counts.measure, size, "measure count for n={n}");
            assert_eq!(counts.total(), spec.len());
        }
    }

    #[test]
    fn test_qft_three_qubit_sequence() {
        let spec = CircuitSpec::qft(3).unwrap();
        let expected = [
            Op::H { target: QubitId(0) },
            Op::CPhase {
                theta: PI / 2.0,
                control: QubitId(1),
                target: QubitId(0),
            },
            Op::CPhase {
                theta: PI / 4.0,
                control: QubitId(2),
                target: QubitId(0),
            },
            Op::H { target: QubitId(1) },
            Op::CPhase {
                theta: PI / 2.0,
                control: QubitId(2),
                target: QubitId(1),
            },
            Op::H { target: QubitId(2) },
            Op::Swap {
                a: QubitId(0),
                b: QubitId(2),
            },
            Op::Measure {
                qubit: QubitId(0),
                clbit: ClbitId(0),
            },
            Op::Measure {
                qubit: QubitId(1),
                clbit: ClbitId(1),
            },
            Op::Measure {
                qubit: QubitId(2),
                clbit: ClbitId(2),
            },
        ];
        assert_eq!(spec.ops(), &expected);
    }

    #[test]
    fn test_qft_is_deterministic() {
        assert_eq!(CircuitSpec::qft(8).unwrap(), CircuitSpec::qft(8).unwrap());
    }

    #[test]
    fn test_interchange_document_shape() {
        let spec = CircuitSpec::qft(2).unwrap();
        let json = serde_json::to_value(&spec).unwrap();
        assert_eq!(json["num_qubits"], 2);
        assert_eq!(json["ops"][0]["op"], "h");
        assert_eq!(json["ops"][0]["target"], 0);
        let back: CircuitSpec = serde_json::from_value(json).unwrap();
        assert_eq!(back, spec);
    }

    #[test]
    fn test_cphase_angle_halves_with_distance() {
        let spec = CircuitSpec::qft(6).unwrap();
        for op in spec.ops() {
            if let Op::CPhase {
                theta,
                control,
                target,
            } = op
            {
                let distance = control.0 - target.0;
                let expected = PI / 2f64.powi(distance as i32);
                assert_eq!(*theta, expected);
            }
        }
    }
}
