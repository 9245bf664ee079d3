//! Gate applications in a benchmark circuit.

use crate::qubit::{ClbitId, QubitId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single operation in a circuit, in application order.
///
/// The variant set is exactly what the QFT builder emits; there is no DAG,
/// just a flat sequence. The serialized form is the interchange document
/// consumed by backend drivers, e.g.
/// `{"op":"cphase","theta":0.7853981633974483,"control":2,"target":0}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum Op {
    /// Hadamard on one qubit.
    H {
        /// Target qubit.
        target: QubitId,
    },
    /// Controlled phase rotation by `theta` radians.
    CPhase {
        /// Rotation angle in radians.
        theta: f64,
        /// Control qubit.
        control: QubitId,
        /// Target qubit.
        target: QubitId,
    },
    /// Exchange the states of two qubits.
    Swap {
        /// First qubit.
        a: QubitId,
        /// Second qubit.
        b: QubitId,
    },
    /// Terminal readout of one qubit into one classical bit.
    Measure {
        /// Qubit to read out.
        qubit: QubitId,
        /// Classical bit receiving the outcome.
        clbit: ClbitId,
    },
}

impl Op {
    /// Lowercase operation name, identical to the serialized `op` tag.
    pub fn name(&self) -> &'static str {
        match self {
            Op::H { .. } => "h",
            Op::CPhase { .. } => "cphase",
            Op::Swap { .. } => "swap",
            Op::Measure { .. } => "measure",
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Op::H { target } => write!(f, "h {target}"),
            Op::CPhase {
                theta,
                control,
                target,
            } => write!(f, "cphase({theta}) {control}, {target}"),
            Op::Swap { a, b } => write!(f, "swap {a}, {b}"),
            Op::Measure { qubit, clbit } => write!(f, "measure {qubit} -> {clbit}"),
        }
    }
}

/// Per-kind operation totals for a circuit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpCounts {
    /// Hadamard gates.
    pub hadamard: usize,
    /// Controlled phase rotations.
    pub cphase: usize,
    /// Swap gates.
    pub swap: usize,
    /// Measurements.
    pub measure: usize,
}

impl OpCounts {
    /// Total number of operations.
    pub fn total(&self) -> usize {
        self.hadamard + self.cphase + self.swap + self.measure
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_op_names_match_serialized_tags() {
        let ops = [
            Op::H { target: QubitId(0) },
            Op::CPhase {
                theta: PI / 2.0,
                control: QubitId(1),
                target: QubitId(0),
            },
            Op::Swap {
                a: QubitId(0),
                b: QubitId(1),
            },
            Op::Measure {
                qubit: QubitId(0),
                clbit: ClbitId(0),
            },
        ];
        for op in ops {
            let json = serde_json::to_value(op).unwrap();
            assert_eq!(json["op"], op.name());
        }
    }

    #[test]
    fn test_cphase_interchange_shape() {
        let op = Op::CPhase {
            theta: PI / 4.0,
            control: QubitId(3),
            target: QubitId(1),
        };
        let json = serde_json::to_value(op).unwrap();
        assert_eq!(json["op"], "cphase");
        assert_eq!(json["control"], 3);
        assert_eq!(json["target"], 1);
        assert!((json["theta"].as_f64().unwrap() - PI / 4.0).abs() < 1e-15);
    }

    #[test]
    fn test_op_display() {
        let op = Op::Measure {
            qubit: QubitId(2),
            clbit: ClbitId(2),
        };
        assert_eq!(format!("{op}"), "measure q2 -> c2");
    }

    #[test]
    fn test_op_counts_total() {
        let counts = OpCounts {
            hadamard: 4,
            cphase: 6,
            swap: 2,
            measure: 4,
        };
        assert_eq!(counts.total(), 16);
    }
}
