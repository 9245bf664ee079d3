//! quantum-circuit JSON emission.
//!
//! qubit-toaster consumes the exchange format of Quantastica's
//! quantum-circuit library: a program is a list of columns with one cell
//! per wire, and a multi-qubit gate repeats its descriptor on every wire it
//! touches, distinguished by a `connector` index. The emitter packs one
//! operation per column; that is not the densest packing, but it is valid
//! and keeps the translation trivially deterministic.

use serde_json::{Value, json};

use qsweep_ir::{CircuitSpec, Op};

/// Emit the toaster circuit document for one trial.
pub fn emit(spec: &CircuitSpec) -> Value {
    let wires = spec.num_qubits() as usize;
    let mut cols: Vec<Value> = Vec::with_capacity(spec.len());

    for op in spec.ops() {
        let mut col = vec![Value::Null; wires];
        match *op {
            Op::H { target } => {
                col[target.0 as usize] = json!({ "id": "h" });
            }
            Op::CPhase {
                theta,
                control,
                target,
            } => {
                col[control.0 as usize] = json!({
                    "id": "cu1",
                    "connector": 0,
                    "options": { "params": { "lambda": theta } }
                });
                col[target.0 as usize] = json!({
                    "id": "cu1",
                    "connector": 1,
                    "options": { "params": { "lambda": theta } }
                });
            }
            Op::Swap { a, b } => {
                col[a.0 as usize] = json!({ "id": "swap", "connector": 0 });
                col[b.0 as usize] = json!({ "id": "swap", "connector": 1 });
            }
            Op::Measure { qubit, clbit } => {
                col[qubit.0 as usize] = json!({
                    "id": "measure",
                    "options": { "creg": { "name": "ro", "bit": clbit.0 } }
                });
            }
        }
        cols.push(Value::Array(col));
    }

    json!({ "cols": cols })
}
