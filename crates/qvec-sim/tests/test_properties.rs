//! Property-based tests for gate application.

use proptest::prelude::*;
use qvec_ir::{GateKind, ProgramBuilder, QubitId, build_circuit};
use qvec_sim::{NORM_TOLERANCE, Simulator};

/// Gate applications that can be appended to a builder.
#[derive(Debug, Clone)]
enum GateOp {
    Single(GateKind, u32),
    Two(GateKind, u32, u32),
}

impl GateOp {
    fn apply(self, builder: &mut ProgramBuilder) {
        match self {
            GateOp::Single(kind, q) => {
                builder.append_gate(kind, &[QubitId(q)]).unwrap();
            }
            GateOp::Two(kind, a, b) => {
                builder.append_gate(kind, &[QubitId(a), QubitId(b)]).unwrap();
            }
        }
    }
}

fn single_gates() -> Vec<GateKind> {
    GateKind::ALL
        .into_iter()
        .filter(|g| g.num_qubits() == 1)
        .collect()
}

fn two_qubit_gates() -> Vec<GateKind> {
    GateKind::ALL
        .into_iter()
        .filter(|g| g.num_qubits() == 2)
        .collect()
}

/// Generate a random gate operation for a program with given number of qubits.
fn arb_gate_op(num_qubits: u32) -> impl Strategy<Value = GateOp> {
    let single = (prop::sample::select(single_gates()), 0..num_qubits)
        .prop_map(|(g, q)| GateOp::Single(g, q));
    let two = (
        prop::sample::select(two_qubit_gates()),
        0..num_qubits,
        0..num_qubits,
    )
        .prop_filter("Operands must differ", |(_, a, b)| a != b)
        .prop_map(|(g, a, b)| GateOp::Two(g, a, b));
    prop_oneof![single, two]
}

fn arb_program() -> impl Strategy<Value = qvec_ir::CircuitProgram> {
    (2_u32..=6).prop_flat_map(|n| {
        prop::collection::vec(arb_gate_op(n), 0..=40).prop_map(move |ops| {
            let mut builder = build_circuit(n, 0);
            for op in ops {
                op.apply(&mut builder);
            }
            builder.finish()
        })
    })
}

proptest! {
    /// Total probability stays 1 after any gate sequence.
    #[test]
    fn test_norm_preserved(program in arb_program()) {
        let state = Simulator::new().statevector(&program).unwrap();
        prop_assert!(state.is_normalized(NORM_TOLERANCE), "norm {}", state.norm_sqr());
    }

    /// H is self-inverse: appending H twice on one qubit restores the state.
    #[test]
    fn test_hadamard_self_inverse(program in arb_program(), target in 0_u32..2) {
        let before = Simulator::new().statevector(&program).unwrap();

        let mut builder = build_circuit(program.num_qubits(), 0);
        for op in program.operations() {
            builder.append(*op).unwrap();
        }
        builder.h(QubitId(target)).unwrap();
        builder.h(QubitId(target)).unwrap();
        let after = Simulator::new().statevector(&builder.finish()).unwrap();

        let distance = before.max_distance(&after).unwrap();
        prop_assert!(distance < 1e-9, "distance {}", distance);
    }
}
