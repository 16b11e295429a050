//! Property-based tests for circuit serialization.
//!
//! Circuits built from random operations, including nested loop blocks,
//! must survive a JSON round trip unchanged.

use proptest::prelude::*;
use qlm_ir::{CalculatorFloat, Circuit, Operation};

fn arb_parameter() -> impl Strategy<Value = CalculatorFloat> {
    prop_oneof![
        (-100_i32..100).prop_map(CalculatorFloat::from),
        "[a-z]{1,6}".prop_map(CalculatorFloat::Str),
    ]
}

fn arb_leaf(num_qubits: usize) -> impl Strategy<Value = Operation> {
    prop_oneof![
        (0..num_qubits).prop_map(|qubit| Operation::Hadamard { qubit }),
        (0..num_qubits, arb_parameter())
            .prop_map(|(qubit, theta)| Operation::RotateZ { qubit, theta }),
        (0..num_qubits, 0..num_qubits)
            .prop_map(|(control, target)| Operation::CNOT { control, target }),
        (0..num_qubits, 0..num_qubits, arb_parameter()).prop_map(|(control, target, theta)| {
            Operation::VariableMSXX {
                control,
                target,
                theta,
            }
        }),
        (0..num_qubits).prop_map(|qubit| Operation::PragmaActiveReset { qubit }),
        arb_parameter().prop_map(|phase| Operation::PragmaGlobalPhase { phase }),
    ]
}

fn arb_circuit() -> impl Strategy<Value = Circuit> {
    let leaf = prop::collection::vec(arb_leaf(4), 0..6).prop_map(Circuit::from_iter);
    leaf.prop_recursive(3, 24, 4, |inner| {
        (
            prop::collection::vec(arb_leaf(4), 0..4),
            arb_parameter(),
            inner,
        )
            .prop_map(|(ops, repetitions, body)| {
                let mut circuit: Circuit = ops.into_iter().collect();
                circuit += Operation::PragmaLoop { repetitions, circuit: body };
                circuit
            })
    })
}

proptest! {
    #[test]
    fn circuit_json_roundtrip(circuit in arb_circuit()) {
        let json = serde_json::to_string(&circuit).unwrap();
        let back: Circuit = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(back, circuit);
    }

    #[test]
    fn literal_arithmetic_folds(a in -1.0e3_f64..1.0e3, b in 1.0_f64..1.0e3) {
        let (pa, pb) = (CalculatorFloat::from(a), CalculatorFloat::from(b));
        prop_assert_eq!((pa.clone() + pb.clone()).float(), Some(a + b));
        prop_assert_eq!((pa.clone() - pb.clone()).float(), Some(a - b));
        prop_assert_eq!((pa.clone() * pb.clone()).float(), Some(a * b));
        prop_assert_eq!((pa / pb).float(), Some(a / b));
    }
}

#[test]
fn test_number_of_qubits_matches_involved_set() {
    let mut circuit = Circuit::new();
    circuit += Operation::definition_bit("ro", 3, true);
    circuit += Operation::Toffoli {
        control_0: 0,
        control_1: 1,
        target: 2,
    };
    circuit += Operation::measure_qubit(2, "ro", 2);
    assert_eq!(circuit.number_of_qubits(), 3);
    assert!(circuit.validate().is_ok());
}
