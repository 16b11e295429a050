//! Integration tests for single-operation lowering of every named gate.
//!
//! Each case translates a one-operation circuit and checks that exactly one
//! application comes out with the expected gate on the same qubits, both
//! for literal parameters and for symbolic ones resolved through a map.

use std::f64::consts::PI;

use qlm_ir::{CalculatorFloat, Circuit, Operation};
use qlm_translate::{CircuitTranslator, TargetGate, VariableMap, call_circuit};

/// Helper: translate a single operation on a register of four qubits.
fn lower(op: Operation, vars: Option<&VariableMap>) -> (TargetGate, Vec<usize>) {
    let circuit: Circuit = [op].into_iter().collect();
    let translator = CircuitTranslator::new(4);
    let translator = match vars {
        Some(vars) => translator.with_resolver(vars),
        None => translator,
    };
    let program = translator.translate(&circuit).unwrap();
    assert_eq!(program.len(), 1);
    let app = program.applications().next().unwrap().clone();
    (app.gate, app.qubits)
}

fn fixed_cases() -> Vec<(Operation, TargetGate, Vec<usize>)> {
    vec![
        (Operation::Hadamard { qubit: 1 }, TargetGate::H, vec![1]),
        (Operation::PauliX { qubit: 2 }, TargetGate::X, vec![2]),
        (Operation::PauliY { qubit: 0 }, TargetGate::Y, vec![0]),
        (Operation::PauliZ { qubit: 3 }, TargetGate::Z, vec![3]),
        (Operation::SGate { qubit: 1 }, TargetGate::S, vec![1]),
        (Operation::TGate { qubit: 1 }, TargetGate::T, vec![1]),
        (Operation::Identity { qubit: 0 }, TargetGate::I, vec![0]),
        (
            Operation::CNOT {
                control: 2,
                target: 0,
            },
            TargetGate::Cnot,
            vec![2, 0],
        ),
        (
            Operation::ControlledPauliY {
                control: 0,
                target: 3,
            },
            TargetGate::controlled(TargetGate::Y),
            vec![0, 3],
        ),
        (
            Operation::ControlledPauliZ {
                control: 1,
                target: 2,
            },
            TargetGate::Csign,
            vec![1, 2],
        ),
        (
            Operation::SWAP {
                control: 3,
                target: 1,
            },
            TargetGate::Swap,
            vec![3, 1],
        ),
        (
            Operation::ISwap {
                control: 0,
                target: 1,
            },
            TargetGate::ISwap,
            vec![0, 1],
        ),
        (
            Operation::Toffoli {
                control_0: 3,
                control_1: 1,
                target: 0,
            },
            TargetGate::Ccnot,
            vec![3, 1, 0],
        ),
    ]
}

type ParametrizedCase = (fn(CalculatorFloat) -> Operation, fn(f64) -> TargetGate, Vec<usize>);

fn case(
    op: fn(CalculatorFloat) -> Operation,
    gate: fn(f64) -> TargetGate,
    qubits: Vec<usize>,
) -> ParametrizedCase {
    (op, gate, qubits)
}

fn parametrized_cases() -> Vec<ParametrizedCase> {
    vec![
        case(|theta| Operation::RotateX { qubit: 0, theta }, TargetGate::Rx, vec![0]),
        case(|theta| Operation::RotateY { qubit: 1, theta }, TargetGate::Ry, vec![1]),
        case(|theta| Operation::RotateZ { qubit: 2, theta }, TargetGate::Rz, vec![2]),
        case(
            |theta| Operation::PhaseShiftState1 { qubit: 3, theta },
            TargetGate::Ph,
            vec![3],
        ),
        case(
            |theta| Operation::ControlledPhaseShift {
                control: 1,
                target: 0,
                theta,
            },
            |t| TargetGate::controlled(TargetGate::Ph(t)),
            vec![1, 0],
        ),
    ]
}

#[test]
fn test_fixed_gates() {
    for (op, gate, qubits) in fixed_cases() {
        let name = op.name();
        let (got_gate, got_qubits) = lower(op, None);
        assert_eq!(got_gate, gate, "gate mismatch for {name}");
        assert_eq!(got_qubits, qubits, "operand mismatch for {name}");
    }
}

#[test]
fn test_parametrized_gates_literal() {
    for (make_op, make_gate, qubits) in parametrized_cases() {
        let (gate, got_qubits) = lower(make_op(CalculatorFloat::from(PI / 3.0)), None);
        assert_eq!(gate, make_gate(PI / 3.0));
        assert_eq!(got_qubits, qubits);
    }
}

#[test]
fn test_parametrized_gates_symbolic() {
    let vars = VariableMap::new().with("theta", 0.125);
    for (make_op, make_gate, qubits) in parametrized_cases() {
        let (gate, got_qubits) = lower(make_op(CalculatorFloat::symbol("theta")), Some(&vars));
        assert_eq!(gate, make_gate(0.125));
        assert_eq!(got_qubits, qubits);

        let (gate, _) = lower(make_op(CalculatorFloat::symbol("-theta")), Some(&vars));
        assert_eq!(gate, make_gate(-0.125));
    }
}

#[test]
fn test_symbolic_without_resolver_is_fatal() {
    let mut circuit = Circuit::new();
    circuit += Operation::PauliX { qubit: 0 };
    circuit += Operation::RotateZ {
        qubit: 0,
        theta: CalculatorFloat::symbol("theta"),
    };
    assert!(call_circuit(&circuit, 1).is_err());
}

#[test]
fn test_generic_gates_become_matrix_gates() {
    let ops = [
        Operation::SqrtPauliX { qubit: 0 },
        Operation::InvSqrtPauliX { qubit: 1 },
        Operation::PhaseShiftState0 {
            qubit: 2,
            theta: 0.3.into(),
        },
        Operation::SingleQubitGate {
            qubit: 3,
            alpha_r: 1.0.into(),
            alpha_i: 0.0.into(),
            beta_r: 0.0.into(),
            beta_i: 0.0.into(),
            global_phase: 0.0.into(),
        },
        Operation::MolmerSorensenXX {
            control: 0,
            target: 1,
        },
        Operation::XY {
            control: 2,
            target: 3,
            theta: 0.4.into(),
        },
        Operation::PMInteraction {
            control: 1,
            target: 2,
            t: 0.2.into(),
        },
    ];
    for op in ops {
        let arity = if op.has_tag("TwoQubitGateOperation") { 2 } else { 1 };
        let (gate, qubits) = lower(op, None);
        assert_eq!(gate.opcode(), "Gate");
        assert_eq!(gate.arity(), arity);
        assert_eq!(qubits.len(), arity);
        assert_eq!(gate.matrix().dim(), (1 << arity, 1 << arity));
    }
}
