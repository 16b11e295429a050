//! Per-operation dispatch onto target gate applications.

use qlm_ir::{Operation, QubitRole};

use crate::error::{TranslateError, TranslateResult};
use crate::gate_table::{self, GateSpec};
use crate::resolver::{ParameterResolver, resolve_parameter};
use crate::target::{GateApplication, TargetGate};

/// How an operation is lowered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    /// Has a native target gate in the gate table.
    Named(&'static str),
    /// Lowered to an anonymous one-qubit matrix gate.
    GenericSingleQubitGate,
    /// Lowered to an anonymous two-qubit matrix gate.
    GenericTwoQubitGate,
    /// Produces no target instruction.
    NoEffect,
    /// Lowered to a native reset by the circuit translator.
    ActiveReset,
    /// Unrolled by the circuit translator.
    RepeatedBlock,
    /// No lowering exists for this target.
    Unsupported,
}

/// Classify an operation.
///
/// Operations with a native gate are always classified as `Named`, even
/// when they could also be expressed through their unitary.
pub fn classify(operation: &Operation) -> OperationKind {
    use Operation as Op;
    match operation {
        Op::RotateX { .. }
        | Op::RotateY { .. }
        | Op::RotateZ { .. }
        | Op::Hadamard { .. }
        | Op::PauliX { .. }
        | Op::PauliY { .. }
        | Op::PauliZ { .. }
        | Op::SGate { .. }
        | Op::TGate { .. }
        | Op::PhaseShiftState1 { .. }
        | Op::Identity { .. }
        | Op::CNOT { .. }
        | Op::ControlledPauliY { .. }
        | Op::ControlledPauliZ { .. }
        | Op::SWAP { .. }
        | Op::ISwap { .. }
        | Op::ControlledPhaseShift { .. }
        | Op::Toffoli { .. } => OperationKind::Named(operation.name()),

        Op::SingleQubitGate { .. }
        | Op::SqrtPauliX { .. }
        | Op::InvSqrtPauliX { .. }
        | Op::PhaseShiftState0 { .. }
        | Op::RotateXY { .. } => OperationKind::GenericSingleQubitGate,

        Op::VariableMSXX { .. }
        | Op::MolmerSorensenXX { .. }
        | Op::XY { .. }
        | Op::PMInteraction { .. } => OperationKind::GenericTwoQubitGate,

        Op::MeasureQubit { .. }
        | Op::DefinitionBit { .. }
        | Op::DefinitionFloat { .. }
        | Op::DefinitionComplex { .. }
        | Op::PragmaStartDecompositionBlock { .. }
        | Op::PragmaStopDecompositionBlock { .. }
        | Op::PragmaStopParallelBlock { .. }
        | Op::PragmaGlobalPhase { .. } => OperationKind::NoEffect,

        Op::PragmaActiveReset { .. } => OperationKind::ActiveReset,
        Op::PragmaLoop { .. } => OperationKind::RepeatedBlock,

        Op::PragmaDamping { .. }
        | Op::PragmaConditional { .. }
        | Op::PragmaRepeatedMeasurement { .. }
        | Op::PragmaSetNumberOfMeasurements { .. } => OperationKind::Unsupported,
    }
}

/// Lower one operation to a gate application.
///
/// Returns `Ok(None)` for operations without a target effect. Structural
/// pragmas are handled by the circuit translator and are rejected here.
pub fn call_operation(
    operation: &Operation,
    resolver: Option<&dyn ParameterResolver>,
) -> TranslateResult<Option<GateApplication>> {
    match classify(operation) {
        OperationKind::Named(name) => {
            let spec = gate_table::lookup(name)
                .ok_or_else(|| TranslateError::unsupported(operation.tags()))?;
            call_named(spec, operation, resolver).map(Some)
        }
        OperationKind::GenericSingleQubitGate => {
            call_generic(operation, &[QubitRole::Qubit], resolver).map(Some)
        }
        OperationKind::GenericTwoQubitGate => call_generic(
            operation,
            &[QubitRole::Control, QubitRole::Target],
            resolver,
        )
        .map(Some),
        OperationKind::NoEffect => Ok(None),
        OperationKind::ActiveReset | OperationKind::RepeatedBlock | OperationKind::Unsupported => {
            Err(TranslateError::unsupported(operation.tags()))
        }
    }
}

fn operands(operation: &Operation, roles: &[QubitRole]) -> TranslateResult<Vec<usize>> {
    roles
        .iter()
        .map(|&role| {
            operation
                .qubit(role)
                .ok_or_else(|| TranslateError::MissingOperand {
                    operation: operation.name(),
                    operand: format!("{role:?}"),
                })
        })
        .collect()
}

fn call_named(
    spec: &GateSpec,
    operation: &Operation,
    resolver: Option<&dyn ParameterResolver>,
) -> TranslateResult<GateApplication> {
    let params = spec
        .parameters
        .iter()
        .map(|&name| {
            let param =
                operation
                    .parameter(name)
                    .ok_or_else(|| TranslateError::MissingOperand {
                        operation: operation.name(),
                        operand: name.to_string(),
                    })?;
            resolve_parameter(param, resolver)
        })
        .collect::<TranslateResult<Vec<_>>>()?;
    let qubits = operands(operation, spec.qubits)?;
    Ok(GateApplication::new((spec.constructor)(&params), qubits))
}

fn call_generic(
    operation: &Operation,
    roles: &[QubitRole],
    resolver: Option<&dyn ParameterResolver>,
) -> TranslateResult<GateApplication> {
    let params = operation
        .parameters()
        .into_iter()
        .map(|(_, param)| resolve_parameter(param, resolver))
        .collect::<TranslateResult<Vec<_>>>()?;
    let matrix = operation.unitary_matrix(&params)?;
    let qubits = operands(operation, roles)?;
    let gate = TargetGate::Matrix {
        arity: roles.len(),
        matrix,
    };
    Ok(GateApplication::new(gate, qubits))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::VariableMap;
    use qlm_ir::{CalculatorFloat, Circuit};

    #[test]
    fn test_every_named_kind_has_a_table_entry() {
        let ops = [
            Operation::Hadamard { qubit: 0 },
            Operation::Identity { qubit: 0 },
            Operation::PhaseShiftState1 {
                qubit: 0,
                theta: 0.0.into(),
            },
            Operation::ControlledPauliY {
                control: 0,
                target: 1,
            },
            Operation::Toffoli {
                control_0: 0,
                control_1: 1,
                target: 2,
            },
        ];
        for op in &ops {
            let OperationKind::Named(name) = classify(op) else {
                panic!("{} should be named", op.name());
            };
            assert!(gate_table::lookup(name).is_some());
        }
    }

    #[test]
    fn test_named_gate_with_symbolic_parameter() {
        let op = Operation::RotateX {
            qubit: 2,
            theta: CalculatorFloat::symbol("theta"),
        };
        let vars = VariableMap::new().with("theta", 0.75);
        let app = call_operation(&op, Some(&vars)).unwrap().unwrap();
        assert_eq!(app.gate, TargetGate::Rx(0.75));
        assert_eq!(app.qubits, vec![2]);
    }

    #[test]
    fn test_controlled_gates_keep_operand_order() {
        let op = Operation::ControlledPhaseShift {
            control: 3,
            target: 0,
            theta: 0.2.into(),
        };
        let app = call_operation(&op, None).unwrap().unwrap();
        assert_eq!(app.opcode(), "C-PH");
        assert_eq!(app.qubits, vec![3, 0]);

        let op = Operation::Toffoli {
            control_0: 2,
            control_1: 0,
            target: 1,
        };
        let app = call_operation(&op, None).unwrap().unwrap();
        assert_eq!(app.opcode(), "CCNOT");
        assert_eq!(app.qubits, vec![2, 0, 1]);
    }

    #[test]
    fn test_generic_two_qubit_gate() {
        let op = Operation::VariableMSXX {
            control: 1,
            target: 0,
            theta: std::f64::consts::PI.into(),
        };
        let app = call_operation(&op, None).unwrap().unwrap();
        assert_eq!(app.opcode(), "Gate");
        assert_eq!(app.gate.arity(), 2);
        assert_eq!(app.qubits, vec![1, 0]);
        assert_eq!(
            app.gate.matrix(),
            op.unitary_matrix(&[std::f64::consts::PI]).unwrap()
        );
    }

    #[test]
    fn test_generic_single_qubit_gate_resolves_every_parameter() {
        let op = Operation::RotateXY {
            qubit: 0,
            theta: CalculatorFloat::symbol("t"),
            phi: CalculatorFloat::symbol("p"),
        };
        assert!(matches!(
            call_operation(&op, None),
            Err(TranslateError::UnresolvedParameter { .. })
        ));

        let vars = VariableMap::new().with("t", 1.0).with("p", 0.5);
        let app = call_operation(&op, Some(&vars)).unwrap().unwrap();
        assert_eq!(app.gate.arity(), 1);
        assert_eq!(app.gate.matrix(), op.unitary_matrix(&[1.0, 0.5]).unwrap());
    }

    #[test]
    fn test_no_effect_operations() {
        let ops = [
            Operation::measure_qubit(0, "ro", 0),
            Operation::definition_bit("ro", 1, true),
            Operation::PragmaGlobalPhase { phase: 0.1.into() },
            Operation::PragmaStopParallelBlock {
                qubits: vec![0, 1],
                execution_time: 1.0.into(),
            },
        ];
        for op in &ops {
            assert_eq!(classify(op), OperationKind::NoEffect);
            assert!(call_operation(op, None).unwrap().is_none());
        }
    }

    #[test]
    fn test_unsupported_names_tags() {
        let op = Operation::PragmaDamping {
            qubit: 0,
            gate_time: 1.0.into(),
            rate: 0.1.into(),
        };
        let err = call_operation(&op, None).unwrap_err();
        match err {
            TranslateError::UnsupportedOperation { tags } => {
                assert!(tags.contains(&"PragmaDamping".to_string()));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_structural_pragmas_rejected_directly() {
        let op = Operation::pragma_loop(2.0, Circuit::new());
        assert!(matches!(
            call_operation(&op, None),
            Err(TranslateError::UnsupportedOperation { .. })
        ));
        let op = Operation::PragmaActiveReset { qubit: 0 };
        assert!(call_operation(&op, None).is_err());
    }
}
