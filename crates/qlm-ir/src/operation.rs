//! Circuit operations and their classification tags.

use std::collections::BTreeSet;

use ndarray::Array2;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::circuit::Circuit;
use crate::definition::{Definition, RegisterKind};
use crate::error::{IrError, IrResult};
use crate::parameter::CalculatorFloat;
use crate::unitary;

/// The role a qubit operand plays in an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QubitRole {
    /// The single qubit of a one-qubit operation.
    Qubit,
    /// The control qubit of a two-qubit operation.
    Control,
    /// The target qubit of a controlled operation.
    Target,
    /// First control of a doubly-controlled operation.
    Control0,
    /// Second control of a doubly-controlled operation.
    Control1,
}

/// The qubits an operation acts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvolvedQubits {
    /// Acts on no qubit (definitions, global phase).
    None,
    /// Acts on every qubit of the register.
    All,
    /// Acts on exactly these qubits.
    Set(BTreeSet<usize>),
}

impl InvolvedQubits {
    fn set(qubits: impl IntoIterator<Item = usize>) -> Self {
        InvolvedQubits::Set(qubits.into_iter().collect())
    }
}

/// One atomic IR instruction.
///
/// Operations are read-only once placed in a [`Circuit`]. Gates that the
/// target supports natively are listed first; generic gates carry their own
/// unitary; the remaining variants are bookkeeping or pragmas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Operation {
    // Single-qubit gates with a native target instruction
    /// Rotation around the X axis.
    RotateX { qubit: usize, theta: CalculatorFloat },
    /// Rotation around the Y axis.
    RotateY { qubit: usize, theta: CalculatorFloat },
    /// Rotation around the Z axis.
    RotateZ { qubit: usize, theta: CalculatorFloat },
    /// Hadamard gate.
    Hadamard { qubit: usize },
    /// Pauli-X gate.
    PauliX { qubit: usize },
    /// Pauli-Y gate.
    PauliY { qubit: usize },
    /// Pauli-Z gate.
    PauliZ { qubit: usize },
    /// S gate (sqrt(Z)).
    SGate { qubit: usize },
    /// T gate (fourth root of Z).
    TGate { qubit: usize },
    /// Phase applied to the |1⟩ state.
    PhaseShiftState1 { qubit: usize, theta: CalculatorFloat },
    /// Identity gate.
    Identity { qubit: usize },

    // Two- and three-qubit gates with a native target instruction
    /// Controlled-NOT gate.
    CNOT { control: usize, target: usize },
    /// Controlled Pauli-Y gate.
    ControlledPauliY { control: usize, target: usize },
    /// Controlled Pauli-Z gate.
    ControlledPauliZ { control: usize, target: usize },
    /// SWAP gate.
    SWAP { control: usize, target: usize },
    /// iSWAP gate.
    ISwap { control: usize, target: usize },
    /// Controlled phase shift on the |11⟩ state.
    ControlledPhaseShift {
        control: usize,
        target: usize,
        theta: CalculatorFloat,
    },
    /// Toffoli (doubly-controlled NOT) gate.
    Toffoli {
        control_0: usize,
        control_1: usize,
        target: usize,
    },

    // Generic single-qubit gates, lowered through their unitary
    /// General single-qubit unitary in (alpha, beta, global phase) form.
    SingleQubitGate {
        qubit: usize,
        alpha_r: CalculatorFloat,
        alpha_i: CalculatorFloat,
        beta_r: CalculatorFloat,
        beta_i: CalculatorFloat,
        global_phase: CalculatorFloat,
    },
    /// Square root of Pauli-X.
    SqrtPauliX { qubit: usize },
    /// Inverse square root of Pauli-X.
    InvSqrtPauliX { qubit: usize },
    /// Phase applied to the |0⟩ state.
    PhaseShiftState0 { qubit: usize, theta: CalculatorFloat },
    /// Rotation by `theta` around an axis in the XY plane at angle `phi`.
    RotateXY {
        qubit: usize,
        theta: CalculatorFloat,
        phi: CalculatorFloat,
    },

    // Generic two-qubit gates, lowered through their unitary
    /// Variable-angle Mølmer–Sørensen XX gate.
    VariableMSXX {
        control: usize,
        target: usize,
        theta: CalculatorFloat,
    },
    /// Fixed Mølmer–Sørensen XX gate.
    MolmerSorensenXX { control: usize, target: usize },
    /// XY interaction gate.
    XY {
        control: usize,
        target: usize,
        theta: CalculatorFloat,
    },
    /// Plus-minus interaction for time `t`.
    PMInteraction {
        control: usize,
        target: usize,
        t: CalculatorFloat,
    },

    // Measurements and register declarations
    /// Measure one qubit into a bit register entry.
    MeasureQubit {
        qubit: usize,
        readout: String,
        readout_index: usize,
    },
    /// Declare a bit register.
    DefinitionBit {
        name: String,
        length: usize,
        is_output: bool,
    },
    /// Declare a float register.
    DefinitionFloat {
        name: String,
        length: usize,
        is_output: bool,
    },
    /// Declare a complex register.
    DefinitionComplex {
        name: String,
        length: usize,
        is_output: bool,
    },

    // Pragmas
    /// Reset a qubit to |0⟩ on hardware that supports it.
    PragmaActiveReset { qubit: usize },
    /// Repeat a block of operations.
    PragmaLoop {
        repetitions: CalculatorFloat,
        circuit: Circuit,
    },
    /// Start marker of a decomposition block.
    PragmaStartDecompositionBlock {
        qubits: Vec<usize>,
        reordering_dictionary: Vec<(usize, usize)>,
    },
    /// Stop marker of a decomposition block.
    PragmaStopDecompositionBlock { qubits: Vec<usize> },
    /// Stop marker of a parallel block.
    PragmaStopParallelBlock {
        qubits: Vec<usize>,
        execution_time: CalculatorFloat,
    },
    /// Global phase of the circuit.
    PragmaGlobalPhase { phase: CalculatorFloat },
    /// Amplitude damping noise channel.
    PragmaDamping {
        qubit: usize,
        gate_time: CalculatorFloat,
        rate: CalculatorFloat,
    },
    /// Block executed only if a bit register entry is set.
    PragmaConditional {
        condition_register: String,
        condition_index: usize,
        circuit: Circuit,
    },
    /// Measure every qubit repeatedly into a register.
    PragmaRepeatedMeasurement {
        readout: String,
        number_measurements: usize,
    },
    /// Override the number of projective measurements of a register.
    PragmaSetNumberOfMeasurements {
        readout: String,
        number_measurements: usize,
    },
}

impl Operation {
    /// Create a qubit measurement.
    pub fn measure_qubit(qubit: usize, readout: impl Into<String>, readout_index: usize) -> Self {
        Operation::MeasureQubit {
            qubit,
            readout: readout.into(),
            readout_index,
        }
    }

    /// Declare a bit register.
    pub fn definition_bit(name: impl Into<String>, length: usize, is_output: bool) -> Self {
        Operation::DefinitionBit {
            name: name.into(),
            length,
            is_output,
        }
    }

    /// Declare a float register.
    pub fn definition_float(name: impl Into<String>, length: usize, is_output: bool) -> Self {
        Operation::DefinitionFloat {
            name: name.into(),
            length,
            is_output,
        }
    }

    /// Declare a complex register.
    pub fn definition_complex(name: impl Into<String>, length: usize, is_output: bool) -> Self {
        Operation::DefinitionComplex {
            name: name.into(),
            length,
            is_output,
        }
    }

    /// Create a loop pragma repeating `circuit`.
    pub fn pragma_loop(repetitions: impl Into<CalculatorFloat>, circuit: Circuit) -> Self {
        Operation::PragmaLoop {
            repetitions: repetitions.into(),
            circuit,
        }
    }

    /// Get the name of this operation.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::RotateX { .. } => "RotateX",
            Operation::RotateY { .. } => "RotateY",
            Operation::RotateZ { .. } => "RotateZ",
            Operation::Hadamard { .. } => "Hadamard",
            Operation::PauliX { .. } => "PauliX",
            Operation::PauliY { .. } => "PauliY",
            Operation::PauliZ { .. } => "PauliZ",
            Operation::SGate { .. } => "SGate",
            Operation::TGate { .. } => "TGate",
            Operation::PhaseShiftState1 { .. } => "PhaseShiftState1",
            Operation::Identity { .. } => "Identity",
            Operation::CNOT { .. } => "CNOT",
            Operation::ControlledPauliY { .. } => "ControlledPauliY",
            Operation::ControlledPauliZ { .. } => "ControlledPauliZ",
            Operation::SWAP { .. } => "SWAP",
            Operation::ISwap { .. } => "ISwap",
            Operation::ControlledPhaseShift { .. } => "ControlledPhaseShift",
            Operation::Toffoli { .. } => "Toffoli",
            Operation::SingleQubitGate { .. } => "SingleQubitGate",
            Operation::SqrtPauliX { .. } => "SqrtPauliX",
            Operation::InvSqrtPauliX { .. } => "InvSqrtPauliX",
            Operation::PhaseShiftState0 { .. } => "PhaseShiftState0",
            Operation::RotateXY { .. } => "RotateXY",
            Operation::VariableMSXX { .. } => "VariableMSXX",
            Operation::MolmerSorensenXX { .. } => "MolmerSorensenXX",
            Operation::XY { .. } => "XY",
            Operation::PMInteraction { .. } => "PMInteraction",
            Operation::MeasureQubit { .. } => "MeasureQubit",
            Operation::DefinitionBit { .. } => "DefinitionBit",
            Operation::DefinitionFloat { .. } => "DefinitionFloat",
            Operation::DefinitionComplex { .. } => "DefinitionComplex",
            Operation::PragmaActiveReset { .. } => "PragmaActiveReset",
            Operation::PragmaLoop { .. } => "PragmaLoop",
            Operation::PragmaStartDecompositionBlock { .. } => "PragmaStartDecompositionBlock",
            Operation::PragmaStopDecompositionBlock { .. } => "PragmaStopDecompositionBlock",
            Operation::PragmaStopParallelBlock { .. } => "PragmaStopParallelBlock",
            Operation::PragmaGlobalPhase { .. } => "PragmaGlobalPhase",
            Operation::PragmaDamping { .. } => "PragmaDamping",
            Operation::PragmaConditional { .. } => "PragmaConditional",
            Operation::PragmaRepeatedMeasurement { .. } => "PragmaRepeatedMeasurement",
            Operation::PragmaSetNumberOfMeasurements { .. } => "PragmaSetNumberOfMeasurements",
        }
    }

    /// Get the classification tags of this operation, most general first.
    ///
    /// The last tag is always the operation name.
    pub fn tags(&self) -> &'static [&'static str] {
        match self {
            Operation::RotateX { .. } => &[
                "Operation",
                "GateOperation",
                "SingleQubitGateOperation",
                "Rotation",
                "RotateX",
            ],
            Operation::RotateY { .. } => &[
                "Operation",
                "GateOperation",
                "SingleQubitGateOperation",
                "Rotation",
                "RotateY",
            ],
            Operation::RotateZ { .. } => &[
                "Operation",
                "GateOperation",
                "SingleQubitGateOperation",
                "Rotation",
                "RotateZ",
            ],
            Operation::Hadamard { .. } => &[
                "Operation",
                "GateOperation",
                "SingleQubitGateOperation",
                "Hadamard",
            ],
            Operation::PauliX { .. } => &[
                "Operation",
                "GateOperation",
                "SingleQubitGateOperation",
                "PauliX",
            ],
            Operation::PauliY { .. } => &[
                "Operation",
                "GateOperation",
                "SingleQubitGateOperation",
                "PauliY",
            ],
            Operation::PauliZ { .. } => &[
                "Operation",
                "GateOperation",
                "SingleQubitGateOperation",
                "PauliZ",
            ],
            Operation::SGate { .. } => &[
                "Operation",
                "GateOperation",
                "SingleQubitGateOperation",
                "SGate",
            ],
            Operation::TGate { .. } => &[
                "Operation",
                "GateOperation",
                "SingleQubitGateOperation",
                "TGate",
            ],
            Operation::PhaseShiftState1 { .. } => &[
                "Operation",
                "GateOperation",
                "SingleQubitGateOperation",
                "Rotation",
                "PhaseShiftState1",
            ],
            Operation::Identity { .. } => &[
                "Operation",
                "GateOperation",
                "SingleQubitGateOperation",
                "Identity",
            ],
            Operation::CNOT { .. } => &[
                "Operation",
                "GateOperation",
                "TwoQubitGateOperation",
                "CNOT",
            ],
            Operation::ControlledPauliY { .. } => &[
                "Operation",
                "GateOperation",
                "TwoQubitGateOperation",
                "ControlledPauliY",
            ],
            Operation::ControlledPauliZ { .. } => &[
                "Operation",
                "GateOperation",
                "TwoQubitGateOperation",
                "ControlledPauliZ",
            ],
            Operation::SWAP { .. } => &[
                "Operation",
                "GateOperation",
                "TwoQubitGateOperation",
                "SWAP",
            ],
            Operation::ISwap { .. } => &[
                "Operation",
                "GateOperation",
                "TwoQubitGateOperation",
                "ISwap",
            ],
            Operation::ControlledPhaseShift { .. } => &[
                "Operation",
                "GateOperation",
                "TwoQubitGateOperation",
                "Rotation",
                "ControlledPhaseShift",
            ],
            Operation::Toffoli { .. } => &[
                "Operation",
                "GateOperation",
                "ThreeQubitGateOperation",
                "Toffoli",
            ],
            Operation::SingleQubitGate { .. } => &[
                "Operation",
                "GateOperation",
                "SingleQubitGateOperation",
                "SingleQubitGate",
            ],
            Operation::SqrtPauliX { .. } => &[
                "Operation",
                "GateOperation",
                "SingleQubitGateOperation",
                "SqrtPauliX",
            ],
            Operation::InvSqrtPauliX { .. } => &[
                "Operation",
                "GateOperation",
                "SingleQubitGateOperation",
                "InvSqrtPauliX",
            ],
            Operation::PhaseShiftState0 { .. } => &[
                "Operation",
                "GateOperation",
                "SingleQubitGateOperation",
                "Rotation",
                "PhaseShiftState0",
            ],
            Operation::RotateXY { .. } => &[
                "Operation",
                "GateOperation",
                "SingleQubitGateOperation",
                "Rotation",
                "RotateXY",
            ],
            Operation::VariableMSXX { .. } => &[
                "Operation",
                "GateOperation",
                "TwoQubitGateOperation",
                "Rotation",
                "VariableMSXX",
            ],
            Operation::MolmerSorensenXX { .. } => &[
                "Operation",
                "GateOperation",
                "TwoQubitGateOperation",
                "MolmerSorensenXX",
            ],
            Operation::XY { .. } => &[
                "Operation",
                "GateOperation",
                "TwoQubitGateOperation",
                "Rotation",
                "XY",
            ],
            Operation::PMInteraction { .. } => &[
                "Operation",
                "GateOperation",
                "TwoQubitGateOperation",
                "PMInteraction",
            ],
            Operation::MeasureQubit { .. } => &["Operation", "Measurement", "MeasureQubit"],
            Operation::DefinitionBit { .. } => &["Operation", "Definition", "DefinitionBit"],
            Operation::DefinitionFloat { .. } => &["Operation", "Definition", "DefinitionFloat"],
            Operation::DefinitionComplex { .. } => {
                &["Operation", "Definition", "DefinitionComplex"]
            }
            Operation::PragmaActiveReset { .. } => {
                &["Operation", "PragmaOperation", "PragmaActiveReset"]
            }
            Operation::PragmaLoop { .. } => &["Operation", "PragmaOperation", "PragmaLoop"],
            Operation::PragmaStartDecompositionBlock { .. } => &[
                "Operation",
                "PragmaOperation",
                "PragmaStartDecompositionBlock",
            ],
            Operation::PragmaStopDecompositionBlock { .. } => &[
                "Operation",
                "PragmaOperation",
                "PragmaStopDecompositionBlock",
            ],
            Operation::PragmaStopParallelBlock { .. } => &[
                "Operation",
                "PragmaOperation",
                "PragmaStopParallelBlock",
            ],
            Operation::PragmaGlobalPhase { .. } => {
                &["Operation", "PragmaOperation", "PragmaGlobalPhase"]
            }
            Operation::PragmaDamping { .. } => &[
                "Operation",
                "PragmaOperation",
                "PragmaNoiseOperation",
                "PragmaDamping",
            ],
            Operation::PragmaConditional { .. } => {
                &["Operation", "PragmaOperation", "PragmaConditional"]
            }
            Operation::PragmaRepeatedMeasurement { .. } => &[
                "Operation",
                "Measurement",
                "PragmaOperation",
                "PragmaRepeatedMeasurement",
            ],
            Operation::PragmaSetNumberOfMeasurements { .. } => &[
                "Operation",
                "Measurement",
                "PragmaOperation",
                "PragmaSetNumberOfMeasurements",
            ],
        }
    }

    /// Check whether `tag` is one of this operation's tags.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags().contains(&tag)
    }

    /// Get the qubit operand playing `role`, if the operation has one.
    pub fn qubit(&self, role: QubitRole) -> Option<usize> {
        use Operation as Op;
        match (self, role) {
            (
                Op::RotateX { qubit, .. }
                | Op::RotateY { qubit, .. }
                | Op::RotateZ { qubit, .. }
                | Op::Hadamard { qubit }
                | Op::PauliX { qubit }
                | Op::PauliY { qubit }
                | Op::PauliZ { qubit }
                | Op::SGate { qubit }
                | Op::TGate { qubit }
                | Op::PhaseShiftState1 { qubit, .. }
                | Op::Identity { qubit }
                | Op::SingleQubitGate { qubit, .. }
                | Op::SqrtPauliX { qubit }
                | Op::InvSqrtPauliX { qubit }
                | Op::PhaseShiftState0 { qubit, .. }
                | Op::RotateXY { qubit, .. }
                | Op::MeasureQubit { qubit, .. }
                | Op::PragmaActiveReset { qubit }
                | Op::PragmaDamping { qubit, .. },
                QubitRole::Qubit,
            ) => Some(*qubit),

            (
                Op::CNOT { control, .. }
                | Op::ControlledPauliY { control, .. }
                | Op::ControlledPauliZ { control, .. }
                | Op::SWAP { control, .. }
                | Op::ISwap { control, .. }
                | Op::ControlledPhaseShift { control, .. }
                | Op::VariableMSXX { control, .. }
                | Op::MolmerSorensenXX { control, .. }
                | Op::XY { control, .. }
                | Op::PMInteraction { control, .. },
                QubitRole::Control,
            ) => Some(*control),

            (
                Op::CNOT { target, .. }
                | Op::ControlledPauliY { target, .. }
                | Op::ControlledPauliZ { target, .. }
                | Op::SWAP { target, .. }
                | Op::ISwap { target, .. }
                | Op::ControlledPhaseShift { target, .. }
                | Op::Toffoli { target, .. }
                | Op::VariableMSXX { target, .. }
                | Op::MolmerSorensenXX { target, .. }
                | Op::XY { target, .. }
                | Op::PMInteraction { target, .. },
                QubitRole::Target,
            ) => Some(*target),

            (Op::Toffoli { control_0, .. }, QubitRole::Control0) => Some(*control_0),
            (Op::Toffoli { control_1, .. }, QubitRole::Control1) => Some(*control_1),

            _ => None,
        }
    }

    /// Get the named parameters of this operation, in unitary-generator order.
    pub fn parameters(&self) -> Vec<(&'static str, &CalculatorFloat)> {
        match self {
            Operation::RotateX { theta, .. }
            | Operation::RotateY { theta, .. }
            | Operation::RotateZ { theta, .. }
            | Operation::PhaseShiftState1 { theta, .. }
            | Operation::ControlledPhaseShift { theta, .. }
            | Operation::PhaseShiftState0 { theta, .. }
            | Operation::VariableMSXX { theta, .. }
            | Operation::XY { theta, .. } => vec![("theta", theta)],

            Operation::RotateXY { theta, phi, .. } => vec![("theta", theta), ("phi", phi)],

            Operation::SingleQubitGate {
                alpha_r,
                alpha_i,
                beta_r,
                beta_i,
                global_phase,
                ..
            } => vec![
                ("alpha_r", alpha_r),
                ("alpha_i", alpha_i),
                ("beta_r", beta_r),
                ("beta_i", beta_i),
                ("global_phase", global_phase),
            ],

            Operation::PMInteraction { t, .. } => vec![("t", t)],
            Operation::PragmaLoop { repetitions, .. } => vec![("repetitions", repetitions)],
            Operation::PragmaStopParallelBlock { execution_time, .. } => {
                vec![("execution_time", execution_time)]
            }
            Operation::PragmaGlobalPhase { phase } => vec![("phase", phase)],
            Operation::PragmaDamping {
                gate_time, rate, ..
            } => vec![("gate_time", gate_time), ("rate", rate)],

            _ => vec![],
        }
    }

    /// Get a named parameter.
    pub fn parameter(&self, name: &str) -> Option<&CalculatorFloat> {
        self.parameters()
            .into_iter()
            .find_map(|(n, p)| (n == name).then_some(p))
    }

    /// Get the qubits this operation acts on.
    pub fn involved_qubits(&self) -> InvolvedQubits {
        use Operation as Op;
        match self {
            Op::CNOT { control, target }
            | Op::ControlledPauliY { control, target }
            | Op::ControlledPauliZ { control, target }
            | Op::SWAP { control, target }
            | Op::ISwap { control, target }
            | Op::ControlledPhaseShift {
                control, target, ..
            }
            | Op::VariableMSXX {
                control, target, ..
            }
            | Op::MolmerSorensenXX { control, target }
            | Op::XY {
                control, target, ..
            }
            | Op::PMInteraction {
                control, target, ..
            } => InvolvedQubits::set([*control, *target]),

            Op::Toffoli {
                control_0,
                control_1,
                target,
            } => InvolvedQubits::set([*control_0, *control_1, *target]),

            Op::PragmaStartDecompositionBlock { qubits, .. }
            | Op::PragmaStopDecompositionBlock { qubits }
            | Op::PragmaStopParallelBlock { qubits, .. } => {
                InvolvedQubits::set(qubits.iter().copied())
            }

            Op::PragmaLoop { circuit, .. } | Op::PragmaConditional { circuit, .. } => {
                circuit.involved_qubits()
            }

            Op::PragmaRepeatedMeasurement { .. } => InvolvedQubits::All,

            Op::DefinitionBit { .. }
            | Op::DefinitionFloat { .. }
            | Op::DefinitionComplex { .. }
            | Op::PragmaGlobalPhase { .. }
            | Op::PragmaSetNumberOfMeasurements { .. } => InvolvedQubits::None,

            single => match single.qubit(QubitRole::Qubit) {
                Some(q) => InvolvedQubits::set([q]),
                None => InvolvedQubits::None,
            },
        }
    }

    /// Get this operation as a register declaration, if it is one.
    pub fn as_definition(&self) -> Option<Definition<'_>> {
        let (name, kind, length, is_output) = match self {
            Operation::DefinitionBit {
                name,
                length,
                is_output,
            } => (name, RegisterKind::Bit, length, is_output),
            Operation::DefinitionFloat {
                name,
                length,
                is_output,
            } => (name, RegisterKind::Float, length, is_output),
            Operation::DefinitionComplex {
                name,
                length,
                is_output,
            } => (name, RegisterKind::Complex, length, is_output),
            _ => return None,
        };
        Some(Definition {
            name,
            kind,
            length: *length,
            is_output: *is_output,
        })
    }

    /// Compute the unitary matrix of a generic gate from resolved parameters.
    ///
    /// `params` must follow the order of [`Operation::parameters`]. Two-qubit
    /// matrices use the basis ordering |control, target⟩ with the control as
    /// the most significant bit.
    pub fn unitary_matrix(&self, params: &[f64]) -> IrResult<Array2<Complex64>> {
        let expected = self.parameters().len();
        if params.len() != expected {
            return Err(IrError::ParameterCount {
                operation: self.name(),
                expected,
                got: params.len(),
            });
        }
        Ok(match self {
            Operation::SingleQubitGate { .. } => {
                unitary::single_qubit_gate(params[0], params[1], params[2], params[3], params[4])
            }
            Operation::SqrtPauliX { .. } => unitary::rotate_x(std::f64::consts::FRAC_PI_2),
            Operation::InvSqrtPauliX { .. } => unitary::rotate_x(-std::f64::consts::FRAC_PI_2),
            Operation::PhaseShiftState0 { .. } => unitary::phase_shift_state0(params[0]),
            Operation::RotateXY { .. } => unitary::rotate_xy(params[0], params[1]),
            Operation::VariableMSXX { .. } => unitary::variable_msxx(params[0]),
            Operation::MolmerSorensenXX { .. } => {
                unitary::variable_msxx(std::f64::consts::FRAC_PI_2)
            }
            Operation::XY { .. } => unitary::xy(params[0]),
            Operation::PMInteraction { .. } => unitary::pm_interaction(params[0]),
            other => return Err(IrError::NotAGenericGate(other.name())),
        })
    }
}
