//! Target engine instruction model.
//!
//! A [`TargetProgram`] is what the execution engine receives: an allocated
//! qubit register and an ordered list of gate applications and resets.
//! Multi-qubit gate matrices are indexed with the first operand as the most
//! significant bit.

use std::borrow::Cow;
use std::fmt;

use ndarray::{Array2, array};
use num_complex::Complex64;

use crate::error::{TranslateError, TranslateResult};

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);
const I: Complex64 = Complex64::new(0.0, 1.0);

/// A gate in the target instruction set.
#[derive(Debug, Clone, PartialEq)]
pub enum TargetGate {
    /// Identity.
    I,
    /// Hadamard.
    H,
    /// Pauli-X.
    X,
    /// Pauli-Y.
    Y,
    /// Pauli-Z.
    Z,
    /// Phase gate diag(1, i).
    S,
    /// T gate diag(1, e^{iπ/4}).
    T,
    /// X rotation.
    Rx(f64),
    /// Y rotation.
    Ry(f64),
    /// Z rotation.
    Rz(f64),
    /// Phase shift diag(1, e^{iθ}).
    Ph(f64),
    /// Controlled NOT.
    Cnot,
    /// Controlled Z.
    Csign,
    /// SWAP.
    Swap,
    /// iSWAP.
    ISwap,
    /// Toffoli.
    Ccnot,
    /// The wrapped gate controlled on one extra leading qubit.
    Controlled(Box<TargetGate>),
    /// Anonymous gate defined by its unitary.
    Matrix {
        /// Number of qubits the matrix acts on.
        arity: usize,
        /// The `2^arity × 2^arity` unitary.
        matrix: Array2<Complex64>,
    },
}

impl TargetGate {
    /// Create a controlled version of `gate`.
    pub fn controlled(gate: TargetGate) -> Self {
        TargetGate::Controlled(Box::new(gate))
    }

    /// Get the engine opcode of this gate.
    pub fn opcode(&self) -> Cow<'static, str> {
        let name = match self {
            TargetGate::I => "I",
            TargetGate::H => "H",
            TargetGate::X => "X",
            TargetGate::Y => "Y",
            TargetGate::Z => "Z",
            TargetGate::S => "S",
            TargetGate::T => "T",
            TargetGate::Rx(_) => "RX",
            TargetGate::Ry(_) => "RY",
            TargetGate::Rz(_) => "RZ",
            TargetGate::Ph(_) => "PH",
            TargetGate::Cnot => "CNOT",
            TargetGate::Csign => "CSIGN",
            TargetGate::Swap => "SWAP",
            TargetGate::ISwap => "ISWAP",
            TargetGate::Ccnot => "CCNOT",
            TargetGate::Controlled(inner) => return Cow::Owned(format!("C-{}", inner.opcode())),
            TargetGate::Matrix { .. } => "Gate",
        };
        Cow::Borrowed(name)
    }

    /// Get the number of qubits this gate acts on.
    pub fn arity(&self) -> usize {
        match self {
            TargetGate::I
            | TargetGate::H
            | TargetGate::X
            | TargetGate::Y
            | TargetGate::Z
            | TargetGate::S
            | TargetGate::T
            | TargetGate::Rx(_)
            | TargetGate::Ry(_)
            | TargetGate::Rz(_)
            | TargetGate::Ph(_) => 1,
            TargetGate::Cnot | TargetGate::Csign | TargetGate::Swap | TargetGate::ISwap => 2,
            TargetGate::Ccnot => 3,
            TargetGate::Controlled(inner) => inner.arity() + 1,
            TargetGate::Matrix { arity, .. } => *arity,
        }
    }

    /// Get the rotation angle, if this is a parametrized gate.
    pub fn angle(&self) -> Option<f64> {
        match self {
            TargetGate::Rx(t) | TargetGate::Ry(t) | TargetGate::Rz(t) | TargetGate::Ph(t) => {
                Some(*t)
            }
            TargetGate::Controlled(inner) => inner.angle(),
            _ => None,
        }
    }

    /// Compute the unitary matrix of this gate.
    #[allow(clippy::many_single_char_names)]
    pub fn matrix(&self) -> Array2<Complex64> {
        let h = Complex64::new(std::f64::consts::FRAC_1_SQRT_2, 0.0);
        match self {
            TargetGate::I => array![[ONE, ZERO], [ZERO, ONE]],
            TargetGate::H => array![[h, h], [h, -h]],
            TargetGate::X => array![[ZERO, ONE], [ONE, ZERO]],
            TargetGate::Y => array![[ZERO, -I], [I, ZERO]],
            TargetGate::Z => array![[ONE, ZERO], [ZERO, -ONE]],
            TargetGate::S => array![[ONE, ZERO], [ZERO, I]],
            TargetGate::T => array![
                [ONE, ZERO],
                [ZERO, Complex64::from_polar(1.0, std::f64::consts::FRAC_PI_4)]
            ],
            TargetGate::Rx(theta) => {
                let (s, c) = (theta / 2.0).sin_cos();
                array![
                    [Complex64::new(c, 0.0), Complex64::new(0.0, -s)],
                    [Complex64::new(0.0, -s), Complex64::new(c, 0.0)]
                ]
            }
            TargetGate::Ry(theta) => {
                let (s, c) = (theta / 2.0).sin_cos();
                array![
                    [Complex64::new(c, 0.0), Complex64::new(-s, 0.0)],
                    [Complex64::new(s, 0.0), Complex64::new(c, 0.0)]
                ]
            }
            TargetGate::Rz(theta) => array![
                [Complex64::from_polar(1.0, -theta / 2.0), ZERO],
                [ZERO, Complex64::from_polar(1.0, theta / 2.0)]
            ],
            TargetGate::Ph(theta) => {
                array![[ONE, ZERO], [ZERO, Complex64::from_polar(1.0, *theta)]]
            }
            TargetGate::Cnot => controlled_matrix(&TargetGate::X.matrix()),
            TargetGate::Csign => controlled_matrix(&TargetGate::Z.matrix()),
            TargetGate::Swap => array![
                [ONE, ZERO, ZERO, ZERO],
                [ZERO, ZERO, ONE, ZERO],
                [ZERO, ONE, ZERO, ZERO],
                [ZERO, ZERO, ZERO, ONE]
            ],
            TargetGate::ISwap => array![
                [ONE, ZERO, ZERO, ZERO],
                [ZERO, ZERO, I, ZERO],
                [ZERO, I, ZERO, ZERO],
                [ZERO, ZERO, ZERO, ONE]
            ],
            TargetGate::Ccnot => controlled_matrix(&TargetGate::Cnot.matrix()),
            TargetGate::Controlled(inner) => controlled_matrix(&inner.matrix()),
            TargetGate::Matrix { matrix, .. } => matrix.clone(),
        }
    }
}

/// Block-diagonal `[[1, 0], [0, U]]` with the control as the leading qubit.
fn controlled_matrix(inner: &Array2<Complex64>) -> Array2<Complex64> {
    let n = inner.nrows();
    let mut out = Array2::zeros((2 * n, 2 * n));
    for i in 0..n {
        out[[i, i]] = ONE;
    }
    out.slice_mut(ndarray::s![n.., n..]).assign(inner);
    out
}

impl fmt::Display for TargetGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.angle() {
            Some(angle) => write!(f, "{}({angle})", self.opcode()),
            None => write!(f, "{}", self.opcode()),
        }
    }
}

/// One `[opcode, qubit...]` application.
#[derive(Debug, Clone, PartialEq)]
pub struct GateApplication {
    /// The applied gate.
    pub gate: TargetGate,
    /// Ordered qubit operands.
    pub qubits: Vec<usize>,
}

impl GateApplication {
    /// Create a new gate application.
    pub fn new(gate: TargetGate, qubits: Vec<usize>) -> Self {
        Self { gate, qubits }
    }

    /// Get the engine opcode of the applied gate.
    pub fn opcode(&self) -> Cow<'static, str> {
        self.gate.opcode()
    }
}

impl fmt::Display for GateApplication {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.gate)?;
        for q in &self.qubits {
            write!(f, " q[{q}]")?;
        }
        Ok(())
    }
}

/// One instruction of a target program.
#[derive(Debug, Clone, PartialEq)]
pub enum TargetInstruction {
    /// Apply a gate.
    Apply(GateApplication),
    /// Reset the listed qubits to |0⟩.
    Reset(Vec<usize>),
}

impl TargetInstruction {
    /// Get the gate application, if this is one.
    pub fn as_application(&self) -> Option<&GateApplication> {
        match self {
            TargetInstruction::Apply(app) => Some(app),
            TargetInstruction::Reset(_) => None,
        }
    }
}

/// A finalized target program.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetProgram {
    number_qubits: usize,
    instructions: Vec<TargetInstruction>,
}

impl TargetProgram {
    /// Size of the allocated qubit register.
    pub fn number_qubits(&self) -> usize {
        self.number_qubits
    }

    /// The ordered instructions.
    pub fn instructions(&self) -> &[TargetInstruction] {
        &self.instructions
    }

    /// Number of instructions.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Check if the program has no instructions.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Iterate over the gate applications, skipping resets.
    pub fn applications(&self) -> impl Iterator<Item = &GateApplication> {
        self.instructions
            .iter()
            .filter_map(TargetInstruction::as_application)
    }

    /// Count the applications of gates with the given opcode.
    pub fn count_opcode(&self, opcode: &str) -> usize {
        self.applications().filter(|a| a.opcode() == opcode).count()
    }
}

/// Accumulates instructions on a fixed-size qubit register.
#[derive(Debug)]
pub struct ProgramBuilder {
    number_qubits: usize,
    instructions: Vec<TargetInstruction>,
}

impl ProgramBuilder {
    /// Allocate a register of `number_qubits` qubits.
    pub fn qalloc(number_qubits: usize) -> Self {
        Self {
            number_qubits,
            instructions: vec![],
        }
    }

    /// Size of the allocated register.
    pub fn number_qubits(&self) -> usize {
        self.number_qubits
    }

    fn check_qubits(&self, qubits: &[usize]) -> TranslateResult<()> {
        match qubits.iter().find(|&&q| q >= self.number_qubits) {
            Some(&qubit) => Err(TranslateError::QubitOutOfRange {
                qubit,
                number_qubits: self.number_qubits,
            }),
            None => Ok(()),
        }
    }

    /// Append a gate application.
    pub fn apply(&mut self, application: GateApplication) -> TranslateResult<()> {
        self.check_qubits(&application.qubits)?;
        self.instructions
            .push(TargetInstruction::Apply(application));
        Ok(())
    }

    /// Append a reset of `qubits`.
    pub fn reset(&mut self, qubits: Vec<usize>) -> TranslateResult<()> {
        self.check_qubits(&qubits)?;
        self.instructions.push(TargetInstruction::Reset(qubits));
        Ok(())
    }

    /// Freeze the accumulated instructions into a program.
    pub fn finalize(self) -> TargetProgram {
        TargetProgram {
            number_qubits: self.number_qubits,
            instructions: self.instructions,
        }
    }
}
