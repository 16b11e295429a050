//! Circuit Translation to Target Engine Programs
//!
//! This crate lowers a [`qlm_ir::Circuit`] into a [`TargetProgram`] for the
//! execution engine. It is a structural pass: every supported operation maps
//! onto exactly one target instruction, control pragmas are expanded, and
//! nothing is optimized or decomposed.
//!
//! # Architecture
//!
//! ```text
//! Circuit
//!    │
//!    ▼
//! CircuitTranslator ── reset pragma ──► native reset
//!    │               └─ loop pragma ──► unrolled body
//!    ▼
//! call_operation ◄── gate table (named gates)
//!    │           ◄── ParameterResolver (symbolic parameters)
//!    ▼
//! TargetProgram
//! ```
//!
//! # Example
//!
//! ```rust
//! use qlm_ir::{CalculatorFloat, Circuit, Operation};
//! use qlm_translate::{CircuitTranslator, TargetGate, VariableMap};
//!
//! let mut circuit = Circuit::new();
//! circuit += Operation::RotateZ { qubit: 0, theta: CalculatorFloat::symbol("theta") };
//! circuit += Operation::CNOT { control: 0, target: 1 };
//!
//! let vars = VariableMap::new().with("theta", 0.5);
//! let program = CircuitTranslator::new(2)
//!     .with_resolver(&vars)
//!     .translate(&circuit)
//!     .unwrap();
//!
//! let first = program.applications().next().unwrap();
//! assert_eq!(first.gate, TargetGate::Rz(0.5));
//! assert_eq!(program.count_opcode("CNOT"), 1);
//! ```

pub mod dispatch;
pub mod error;
pub mod gate_table;
pub mod resolver;
pub mod target;
pub mod translator;

pub use dispatch::{OperationKind, call_operation, classify};
pub use error::{ResolveError, TranslateError, TranslateResult};
pub use gate_table::GateSpec;
pub use resolver::{ParameterResolver, VariableMap, resolve_parameter};
pub use target::{GateApplication, ProgramBuilder, TargetGate, TargetInstruction, TargetProgram};
pub use translator::{CircuitTranslator, call_circuit};
