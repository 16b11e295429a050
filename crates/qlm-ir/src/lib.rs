//! Tagged Quantum Circuit Intermediate Representation
//!
//! This crate provides the portable circuit representation consumed by the
//! qlm translator: a flat, ordered list of typed [`Operation`]s over indexed
//! qubits, interleaved with classical register declarations.
//!
//! # Core Components
//!
//! - **Parameters**: [`CalculatorFloat`] holds either a literal or a symbolic
//!   expression resolved at translation time
//! - **Operations**: [`Operation`] is a closed enum; every variant exposes
//!   classification tags, qubits by [`QubitRole`] and named parameters
//! - **Definitions**: [`Definition`] views of the register declarations
//! - **Circuit**: [`Circuit`] with register validation
//!
//! # Example
//!
//! ```rust
//! use qlm_ir::{Circuit, Operation};
//!
//! let mut circuit = Circuit::new();
//! circuit += Operation::definition_bit("ro", 2, true);
//! circuit += Operation::Hadamard { qubit: 0 };
//! circuit += Operation::CNOT { control: 0, target: 1 };
//! circuit += Operation::measure_qubit(0, "ro", 0);
//! circuit += Operation::measure_qubit(1, "ro", 1);
//!
//! assert!(circuit.validate().is_ok());
//! assert_eq!(circuit.number_of_qubits(), 2);
//! ```

pub mod circuit;
pub mod definition;
pub mod error;
pub mod operation;
pub mod parameter;
pub mod unitary;

pub use circuit::Circuit;
pub use definition::{Definition, RegisterKind};
pub use error::{IrError, IrResult};
pub use operation::{InvolvedQubits, Operation, QubitRole};
pub use parameter::CalculatorFloat;
