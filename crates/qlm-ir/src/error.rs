//! Error types for the IR crate.

use thiserror::Error;

use crate::definition::RegisterKind;

/// Errors that can occur in IR operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// A register name was declared twice for the same value kind.
    #[error("{kind} register '{name}' is declared more than once")]
    DuplicateRegister {
        /// The register name.
        name: String,
        /// The value kind of both declarations.
        kind: RegisterKind,
    },

    /// A measurement refers to a register that has not been declared yet.
    #[error("{kind} register '{name}' is used before it is declared")]
    UndefinedRegister {
        /// The register name.
        name: String,
        /// The value kind the measurement expects.
        kind: RegisterKind,
    },

    /// A measurement writes past the end of its register.
    #[error("Readout index {index} is out of range for register '{name}' of length {length}")]
    ReadoutIndexOutOfRange {
        /// The register name.
        name: String,
        /// The offending index.
        index: usize,
        /// Declared register length.
        length: usize,
    },

    /// Wrong number of resolved parameters passed to a unitary generator.
    #[error("Operation '{operation}' expects {expected} parameters, got {got}")]
    ParameterCount {
        /// Name of the operation.
        operation: &'static str,
        /// Expected number of parameters.
        expected: usize,
        /// Actual number of parameters provided.
        got: usize,
    },

    /// A unitary matrix was requested from an operation that has none.
    #[error("Operation '{0}' does not provide a unitary matrix")]
    NotAGenericGate(&'static str),
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
