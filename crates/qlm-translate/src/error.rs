//! Error types for circuit translation.

use qlm_ir::IrError;
use thiserror::Error;

/// Errors reported by a [`ParameterResolver`](crate::ParameterResolver).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ResolveError {
    /// The expression references a symbol with no known value.
    #[error("Unknown symbol '{0}'")]
    UnknownSymbol(String),

    /// The expression could not be evaluated.
    #[error("Cannot evaluate '{expression}': {reason}")]
    Evaluation {
        /// The expression as stored in the operation.
        expression: String,
        /// Evaluator-specific explanation.
        reason: String,
    },
}

/// Errors that abort a translation.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TranslateError {
    /// The operation kind has no lowering for this target.
    #[error("Operation not supported by this target (tags: {})", tags.join(", "))]
    UnsupportedOperation {
        /// The full tag set of the offending operation.
        tags: Vec<String>,
    },

    /// A symbolic parameter was found but no resolver was supplied.
    #[error("Parameter '{expression}' is symbolic and no resolver was supplied")]
    UnresolvedParameter {
        /// The unresolved expression.
        expression: String,
    },

    /// The resolver failed on a symbolic parameter.
    #[error("Parameter resolution failed: {0}")]
    Resolve(#[from] ResolveError),

    /// An operand lies outside the allocated register.
    #[error("Qubit {qubit} is out of range for a register of {number_qubits} qubits")]
    QubitOutOfRange {
        /// The offending qubit index.
        qubit: usize,
        /// Size of the allocated register.
        number_qubits: usize,
    },

    /// A gate table entry names an operand the operation does not have.
    #[error("Operation '{operation}' has no operand '{operand}'")]
    MissingOperand {
        /// Name of the operation.
        operation: &'static str,
        /// The missing qubit role or parameter name.
        operand: String,
    },

    /// Computing a generic gate's unitary failed.
    #[error("IR error: {0}")]
    Ir(#[from] IrError),
}

impl TranslateError {
    pub(crate) fn unsupported(tags: &[&str]) -> Self {
        TranslateError::UnsupportedOperation {
            tags: tags.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Result type for translation.
pub type TranslateResult<T> = Result<T, TranslateError>;
