//! Classical register declarations.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The value kind stored in a classical register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RegisterKind {
    /// Boolean readout values.
    Bit,
    /// Real values.
    Float,
    /// Complex values.
    Complex,
}

impl RegisterKind {
    /// The classification tag of the matching definition operation.
    pub fn definition_tag(self) -> &'static str {
        match self {
            RegisterKind::Bit => "DefinitionBit",
            RegisterKind::Float => "DefinitionFloat",
            RegisterKind::Complex => "DefinitionComplex",
        }
    }
}

impl fmt::Display for RegisterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegisterKind::Bit => write!(f, "bit"),
            RegisterKind::Float => write!(f, "float"),
            RegisterKind::Complex => write!(f, "complex"),
        }
    }
}

/// A borrowed view of one `Definition*` operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Definition<'a> {
    /// Register name, unique within its kind.
    pub name: &'a str,
    /// Value kind.
    pub kind: RegisterKind,
    /// Number of entries per shot.
    pub length: usize,
    /// Whether the register is surfaced as backend output.
    pub is_output: bool,
}
