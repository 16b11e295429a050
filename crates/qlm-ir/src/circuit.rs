//! Ordered operation sequences.

use std::collections::BTreeSet;
use std::ops::{Add, AddAssign};

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::definition::{Definition, RegisterKind};
use crate::error::{IrError, IrResult};
use crate::operation::{InvolvedQubits, Operation};

/// A quantum circuit: an ordered list of operations with interleaved
/// register definitions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Circuit {
    operations: Vec<Operation>,
}

impl Circuit {
    /// Create a new empty circuit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an operation.
    pub fn add(&mut self, operation: Operation) -> &mut Self {
        self.operations.push(operation);
        self
    }

    /// Number of top-level operations.
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Check if the circuit has no operations.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Get the operation at `index`.
    pub fn get(&self, index: usize) -> Option<&Operation> {
        self.operations.get(index)
    }

    /// Iterate over the top-level operations in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Operation> {
        self.operations.iter()
    }

    /// Get the top-level operations carrying `tag`.
    pub fn filter_by_tag(&self, tag: &str) -> Vec<&Operation> {
        self.operations.iter().filter(|op| op.has_tag(tag)).collect()
    }

    /// Get all register declarations in declaration order.
    pub fn definitions(&self) -> Vec<Definition<'_>> {
        self.operations
            .iter()
            .filter_map(Operation::as_definition)
            .collect()
    }

    /// Get the union of the qubits touched by every operation.
    pub fn involved_qubits(&self) -> InvolvedQubits {
        let mut qubits = BTreeSet::new();
        for op in &self.operations {
            match op.involved_qubits() {
                InvolvedQubits::All => return InvolvedQubits::All,
                InvolvedQubits::Set(set) => qubits.extend(set),
                InvolvedQubits::None => {}
            }
        }
        if qubits.is_empty() {
            InvolvedQubits::None
        } else {
            InvolvedQubits::Set(qubits)
        }
    }

    /// Highest qubit index used plus one, including loop bodies.
    ///
    /// Operations acting on all qubits do not contribute.
    pub fn number_of_qubits(&self) -> usize {
        let mut highest = None;
        for op in &self.operations {
            let max = match op.involved_qubits() {
                InvolvedQubits::Set(set) => set.last().copied(),
                InvolvedQubits::All | InvolvedQubits::None => None,
            };
            highest = highest.max(max);
        }
        highest.map_or(0, |q| q + 1)
    }

    /// Check register declarations and measurement targets.
    ///
    /// Register names must be unique per kind, and every `MeasureQubit`
    /// must write inside a bit register declared before it.
    pub fn validate(&self) -> IrResult<()> {
        let mut declared: FxHashMap<(RegisterKind, &str), usize> = FxHashMap::default();
        self.validate_into(&mut declared)
    }

    fn validate_into<'a>(
        &'a self,
        declared: &mut FxHashMap<(RegisterKind, &'a str), usize>,
    ) -> IrResult<()> {
        for op in &self.operations {
            if let Some(def) = op.as_definition() {
                if declared.insert((def.kind, def.name), def.length).is_some() {
                    return Err(IrError::DuplicateRegister {
                        name: def.name.to_string(),
                        kind: def.kind,
                    });
                }
                continue;
            }
            match op {
                Operation::MeasureQubit {
                    readout,
                    readout_index,
                    ..
                } => {
                    let length = declared
                        .get(&(RegisterKind::Bit, readout.as_str()))
                        .copied()
                        .ok_or_else(|| IrError::UndefinedRegister {
                            name: readout.clone(),
                            kind: RegisterKind::Bit,
                        })?;
                    if *readout_index >= length {
                        return Err(IrError::ReadoutIndexOutOfRange {
                            name: readout.clone(),
                            index: *readout_index,
                            length,
                        });
                    }
                }
                Operation::PragmaLoop { circuit, .. } => circuit.validate_into(declared)?,
                _ => {}
            }
        }
        Ok(())
    }
}

impl AddAssign<Operation> for Circuit {
    fn add_assign(&mut self, rhs: Operation) {
        self.operations.push(rhs);
    }
}

impl AddAssign<Circuit> for Circuit {
    fn add_assign(&mut self, rhs: Circuit) {
        self.operations.extend(rhs.operations);
    }
}

impl Add<Circuit> for Circuit {
    type Output = Circuit;

    fn add(mut self, rhs: Circuit) -> Self::Output {
        self += rhs;
        self
    }
}

impl Add<&Circuit> for &Circuit {
    type Output = Circuit;

    fn add(self, rhs: &Circuit) -> Self::Output {
        self.clone() + rhs.clone()
    }
}

impl FromIterator<Operation> for Circuit {
    fn from_iter<I: IntoIterator<Item = Operation>>(iter: I) -> Self {
        Self {
            operations: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Circuit {
    type Item = &'a Operation;
    type IntoIter = std::slice::Iter<'a, Operation>;

    fn into_iter(self) -> Self::IntoIter {
        self.operations.iter()
    }
}

impl IntoIterator for Circuit {
    type Item = Operation;
    type IntoIter = std::vec::IntoIter<Operation>;

    fn into_iter(self) -> Self::IntoIter {
        self.operations.into_iter()
    }
}
