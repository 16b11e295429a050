//! Classical register values and backend output.
//!
//! Every shot produces one [`RegisterValue`] row per declared register.
//! Rows of output registers accumulate in [`OutputRegisters`], one map per
//! value kind, keyed by register name.

use num_complex::Complex64;
use qlm_ir::{Definition, RegisterKind};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// One row of a classical register.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RegisterValue {
    /// Bit register entries.
    Bits(Vec<bool>),
    /// Float register entries.
    Floats(Vec<f64>),
    /// Complex register entries.
    Complexes(Vec<Complex64>),
}

impl RegisterValue {
    /// A row of `length` default entries (`false`, `0.0` or `0 + 0i`).
    pub fn zeroed(kind: RegisterKind, length: usize) -> Self {
        match kind {
            RegisterKind::Bit => RegisterValue::Bits(vec![false; length]),
            RegisterKind::Float => RegisterValue::Floats(vec![0.0; length]),
            RegisterKind::Complex => {
                RegisterValue::Complexes(vec![Complex64::new(0.0, 0.0); length])
            }
        }
    }

    /// The value kind of this row.
    pub fn kind(&self) -> RegisterKind {
        match self {
            RegisterValue::Bits(_) => RegisterKind::Bit,
            RegisterValue::Floats(_) => RegisterKind::Float,
            RegisterValue::Complexes(_) => RegisterKind::Complex,
        }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        match self {
            RegisterValue::Bits(v) => v.len(),
            RegisterValue::Floats(v) => v.len(),
            RegisterValue::Complexes(v) => v.len(),
        }
    }

    /// Check if the row has no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Set a bit entry. Returns `false` if this is not an in-range bit row.
    pub fn set_bit(&mut self, index: usize, value: bool) -> bool {
        match self {
            RegisterValue::Bits(bits) => match bits.get_mut(index) {
                Some(bit) => {
                    *bit = value;
                    true
                }
                None => false,
            },
            _ => false,
        }
    }

    /// Set a float entry. Returns `false` if this is not an in-range float row.
    pub fn set_float(&mut self, index: usize, value: f64) -> bool {
        match self {
            RegisterValue::Floats(floats) => match floats.get_mut(index) {
                Some(entry) => {
                    *entry = value;
                    true
                }
                None => false,
            },
            _ => false,
        }
    }
}

/// Accumulated output registers: for each name, one row per shot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputRegisters {
    /// Bit register outputs.
    pub bits: FxHashMap<String, Vec<Vec<bool>>>,
    /// Float register outputs.
    pub floats: FxHashMap<String, Vec<Vec<f64>>>,
    /// Complex register outputs.
    pub complexes: FxHashMap<String, Vec<Vec<Complex64>>>,
}

impl OutputRegisters {
    /// Create empty outputs.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty row list for every output definition.
    pub fn from_definitions(definitions: &[Definition<'_>]) -> Self {
        let mut out = Self::default();
        for def in definitions.iter().filter(|d| d.is_output) {
            let name = def.name.to_string();
            match def.kind {
                RegisterKind::Bit => {
                    out.bits.insert(name, Vec::new());
                }
                RegisterKind::Float => {
                    out.floats.insert(name, Vec::new());
                }
                RegisterKind::Complex => {
                    out.complexes.insert(name, Vec::new());
                }
            }
        }
        out
    }

    /// Append one row to the output register `name` of the row's kind.
    ///
    /// Rows for registers that are not surfaced as output are dropped.
    pub fn push_row(&mut self, name: &str, row: RegisterValue) {
        match row {
            RegisterValue::Bits(v) => {
                if let Some(rows) = self.bits.get_mut(name) {
                    rows.push(v);
                }
            }
            RegisterValue::Floats(v) => {
                if let Some(rows) = self.floats.get_mut(name) {
                    rows.push(v);
                }
            }
            RegisterValue::Complexes(v) => {
                if let Some(rows) = self.complexes.get_mut(name) {
                    rows.push(v);
                }
            }
        }
    }

    /// Merge `other` into `self` by key; registers in `other` replace
    /// registers of the same name and kind.
    pub fn merge(&mut self, other: OutputRegisters) {
        self.bits.extend(other.bits);
        self.floats.extend(other.floats);
        self.complexes.extend(other.complexes);
    }

    /// Check if no register is present.
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty() && self.floats.is_empty() && self.complexes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn def(name: &str, kind: RegisterKind, length: usize, is_output: bool) -> Definition<'_> {
        Definition {
            name,
            kind,
            length,
            is_output,
        }
    }

    #[test]
    fn test_zeroed_rows() {
        assert_eq!(
            RegisterValue::zeroed(RegisterKind::Bit, 2),
            RegisterValue::Bits(vec![false, false])
        );
        let floats = RegisterValue::zeroed(RegisterKind::Float, 3);
        assert_eq!(floats.kind(), RegisterKind::Float);
        assert_eq!(floats.len(), 3);
        assert!(RegisterValue::zeroed(RegisterKind::Complex, 0).is_empty());
    }

    #[test]
    fn test_set_entries() {
        let mut bits = RegisterValue::zeroed(RegisterKind::Bit, 2);
        assert!(bits.set_bit(1, true));
        assert!(!bits.set_bit(2, true));
        assert!(!bits.set_float(0, 1.0));
        assert_eq!(bits, RegisterValue::Bits(vec![false, true]));

        let mut floats = RegisterValue::zeroed(RegisterKind::Float, 1);
        assert!(floats.set_float(0, 0.25));
        assert_eq!(floats, RegisterValue::Floats(vec![0.25]));
    }

    #[test]
    fn test_only_output_definitions_are_surfaced() {
        let defs = [
            def("ro", RegisterKind::Bit, 2, true),
            def("scratch", RegisterKind::Bit, 1, false),
            def("ro", RegisterKind::Float, 1, true),
        ];
        let mut out = OutputRegisters::from_definitions(&defs);
        assert_eq!(out.bits.len(), 1);
        assert_eq!(out.floats.len(), 1);
        assert!(out.complexes.is_empty());

        out.push_row("ro", RegisterValue::Bits(vec![true, false]));
        out.push_row("scratch", RegisterValue::Bits(vec![true]));
        out.push_row("ro", RegisterValue::Floats(vec![0.5]));
        assert_eq!(out.bits["ro"], vec![vec![true, false]]);
        assert!(!out.bits.contains_key("scratch"));
        assert_eq!(out.floats["ro"], vec![vec![0.5]]);
    }

    #[test]
    fn test_merge_later_wins() {
        let mut first = OutputRegisters::new();
        first.bits.insert("a".into(), vec![vec![false]]);
        first.bits.insert("b".into(), vec![vec![false]]);

        let mut second = OutputRegisters::new();
        second.bits.insert("b".into(), vec![vec![true], vec![true]]);
        second.floats.insert("c".into(), vec![vec![1.0]]);

        first.merge(second);
        assert_eq!(first.bits["a"], vec![vec![false]]);
        assert_eq!(first.bits["b"], vec![vec![true], vec![true]]);
        assert_eq!(first.floats["c"], vec![vec![1.0]]);
        assert!(!first.is_empty());
    }
}
