//! Measurement schemes.
//!
//! A measurement bundles an optional constant circuit, run in front of every
//! measurement circuit, with a rule turning the collected registers into
//! named expectation values.

use qlm_ir::Circuit;
use rustc_hash::FxHashMap;

use crate::error::{BackendError, BackendResult};
use crate::registers::OutputRegisters;

/// A set of circuits whose combined output is evaluated together.
pub trait Measurement {
    /// Circuit prepended to every measurement circuit.
    fn constant_circuit(&self) -> Option<&Circuit>;

    /// The measurement circuits, run in order.
    fn circuits(&self) -> &[Circuit];

    /// Evaluate the merged output registers.
    ///
    /// Returns `None` for schemes that only collect registers.
    fn evaluate(&self, registers: &OutputRegisters)
    -> BackendResult<Option<FxHashMap<String, f64>>>;
}

/// Collects raw registers without post-processing.
#[derive(Debug, Clone, Default)]
pub struct ClassicalRegister {
    constant_circuit: Option<Circuit>,
    circuits: Vec<Circuit>,
}

impl ClassicalRegister {
    /// Create a register measurement.
    pub fn new(constant_circuit: Option<Circuit>, circuits: Vec<Circuit>) -> Self {
        Self {
            constant_circuit,
            circuits,
        }
    }
}

impl Measurement for ClassicalRegister {
    fn constant_circuit(&self) -> Option<&Circuit> {
        self.constant_circuit.as_ref()
    }

    fn circuits(&self) -> &[Circuit] {
        &self.circuits
    }

    fn evaluate(
        &self,
        _registers: &OutputRegisters,
    ) -> BackendResult<Option<FxHashMap<String, f64>>> {
        Ok(None)
    }
}

/// Which Pauli-Z products to extract and how to combine them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PauliZProductInput {
    number_qubits: usize,
    /// readout register -> product index -> register entries in the product
    pauli_product_qubit_masks: FxHashMap<String, FxHashMap<usize, Vec<usize>>>,
    number_pauli_products: usize,
    /// output name -> product index -> coefficient
    linear_exp_vals: FxHashMap<String, FxHashMap<usize, f64>>,
}

impl PauliZProductInput {
    /// Create an empty input for a register of `number_qubits` qubits.
    pub fn new(number_qubits: usize) -> Self {
        Self {
            number_qubits,
            ..Self::default()
        }
    }

    /// Number of qubits the products are measured on.
    pub fn number_qubits(&self) -> usize {
        self.number_qubits
    }

    /// Number of registered products.
    pub fn number_pauli_products(&self) -> usize {
        self.number_pauli_products
    }

    /// Register the Z product over `entries` of the bit register `readout`.
    ///
    /// Returns the product index. Registering the same product twice
    /// returns the existing index.
    pub fn add_pauli_product(
        &mut self,
        readout: impl Into<String>,
        entries: Vec<usize>,
    ) -> BackendResult<usize> {
        if let Some(&q) = entries.iter().find(|&&q| q >= self.number_qubits) {
            return Err(BackendError::Evaluation(format!(
                "product entry {q} exceeds the {} measured qubits",
                self.number_qubits
            )));
        }
        let masks = self
            .pauli_product_qubit_masks
            .entry(readout.into())
            .or_default();
        if let Some((&index, _)) = masks.iter().find(|(_, existing)| **existing == entries) {
            return Ok(index);
        }
        let index = self.number_pauli_products;
        masks.insert(index, entries);
        self.number_pauli_products += 1;
        Ok(index)
    }

    /// Define the output `name` as a linear combination of products.
    pub fn add_linear_exp_val(
        &mut self,
        name: impl Into<String>,
        coefficients: FxHashMap<usize, f64>,
    ) -> BackendResult<()> {
        if let Some(&index) = coefficients
            .keys()
            .find(|&&i| i >= self.number_pauli_products)
        {
            return Err(BackendError::Evaluation(format!(
                "product index {index} is not registered"
            )));
        }
        self.linear_exp_vals.insert(name.into(), coefficients);
        Ok(())
    }
}

/// Expectation values of Pauli-Z products estimated from bit readouts.
#[derive(Debug, Clone)]
pub struct PauliZProduct {
    constant_circuit: Option<Circuit>,
    circuits: Vec<Circuit>,
    input: PauliZProductInput,
}

impl PauliZProduct {
    /// Create a Pauli-Z product measurement.
    pub fn new(
        constant_circuit: Option<Circuit>,
        circuits: Vec<Circuit>,
        input: PauliZProductInput,
    ) -> Self {
        Self {
            constant_circuit,
            circuits,
            input,
        }
    }

    /// The product and combination definitions.
    pub fn input(&self) -> &PauliZProductInput {
        &self.input
    }
}

impl Measurement for PauliZProduct {
    fn constant_circuit(&self) -> Option<&Circuit> {
        self.constant_circuit.as_ref()
    }

    fn circuits(&self) -> &[Circuit] {
        &self.circuits
    }

    fn evaluate(
        &self,
        registers: &OutputRegisters,
    ) -> BackendResult<Option<FxHashMap<String, f64>>> {
        let mut products = vec![0.0; self.input.number_pauli_products];

        for (readout, masks) in &self.input.pauli_product_qubit_masks {
            let rows = registers.bits.get(readout).ok_or_else(|| {
                BackendError::Evaluation(format!("bit register '{readout}' was not measured"))
            })?;
            if rows.is_empty() {
                return Err(BackendError::Evaluation(format!(
                    "bit register '{readout}' has no shots"
                )));
            }
            for (&index, entries) in masks {
                products[index] = z_product(rows, entries)?;
            }
        }

        let results = self
            .input
            .linear_exp_vals
            .iter()
            .map(|(name, coefficients)| {
                let value: f64 = coefficients
                    .iter()
                    .map(|(&index, coefficient)| coefficient * products[index])
                    .sum();
                (name.clone(), value)
            })
            .collect();
        Ok(Some(results))
    }
}

/// Mean of `(-1)^(parity of the selected entries)` over all rows.
#[allow(clippy::cast_precision_loss)]
fn z_product(rows: &[Vec<bool>], entries: &[usize]) -> BackendResult<f64> {
    let mut total = 0.0;
    for row in rows {
        let mut parity = false;
        for &entry in entries {
            let bit = row.get(entry).ok_or_else(|| {
                BackendError::Evaluation(format!(
                    "entry {entry} out of range for a row of length {}",
                    row.len()
                ))
            })?;
            parity ^= *bit;
        }
        total += if parity { -1.0 } else { 1.0 };
    }
    Ok(total / rows.len() as f64)
}
