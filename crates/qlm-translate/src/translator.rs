//! Whole-circuit translation.

use qlm_ir::{Circuit, Operation};
use tracing::debug;

use crate::dispatch::call_operation;
use crate::error::TranslateResult;
use crate::resolver::{ParameterResolver, resolve_parameter};
use crate::target::{GateApplication, ProgramBuilder, TargetGate, TargetProgram};

/// Translates circuits into target programs on a fixed-size register.
///
/// ```rust
/// use qlm_ir::{Circuit, Operation};
/// use qlm_translate::CircuitTranslator;
///
/// let mut circuit = Circuit::new();
/// circuit += Operation::Hadamard { qubit: 0 };
///
/// let program = CircuitTranslator::new(3)
///     .with_identity_padding(true)
///     .translate(&circuit)
///     .unwrap();
///
/// // H on qubit 0, then I on qubits 1 and 2
/// assert_eq!(program.len(), 3);
/// assert_eq!(program.count_opcode("I"), 2);
/// ```
#[derive(Clone, Copy)]
pub struct CircuitTranslator<'r> {
    number_qubits: usize,
    identity_padding: bool,
    resolver: Option<&'r dyn ParameterResolver>,
}

impl<'r> CircuitTranslator<'r> {
    /// Create a translator for a register of `number_qubits` qubits.
    pub fn new(number_qubits: usize) -> Self {
        Self {
            number_qubits,
            identity_padding: false,
            resolver: None,
        }
    }

    /// Emit an identity on every qubit a gate application leaves idle.
    pub fn with_identity_padding(mut self, enabled: bool) -> Self {
        self.identity_padding = enabled;
        self
    }

    /// Resolve symbolic parameters through `resolver`.
    pub fn with_resolver(mut self, resolver: &'r dyn ParameterResolver) -> Self {
        self.resolver = Some(resolver);
        self
    }

    /// Size of the register programs are allocated on.
    pub fn number_qubits(&self) -> usize {
        self.number_qubits
    }

    /// Translate a whole circuit.
    ///
    /// Any error aborts the translation; no partial program is returned.
    pub fn translate(&self, circuit: &Circuit) -> TranslateResult<TargetProgram> {
        let mut builder = ProgramBuilder::qalloc(self.number_qubits);
        self.translate_into(circuit, &mut builder)?;
        let program = builder.finalize();
        debug!(
            number_qubits = self.number_qubits,
            operations = circuit.len(),
            instructions = program.len(),
            "Translated circuit"
        );
        Ok(program)
    }

    fn translate_into(
        &self,
        circuit: &Circuit,
        builder: &mut ProgramBuilder,
    ) -> TranslateResult<()> {
        for operation in circuit {
            match operation {
                Operation::PragmaActiveReset { qubit } => builder.reset(vec![*qubit])?,
                Operation::PragmaLoop {
                    repetitions,
                    circuit: body,
                } => {
                    let count = repetition_count(resolve_parameter(repetitions, self.resolver)?);
                    for _ in 0..count {
                        self.translate_into(body, builder)?;
                    }
                }
                _ => self.translate_operation(operation, builder)?,
            }
        }
        Ok(())
    }

    fn translate_operation(
        &self,
        operation: &Operation,
        builder: &mut ProgramBuilder,
    ) -> TranslateResult<()> {
        let Some(application) = call_operation(operation, self.resolver)? else {
            return Ok(());
        };
        let idle: Vec<usize> = if self.identity_padding {
            (0..self.number_qubits)
                .filter(|q| !application.qubits.contains(q))
                .collect()
        } else {
            vec![]
        };
        builder.apply(application)?;
        for qubit in idle {
            builder.apply(GateApplication::new(TargetGate::I, vec![qubit]))?;
        }
        Ok(())
    }
}

/// Number of unrolled iterations for a loop count.
///
/// Fractional counts truncate toward zero; negative and non-finite counts
/// give zero iterations.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn repetition_count(value: f64) -> usize {
    if value.is_finite() && value > 0.0 {
        value.trunc() as usize
    } else {
        0
    }
}

/// Translate `circuit` on `number_qubits` qubits with literal parameters only.
pub fn call_circuit(circuit: &Circuit, number_qubits: usize) -> TranslateResult<TargetProgram> {
    CircuitTranslator::new(number_qubits).translate(circuit)
}
