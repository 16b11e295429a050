//! Execution backend.
//!
//! Runs circuits on an [`Engine`] and folds the returned samples into the
//! circuit's declared output registers:
//!
//! ```text
//!   Circuit ──→ validate ──→ translate ──→ Job ──→ submit ──→ samples
//!      │                                                        │
//!      └── definitions ──→ OutputRegisters ←── fold per sample ─┘
//! ```

use std::fmt;
use std::sync::Arc;

use qlm_hal::{Engine, Job, JobType, Observable, Sample};
use qlm_ir::{Circuit, Definition, Operation, RegisterKind};
use qlm_translate::{CircuitTranslator, TargetProgram, TranslateError, VariableMap};
use rustc_hash::FxHashMap;
use tracing::{debug, info, instrument, warn};

use crate::config::BackendConfig;
use crate::error::{BackendError, BackendResult};
use crate::measurement::Measurement;
use crate::registers::{OutputRegisters, RegisterValue};

/// A recoverable configuration default applied at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendWarning {
    /// OBS was requested without an observable; Z on every qubit is used.
    DefaultObservable,
    /// SAMPLE was requested with an observable, which is ignored.
    ObservableIgnored,
}

impl fmt::Display for BackendWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendWarning::DefaultObservable => {
                write!(f, "OBS job type given without observable matrix, using Z on all qubits")
            }
            BackendWarning::ObservableIgnored => {
                write!(f, "SAMPLE job type given, ignoring the observable matrix")
            }
        }
    }
}

/// One `MeasureQubit` copy from a qubit into a bit register entry.
#[derive(Debug, Clone, Copy)]
struct Readout<'a> {
    qubit: usize,
    register: &'a str,
    index: usize,
}

/// Runs circuits and measurements on an execution engine.
pub struct ExecutionBackend {
    config: BackendConfig,
    job_type: JobType,
    observable: Option<Observable>,
    variables: Option<VariableMap>,
    engine: Arc<dyn Engine>,
    warnings: Vec<BackendWarning>,
}

impl fmt::Debug for ExecutionBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExecutionBackend")
            .field("config", &self.config)
            .field("job_type", &self.job_type)
            .field("engine", &self.engine.name())
            .field("warnings", &self.warnings)
            .finish_non_exhaustive()
    }
}

impl ExecutionBackend {
    /// Create a backend.
    ///
    /// Fails if the configured job type is neither SAMPLE nor OBS, or if the
    /// observable does not fit the register.
    pub fn new(config: BackendConfig, engine: Arc<dyn Engine>) -> BackendResult<Self> {
        config.validate()?;
        let job_type: JobType = config.job_type.parse().map_err(|_| {
            BackendError::InvalidConfiguration(format!(
                "job type '{}' is neither 'SAMPLE' nor 'OBS'",
                config.job_type
            ))
        })?;

        let n = config.number_qubits;
        let mut warnings = Vec::new();
        let observable = match (job_type, &config.observable) {
            (JobType::Sample, None) => None,
            (JobType::Sample, Some(_)) => {
                warnings.push(BackendWarning::ObservableIgnored);
                None
            }
            (JobType::Obs, Some(rows)) => Some(Observable::from_rows(n, rows)),
            (JobType::Obs, None) => {
                warnings.push(BackendWarning::DefaultObservable);
                Some(Observable::pauli_z(n))
            }
        }
        .transpose()
        .map_err(|e| BackendError::InvalidConfiguration(e.to_string()))?;

        for warning in &warnings {
            warn!("{warning}");
        }

        info!(
            "Execution backend on '{}': {} qubits, {} measurements, {}",
            engine.name(),
            n,
            config.number_measurements,
            job_type
        );

        Ok(Self {
            config,
            job_type,
            observable,
            variables: None,
            engine,
            warnings,
        })
    }

    /// Resolve symbolic parameters from `variables` during translation.
    pub fn with_variables(mut self, variables: VariableMap) -> Self {
        self.variables = Some(variables);
        self
    }

    /// The backend configuration.
    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    /// The job type every circuit is submitted with.
    pub fn job_type(&self) -> JobType {
        self.job_type
    }

    /// The observable used for OBS jobs.
    pub fn observable(&self) -> Option<&Observable> {
        self.observable.as_ref()
    }

    /// Warnings recorded at construction.
    pub fn warnings(&self) -> &[BackendWarning] {
        &self.warnings
    }

    /// Translate a circuit for this backend's register.
    pub fn translate(&self, circuit: &Circuit) -> BackendResult<TargetProgram> {
        let mut translator = CircuitTranslator::new(self.config.number_qubits)
            .with_identity_padding(self.config.apply_identity_to_idle);
        if let Some(variables) = &self.variables {
            translator = translator.with_resolver(variables);
        }
        Ok(translator.translate(circuit)?)
    }

    fn build_job(&self, program: TargetProgram) -> Job {
        let shots = self.config.number_measurements;
        match &self.observable {
            Some(observable) => Job::observable(program, shots, observable.clone()),
            None => Job::sample(program, shots),
        }
    }

    /// Run one circuit and collect its output registers.
    ///
    /// Bit register rows hold the measured qubit values at the positions
    /// written by `MeasureQubit`; OBS expectation values go to entry 0 of
    /// every output float register.
    #[instrument(skip_all, fields(operations = circuit.len()))]
    pub async fn run_circuit(&self, circuit: &Circuit) -> BackendResult<OutputRegisters> {
        circuit.validate()?;
        let definitions = circuit.definitions();
        let mut outputs = OutputRegisters::from_definitions(&definitions);

        let mut readouts = Vec::new();
        collect_readouts(circuit, &mut readouts);
        let number_qubits = self.config.number_qubits;
        if let Some(r) = readouts.iter().find(|r| r.qubit >= number_qubits) {
            return Err(TranslateError::QubitOutOfRange {
                qubit: r.qubit,
                number_qubits,
            }
            .into());
        }

        let program = self.translate(circuit)?;
        let job = self.build_job(program);
        debug!(
            "Submitting job {} ({}, {} instructions, {} shots) to '{}'",
            job.id,
            job.job_type,
            job.program.len(),
            job.shots,
            self.engine.name()
        );
        let result = self.engine.submit(&job).await?;
        debug!("Job {} returned {} samples", job.id, result.len());

        let outputs_floats = definitions
            .iter()
            .any(|d| d.is_output && d.kind == RegisterKind::Float);
        let mut dropped_expectations = false;

        for sample in result {
            match sample {
                Sample::State { bits, .. } => {
                    fold_state(&definitions, &readouts, &bits, &mut outputs);
                }
                Sample::Expectation(value) => {
                    if !outputs_floats {
                        dropped_expectations = true;
                        continue;
                    }
                    fold_expectation(&definitions, value, &mut outputs);
                }
            }
        }
        if dropped_expectations {
            warn!("Expectation values dropped: circuit declares no output float register");
        }

        Ok(outputs)
    }

    /// Run every circuit of a measurement and merge the registers.
    ///
    /// Circuits run one after the other, each prefixed with the constant
    /// circuit. Registers from later circuits replace earlier ones of the
    /// same name.
    #[instrument(skip_all, fields(circuits = measurement.circuits().len()))]
    pub async fn run_measurement_registers<M: Measurement + ?Sized>(
        &self,
        measurement: &M,
    ) -> BackendResult<OutputRegisters> {
        let mut merged = OutputRegisters::new();
        for circuit in measurement.circuits() {
            let outputs = match measurement.constant_circuit() {
                Some(constant) => self.run_circuit(&(constant + circuit)).await?,
                None => self.run_circuit(circuit).await?,
            };
            merged.merge(outputs);
        }
        Ok(merged)
    }

    /// Run a measurement and evaluate it.
    pub async fn run_measurement<M: Measurement + ?Sized>(
        &self,
        measurement: &M,
    ) -> BackendResult<Option<FxHashMap<String, f64>>> {
        let registers = self.run_measurement_registers(measurement).await?;
        measurement.evaluate(&registers)
    }
}

fn collect_readouts<'a>(circuit: &'a Circuit, out: &mut Vec<Readout<'a>>) {
    for op in circuit {
        match op {
            Operation::MeasureQubit {
                qubit,
                readout,
                readout_index,
            } => out.push(Readout {
                qubit: *qubit,
                register: readout,
                index: *readout_index,
            }),
            Operation::PragmaLoop { circuit, .. } => collect_readouts(circuit, out),
            _ => {}
        }
    }
}

fn fold_state(
    definitions: &[Definition<'_>],
    readouts: &[Readout<'_>],
    bits: &[bool],
    outputs: &mut OutputRegisters,
) {
    for def in definitions.iter().filter(|d| d.is_output) {
        let mut row = RegisterValue::zeroed(def.kind, def.length);
        if def.kind == RegisterKind::Bit {
            for r in readouts.iter().filter(|r| r.register == def.name) {
                row.set_bit(r.index, bits.get(r.qubit).copied().unwrap_or(false));
            }
        }
        outputs.push_row(def.name, row);
    }
}

fn fold_expectation(definitions: &[Definition<'_>], value: f64, outputs: &mut OutputRegisters) {
    for def in definitions
        .iter()
        .filter(|d| d.is_output && d.kind == RegisterKind::Float)
    {
        let mut row = RegisterValue::zeroed(RegisterKind::Float, def.length);
        row.set_float(0, value);
        outputs.push_row(def.name, row);
    }
}
