//! Simulator engine implementation.

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::{Mutex, PoisonError};
use std::time::Instant;
use tracing::{debug, instrument};

use qlm_hal::{Engine, ExecutionResult, HalResult, Job, JobType, Observable, Sample, validate_job};
use qlm_translate::{TargetInstruction, TargetProgram};

use crate::statevector::Statevector;

/// Branches and basis states below this weight are dropped.
const PROBABILITY_CUTOFF: f64 = 1e-12;

/// One weighted pure state of a mixed ensemble.
#[derive(Debug, Clone)]
struct Branch {
    weight: f64,
    state: Statevector,
}

/// Local statevector engine.
///
/// Shot-based sampling draws one basis state per shot. Resets are measured
/// stochastically per shot; a program without resets is evolved once and
/// then sampled. With zero shots, and for observable jobs, resets split the
/// state into a weighted ensemble so the result is exact.
pub struct SimulatorEngine {
    /// Maximum number of qubits supported.
    max_qubits: usize,
    rng: Mutex<StdRng>,
}

impl SimulatorEngine {
    /// Create a new simulator seeded from system entropy.
    pub fn new() -> Self {
        Self {
            max_qubits: 20,
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Create a simulator with a fixed seed for reproducible sampling.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            max_qubits: 20,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Set the largest register this simulator accepts.
    pub fn with_max_qubits(mut self, max_qubits: usize) -> Self {
        self.max_qubits = max_qubits;
        self
    }

    /// Run a validated job synchronously.
    #[instrument(skip(self, job), fields(job_id = %job.id))]
    fn run(&self, job: &Job) -> ExecutionResult {
        let start = Instant::now();
        let program = &job.program;
        debug!(
            "Starting simulation: {} qubits, {} instructions, {} shots",
            program.number_qubits(),
            program.len(),
            job.shots
        );

        let samples = match (job.job_type, &job.observable) {
            (JobType::Obs, Some(observable)) => vec![expectation(program, observable)],
            _ if job.shots == 0 => distribution(program),
            _ => {
                let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
                sample_shots(program, job.shots, &mut *rng)
            }
        };

        let elapsed = start.elapsed();
        debug!("Simulation completed in {:?}", elapsed);

        ExecutionResult::new(job.id.clone(), samples)
            .with_execution_time(u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX))
    }
}

impl Default for SimulatorEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Engine for SimulatorEngine {
    fn name(&self) -> &str {
        "simulator"
    }

    fn max_qubits(&self) -> usize {
        self.max_qubits
    }

    async fn submit(&self, job: &Job) -> HalResult<ExecutionResult> {
        validate_job(self, job)?;
        Ok(self.run(job))
    }
}

fn has_reset(program: &TargetProgram) -> bool {
    program
        .instructions()
        .iter()
        .any(|inst| matches!(inst, TargetInstruction::Reset(_)))
}

fn sample_shots<R: Rng + ?Sized>(program: &TargetProgram, shots: u32, rng: &mut R) -> Vec<Sample> {
    let n = program.number_qubits();

    if !has_reset(program) {
        let mut sv = Statevector::new(n);
        for app in program.applications() {
            sv.apply(app);
        }
        return (0..shots)
            .map(|_| Sample::state(sv.outcome_to_bits(sv.sample(rng))))
            .collect();
    }

    (0..shots)
        .map(|_| {
            let mut sv = Statevector::new(n);
            for inst in program.instructions() {
                match inst {
                    TargetInstruction::Apply(app) => sv.apply(app),
                    TargetInstruction::Reset(qubits) => {
                        for &q in qubits {
                            sv.reset(q, rng);
                        }
                    }
                }
            }
            Sample::state(sv.outcome_to_bits(sv.sample(rng)))
        })
        .collect()
}

/// Evolve the program exactly, splitting on every reset.
fn evolve_ensemble(program: &TargetProgram) -> Vec<Branch> {
    let mut branches = vec![Branch {
        weight: 1.0,
        state: Statevector::new(program.number_qubits()),
    }];

    for inst in program.instructions() {
        match inst {
            TargetInstruction::Apply(app) => {
                for branch in &mut branches {
                    branch.state.apply(app);
                }
            }
            TargetInstruction::Reset(qubits) => {
                for &q in qubits {
                    branches = branches
                        .into_iter()
                        .flat_map(|branch| split(branch, q))
                        .collect();
                }
            }
        }
    }
    branches
}

fn split(branch: Branch, qubit: usize) -> Vec<Branch> {
    let p_one = branch.state.probability_one(qubit);
    [(false, 1.0 - p_one), (true, p_one)]
        .into_iter()
        .filter(|(_, p)| branch.weight * p > PROBABILITY_CUTOFF)
        .filter_map(|(outcome, p)| {
            let mut state = branch.state.clone();
            state.collapse_and_reset(qubit, outcome).then(|| Branch {
                weight: branch.weight * p,
                state,
            })
        })
        .collect()
}

/// Every reachable basis state with its probability, in index order.
fn distribution(program: &TargetProgram) -> Vec<Sample> {
    let branches = evolve_ensemble(program);
    let n = program.number_qubits();
    let mut probabilities = vec![0.0; 1 << n];
    for branch in &branches {
        for (total, p) in probabilities.iter_mut().zip(branch.state.probabilities()) {
            *total += branch.weight * p;
        }
    }

    probabilities
        .into_iter()
        .enumerate()
        .filter(|(_, p)| *p > PROBABILITY_CUTOFF)
        .map(|(i, p)| Sample::State {
            bits: (0..n).map(|q| (i >> q) & 1 == 1).collect(),
            probability: Some(p),
        })
        .collect()
}

fn expectation(program: &TargetProgram, observable: &Observable) -> Sample {
    let value = evolve_ensemble(program)
        .iter()
        .map(|branch| branch.weight * branch.state.expectation(observable.matrix()))
        .sum();
    Sample::Expectation(value)
}
