//! Execution engine trait.
//!
//! An [`Engine`] runs one [`Job`] to completion. Submission is the only
//! suspension point of the whole pipeline: translation is pure, and the
//! caller awaits `submit` before moving on to the next circuit.
//!
//! ```text
//!   Job ──→ submit() ──→ ExecutionResult
//!           (async)      (one Sample per shot, or one expectation)
//! ```
//!
//! Cancellation, retries and timeouts are the engine's concern.

use async_trait::async_trait;

use crate::error::{HalError, HalResult};
use crate::job::{Job, JobType};
use crate::result::ExecutionResult;

/// Trait for execution engines.
#[async_trait]
pub trait Engine: Send + Sync {
    /// Get the name of this engine.
    fn name(&self) -> &str;

    /// Largest program register this engine accepts.
    fn max_qubits(&self) -> usize;

    /// Run a job and return its samples.
    ///
    /// `Sample` jobs MUST yield one state sample per shot, or every reachable
    /// basis state with its probability when `shots` is zero. `Obs` jobs
    /// MUST yield expectation samples.
    async fn submit(&self, job: &Job) -> HalResult<ExecutionResult>;
}

/// Check a job against an engine's limits before running it.
pub fn validate_job(engine: &dyn Engine, job: &Job) -> HalResult<()> {
    let n = job.number_qubits();
    if n > engine.max_qubits() {
        return Err(HalError::CircuitTooLarge(format!(
            "program uses {n} qubits, {} supports at most {}",
            engine.name(),
            engine.max_qubits()
        )));
    }
    match (job.job_type, &job.observable) {
        (JobType::Obs, None) => Err(HalError::InvalidObservable(
            "OBS job without observable".into(),
        )),
        (JobType::Obs, Some(obs)) if obs.number_qubits() != n => {
            Err(HalError::InvalidObservable(format!(
                "observable acts on {} qubits, program has {n}",
                obs.number_qubits()
            )))
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::job::{JobId, Observable};
    use crate::result::Sample;
    use qlm_translate::ProgramBuilder;

    struct FixedEngine;

    #[async_trait]
    impl Engine for FixedEngine {
        fn name(&self) -> &str {
            "fixed"
        }

        fn max_qubits(&self) -> usize {
            2
        }

        async fn submit(&self, job: &Job) -> HalResult<ExecutionResult> {
            validate_job(self, job)?;
            let samples = (0..job.shots)
                .map(|_| Sample::state(vec![false; job.number_qubits()]))
                .collect();
            Ok(ExecutionResult::new(job.id.clone(), samples))
        }
    }

    #[tokio::test]
    async fn test_submit_through_trait_object() {
        let engine: Box<dyn Engine> = Box::new(FixedEngine);
        let job = Job::sample(ProgramBuilder::qalloc(2).finalize(), 3);
        let result = engine.submit(&job).await.unwrap();
        assert_eq!(result.len(), 3);
        assert_eq!(result.job_id, job.id);
    }

    #[tokio::test]
    async fn test_too_many_qubits() {
        let job = Job::sample(ProgramBuilder::qalloc(3).finalize(), 1);
        let err = FixedEngine.submit(&job).await.unwrap_err();
        assert!(matches!(err, HalError::CircuitTooLarge(_)));
    }

    #[test]
    fn test_observable_width_mismatch() {
        let job = Job::observable(
            ProgramBuilder::qalloc(2).finalize(),
            0,
            Observable::pauli_z(1).unwrap(),
        );
        assert!(matches!(
            validate_job(&FixedEngine, &job),
            Err(HalError::InvalidObservable(_))
        ));

        let mut job = Job::sample(ProgramBuilder::qalloc(1).finalize(), 1);
        job.job_type = JobType::Obs;
        job.id = JobId::new("manual");
        assert!(validate_job(&FixedEngine, &job).is_err());
    }
}
