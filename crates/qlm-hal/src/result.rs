//! Execution results.

use serde::{Deserialize, Serialize};

use crate::job::JobId;

/// One engine sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Sample {
    /// A measured basis state, `bits[q]` being the value of qubit `q`.
    State {
        /// Qubit values.
        bits: Vec<bool>,
        /// Exact probability, when the engine enumerates the distribution.
        probability: Option<f64>,
    },
    /// An observable expectation value.
    Expectation(f64),
}

impl Sample {
    /// Create a measured state without probability.
    pub fn state(bits: Vec<bool>) -> Self {
        Sample::State {
            bits,
            probability: None,
        }
    }

    /// Get the measured qubit values, if this is a state sample.
    pub fn bits(&self) -> Option<&[bool]> {
        match self {
            Sample::State { bits, .. } => Some(bits),
            Sample::Expectation(_) => None,
        }
    }

    /// Get the expectation value, if this is an observable sample.
    pub fn expectation(&self) -> Option<f64> {
        match self {
            Sample::Expectation(v) => Some(*v),
            Sample::State { .. } => None,
        }
    }
}

/// Result of one job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// The job that produced these samples.
    pub job_id: JobId,
    /// Samples in engine order.
    pub samples: Vec<Sample>,
    /// Wall-clock execution time, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_time_ms: Option<u64>,
}

impl ExecutionResult {
    /// Create a new result.
    pub fn new(job_id: JobId, samples: Vec<Sample>) -> Self {
        Self {
            job_id,
            samples,
            execution_time_ms: None,
        }
    }

    /// Set the execution time.
    pub fn with_execution_time(mut self, ms: u64) -> Self {
        self.execution_time_ms = Some(ms);
        self
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Check if there are no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Iterate over the samples.
    pub fn iter(&self) -> std::slice::Iter<'_, Sample> {
        self.samples.iter()
    }
}

impl<'a> IntoIterator for &'a ExecutionResult {
    type Item = &'a Sample;
    type IntoIter = std::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

impl IntoIterator for ExecutionResult {
    type Item = Sample;
    type IntoIter = std::vec::IntoIter<Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.into_iter()
    }
}
