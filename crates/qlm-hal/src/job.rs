//! Job descriptors.
//!
//! A [`Job`] bundles one translated program with how it should be run:
//!
//! ```text
//!   SAMPLE ──→ one measured bit-state per shot
//!   OBS    ──→ expectation value of an observable
//! ```

use std::fmt;
use std::str::FromStr;

use ndarray::Array2;
use num_complex::Complex64;
use qlm_translate::TargetProgram;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{HalError, HalResult};

const HERMITIAN_TOLERANCE: f64 = 1e-10;

/// Unique identifier for a job.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobId(pub String);

impl JobId {
    /// Create a new job ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Create a fresh random job ID.
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for JobId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// How the engine should run a program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobType {
    /// Measure all qubits once per shot.
    #[serde(rename = "SAMPLE")]
    Sample,
    /// Measure the expectation value of an observable.
    #[serde(rename = "OBS")]
    Obs,
}

impl FromStr for JobType {
    type Err = HalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SAMPLE" => Ok(JobType::Sample),
            "OBS" => Ok(JobType::Obs),
            other => Err(HalError::InvalidJobType(other.to_string())),
        }
    }
}

impl fmt::Display for JobType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobType::Sample => write!(f, "SAMPLE"),
            JobType::Obs => write!(f, "OBS"),
        }
    }
}

/// A Hermitian observable over the full qubit register.
#[derive(Debug, Clone, PartialEq)]
pub struct Observable {
    number_qubits: usize,
    matrix: Array2<Complex64>,
}

impl Observable {
    /// Create an observable over `number_qubits` qubits.
    ///
    /// `matrix` is either the full `2^n × 2^n` operator or a `2 × 2`
    /// single-qubit operator, which is then applied to every qubit as a
    /// tensor product.
    pub fn new(number_qubits: usize, matrix: Array2<Complex64>) -> HalResult<Self> {
        let (rows, cols) = matrix.dim();
        if rows != cols {
            return Err(HalError::InvalidObservable(format!(
                "matrix must be square, got {rows}x{cols}"
            )));
        }
        if !is_hermitian(&matrix) {
            return Err(HalError::InvalidObservable(
                "matrix is not Hermitian".into(),
            ));
        }
        let full = 1_usize
            .checked_shl(u32::try_from(number_qubits).unwrap_or(u32::MAX))
            .filter(|d| *d != 0)
            .ok_or_else(|| {
                HalError::CircuitTooLarge(format!(
                    "observable over {number_qubits} qubits is too large"
                ))
            })?;
        let matrix = if rows == full {
            matrix
        } else if rows == 2 {
            broadcast(&matrix, number_qubits)
        } else {
            return Err(HalError::InvalidObservable(format!(
                "expected a 2x2 or {full}x{full} matrix for {number_qubits} qubits, got {rows}x{rows}"
            )));
        };
        Ok(Self {
            number_qubits,
            matrix,
        })
    }

    /// Create an observable from a row-major list of rows.
    pub fn from_rows(number_qubits: usize, rows: &[Vec<Complex64>]) -> HalResult<Self> {
        let n = rows.len();
        if rows.iter().any(|row| row.len() != n) {
            return Err(HalError::InvalidObservable(
                "matrix rows must all have the same length as the row count".into(),
            ));
        }
        let flat: Vec<Complex64> = rows.iter().flatten().copied().collect();
        let matrix = Array2::from_shape_vec((n, n), flat)
            .map_err(|e| HalError::InvalidObservable(e.to_string()))?;
        Self::new(number_qubits, matrix)
    }

    /// Pauli Z on every qubit.
    pub fn pauli_z(number_qubits: usize) -> HalResult<Self> {
        let z = ndarray::array![
            [Complex64::new(1.0, 0.0), Complex64::new(0.0, 0.0)],
            [Complex64::new(0.0, 0.0), Complex64::new(-1.0, 0.0)]
        ];
        Self::new(number_qubits, z)
    }

    /// Number of qubits the observable acts on.
    pub fn number_qubits(&self) -> usize {
        self.number_qubits
    }

    /// The full operator matrix.
    pub fn matrix(&self) -> &Array2<Complex64> {
        &self.matrix
    }
}

fn is_hermitian(matrix: &Array2<Complex64>) -> bool {
    matrix
        .indexed_iter()
        .all(|((i, j), z)| (z - matrix[[j, i]].conj()).norm() < HERMITIAN_TOLERANCE)
}

fn broadcast(single: &Array2<Complex64>, number_qubits: usize) -> Array2<Complex64> {
    let mut out = Array2::from_elem((1, 1), Complex64::new(1.0, 0.0));
    for _ in 0..number_qubits {
        out = ndarray::linalg::kron(&out, single);
    }
    out
}

/// One execution request.
#[derive(Debug, Clone)]
pub struct Job {
    /// The job identifier.
    pub id: JobId,
    /// The program to execute.
    pub program: TargetProgram,
    /// How the program is run.
    pub job_type: JobType,
    /// Number of shots. Zero asks the engine for the exact distribution.
    pub shots: u32,
    /// Observable for [`JobType::Obs`] jobs.
    pub observable: Option<Observable>,
    /// Whether the engine may aggregate identical samples.
    pub aggregate_data: bool,
}

impl Job {
    /// Create a sampling job.
    pub fn sample(program: TargetProgram, shots: u32) -> Self {
        Self {
            id: JobId::random(),
            program,
            job_type: JobType::Sample,
            shots,
            observable: None,
            aggregate_data: false,
        }
    }

    /// Create an observable-measurement job.
    pub fn observable(program: TargetProgram, shots: u32, observable: Observable) -> Self {
        Self {
            id: JobId::random(),
            program,
            job_type: JobType::Obs,
            shots,
            observable: Some(observable),
            aggregate_data: false,
        }
    }

    /// Size of the program's qubit register.
    pub fn number_qubits(&self) -> usize {
        self.program.number_qubits()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use qlm_translate::ProgramBuilder;

    fn c(re: f64) -> Complex64 {
        Complex64::new(re, 0.0)
    }

    #[test]
    fn test_job_type_parse() {
        assert_eq!("SAMPLE".parse::<JobType>().unwrap(), JobType::Sample);
        assert_eq!("OBS".parse::<JobType>().unwrap(), JobType::Obs);
        assert!(matches!(
            "sample".parse::<JobType>(),
            Err(HalError::InvalidJobType(s)) if s == "sample"
        ));
        assert_eq!(JobType::Obs.to_string(), "OBS");
    }

    #[test]
    fn test_pauli_z_broadcast() {
        let obs = Observable::pauli_z(2).unwrap();
        let m = obs.matrix();
        assert_eq!(m.dim(), (4, 4));
        let diag: Vec<f64> = (0..4).map(|i| m[[i, i]].re).collect();
        assert_eq!(diag, vec![1.0, -1.0, -1.0, 1.0]);
    }

    #[test]
    fn test_full_matrix_kept() {
        let m = Array2::from_diag(&ndarray::arr1(&[c(0.0), c(1.0), c(2.0), c(3.0)]));
        let obs = Observable::new(2, m.clone()).unwrap();
        assert_eq!(obs.matrix(), &m);
        assert_eq!(obs.number_qubits(), 2);
    }

    #[test]
    fn test_single_qubit_register_uses_matrix_directly() {
        let x = array![[c(0.0), c(1.0)], [c(1.0), c(0.0)]];
        let obs = Observable::new(1, x.clone()).unwrap();
        assert_eq!(obs.matrix(), &x);
    }

    #[test]
    fn test_invalid_observables() {
        let not_hermitian = array![[c(0.0), c(1.0)], [c(0.0), c(0.0)]];
        assert!(Observable::new(1, not_hermitian).is_err());

        let wrong_size = Array2::from_diag(&ndarray::arr1(&[c(1.0), c(1.0), c(1.0)]));
        assert!(Observable::new(2, wrong_size).is_err());

        let ragged = vec![vec![c(1.0), c(0.0)], vec![c(0.0)]];
        assert!(Observable::from_rows(1, &ragged).is_err());
    }

    #[test]
    fn test_job_constructors() {
        let program = ProgramBuilder::qalloc(3).finalize();
        let job = Job::sample(program.clone(), 100);
        assert_eq!(job.job_type, JobType::Sample);
        assert!(job.observable.is_none());
        assert_eq!(job.number_qubits(), 3);

        let job2 = Job::observable(program, 0, Observable::pauli_z(3).unwrap());
        assert_eq!(job2.job_type, JobType::Obs);
        assert_ne!(job.id, job2.id);
    }
}
