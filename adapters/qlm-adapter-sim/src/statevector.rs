//! Statevector simulation engine.
//!
//! Amplitude index bit `q` holds the value of qubit `q`. Gate and observable
//! matrices use the opposite convention (first operand most significant) and
//! are remapped on application.

use ndarray::Array2;
use num_complex::Complex64;
use rand::Rng;
use std::f64::consts::PI;

use qlm_translate::{GateApplication, TargetGate};

const ZERO: Complex64 = Complex64::new(0.0, 0.0);

/// A statevector representing a pure quantum state.
#[derive(Debug, Clone)]
pub struct Statevector {
    /// The state amplitudes (2^n complex numbers).
    amplitudes: Vec<Complex64>,
    /// Number of qubits.
    num_qubits: usize,
}

impl Statevector {
    /// Create a new statevector initialized to |0...0⟩.
    pub fn new(num_qubits: usize) -> Self {
        let size = 1 << num_qubits;
        let mut amplitudes = vec![ZERO; size];
        amplitudes[0] = Complex64::new(1.0, 0.0);
        Self {
            amplitudes,
            num_qubits,
        }
    }

    /// Apply a gate application to the statevector.
    pub fn apply(&mut self, application: &GateApplication) {
        let q = &application.qubits;
        match &application.gate {
            TargetGate::I => {}
            TargetGate::X => self.apply_x(q[0]),
            TargetGate::Y => self.apply_y(q[0]),
            TargetGate::Z => self.apply_phase(q[0], PI),
            TargetGate::H => self.apply_h(q[0]),
            TargetGate::S => self.apply_phase(q[0], PI / 2.0),
            TargetGate::T => self.apply_phase(q[0], PI / 4.0),
            TargetGate::Ph(theta) => self.apply_phase(q[0], *theta),
            TargetGate::Rz(theta) => self.apply_rz(q[0], *theta),
            TargetGate::Cnot => self.apply_cx(q[0], q[1]),
            TargetGate::Csign => self.apply_cp(q[0], q[1], PI),
            TargetGate::Swap => self.apply_swap(q[0], q[1]),
            TargetGate::Ccnot => self.apply_ccx(q[0], q[1], q[2]),
            gate => self.apply_matrix(&gate.matrix(), q),
        }
    }

    // =========================================================================
    // Specialized gate implementations
    // =========================================================================

    fn apply_x(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        for i in 0..self.amplitudes.len() {
            if i & mask == 0 {
                self.amplitudes.swap(i, i | mask);
            }
        }
    }

    fn apply_y(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        let i_val = Complex64::new(0.0, 1.0);
        for i in 0..self.amplitudes.len() {
            if i & mask == 0 {
                let j = i | mask;
                let tmp = self.amplitudes[i];
                self.amplitudes[i] = -i_val * self.amplitudes[j];
                self.amplitudes[j] = i_val * tmp;
            }
        }
    }

    fn apply_h(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        let sqrt2_inv = 1.0 / 2.0_f64.sqrt();
        for i in 0..self.amplitudes.len() {
            if i & mask == 0 {
                let j = i | mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = sqrt2_inv * (a + b);
                self.amplitudes[j] = sqrt2_inv * (a - b);
            }
        }
    }

    fn apply_phase(&mut self, qubit: usize, theta: f64) {
        let mask = 1 << qubit;
        let phase = Complex64::from_polar(1.0, theta);
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            if i & mask != 0 {
                *amp *= phase;
            }
        }
    }

    fn apply_rz(&mut self, qubit: usize, theta: f64) {
        let mask = 1 << qubit;
        let phase_0 = Complex64::from_polar(1.0, -theta / 2.0);
        let phase_1 = Complex64::from_polar(1.0, theta / 2.0);
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            *amp *= if i & mask == 0 { phase_0 } else { phase_1 };
        }
    }

    fn apply_cx(&mut self, control: usize, target: usize) {
        let ctrl_mask = 1 << control;
        let tgt_mask = 1 << target;
        for i in 0..self.amplitudes.len() {
            if (i & ctrl_mask != 0) && (i & tgt_mask == 0) {
                self.amplitudes.swap(i, i | tgt_mask);
            }
        }
    }

    fn apply_cp(&mut self, control: usize, target: usize, theta: f64) {
        let both = (1 << control) | (1 << target);
        let phase = Complex64::from_polar(1.0, theta);
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            if i & both == both {
                *amp *= phase;
            }
        }
    }

    fn apply_swap(&mut self, q1: usize, q2: usize) {
        let mask1 = 1 << q1;
        let mask2 = 1 << q2;
        for i in 0..self.amplitudes.len() {
            if (i & mask1 != 0) && (i & mask2 == 0) {
                let j = (i & !mask1) | mask2;
                self.amplitudes.swap(i, j);
            }
        }
    }

    fn apply_ccx(&mut self, c1: usize, c2: usize, target: usize) {
        let controls = (1 << c1) | (1 << c2);
        let tgt_mask = 1 << target;
        for i in 0..self.amplitudes.len() {
            if (i & controls == controls) && (i & tgt_mask == 0) {
                self.amplitudes.swap(i, i | tgt_mask);
            }
        }
    }

    // =========================================================================
    // General matrix application
    // =========================================================================

    /// Apply a `2^k × 2^k` unitary to `k` qubits, the first operand being the
    /// most significant bit of the matrix index.
    pub fn apply_matrix(&mut self, matrix: &Array2<Complex64>, qubits: &[usize]) {
        let k = qubits.len();
        let dim = 1 << k;
        let offsets: Vec<usize> = (0..dim)
            .map(|m| {
                qubits
                    .iter()
                    .enumerate()
                    .filter(|(j, _)| (m >> (k - 1 - j)) & 1 == 1)
                    .fold(0, |acc, (_, &q)| acc | (1 << q))
            })
            .collect();
        let operand_mask = offsets[dim - 1];

        let mut local = vec![ZERO; dim];
        for base in 0..self.amplitudes.len() {
            if base & operand_mask != 0 {
                continue;
            }
            for (m, off) in offsets.iter().enumerate() {
                local[m] = self.amplitudes[base | off];
            }
            for (row, off) in offsets.iter().enumerate() {
                self.amplitudes[base | off] =
                    (0..dim).map(|col| matrix[[row, col]] * local[col]).sum();
            }
        }
    }

    // =========================================================================
    // Measurement
    // =========================================================================

    /// Probability of measuring `qubit` in |1⟩.
    pub fn probability_one(&self, qubit: usize) -> f64 {
        let mask = 1 << qubit;
        self.amplitudes
            .iter()
            .enumerate()
            .filter(|(i, _)| i & mask != 0)
            .map(|(_, a)| a.norm_sqr())
            .sum()
    }

    /// Project `qubit` onto `value` and renormalize.
    ///
    /// Returns `false` if the projected state has zero norm.
    pub fn project(&mut self, qubit: usize, value: bool) -> bool {
        let mask = 1 << qubit;
        let mut norm_sq = 0.0;
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            if (i & mask != 0) == value {
                norm_sq += amp.norm_sqr();
            } else {
                *amp = ZERO;
            }
        }
        if norm_sq <= 0.0 {
            return false;
        }
        let norm = norm_sq.sqrt();
        for amp in &mut self.amplitudes {
            *amp /= norm;
        }
        true
    }

    /// Reset `qubit` to |0⟩ assuming it was measured as `outcome`.
    ///
    /// Returns `false` if `outcome` has zero probability.
    pub fn collapse_and_reset(&mut self, qubit: usize, outcome: bool) -> bool {
        if !self.project(qubit, outcome) {
            return false;
        }
        if outcome {
            self.apply_x(qubit);
        }
        true
    }

    /// Reset `qubit` to |0⟩ by measuring it and flipping a |1⟩ outcome.
    pub fn reset<R: Rng + ?Sized>(&mut self, qubit: usize, rng: &mut R) {
        let one = rng.r#gen::<f64>() < self.probability_one(qubit);
        self.collapse_and_reset(qubit, one);
    }

    /// Probability of every basis state.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(Complex64::norm_sqr).collect()
    }

    /// Sample a measurement outcome.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        let r: f64 = rng.r#gen();

        let mut cumulative = 0.0;
        for (i, amp) in self.amplitudes.iter().enumerate() {
            cumulative += amp.norm_sqr();
            if r < cumulative {
                return i;
            }
        }

        // Rounding can leave the cumulative sum just below 1
        self.amplitudes.len() - 1
    }

    /// Convert a measurement outcome to per-qubit values.
    pub fn outcome_to_bits(&self, outcome: usize) -> Vec<bool> {
        (0..self.num_qubits).map(|q| (outcome >> q) & 1 == 1).collect()
    }

    /// Expectation value ⟨ψ|O|ψ⟩ of an operator over all qubits.
    pub fn expectation(&self, observable: &Array2<Complex64>) -> f64 {
        let n = self.num_qubits;
        // observable index with qubit 0 as the most significant bit
        let remap = |i: usize| (0..n).fold(0, |acc, q| acc | (((i >> q) & 1) << (n - 1 - q)));
        let rows: Vec<usize> = (0..self.amplitudes.len()).map(remap).collect();

        let mut total = ZERO;
        for (i, ai) in self.amplitudes.iter().enumerate() {
            if ai.norm_sqr() == 0.0 {
                continue;
            }
            let row: Complex64 = self
                .amplitudes
                .iter()
                .enumerate()
                .map(|(j, aj)| observable[[rows[i], rows[j]]] * aj)
                .sum();
            total += ai.conj() * row;
        }
        total.re
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn approx_eq(a: Complex64, b: Complex64) -> bool {
        (a - b).norm() < 1e-10
    }

    fn apply(sv: &mut Statevector, gate: TargetGate, qubits: &[usize]) {
        sv.apply(&GateApplication::new(gate, qubits.to_vec()));
    }

    #[test]
    fn test_initial_state() {
        let sv = Statevector::new(2);
        assert!(approx_eq(sv.amplitudes[0], Complex64::new(1.0, 0.0)));
        assert!(sv.amplitudes[1..].iter().all(|a| approx_eq(*a, ZERO)));
    }

    #[test]
    fn test_bell_state() {
        let mut sv = Statevector::new(2);
        apply(&mut sv, TargetGate::H, &[0]);
        apply(&mut sv, TargetGate::Cnot, &[0, 1]);

        let sqrt2_inv = 1.0 / 2.0_f64.sqrt();
        assert!(approx_eq(sv.amplitudes[0], Complex64::new(sqrt2_inv, 0.0)));
        assert!(approx_eq(sv.amplitudes[1], ZERO));
        assert!(approx_eq(sv.amplitudes[2], ZERO));
        assert!(approx_eq(sv.amplitudes[3], Complex64::new(sqrt2_inv, 0.0)));
    }

    #[test]
    fn test_matrix_path_matches_specialized_gates() {
        let gates = [
            (TargetGate::Cnot, vec![1, 0]),
            (TargetGate::Csign, vec![0, 2]),
            (TargetGate::Swap, vec![2, 0]),
            (TargetGate::Ccnot, vec![2, 0, 1]),
            (TargetGate::Rz(0.4), vec![1]),
        ];
        for (gate, qubits) in gates {
            let mut prep = Statevector::new(3);
            apply(&mut prep, TargetGate::H, &[0]);
            apply(&mut prep, TargetGate::Rx(0.3), &[1]);
            apply(&mut prep, TargetGate::H, &[2]);
            apply(&mut prep, TargetGate::T, &[2]);

            let mut fast = prep.clone();
            apply(&mut fast, gate.clone(), &qubits);
            let mut slow = prep;
            slow.apply_matrix(&gate.matrix(), &qubits);

            for (a, b) in fast.amplitudes.iter().zip(&slow.amplitudes) {
                assert!(approx_eq(*a, *b), "mismatch for {gate}");
            }
        }
    }

    #[test]
    fn test_controlled_operand_order() {
        // control on qubit 1, target qubit 0
        let mut sv = Statevector::new(2);
        apply(&mut sv, TargetGate::X, &[1]);
        apply(&mut sv, TargetGate::controlled(TargetGate::Y), &[1, 0]);
        assert!((sv.probability_one(0) - 1.0).abs() < 1e-12);
        assert!((sv.probability_one(1) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_reset() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut sv = Statevector::new(2);
        apply(&mut sv, TargetGate::H, &[0]);
        apply(&mut sv, TargetGate::X, &[1]);
        sv.reset(0, &mut rng);
        sv.reset(1, &mut rng);
        assert!(approx_eq(sv.amplitudes[0], Complex64::new(1.0, 0.0)));
    }

    #[test]
    fn test_sample_deterministic() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut sv = Statevector::new(2);
        apply(&mut sv, TargetGate::X, &[1]);

        for _ in 0..100 {
            let outcome = sv.sample(&mut rng);
            assert_eq!(outcome, 2);
            assert_eq!(sv.outcome_to_bits(outcome), vec![false, true]);
        }
    }

    #[test]
    fn test_expectation() {
        let z = array![
            [Complex64::new(1.0, 0.0), ZERO],
            [ZERO, Complex64::new(-1.0, 0.0)]
        ];
        let mut sv = Statevector::new(1);
        assert!((sv.expectation(&z) - 1.0).abs() < 1e-12);
        apply(&mut sv, TargetGate::X, &[0]);
        assert!((sv.expectation(&z) + 1.0).abs() < 1e-12);
        apply(&mut sv, TargetGate::H, &[0]);
        assert!(sv.expectation(&z).abs() < 1e-12);
    }

    #[test]
    fn test_expectation_uses_leading_qubit_ordering() {
        // diag(0, 1, 2, 3) with qubit 0 as the most significant bit
        let obs = Array2::from_diag(&ndarray::arr1(&[
            Complex64::new(0.0, 0.0),
            Complex64::new(1.0, 0.0),
            Complex64::new(2.0, 0.0),
            Complex64::new(3.0, 0.0),
        ]));
        let mut sv = Statevector::new(2);
        apply(&mut sv, TargetGate::X, &[0]);
        assert!((sv.expectation(&obs) - 2.0).abs() < 1e-12);
    }
}
