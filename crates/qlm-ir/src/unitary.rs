//! Unitary matrices of the generic gates.
//!
//! Multi-qubit matrices are indexed with the first operand as the most
//! significant bit.

use ndarray::{Array2, array};
use num_complex::Complex64;

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);

fn c(re: f64, im: f64) -> Complex64 {
    Complex64::new(re, im)
}

/// General single-qubit gate `e^{iφ} [[α, -β*], [β, α*]]`.
pub fn single_qubit_gate(
    alpha_r: f64,
    alpha_i: f64,
    beta_r: f64,
    beta_i: f64,
    global_phase: f64,
) -> Array2<Complex64> {
    let pref = Complex64::from_polar(1.0, global_phase);
    array![
        [pref * c(alpha_r, alpha_i), pref * c(-beta_r, beta_i)],
        [pref * c(beta_r, beta_i), pref * c(alpha_r, -alpha_i)],
    ]
}

/// Rotation around the X axis.
pub fn rotate_x(theta: f64) -> Array2<Complex64> {
    let (s, co) = (theta / 2.0).sin_cos();
    array![[c(co, 0.0), c(0.0, -s)], [c(0.0, -s), c(co, 0.0)]]
}

/// Phase `e^{iθ}` on |0⟩.
pub fn phase_shift_state0(theta: f64) -> Array2<Complex64> {
    array![[Complex64::from_polar(1.0, theta), ZERO], [ZERO, ONE]]
}

/// Rotation by `theta` around the axis `cos(φ) X + sin(φ) Y`.
pub fn rotate_xy(theta: f64, phi: f64) -> Array2<Complex64> {
    let (s, co) = (theta / 2.0).sin_cos();
    let minus_i_sin = c(0.0, -s);
    array![
        [c(co, 0.0), minus_i_sin * Complex64::from_polar(1.0, -phi)],
        [minus_i_sin * Complex64::from_polar(1.0, phi), c(co, 0.0)],
    ]
}

/// `exp(-i θ/2 X⊗X)`.
pub fn variable_msxx(theta: f64) -> Array2<Complex64> {
    let (s, co) = (theta / 2.0).sin_cos();
    let d = c(co, 0.0);
    let a = c(0.0, -s);
    array![
        [d, ZERO, ZERO, a],
        [ZERO, d, a, ZERO],
        [ZERO, a, d, ZERO],
        [a, ZERO, ZERO, d],
    ]
}

/// XY interaction, mixing |01⟩ and |10⟩.
pub fn xy(theta: f64) -> Array2<Complex64> {
    let (s, co) = (theta / 2.0).sin_cos();
    array![
        [ONE, ZERO, ZERO, ZERO],
        [ZERO, c(co, 0.0), c(0.0, s), ZERO],
        [ZERO, c(0.0, s), c(co, 0.0), ZERO],
        [ZERO, ZERO, ZERO, ONE],
    ]
}

/// Plus-minus interaction `exp(-i t (σ⁺σ⁻ + σ⁻σ⁺))`.
pub fn pm_interaction(t: f64) -> Array2<Complex64> {
    let (s, co) = t.sin_cos();
    array![
        [ONE, ZERO, ZERO, ZERO],
        [ZERO, c(co, 0.0), c(0.0, -s), ZERO],
        [ZERO, c(0.0, -s), c(co, 0.0), ZERO],
        [ZERO, ZERO, ZERO, ONE],
    ]
}
