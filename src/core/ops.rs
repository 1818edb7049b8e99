//! Kronecker products, operator builders, and entrywise matrix checks.
use nalgebra::DMatrix;
use num_complex::Complex64 as C64;

use crate::core::error::QuantumError;
use crate::core::gates;
use crate::core::types::{state_dim, QState, DEFAULT_TOLERANCE};

#[inline]
fn c(r: f64, i: f64) -> C64 {
    C64::new(r, i)
}

/// Kronecker product A ⊗ B.
pub fn kron(a: &DMatrix<C64>, b: &DMatrix<C64>) -> DMatrix<C64> {
    let (ar, ac) = (a.nrows(), a.ncols());
    let (br, bc) = (b.nrows(), b.ncols());
    let mut out = DMatrix::<C64>::from_element(ar * br, ac * bc, c(0.0, 0.0));
    for i in 0..ar {
        for j in 0..ac {
            let aij = a[(i, j)];
            for k in 0..br {
                for l in 0..bc {
                    out[(i * br + k, j * bc + l)] = aij * b[(k, l)];
                }
            }
        }
    }
    out
}

/// Walsh-Hadamard transform W = H ⊗ ... ⊗ H over `n_qubits` qubits,
/// built by folding the Kronecker product over the 2x2 Hadamard gate.
pub fn build_hadamard_tensor(n_qubits: usize) -> Result<DMatrix<C64>, QuantumError> {
    state_dim(n_qubits)?;
    let h = gates::h();
    let mut acc = DMatrix::<C64>::from_element(1, 1, c(1.0, 0.0));
    for _ in 0..n_qubits {
        acc = kron(&acc, &h);
    }
    Ok(acc)
}

/// Selective phase flip R: +1 on |0...0>, -1 on every other basis state.
pub fn build_phase_flip(n_qubits: usize) -> Result<DMatrix<C64>, QuantumError> {
    let dim = state_dim(n_qubits)?;
    let mut m = DMatrix::<C64>::from_element(dim, dim, c(0.0, 0.0));
    m[(0, 0)] = c(1.0, 0.0);
    for i in 1..dim {
        m[(i, i)] = c(-1.0, 0.0);
    }
    Ok(m)
}

/// Apply an operator matrix to a state and sanity-check that the norm
/// survived. The operators built here are orthogonal, so norm drift
/// beyond tolerance means a defective matrix, which is reported rather
/// than renormalized away.
pub fn apply_operator(m: &DMatrix<C64>, psi: &QState) -> Result<QState, QuantumError> {
    if m.ncols() != psi.len() {
        return Err(QuantumError::mismatch(m.ncols(), psi.len()));
    }
    let out = QState { data: m * &psi.data };
    let norm = out.norm();
    // `!(<=)` instead of `>` so a NaN norm fails the check.
    if !((norm - 1.0).abs() <= DEFAULT_TOLERANCE) {
        return Err(QuantumError::NotNormalized { norm });
    }
    Ok(out)
}

/// Worst entry of |A - B|: the (row, col) with the largest absolute
/// difference and its magnitude. Matrices must have the same shape.
/// A NaN difference counts as worst, so it is never masked.
pub fn max_discrepancy(a: &DMatrix<C64>, b: &DMatrix<C64>) -> (usize, usize, f64) {
    assert_eq!(a.nrows(), b.nrows());
    assert_eq!(a.ncols(), b.ncols());
    let mut worst = (0, 0, 0.0_f64);
    for i in 0..a.nrows() {
        for j in 0..a.ncols() {
            let delta = (a[(i, j)] - b[(i, j)]).norm();
            // A finite delta never displaces a NaN one: `delta > NaN`
            // is false.
            if delta.is_nan() || delta > worst.2 {
                worst = (i, j, delta);
            }
        }
    }
    worst
}

/// Entrywise equality within `tol`; differently shaped matrices are
/// never equal.
pub fn matrices_equal(a: &DMatrix<C64>, b: &DMatrix<C64>, tol: f64) -> bool {
    if a.nrows() != b.nrows() || a.ncols() != b.ncols() {
        return false;
    }
    max_discrepancy(a, b).2 <= tol
}

pub fn is_symmetric(m: &DMatrix<C64>, tol: f64) -> bool {
    if m.nrows() != m.ncols() {
        return false;
    }
    for i in 0..m.nrows() {
        for j in (i + 1)..m.ncols() {
            if !((m[(i, j)] - m[(j, i)]).norm() <= tol) {
                return false;
            }
        }
    }
    true
}

/// Orthogonality check M·Mᵀ = I (the operators here are real-valued, so
/// this coincides with unitarity).
pub fn is_orthogonal(m: &DMatrix<C64>, tol: f64) -> bool {
    if m.nrows() != m.ncols() {
        return false;
    }
    let product = m * m.transpose();
    let identity = DMatrix::<C64>::identity(m.nrows(), m.ncols());
    matrices_equal(&product, &identity, tol)
}
