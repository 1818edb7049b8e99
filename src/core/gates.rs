//! Single-qubit gate matrices used by the operator builders.
use nalgebra::DMatrix;
use num_complex::Complex64 as C64;

#[inline]
fn c(r: f64, i: f64) -> C64 {
    C64::new(r, i)
}

/// The 2x2 Hadamard gate (1/sqrt(2)) [[1, 1], [1, -1]].
pub fn h() -> DMatrix<C64> {
    let s = 1.0_f64 / 2.0_f64.sqrt();
    DMatrix::from_row_slice(2, 2, &[c(s, 0.0), c(s, 0.0), c(s, 0.0), c(-s, 0.0)])
}

/// The Pauli-Z gate diag(1, -1); the one-qubit selective phase flip.
pub fn z() -> DMatrix<C64> {
    DMatrix::from_row_slice(2, 2, &[c(1.0, 0.0), c(0.0, 0.0), c(0.0, 0.0), c(-1.0, 0.0)])
}
