//! The Grover diffusion operator and its factored-form verification.
//!
//! D performs inversion about the mean over amplitude vectors:
//! every off-diagonal entry is 2/2^n and every diagonal entry is
//! 2/2^n - 1, which is the reflection 2|s><s| - I about the uniform
//! superposition |s>. The same operator factors as W·R·W, the
//! Walsh-Hadamard transform conjugating the selective phase flip;
//! `verify_factored_form` cross-checks the two constructions.
use nalgebra::DMatrix;
use num_complex::Complex64 as C64;

use crate::core::error::QuantumError;
use crate::core::ops::{build_hadamard_tensor, build_phase_flip, max_discrepancy};
use crate::core::types::state_dim;
use crate::debug_log;

/// Build D directly from the entry formula.
pub fn build_diffusion_operator(n_qubits: usize) -> Result<DMatrix<C64>, QuantumError> {
    let dim = state_dim(n_qubits)?;
    let off = 2.0 / dim as f64;
    let diag = off - 1.0;
    let m = DMatrix::from_fn(dim, dim, |i, j| {
        if i == j {
            C64::new(diag, 0.0)
        } else {
            C64::new(off, 0.0)
        }
    });
    Ok(m)
}

/// Build D as the product W·R·W.
pub fn factored_diffusion(n_qubits: usize) -> Result<DMatrix<C64>, QuantumError> {
    let w = build_hadamard_tensor(n_qubits)?;
    let r = build_phase_flip(n_qubits)?;
    Ok(&w * r * w)
}

/// Cross-check the direct construction against the factored form.
/// Returns the worst entrywise deviation when the identity holds within
/// `tol`; a violation is an implementation defect and surfaces as
/// `VerificationFailure` naming the worst entry.
pub fn verify_factored_form(n_qubits: usize, tol: f64) -> Result<f64, QuantumError> {
    let direct = build_diffusion_operator(n_qubits)?;
    let factored = factored_diffusion(n_qubits)?;
    let (row, col, delta) = max_discrepancy(&direct, &factored);
    debug_log!("verify n={}: max |D - W·R·W| = {:e} at ({}, {})", n_qubits, delta, row, col);
    if !(delta <= tol) {
        return Err(QuantumError::verification(row, col, delta));
    }
    Ok(delta)
}
