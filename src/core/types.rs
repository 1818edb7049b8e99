//! Core quantum types: normalized state vectors and validated unitaries.
use nalgebra::{DMatrix, DVector};
use num_complex::Complex64 as C64;
use rand::Rng;
use rand_distr::StandardNormal;

use crate::core::error::QuantumError;
use crate::core::ops::max_discrepancy;

/// Norm tolerance for state vectors.
pub const EPS: f64 = 1e-12;
/// Default entrywise tolerance for operator comparisons.
pub const DEFAULT_TOLERANCE: f64 = 1e-9;
/// Tolerance for the unitarity check on operator construction.
pub const UNITARITY_EPS: f64 = 1e-8;
/// Dense 2^n x 2^n operators stop being instructive (and start being
/// slow to cross-check) past this qubit count.
pub const MAX_QUBITS: usize = 8;

/// Validate a qubit count and return the state-space dimension 2^n.
pub fn state_dim(n_qubits: usize) -> Result<usize, QuantumError> {
    if n_qubits == 0 || n_qubits > MAX_QUBITS {
        return Err(QuantumError::InvalidDimension(n_qubits));
    }
    Ok(1usize << n_qubits)
}

#[derive(Clone, Debug)]
pub struct QState {
    pub data: DVector<C64>,
}

impl QState {
    /// Create from raw amplitudes; rejects non-normalized input unless
    /// `auto_normalize = true`.
    pub fn try_new(vec: DVector<C64>, auto_normalize: bool) -> Result<Self, QuantumError> {
        let mut v = vec;
        let norm = v.iter().map(|z| z.norm_sqr()).sum::<f64>().sqrt();
        // NaN or infinite amplitudes must not slip through the ordered
        // comparisons below.
        if !norm.is_finite() {
            return Err(QuantumError::NotNormalized { norm });
        }
        if (norm - 1.0).abs() < EPS {
            Ok(Self { data: v })
        } else if auto_normalize {
            if norm < EPS {
                return Err(QuantumError::NotNormalized { norm });
            }
            v /= C64::from(norm);
            Ok(Self { data: v })
        } else {
            Err(QuantumError::NotNormalized { norm })
        }
    }

    /// The equal superposition over all 2^n basis states, i.e. W|0...0>.
    pub fn uniform(n_qubits: usize) -> Result<Self, QuantumError> {
        let dim = state_dim(n_qubits)?;
        let amp = 1.0 / (dim as f64).sqrt();
        Ok(Self { data: DVector::from_element(dim, C64::new(amp, 0.0)) })
    }

    /// The computational basis state |index> over `n_qubits` qubits.
    pub fn basis(n_qubits: usize, index: usize) -> Result<Self, QuantumError> {
        let dim = state_dim(n_qubits)?;
        if index >= dim {
            return Err(QuantumError::MarkedStateOutOfRange { index, dim });
        }
        let mut data = DVector::from_element(dim, C64::new(0.0, 0.0));
        data[index] = C64::new(1.0, 0.0);
        Ok(Self { data })
    }

    /// Random normalized state: independent Gaussian real and imaginary
    /// parts, then normalized.
    pub fn random<R: Rng + ?Sized>(n_qubits: usize, rng: &mut R) -> Result<Self, QuantumError> {
        let dim = state_dim(n_qubits)?;
        let raw = DVector::from_iterator(
            dim,
            (0..dim).map(|_| {
                let re: f64 = rng.sample(StandardNormal);
                let im: f64 = rng.sample(StandardNormal);
                C64::new(re, im)
            }),
        );
        Self::try_new(raw, true)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn norm(&self) -> f64 {
        self.data.iter().map(|z| z.norm_sqr()).sum::<f64>().sqrt()
    }

    /// Measurement probabilities |a_i|^2 per basis state.
    pub fn probabilities(&self) -> Vec<f64> {
        self.data.iter().map(|z| z.norm_sqr()).collect()
    }
}

#[derive(Clone, Debug)]
pub struct QOp {
    pub m: DMatrix<C64>,
}

impl QOp {
    /// Wrap a matrix after checking squareness and unitarity (U^† U = I).
    pub fn try_new_unitary(m: DMatrix<C64>) -> Result<Self, QuantumError> {
        if m.nrows() != m.ncols() {
            return Err(QuantumError::mismatch(m.nrows(), m.ncols()));
        }
        let u_dag_u = m.adjoint() * &m;
        let identity = DMatrix::<C64>::identity(m.nrows(), m.ncols());
        let (row, col, delta) = max_discrepancy(&u_dag_u, &identity);
        // `!(<=)` instead of `>` so a NaN delta fails the check.
        if !(delta <= UNITARITY_EPS) {
            return Err(QuantumError::verification(row, col, delta));
        }
        Ok(Self { m })
    }

    pub fn dim(&self) -> usize {
        self.m.nrows()
    }

    /// Apply to a full state vector (dimensions must match).
    pub fn apply(&self, psi: &QState) -> Result<QState, QuantumError> {
        if self.m.ncols() != psi.len() {
            return Err(QuantumError::mismatch(self.m.ncols(), psi.len()));
        }
        Ok(QState { data: &self.m * &psi.data })
    }
}
