use std::fmt;

use crate::core::types::MAX_QUBITS;

/// Failure modes of the numerical core. All of these are local,
/// synchronous, and non-retryable; `VerificationFailure` in particular
/// signals an implementation defect, not a runtime condition.
#[derive(Debug, Clone, PartialEq)]
pub enum QuantumError {
    InvalidDimension(usize),
    DimensionMismatch { expected: usize, got: usize },
    VerificationFailure { row: usize, col: usize, delta: f64 },
    NotNormalized { norm: f64 },
    MarkedStateOutOfRange { index: usize, dim: usize },
}

impl fmt::Display for QuantumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuantumError::InvalidDimension(n) => write!(
                f,
                "Invalid Dimension: qubit count must be between 1 and {}, got {}",
                MAX_QUBITS, n
            ),
            QuantumError::DimensionMismatch { expected, got } => {
                write!(f, "Dimension Mismatch: expected length {}, got {}", expected, got)
            }
            QuantumError::VerificationFailure { row, col, delta } => write!(
                f,
                "Verification Failure: entry ({}, {}) deviates by {:e}",
                row, col, delta
            ),
            QuantumError::NotNormalized { norm } => {
                write!(f, "State Not Normalized: ||psi|| = {}", norm)
            }
            QuantumError::MarkedStateOutOfRange { index, dim } => {
                write!(f, "Marked State Out Of Range: index {} outside 0..{}", index, dim)
            }
        }
    }
}

impl std::error::Error for QuantumError {}

impl QuantumError {
    pub fn mismatch(expected: usize, got: usize) -> Self {
        QuantumError::DimensionMismatch { expected, got }
    }
    pub fn verification(row: usize, col: usize, delta: f64) -> Self {
        QuantumError::VerificationFailure { row, col, delta }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test] fn test_invalid_dimension() {
        let err = QuantumError::InvalidDimension(0);
        assert_eq!(
            format!("{}", err),
            "Invalid Dimension: qubit count must be between 1 and 8, got 0"
        );
    }
    #[test] fn test_dimension_mismatch() {
        let err = QuantumError::mismatch(8, 4);
        assert_eq!(format!("{}", err), "Dimension Mismatch: expected length 8, got 4");
    }
    #[test] fn test_verification_failure() {
        let err = QuantumError::verification(1, 6, 0.5);
        assert_eq!(format!("{}", err), "Verification Failure: entry (1, 6) deviates by 5e-1");
    }
    #[test] fn test_marked_state_out_of_range() {
        let err = QuantumError::MarkedStateOutOfRange { index: 8, dim: 8 };
        assert_eq!(format!("{}", err), "Marked State Out Of Range: index 8 outside 0..8");
    }
}
