//! Worked-example Grover search at the matrix level.
//!
//! Reproduces the notebook walkthroughs for small instances: sign-flip
//! the amplitudes of explicitly listed basis states (the oracle), then
//! apply the diffusion operator, and repeat. Grover's geometry: each
//! oracle-plus-diffusion round rotates the state by 2θ toward the
//! marked subspace, where sin(θ) = sqrt(m/N), so after about π/(4θ)
//! rounds a measurement lands on a marked state with high probability.
use std::f64::consts::PI;

use nalgebra::DMatrix;
use num_complex::Complex64 as C64;
use rand::Rng;
use serde::Serialize;

use crate::core::diffusion::build_diffusion_operator;
use crate::core::error::QuantumError;
use crate::core::types::{state_dim, QOp, QState};
use crate::debug_log;

/// Diagonal ±1 oracle that sign-flips the listed basis states.
pub fn build_marked_oracle(
    n_qubits: usize,
    marked: &[usize],
) -> Result<DMatrix<C64>, QuantumError> {
    let dim = state_dim(n_qubits)?;
    let mut m = DMatrix::<C64>::identity(dim, dim);
    for &index in marked {
        if index >= dim {
            return Err(QuantumError::MarkedStateOutOfRange { index, dim });
        }
        m[(index, index)] = C64::new(-1.0, 0.0);
    }
    Ok(m)
}

/// Round count that maximizes the success probability: ⌊π/(4θ)⌋ with
/// θ = asin(√(m/N)). Zero marked states (or all of them) need zero
/// rounds. Float arithmetic throughout, so any qubit count yields a
/// finite answer instead of overflowing an integer shift.
pub fn optimal_iterations(n_qubits: usize, marked_count: usize) -> usize {
    if marked_count == 0 {
        return 0;
    }
    let dim = (n_qubits as f64).exp2();
    let ratio = (marked_count as f64 / dim).min(1.0);
    let theta = ratio.sqrt().asin();
    (PI / (4.0 * theta)).floor() as usize
}

/// Final state of a worked-example run.
#[derive(Clone, Debug, Serialize)]
pub struct SearchOutcome {
    pub qubits: usize,
    pub dim: usize,
    pub marked: Vec<usize>,
    pub iterations: usize,
    pub success_probability: f64,
    pub probabilities: Vec<f64>,
}

/// Prepare the uniform superposition and run `iterations` rounds of
/// oracle-then-diffusion. Both operators pass through the unitarity
/// check, so norm preservation holds by construction.
pub fn run_search(
    n_qubits: usize,
    marked: &[usize],
    iterations: usize,
) -> Result<SearchOutcome, QuantumError> {
    let mut marked: Vec<usize> = marked.to_vec();
    marked.sort_unstable();
    marked.dedup();

    let oracle = QOp::try_new_unitary(build_marked_oracle(n_qubits, &marked)?)?;
    let diffusion = QOp::try_new_unitary(build_diffusion_operator(n_qubits)?)?;
    let dim = oracle.dim();

    let mut psi = QState::uniform(n_qubits)?;
    for round in 0..iterations {
        psi = oracle.apply(&psi)?;
        psi = diffusion.apply(&psi)?;
        debug_log!(
            "grover round {}: success probability {:.6}",
            round + 1,
            marked.iter().map(|&i| psi.data[i].norm_sqr()).sum::<f64>()
        );
    }

    let probabilities = psi.probabilities();
    let success_probability = marked.iter().map(|&i| probabilities[i]).sum();
    Ok(SearchOutcome {
        qubits: n_qubits,
        dim,
        marked,
        iterations,
        success_probability,
        probabilities,
    })
}

/// Sample one measurement outcome from a probability distribution by
/// cumulative scan; rounding slack falls to the last state.
pub fn measure_state<R: Rng + ?Sized>(probabilities: &[f64], rng: &mut R) -> usize {
    let random_value: f64 = rng.gen();
    let mut cumulative_probability = 0.0;
    for (index, &probability) in probabilities.iter().enumerate() {
        cumulative_probability += probability;
        if random_value <= cumulative_probability {
            return index;
        }
    }
    probabilities.len() - 1
}

/// Histogram of `shots` repeated measurements.
pub fn sample_counts<R: Rng + ?Sized>(
    probabilities: &[f64],
    shots: usize,
    rng: &mut R,
) -> Vec<usize> {
    let mut counts = vec![0usize; probabilities.len()];
    for _ in 0..shots {
        counts[measure_state(probabilities, rng)] += 1;
    }
    counts
}
