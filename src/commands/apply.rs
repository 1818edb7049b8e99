use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use colored::Colorize;
use nalgebra::DVector;
use num_complex::Complex64 as C64;
use serde::Serialize;

use crate::commands::{now_stamp, render::render_amplitudes};
use crate::core::diffusion::build_diffusion_operator;
use crate::core::error::QuantumError;
use crate::core::ops::apply_operator;
use crate::core::types::{state_dim, QState};
use crate::io::atomic::atomic_write;

#[derive(Debug, Serialize)]
struct ApplyReport {
    qubits: usize,
    dim: usize,
    input: Vec<[f64; 2]>,
    output: Vec<[f64; 2]>,
    norm_in: f64,
    norm_out: f64,
    generated_at: String,
}

fn parse_amplitudes(list: &str) -> Result<Vec<f64>> {
    list.split(',')
        .map(|tok| {
            let tok = tok.trim();
            // `f64::from_str` happily accepts "nan" and "inf"; neither
            // is a usable amplitude.
            match tok.parse::<f64>() {
                Ok(value) if value.is_finite() => Ok(value),
                _ => Err(anyhow!("'{tok}' is not a finite amplitude")),
            }
        })
        .collect()
}

fn as_pairs(v: &DVector<C64>) -> Vec<[f64; 2]> {
    v.iter().map(|z| [z.re, z.im]).collect()
}

/// `groverlab apply N`: push an amplitude vector through the diffusion
/// operator. With no input flags the uniform superposition is used,
/// which the operator leaves unchanged.
pub fn main(
    qubits: usize,
    amplitudes: Option<String>,
    random: bool,
    normalize: bool,
    out: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let dim = state_dim(qubits)
        .with_context(|| format!("cannot build a state space for {qubits} qubit(s)"))?;

    let psi = if random {
        QState::random(qubits, &mut rand::thread_rng())?
    } else if let Some(list) = amplitudes.as_deref() {
        let values = parse_amplitudes(list)?;
        if values.len() != dim {
            return Err(QuantumError::mismatch(dim, values.len()).into());
        }
        let raw = DVector::from_iterator(dim, values.into_iter().map(|re| C64::new(re, 0.0)));
        QState::try_new(raw, normalize)
            .context("input state rejected (use --normalize to scale it)")?
    } else {
        if !json {
            println!(
                "{} no input given, applying to the uniform superposition.",
                "warn:".yellow().bold()
            );
        }
        QState::uniform(qubits)?
    };

    let d = build_diffusion_operator(qubits)?;
    let result = apply_operator(&d, &psi).context("operator application failed")?;

    let report = ApplyReport {
        qubits,
        dim,
        input: as_pairs(&psi.data),
        output: as_pairs(&result.data),
        norm_in: psi.norm(),
        norm_out: result.norm(),
        generated_at: now_stamp(),
    };

    if let Some(path) = out.as_deref() {
        let payload = serde_json::to_vec_pretty(&report)?;
        atomic_write(path, &payload)
            .with_context(|| format!("failed to write report to '{}'", path.display()))?;
        if !json {
            println!(
                "{} wrote report to '{}'.",
                "ok:".green().bold(),
                path.display()
            );
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "{} applied the {dim}x{dim} diffusion operator.",
        "ok:".green().bold()
    );
    println!("input:");
    print!("{}", render_amplitudes(&psi.data));
    println!("output:");
    print!("{}", render_amplitudes(&result.data));
    println!("norm: in {:.6}, out {:.6}", report.norm_in, report.norm_out);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::parse_amplitudes;

    #[test]
    fn parses_signed_reals() {
        let values = parse_amplitudes(" 1, -1, 0.5 ,0").unwrap();
        assert_eq!(values, vec![1.0, -1.0, 0.5, 0.0]);
    }

    #[test]
    fn rejects_non_numeric_tokens() {
        let err = parse_amplitudes("1,x,3").unwrap_err();
        assert!(err.to_string().contains("'x'"));
    }

    #[test]
    fn rejects_non_finite_tokens() {
        let err = parse_amplitudes("nan,1").unwrap_err();
        assert!(err.to_string().contains("'nan'"));
        assert!(parse_amplitudes("1,inf").is_err());
        assert!(parse_amplitudes("-inf,0").is_err());
    }
}
