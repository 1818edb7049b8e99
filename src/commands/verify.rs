use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use colored::Colorize;
use serde::Serialize;

use crate::commands::now_stamp;
use crate::config::LabConfig;
use crate::core::diffusion::{build_diffusion_operator, verify_factored_form};
use crate::core::error::QuantumError;
use crate::core::ops::{is_orthogonal, is_symmetric, matrices_equal};
use crate::core::types::MAX_QUBITS;
use crate::io::atomic::atomic_write;

#[derive(Debug, Serialize)]
struct QubitCheck {
    qubits: usize,
    dim: usize,
    // None when the factored form itself failed; NaN is not valid JSON.
    max_delta: Option<f64>,
    symmetric: bool,
    orthogonal: bool,
    involutory: bool,
    passed: bool,
}

#[derive(Debug, Serialize)]
struct VerifyReport {
    tolerance: f64,
    checks: Vec<QubitCheck>,
    failures: usize,
    generated_at: String,
}

/// `groverlab verify`: sweep qubit counts and confirm the algebraic
/// identities the diffusion operator must satisfy at each size.
pub fn main(max_qubits: Option<usize>, out: Option<PathBuf>, json: bool, cfg: &LabConfig) -> Result<()> {
    let top = max_qubits.unwrap_or(cfg.max_verify_qubits);
    // Bound the sweep before it sizes any allocation.
    if top == 0 || top > MAX_QUBITS {
        return Err(QuantumError::InvalidDimension(top))
            .context("cannot sweep qubit counts outside the supported range");
    }
    let tol = cfg.tolerance;

    let mut checks = Vec::with_capacity(top);
    for n in 1..=top {
        let d = build_diffusion_operator(n)
            .with_context(|| format!("cannot build a diffusion operator for {n} qubit(s)"))?;
        let dim = d.nrows();
        let max_delta = match verify_factored_form(n, tol) {
            Ok(delta) => delta,
            Err(err) => {
                if !json {
                    println!("{} n={}: {}", "error:".bright_red().bold(), n, err);
                }
                checks.push(QubitCheck {
                    qubits: n,
                    dim,
                    max_delta: None,
                    symmetric: false,
                    orthogonal: false,
                    involutory: false,
                    passed: false,
                });
                continue;
            }
        };

        let symmetric = is_symmetric(&d, tol);
        let orthogonal = is_orthogonal(&d, tol);
        let identity = nalgebra::DMatrix::identity(dim, dim);
        let involutory = matrices_equal(&(&d * &d), &identity, tol);
        let passed = symmetric && orthogonal && involutory;

        if !json {
            let prefix = if passed {
                "ok:".green().bold()
            } else {
                "error:".bright_red().bold()
            };
            println!(
                "{} n={} ({}x{}) factored delta {:e}, symmetric={}, orthogonal={}, involutory={}",
                prefix, n, dim, dim, max_delta, symmetric, orthogonal, involutory
            );
        }
        checks.push(QubitCheck {
            qubits: n,
            dim,
            max_delta: Some(max_delta),
            symmetric,
            orthogonal,
            involutory,
            passed,
        });
    }

    let failures = checks.iter().filter(|c| !c.passed).count();
    let report = VerifyReport {
        tolerance: tol,
        checks,
        failures,
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
    }

    if failures > 0 {
        bail!("{failures} qubit size(s) failed verification");
    }
    if !json {
        println!(
            "{} all sizes up to n={} verified within {:e}.",
            "ok:".green().bold(),
            top,
            tol
        );
    }
    Ok(())
}
