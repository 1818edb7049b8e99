use std::path::PathBuf;

use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;

use crate::commands::{now_stamp, render::render_matrix};
use crate::config::LabConfig;
use crate::core::diffusion::{build_diffusion_operator, verify_factored_form};
use crate::io::atomic::atomic_write;

#[derive(Debug, Serialize)]
struct DiffusionReport {
    qubits: usize,
    dim: usize,
    tolerance: f64,
    max_delta: f64,
    verified: bool,
    generated_at: String,
}

/// `groverlab diffusion N`: build the operator, check it against the
/// W·R·W factorization, and report.
pub fn main(
    qubits: usize,
    show: bool,
    out: Option<PathBuf>,
    json: bool,
    cfg: &LabConfig,
) -> Result<()> {
    let d = build_diffusion_operator(qubits)
        .with_context(|| format!("cannot build a diffusion operator for {qubits} qubit(s)"))?;
    let max_delta = verify_factored_form(qubits, cfg.tolerance)
        .context("direct construction disagrees with W*R*W")?;

    let report = DiffusionReport {
        qubits,
        dim: d.nrows(),
        tolerance: cfg.tolerance,
        max_delta,
        verified: true,
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
        "{} diffusion operator for {} qubit(s) ({}x{})",
        "ok:".green().bold(),
        qubits,
        report.dim,
        report.dim
    );
    println!(
        "    max |D - W*R*W| entry delta: {:e} (tolerance {:e})",
        max_delta, cfg.tolerance
    );
    if show {
        print!("{}", render_matrix(&d));
    }
    Ok(())
}
