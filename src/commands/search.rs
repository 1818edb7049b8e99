use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use colored::Colorize;
use serde::Serialize;

use crate::commands::{
    now_stamp,
    render::{render_histogram, render_probabilities},
};
use crate::config::LabConfig;
use crate::core::grover::{optimal_iterations, run_search, sample_counts, SearchOutcome};
use crate::core::types::state_dim;
use crate::io::atomic::atomic_write;

#[derive(Debug, Serialize)]
struct SearchReport {
    #[serde(flatten)]
    outcome: SearchOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    shots: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    counts: Option<Vec<usize>>,
    generated_at: String,
}

fn parse_marked(list: &str) -> Result<Vec<usize>> {
    list.split(',')
        .map(|tok| {
            let tok = tok.trim();
            tok.parse::<usize>()
                .map_err(|_| anyhow!("'{tok}' is not a basis-state index"))
        })
        .collect()
}

/// `groverlab search N --marked ...`: run oracle-then-diffusion rounds
/// from the uniform superposition and report the final distribution,
/// optionally sampling measurement shots from it.
pub fn main(
    qubits: usize,
    marked: String,
    iterations: Option<usize>,
    shots: Option<Option<usize>>,
    out: Option<PathBuf>,
    json: bool,
    cfg: &LabConfig,
) -> Result<()> {
    let mut marked = parse_marked(&marked)?;
    marked.sort_unstable();
    marked.dedup();

    // Bound the qubit count before any 2^n arithmetic sizes the space.
    state_dim(qubits).with_context(|| format!("cannot search over {qubits} qubit(s)"))?;
    let rounds = iterations.unwrap_or_else(|| optimal_iterations(qubits, marked.len()));
    let outcome = run_search(qubits, &marked, rounds)
        .with_context(|| format!("grover search failed for {qubits} qubit(s)"))?;

    let shots = shots.map(|n| n.unwrap_or(cfg.default_shots));
    let counts = shots.map(|n| sample_counts(&outcome.probabilities, n, &mut rand::thread_rng()));

    let report = SearchReport {
        outcome,
        shots,
        counts,
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

    let outcome = &report.outcome;
    let marked_list = outcome
        .marked
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    println!(
        "{} grover search over {} qubit(s), marked {{{}}}, {} round(s).",
        "ok:".green().bold(),
        outcome.qubits,
        marked_list,
        outcome.iterations
    );
    print!("{}", render_probabilities(&outcome.probabilities, &outcome.marked));
    println!("success probability: {:.6}", outcome.success_probability);
    if let (Some(n), Some(counts)) = (report.shots, report.counts.as_deref()) {
        println!("shots ({n}):");
        print!("{}", render_histogram(counts));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::parse_marked;

    #[test]
    fn parses_index_lists() {
        assert_eq!(parse_marked("1, 6").unwrap(), vec![1, 6]);
    }

    #[test]
    fn rejects_negative_indices() {
        assert!(parse_marked("1,-2").is_err());
    }
}
