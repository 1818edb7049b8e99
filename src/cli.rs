use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "groverlab",
    about = "groverlab — build, verify, and drive the Grover diffusion operator",
    version,
    propagate_version = true,
    disable_help_subcommand = true
)]
pub struct GroverCli {
    /// Global: emit a machine-readable JSON report instead of text
    #[arg(long = "json", action = ArgAction::SetTrue, global = true)]
    pub json: bool,

    /// Global: entrywise comparison tolerance (overrides config)
    #[arg(long = "tolerance", value_name = "EPS", global = true)]
    pub tolerance: Option<f64>,

    /// Global: path to config (TOML); default: ~/.groverlab/config.toml
    #[arg(long = "config", value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Build the diffusion operator and check it against W·R·W
    ///
    /// Examples:
    ///   groverlab diffusion 3
    ///   groverlab diffusion 2 --show --out report.json
    Diffusion {
        /// Qubit count (state space 2^n)
        #[arg(value_name = "QUBITS")]
        qubits: usize,

        /// Print the full matrix
        #[arg(long = "show", action = ArgAction::SetTrue)]
        show: bool,

        /// Write the JSON report to FILE
        #[arg(long = "out", value_name = "FILE")]
        out: Option<PathBuf>,
    },

    /// Sweep n and check identity, symmetry, orthogonality, involution
    Verify {
        /// Largest qubit count to check (default from config)
        #[arg(long = "max-qubits", value_name = "N")]
        max_qubits: Option<usize>,

        /// Write the JSON report to FILE
        #[arg(long = "out", value_name = "FILE")]
        out: Option<PathBuf>,
    },

    /// Apply the diffusion operator to an amplitude vector
    ///
    /// Examples:
    ///   groverlab apply 3 --amplitudes "1,-1,1,1,1,1,-1,1" --normalize
    ///   groverlab apply 2 --random
    Apply {
        #[arg(value_name = "QUBITS")]
        qubits: usize,

        /// Comma-separated real amplitudes, length 2^QUBITS
        #[arg(long = "amplitudes", value_name = "LIST", conflicts_with = "random")]
        amplitudes: Option<String>,

        /// Apply to a random normalized state instead
        #[arg(long = "random", action = ArgAction::SetTrue)]
        random: bool,

        /// Normalize the given amplitudes before applying
        #[arg(long = "normalize", action = ArgAction::SetTrue)]
        normalize: bool,

        /// Write the JSON report to FILE
        #[arg(long = "out", value_name = "FILE")]
        out: Option<PathBuf>,
    },

    /// Run worked-example Grover rounds over marked basis states
    ///
    /// Examples:
    ///   groverlab search 3 --marked 1,6
    ///   groverlab search 2 --marked 3 --shots 2000
    Search {
        #[arg(value_name = "QUBITS")]
        qubits: usize,

        /// Comma-separated marked basis-state indices
        #[arg(long = "marked", value_name = "LIST")]
        marked: String,

        /// Oracle+diffusion rounds (default: optimal for the instance)
        #[arg(long = "iterations", value_name = "K")]
        iterations: Option<usize>,

        /// Sample measurements from the final distribution; N defaults
        /// to the config's default_shots when omitted
        #[arg(long = "shots", value_name = "N", num_args = 0..=1)]
        shots: Option<Option<usize>>,

        /// Write the JSON report to FILE
        #[arg(long = "out", value_name = "FILE")]
        out: Option<PathBuf>,
    },
}
