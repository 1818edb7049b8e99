use clap::Parser; // trait import enables GroverCli::parse()

use groverlab::cli::{Command, GroverCli};
use groverlab::commands;
use groverlab::config::{load_config, resolve_config_path};

fn main() -> anyhow::Result<()> {
    let args = GroverCli::parse();

    let cfg_path = resolve_config_path(&args.config);
    let mut cfg = load_config(cfg_path.as_deref())?;
    if let Some(tolerance) = args.tolerance {
        anyhow::ensure!(
            tolerance.is_finite() && tolerance > 0.0,
            "--tolerance must be a positive finite number"
        );
        cfg.tolerance = tolerance;
    }

    match args.cmd {
        Command::Diffusion { qubits, show, out } => {
            commands::diffusion::main(qubits, show, out, args.json, &cfg)
        }
        Command::Verify { max_qubits, out } => {
            commands::verify::main(max_qubits, out, args.json, &cfg)
        }
        Command::Apply {
            qubits,
            amplitudes,
            random,
            normalize,
            out,
        } => commands::apply::main(qubits, amplitudes, random, normalize, out, args.json),
        Command::Search {
            qubits,
            marked,
            iterations,
            shots,
            out,
        } => commands::search::main(qubits, marked, iterations, shots, out, args.json, &cfg),
    }
}
