use std::fs;
use std::process::Command;

fn bin() -> String {
    // Cargo sets this for bin targets in integration tests
    env!("CARGO_BIN_EXE_groverlab").to_string()
}

fn run(args: &[&str]) -> std::process::Output {
    Command::new(bin()).args(args).output().expect("run groverlab")
}

fn stdout_json(output: &std::process::Output) -> serde_json::Value {
    assert!(
        output.status.success(),
        "stdout:\n{}\nstderr:\n{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout is a JSON report")
}

#[test]
fn diffusion_reports_a_verified_operator() {
    let v = stdout_json(&run(&["diffusion", "3", "--json"]));
    assert_eq!(v["qubits"], 3);
    assert_eq!(v["dim"], 8);
    assert_eq!(v["verified"], true);
    assert!(v["max_delta"].as_f64().unwrap() < 1e-9);
}

#[test]
fn diffusion_rejects_zero_qubits() {
    let output = run(&["diffusion", "0"]);
    assert!(!output.status.success(), "unexpected success");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid Dimension"), "stderr:\n{stderr}");
}

#[test]
fn verify_sweeps_and_prints_per_size_lines() {
    let output = run(&["verify", "--max-qubits", "4"]);
    assert!(
        output.status.success(),
        "stderr:\n{}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("n=4"), "stdout:\n{stdout}");
    assert!(stdout.contains("involutory=true"), "stdout:\n{stdout}");
}

#[test]
fn apply_runs_the_worked_example() {
    let v = stdout_json(&run(&[
        "apply",
        "3",
        "--amplitudes",
        "1,-1,1,1,1,1,-1,1",
        "--normalize",
        "--json",
    ]));
    let expected = 2.0_f64.sqrt() / 2.0;
    let out1 = v["output"][1][0].as_f64().unwrap();
    let out6 = v["output"][6][0].as_f64().unwrap();
    let out0 = v["output"][0][0].as_f64().unwrap();
    assert!((out1 - expected).abs() < 1e-9);
    assert!((out6 - expected).abs() < 1e-9);
    assert!(out0.abs() < 1e-9);
    assert!((v["norm_out"].as_f64().unwrap() - 1.0).abs() < 1e-9);
}

#[test]
fn apply_rejects_a_short_amplitude_list() {
    let output = run(&["apply", "2", "--amplitudes", "1,0"]);
    assert!(!output.status.success(), "unexpected success");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Dimension Mismatch"), "stderr:\n{stderr}");
}

#[test]
fn apply_rejects_unnormalized_input_without_the_flag() {
    let output = run(&["apply", "2", "--amplitudes", "1,1,1,1"]);
    assert!(!output.status.success(), "unexpected success");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Not Normalized"), "stderr:\n{stderr}");
}

#[test]
fn apply_rejects_nan_amplitudes_even_with_normalize() {
    let output = run(&["apply", "2", "--amplitudes", "nan,1,1,1", "--normalize"]);
    assert!(!output.status.success(), "unexpected success");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("not a finite amplitude"), "stderr:\n{stderr}");
}

#[test]
fn search_reports_a_certain_two_qubit_hit() {
    let v = stdout_json(&run(&["search", "2", "--marked", "3", "--shots", "50", "--json"]));
    assert!((v["success_probability"].as_f64().unwrap() - 1.0).abs() < 1e-9);
    assert_eq!(v["iterations"], 1);
    let counts: Vec<u64> = v["counts"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c.as_u64().unwrap())
        .collect();
    assert_eq!(counts.iter().sum::<u64>(), 50);
    assert_eq!(counts[3], 50);
}

#[test]
fn search_rejects_oversized_qubit_counts() {
    let output = run(&["search", "64", "--marked", "0"]);
    assert!(!output.status.success(), "unexpected success");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid Dimension"), "stderr:\n{stderr}");
}

#[test]
fn verify_rejects_an_oversized_sweep() {
    let output = run(&["verify", "--max-qubits", "18446744073709551615"]);
    assert!(!output.status.success(), "unexpected success");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid Dimension"), "stderr:\n{stderr}");
}

#[test]
fn config_file_supplies_default_shots() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = dir.path().join("config.toml");
    fs::write(&cfg, "tolerance = 1e-6\ndefault_shots = 7\n").unwrap();

    let v = stdout_json(&run(&[
        "search",
        "2",
        "--marked",
        "3",
        "--shots",
        "--config",
        cfg.to_str().unwrap(),
        "--json",
    ]));
    assert_eq!(v["shots"], 7);
}

#[test]
fn out_flag_writes_a_report_file() {
    let dir = tempfile::tempdir().unwrap();
    let report = dir.path().join("diffusion.json");

    let output = run(&["diffusion", "2", "--out", report.to_str().unwrap()]);
    assert!(
        output.status.success(),
        "stderr:\n{}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(String::from_utf8_lossy(&output.stdout).contains("wrote report"));

    let v: serde_json::Value =
        serde_json::from_slice(&fs::read(&report).unwrap()).expect("report parses");
    assert_eq!(v["qubits"], 2);
    assert_eq!(v["verified"], true);
}

#[test]
fn bad_config_is_a_hard_error() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = dir.path().join("config.toml");
    fs::write(&cfg, "tolerance = -3.0\n").unwrap();

    let output = run(&[
        "diffusion",
        "2",
        "--config",
        cfg.to_str().unwrap(),
    ]);
    assert!(!output.status.success(), "unexpected success");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("tolerance"), "stderr:\n{stderr}");
}
