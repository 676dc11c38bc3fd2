use std::hash::Hasher;
use std::process::Command;

use twox_hash::XxHash64;

fn temp_path(label: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!(
        "platetour-cli-{label}-{}",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos()
    ))
}

fn run_json(seed: &str) -> String {
    let exe = env!("CARGO_BIN_EXE_platetour-tester");
    let output_path = temp_path(&format!("json-{seed}"));
    let status = Command::new(exe)
        .args([
            "--report",
            "json",
            "--scenarios",
            "smoke,plates",
            "--iterations",
            "1",
            "--seeds",
            seed,
            "--output",
        ])
        .arg(&output_path)
        .status()
        .expect("run cli");
    assert!(status.success());
    let content = std::fs::read_to_string(&output_path).expect("read output");
    let _ = std::fs::remove_file(output_path);
    content
}

#[test]
fn cli_list_scenarios_writes_output() {
    let exe = env!("CARGO_BIN_EXE_platetour-tester");
    let output_path = temp_path("list");
    let status = Command::new(exe)
        .args(["--list-scenarios", "--output"])
        .arg(&output_path)
        .status()
        .expect("run cli");
    assert!(status.success());
    let content = std::fs::read_to_string(output_path).expect("read output");
    assert!(content.contains("Available scenarios"));
    assert!(content.contains("tour"));
}

#[test]
fn cli_json_report_lists_every_run() {
    let content = run_json("5,6");
    let parsed: serde_json::Value = serde_json::from_str(&content).expect("json report");
    let runs = parsed.as_array().expect("array of results");
    assert_eq!(runs.len(), 4);
    assert!(runs.iter().all(|r| r["passed"] == true));
}

#[test]
fn cli_outcomes_are_repeatable() {
    let digest = |content: &str| {
        let parsed: serde_json::Value = serde_json::from_str(content).expect("json report");
        let mut hasher = XxHash64::with_seed(0);
        for run in parsed.as_array().expect("array") {
            hasher.write(run["scenario_name"].to_string().as_bytes());
            hasher.write(run["successful_iterations"].to_string().as_bytes());
        }
        hasher.finish()
    };
    assert_eq!(digest(&run_json("21")), digest(&run_json("21")));
}

#[test]
fn cli_rejects_bad_seed() {
    let exe = env!("CARGO_BIN_EXE_platetour-tester");
    let output = Command::new(exe)
        .args(["--seeds", "banana"])
        .output()
        .expect("run cli");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unrecognized seed token"));
}
