use fbl_conformance::cases::STANDARD_CHECK_COUNT;
use std::process::{Command, Output};

fn run_gate(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_run_level1_gate"))
        .args(args)
        .output()
        .expect("gate binary should spawn")
}

fn summary_counts(stdout: &str) -> (usize, usize, usize) {
    let field = |key: &str| -> usize {
        stdout
            .lines()
            .find_map(|line| line.strip_prefix(key))
            .unwrap_or_else(|| panic!("summary line {key:?} missing in:\n{stdout}"))
            .trim()
            .parse()
            .expect("summary count should be numeric")
    };
    (field("passed:"), field("failed:"), field("total:"))
}

#[test]
fn clean_run_passes_every_check_and_exits_zero() {
    let output = run_gate(&[]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let (passed, failed, total) = summary_counts(&stdout);
    assert_eq!(passed, STANDARD_CHECK_COUNT);
    assert_eq!(failed, 0);
    assert_eq!(total, STANDARD_CHECK_COUNT);

    assert!(stdout.contains("--- running sdot ---"));
    assert!(stdout.contains("--- running drotg ---"));
    assert!(stdout.contains("[PASS] srotg c"));
    assert!(!stdout.contains("[FAIL]"));
    assert!(!stdout.contains("[SKIPPED]"));
}

#[test]
fn tallies_are_idempotent_across_processes() {
    let first = run_gate(&[]);
    let second = run_gate(&[]);
    assert!(first.status.success());
    assert!(second.status.success());
    assert_eq!(
        summary_counts(&String::from_utf8_lossy(&first.stdout)),
        summary_counts(&String::from_utf8_lossy(&second.stdout))
    );
}

#[cfg(unix)]
#[test]
fn fault_probe_is_contained_and_counted_once() {
    let output = run_gate(&["--with-fault-probe"]);
    // The crash is a reported failure, not a gate failure.
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let (passed, failed, total) = summary_counts(&stdout);
    assert_eq!(passed, STANDARD_CHECK_COUNT);
    assert_eq!(failed, 1);
    assert_eq!(total, STANDARD_CHECK_COUNT + 1);

    let skip_at = stdout
        .find("[SKIPPED] fault_probe")
        .expect("probe should be reported as skipped");
    let next_case_at = stdout
        .find("--- running sdot ---")
        .expect("cases after the probe should still run");
    assert!(skip_at < next_case_at, "probe runs before the standard cases");
    assert!(stdout.contains("--- running drotg ---"));
}

#[test]
fn gate_appends_one_log_record_per_case() {
    let log_path =
        std::env::temp_dir().join(format!("fbl_level1_gate_{}.jsonl", std::process::id()));
    let _ = std::fs::remove_file(&log_path);

    let output = run_gate(&["--log-path", log_path.to_str().expect("utf8 temp path")]);
    assert!(output.status.success());

    let raw = std::fs::read_to_string(&log_path).expect("log file should exist");
    let records = raw
        .lines()
        .map(|line| serde_json::from_str::<serde_json::Value>(line).expect("valid json record"))
        .collect::<Vec<_>>();
    assert_eq!(records.len(), 18);
    for record in &records {
        assert_eq!(record["suite"], "level1");
        assert_eq!(record["skipped"], false);
        assert_eq!(record["failed"], 0);
    }

    let _ = std::fs::remove_file(&log_path);
}

#[test]
fn unknown_arguments_are_rejected() {
    let output = run_gate(&["--frobnicate"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown argument"));
}
