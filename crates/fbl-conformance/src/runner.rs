use crate::GateConfig;
use crate::cases::{self, TestCase};
use crate::check::{CaseOutcome, CaseRecorder};
use serde::Serialize;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::process::{Command, ExitStatus};

/// Prefix of the one machine-readable stdout line a child emits after its
/// human-readable check lines.
pub const OUTCOME_SENTINEL: &str = "##case-outcome## ";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RunSummary {
    pub case_count: usize,
    pub passed: usize,
    pub failed: usize,
    pub skipped: Vec<String>,
}

impl RunSummary {
    #[must_use]
    pub fn total(&self) -> usize {
        self.passed + self.failed
    }
}

#[derive(Debug, Serialize)]
struct CaseLogRecord<'a> {
    suite: &'static str,
    case: &'a str,
    passed: usize,
    failed: usize,
    skipped: bool,
}

/// Child-side entry point: runs one case on the calling thread.
#[must_use]
pub fn run_case_in_process(case: &TestCase) -> CaseOutcome {
    let mut recorder = CaseRecorder::new(case.name);
    (case.run)(&mut recorder);
    recorder.into_outcome()
}

pub fn emit_outcome(outcome: &CaseOutcome) -> Result<(), String> {
    let payload = serde_json::to_string(outcome)
        .map_err(|err| format!("failed serializing case outcome: {err}"))?;
    println!("{OUTCOME_SENTINEL}{payload}");
    Ok(())
}

/// Runs every scheduled case in its own child process so that a fatal
/// fault in one case cannot abort the rest of the run. A crashed case
/// contributes exactly one failure, never the checks it would have made.
pub fn run_suite(config: &GateConfig) -> Result<RunSummary, String> {
    let mut schedule: Vec<&'static TestCase> = Vec::new();
    if config.with_fault_probe {
        // Probe goes first so the run demonstrates that every later case
        // survives the crash.
        schedule.push(cases::fault_probe_case());
    }
    schedule.extend(cases::standard_cases());

    let mut summary = RunSummary {
        case_count: schedule.len(),
        ..RunSummary::default()
    };

    for case in schedule {
        println!("--- running {} ---", case.name);
        match run_case_in_child(&config.runner_exe, case.name)? {
            ChildResult::Completed(outcome) => {
                summary.passed += outcome.passed;
                summary.failed += outcome.failed;
                maybe_append_case_log(
                    config.log_path.as_deref(),
                    &CaseLogRecord {
                        suite: "level1",
                        case: case.name,
                        passed: outcome.passed,
                        failed: outcome.failed,
                        skipped: false,
                    },
                )?;
            }
            ChildResult::Crashed(reason) => {
                summary.failed += 1;
                summary.skipped.push(case.name.to_string());
                println!("[SKIPPED] {}: {reason}", case.name);
                maybe_append_case_log(
                    config.log_path.as_deref(),
                    &CaseLogRecord {
                        suite: "level1",
                        case: case.name,
                        passed: 0,
                        failed: 1,
                        skipped: true,
                    },
                )?;
            }
        }
    }

    Ok(summary)
}

enum ChildResult {
    Completed(CaseOutcome),
    Crashed(String),
}

fn run_case_in_child(exe: &Path, name: &str) -> Result<ChildResult, String> {
    let output = Command::new(exe)
        .arg("--case")
        .arg(name)
        .output()
        .map_err(|err| format!("failed spawning {}: {err}", exe.display()))?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    let (relay, outcome) = split_child_stdout(&stdout)?;
    for line in relay {
        println!("{line}");
    }
    if !output.stderr.is_empty() {
        eprint!("{}", String::from_utf8_lossy(&output.stderr));
    }

    match outcome {
        Some(outcome) if output.status.success() => Ok(ChildResult::Completed(outcome)),
        _ => Ok(ChildResult::Crashed(describe_abnormal_exit(output.status))),
    }
}

/// Separates the child's human-readable lines from its final outcome
/// record. A crashed child never reaches the sentinel line.
fn split_child_stdout(stdout: &str) -> Result<(Vec<&str>, Option<CaseOutcome>), String> {
    let mut relay = Vec::new();
    let mut outcome = None;
    for line in stdout.lines() {
        if let Some(payload) = line.strip_prefix(OUTCOME_SENTINEL) {
            outcome = Some(
                serde_json::from_str::<CaseOutcome>(payload)
                    .map_err(|err| format!("invalid case outcome record: {err}"))?,
            );
        } else {
            relay.push(line);
        }
    }
    Ok((relay, outcome))
}

fn describe_abnormal_exit(status: ExitStatus) -> String {
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return format!("terminated by fatal signal {signal}");
        }
    }
    match status.code() {
        Some(code) => format!("exited with status {code} before reporting an outcome"),
        None => "terminated before reporting an outcome".to_string(),
    }
}

fn maybe_append_case_log(path: Option<&Path>, record: &CaseLogRecord<'_>) -> Result<(), String> {
    let Some(path) = path else {
        return Ok(());
    };
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|err| format!("failed creating {}: {err}", parent.display()))?;
        }
    }
    let line = serde_json::to_string(record)
        .map_err(|err| format!("failed serializing case log record: {err}"))?;
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|err| format!("failed opening {}: {err}", path.display()))?;
    writeln!(file, "{line}").map_err(|err| format!("failed writing {}: {err}", path.display()))?;
    Ok(())
}
