#![deny(unsafe_code)]

pub mod cases;
pub mod check;
pub mod runner;

pub use check::{CaseOutcome, CaseRecorder, Precision};
pub use runner::{RunSummary, run_case_in_process, run_suite};

use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct GateConfig {
    /// Binary re-invoked with `--case <name>` to execute one case in a
    /// child process.
    pub runner_exe: PathBuf,
    pub with_fault_probe: bool,
    pub log_path: Option<PathBuf>,
}

impl GateConfig {
    pub fn for_current_exe() -> Result<Self, String> {
        let exe = std::env::current_exe()
            .map_err(|err| format!("failed resolving current executable: {err}"))?;
        Ok(Self {
            runner_exe: exe,
            with_fault_probe: false,
            log_path: None,
        })
    }
}
