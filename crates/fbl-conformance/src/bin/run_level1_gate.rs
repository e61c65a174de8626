#![deny(unsafe_code)]

use fbl_conformance::GateConfig;
use fbl_conformance::cases;
use fbl_conformance::runner::{emit_outcome, run_case_in_process, run_suite};
use std::path::PathBuf;

fn main() {
    if let Err(err) = run() {
        eprintln!("run_level1_gate failed: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let mut child_case: Option<String> = None;
    let mut with_fault_probe = false;
    let mut log_path: Option<PathBuf> = None;
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--case" => {
                let value = args
                    .next()
                    .ok_or_else(|| "--case requires a value".to_string())?;
                child_case = Some(value);
            }
            "--with-fault-probe" => with_fault_probe = true,
            "--log-path" => {
                let value = args
                    .next()
                    .ok_or_else(|| "--log-path requires a value".to_string())?;
                log_path = Some(PathBuf::from(value));
            }
            "--help" | "-h" => {
                println!(
                    "Usage: cargo run -p fbl-conformance --bin run_level1_gate -- \
                     [--with-fault-probe] [--log-path <path>]"
                );
                return Ok(());
            }
            unknown => return Err(format!("unknown argument: {unknown}")),
        }
    }

    if let Some(name) = child_case {
        let case = cases::find_case(&name).ok_or_else(|| format!("unknown test case: {name}"))?;
        let outcome = run_case_in_process(case);
        emit_outcome(&outcome)?;
        return Ok(());
    }

    let mut config = GateConfig::for_current_exe()?;
    config.with_fault_probe = with_fault_probe;
    config.log_path = log_path;

    let summary = run_suite(&config)?;

    println!();
    println!("=== results ===");
    println!("passed: {}", summary.passed);
    println!("failed: {}", summary.failed);
    println!("total: {}", summary.total());

    // Failures are reported above, never escalated to the exit status; the
    // gate completing is itself the success condition.
    Ok(())
}
