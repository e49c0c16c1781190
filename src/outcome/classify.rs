use super::{CHECKS_FAILED_MESSAGE, THRESHOLDS_FAILED_MESSAGE};
use crate::execution::ExecutionStatus;
use crate::report::{ReportGrammar, ReportScanner};
use anyhow::{anyhow, Result};
use std::fmt;

/// How the k6 process ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExitSignal {
    Clean,
    /// Non-zero exit or launch failure, with the invoker's descriptor
    /// (e.g. `exit status 99`).
    Failed(String),
}

impl ExitSignal {
    pub fn from_code(code: i32) -> Self {
        if code == 0 {
            ExitSignal::Clean
        } else {
            ExitSignal::Failed(format!("exit status {code}"))
        }
    }

    /// A failure descriptor supplied from outside; blank text carries no
    /// failure and is rejected rather than read as a clean exit.
    pub fn from_descriptor(descriptor: &str) -> Result<Self> {
        let descriptor = descriptor.trim();
        if descriptor.is_empty() {
            return Err(anyhow!("exit descriptor is blank"));
        }
        Ok(ExitSignal::Failed(descriptor.to_string()))
    }
}

impl fmt::Display for ExitSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitSignal::Clean => f.write_str("exit status 0"),
            ExitSignal::Failed(descriptor) => f.write_str(descriptor),
        }
    }
}

/// Status decision for a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub status: ExecutionStatus,
    pub error_message: Option<String>,
    /// False when k6 could not run meaningfully; the report is then neither
    /// attached nor scanned for scenarios.
    pub report_usable: bool,
}

impl Verdict {
    fn passed() -> Self {
        Self {
            status: ExecutionStatus::Passed,
            error_message: None,
            report_usable: true,
        }
    }

    fn failed(message: &str) -> Self {
        Self {
            status: ExecutionStatus::Failed,
            error_message: Some(message.to_string()),
            report_usable: true,
        }
    }

    fn launch_failure(descriptor: &str) -> Self {
        Self {
            status: ExecutionStatus::Error,
            error_message: Some(descriptor.to_string()),
            report_usable: false,
        }
    }
}

/// Decide the overall status of a run from its report and exit signal.
pub fn classify(report: &str, exit: &ExitSignal, grammar: &dyn ReportGrammar) -> Verdict {
    match exit {
        ExitSignal::Failed(descriptor) if descriptor.contains(grammar.threshold_exit_marker()) => {
            Verdict::failed(THRESHOLDS_FAILED_MESSAGE)
        }
        ExitSignal::Failed(descriptor) => Verdict::launch_failure(descriptor),
        ExitSignal::Clean => {
            let scanner = ReportScanner::new(report);
            if checks_succeeded(&scanner, grammar) && !has_error_logs(&scanner, grammar) {
                Verdict::passed()
            } else {
                Verdict::failed(CHECKS_FAILED_MESSAGE)
            }
        }
    }
}

/// The first checks line decides; no checks line means no checks were declared.
fn checks_succeeded(scanner: &ReportScanner<'_>, grammar: &dyn ReportGrammar) -> bool {
    match scanner.find_line(|line| line.contains(grammar.checks_marker())) {
        Some(line) => {
            tracing::debug!(line = line.trim(), "checks summary line");
            line.contains(grammar.checks_success_token())
        }
        None => true,
    }
}

// k6 does not surface some runtime errors as failed checks (grafana/k6#1680).
fn has_error_logs(scanner: &ReportScanner<'_>, grammar: &dyn ReportGrammar) -> bool {
    scanner.contains(grammar.error_log_marker())
}

#[cfg(test)]
#[path = "classify_tests.rs"]
mod tests;
