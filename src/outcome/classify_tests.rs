use super::{classify, ExitSignal};
use crate::execution::ExecutionStatus;
use crate::outcome::{CHECKS_FAILED_MESSAGE, THRESHOLDS_FAILED_MESSAGE};
use crate::report::GrammarVersion;

const PASSING_REPORT: &str = include_str!("../../tests/fixtures/k6-summary.txt");
const FAILING_REPORT: &str = include_str!("../../tests/fixtures/k6-summary-multi.txt");

fn failed(descriptor: &str) -> ExitSignal {
    ExitSignal::Failed(descriptor.to_string())
}

#[test]
fn full_checks_and_clean_exit_pass() {
    let verdict = classify(PASSING_REPORT, &ExitSignal::Clean, GrammarVersion::V0.grammar());
    assert_eq!(verdict.status, ExecutionStatus::Passed);
    assert_eq!(verdict.error_message, None);
    assert!(verdict.report_usable);
}

#[test]
fn partial_checks_fail() {
    let report = "     checks.........................: 50.00% ✓ 1 ✗ 1\n";
    let verdict = classify(report, &ExitSignal::Clean, GrammarVersion::V0.grammar());
    assert_eq!(verdict.status, ExecutionStatus::Failed);
    assert_eq!(verdict.error_message.as_deref(), Some(CHECKS_FAILED_MESSAGE));
    assert!(verdict.report_usable);
}

#[test]
fn error_logs_override_clean_checks() {
    let report = "time=\"now\" level=error msg=\"boom\"\n     checks....: 100.00% ✓ 3 ✗ 0\n";
    let verdict = classify(report, &ExitSignal::Clean, GrammarVersion::V0.grammar());
    assert_eq!(verdict.status, ExecutionStatus::Failed);
    assert_eq!(verdict.error_message.as_deref(), Some(CHECKS_FAILED_MESSAGE));
}

#[test]
fn error_logs_without_checks_line_fail() {
    let report = "level=error msg=\"script exception\"\n";
    let verdict = classify(report, &ExitSignal::Clean, GrammarVersion::V0.grammar());
    assert_eq!(verdict.status, ExecutionStatus::Failed);
}

#[test]
fn missing_checks_line_passes() {
    let report = "running (00m01.0s), 0/1 VUs, 1 complete\nhttp_reqs....: 1\n";
    let verdict = classify(report, &ExitSignal::Clean, GrammarVersion::V0.grammar());
    assert_eq!(verdict.status, ExecutionStatus::Passed);
}

#[test]
fn empty_report_with_clean_exit_passes() {
    let verdict = classify("", &ExitSignal::Clean, GrammarVersion::V0.grammar());
    assert_eq!(verdict.status, ExecutionStatus::Passed);
    assert_eq!(verdict.error_message, None);
}

#[test]
fn first_checks_line_decides() {
    let report = "checks: 90.00%\nchecks: 100.00%\n";
    let verdict = classify(report, &ExitSignal::Clean, GrammarVersion::V0.grammar());
    assert_eq!(verdict.status, ExecutionStatus::Failed);
}

#[test]
fn threshold_exit_fails_with_usable_report() {
    let verdict = classify(FAILING_REPORT, &failed("exit status 99"), GrammarVersion::V0.grammar());
    assert_eq!(verdict.status, ExecutionStatus::Failed);
    assert_eq!(
        verdict.error_message.as_deref(),
        Some(THRESHOLDS_FAILED_MESSAGE)
    );
    assert!(verdict.report_usable);
}

#[test]
fn other_exit_is_launch_failure() {
    let verdict = classify(PASSING_REPORT, &failed("exit status 107"), GrammarVersion::V0.grammar());
    assert_eq!(verdict.status, ExecutionStatus::Error);
    assert_eq!(verdict.error_message.as_deref(), Some("exit status 107"));
    assert!(!verdict.report_usable);
}

#[test]
fn spawn_error_is_launch_failure() {
    let descriptor = "spawn k6: No such file or directory (os error 2)";
    let verdict = classify("", &failed(descriptor), GrammarVersion::V0.grammar());
    assert_eq!(verdict.status, ExecutionStatus::Error);
    assert_eq!(verdict.error_message.as_deref(), Some(descriptor));
}

#[test]
fn classification_is_total_and_deterministic() {
    let reports = ["", PASSING_REPORT, FAILING_REPORT, "level=error\n"];
    let exits = [
        ExitSignal::Clean,
        failed("exit status 99"),
        failed("exit status 1"),
        failed("signal: 9"),
    ];
    for report in reports {
        for exit in &exits {
            let first = classify(report, exit, GrammarVersion::V0.grammar());
            let second = classify(report, exit, GrammarVersion::V0.grammar());
            assert_eq!(first, second);
            assert_eq!(
                first.error_message.is_some(),
                first.status != ExecutionStatus::Passed
            );
        }
    }
}

#[test]
fn exit_signal_from_code() {
    assert_eq!(ExitSignal::from_code(0), ExitSignal::Clean);
    assert_eq!(ExitSignal::from_code(99), failed("exit status 99"));
    assert_eq!(ExitSignal::from_code(99).to_string(), "exit status 99");
}

#[test]
fn blank_exit_descriptor_is_rejected() {
    assert!(ExitSignal::from_descriptor("").is_err());
    assert!(ExitSignal::from_descriptor("  \t").is_err());
    assert_eq!(
        ExitSignal::from_descriptor(" exit status 99 ").unwrap(),
        failed("exit status 99")
    );
}
