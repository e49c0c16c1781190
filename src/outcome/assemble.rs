use super::classify::{classify, ExitSignal};
use super::scenarios::extract_steps;
use crate::execution::{ExecutionResult, OUTPUT_TYPE_TEXT};
use crate::report::ReportGrammar;

/// Resolve a finished run into an execution result.
///
/// Never fails: launch failures, failed checks and crossed thresholds all
/// surface through the result's status and error message.
pub fn resolve(report: &str, exit: &ExitSignal, grammar: &dyn ReportGrammar) -> ExecutionResult {
    let verdict = classify(report, exit, grammar);
    tracing::info!(
        exit = %exit,
        status = ?verdict.status,
        error = verdict.error_message.as_deref().unwrap_or(""),
        grammar = %grammar.version(),
        "resolved k6 outcome"
    );

    if !verdict.report_usable {
        return ExecutionResult {
            status: verdict.status,
            error_message: verdict.error_message,
            output: None,
            output_type: None,
            steps: Vec::new(),
        };
    }

    ExecutionResult {
        status: verdict.status,
        error_message: verdict.error_message,
        output: Some(report.to_string()),
        output_type: Some(OUTPUT_TYPE_TEXT.to_string()),
        steps: extract_steps(report, grammar),
    }
}
