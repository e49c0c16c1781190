use crate::execution::ExecutionStepResult;
use crate::report::{ReportGrammar, ReportScanner};
use regex::Regex;

/// Extract one step per scenario bullet, in report order.
pub fn extract_steps(report: &str, grammar: &dyn ReportGrammar) -> Vec<ExecutionStepResult> {
    let scanner = ReportScanner::new(report);
    scanner
        .lines_matching(|line| line.contains(grammar.scenario_bullet()))
        .map(|line| {
            let name = grammar.scenario_name(line);
            let duration = scenario_duration(&scanner, grammar.scenario_key(name), grammar);
            ExecutionStepResult::run(name, duration)
        })
        .collect()
}

/// Elapsed-time token from the first completed progress line mentioning `key`.
///
/// The whole report is searched: progress lines arrive on stderr and may
/// precede the bullet list. Empty when no progress line matches or the line
/// is too short.
fn scenario_duration(
    scanner: &ReportScanner<'_>,
    key: &str,
    grammar: &dyn ReportGrammar,
) -> String {
    let marker = grammar.completion_marker();
    let Some(line) = scanner.find_line(|line| line.contains(key) && line.contains(marker)) else {
        tracing::debug!(scenario = key, "no completed progress line");
        return String::new();
    };

    let Some((_, metrics)) = line.split_once(marker) else {
        return String::new();
    };
    let metrics = collapse_spaces(metrics.trim());
    metrics
        .split(' ')
        .nth(grammar.duration_token_index())
        .unwrap_or_default()
        .to_string()
}

fn collapse_spaces(text: &str) -> String {
    let re = Regex::new(" {2,}").expect("regex for repeated spaces");
    re.replace_all(text, " ").into_owned()
}
