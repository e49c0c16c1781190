use anyhow::{anyhow, Result};
use std::fmt;
use std::str::FromStr;

/// Markers and positional rules for one k6 report schema.
pub trait ReportGrammar: Send + Sync {
    fn version(&self) -> GrammarVersion;

    /// Substring carried by a non-clean exit when thresholds were crossed.
    fn threshold_exit_marker(&self) -> &'static str;

    /// Substring identifying the aggregated checks summary line.
    fn checks_marker(&self) -> &'static str;

    /// Token present on the checks line when every check succeeded.
    fn checks_success_token(&self) -> &'static str;

    /// Error-level log marker; k6 does not count these as failed checks.
    fn error_log_marker(&self) -> &'static str;

    /// Marker introducing a scenario line in the report header.
    fn scenario_bullet(&self) -> &'static str;

    /// Marker on the progress line of a finished scenario.
    fn completion_marker(&self) -> &'static str;

    /// Index of the elapsed-time token after the completion marker.
    fn duration_token_index(&self) -> usize;

    /// Strip indentation and bullet characters from a scenario line.
    fn scenario_name<'a>(&self, line: &'a str) -> &'a str {
        line.trim().trim_start_matches(['*', ' '])
    }

    /// Short key used to find the progress line of a scenario.
    fn scenario_key<'a>(&self, name: &'a str) -> &'a str {
        name.split(':').next().unwrap_or(name)
    }
}

/// Summary layout printed by k6 at the end of `k6 run`/`k6 cloud`.
#[derive(Debug, Clone, Copy, Default)]
pub struct K6SummaryV0;

impl ReportGrammar for K6SummaryV0 {
    fn version(&self) -> GrammarVersion {
        GrammarVersion::V0
    }

    fn threshold_exit_marker(&self) -> &'static str {
        "exit status 99"
    }

    fn checks_marker(&self) -> &'static str {
        "checks"
    }

    fn checks_success_token(&self) -> &'static str {
        "100.00%"
    }

    fn error_log_marker(&self) -> &'static str {
        "level=error"
    }

    fn scenario_bullet(&self) -> &'static str {
        "* "
    }

    fn completion_marker(&self) -> &'static str {
        "[ 100% ]"
    }

    fn duration_token_index(&self) -> usize {
        2
    }
}

/// Selectable report grammar versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GrammarVersion {
    #[default]
    V0,
}

impl GrammarVersion {
    pub fn grammar(self) -> &'static dyn ReportGrammar {
        match self {
            GrammarVersion::V0 => &K6SummaryV0,
        }
    }
}

impl FromStr for GrammarVersion {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim() {
            "v0" | "k6-summary-v0" => Ok(GrammarVersion::V0),
            other => Err(anyhow!(
                "unknown report grammar {other:?} (expected one of: v0)"
            )),
        }
    }
}

impl fmt::Display for GrammarVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GrammarVersion::V0 => f.write_str("v0"),
        }
    }
}
