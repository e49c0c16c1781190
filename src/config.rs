//! Runner configuration sourced from the environment with CLI overrides.
use crate::report::GrammarVersion;
use anyhow::{anyhow, Context, Result};
use std::env;
use std::path::PathBuf;

pub const DATADIR_ENV: &str = "RUNNER_DATADIR";
pub const K6_BINARY_ENV: &str = "K6_BINARY";
pub const GRAMMAR_ENV: &str = "RUNNER_REPORT_GRAMMAR";
pub const PREFETCHED_ENV: &str = "RUNNER_PREFETCHED";
pub const DEFAULT_K6_BINARY: &str = "k6";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerConfig {
    /// Directory holding fetched content (`test-content`, `repo/`).
    pub datadir: PathBuf,
    pub k6_binary: String,
    pub grammar: GrammarVersion,
    /// Content was already placed in `datadir` by the orchestrator.
    pub prefetched: bool,
}

/// CLI-provided values that take precedence over the environment.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub datadir: Option<PathBuf>,
    pub k6_binary: Option<String>,
    pub grammar: Option<String>,
    pub prefetched: bool,
}

impl RunnerConfig {
    pub fn load(overrides: ConfigOverrides) -> Result<Self> {
        Self::from_lookup(overrides, |key| env::var(key).ok())
    }

    fn from_lookup<F>(overrides: ConfigOverrides, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let datadir = overrides
            .datadir
            .or_else(|| non_empty(lookup(DATADIR_ENV)).map(PathBuf::from))
            .ok_or_else(|| anyhow!("data directory not set (use --datadir or {DATADIR_ENV})"))?;

        let k6_binary = overrides
            .k6_binary
            .or_else(|| non_empty(lookup(K6_BINARY_ENV)))
            .unwrap_or_else(|| DEFAULT_K6_BINARY.to_string());

        let grammar = match overrides.grammar.or_else(|| non_empty(lookup(GRAMMAR_ENV))) {
            Some(value) => value
                .parse::<GrammarVersion>()
                .with_context(|| format!("parse report grammar {value:?}"))?,
            None => GrammarVersion::default(),
        };

        let prefetched = overrides.prefetched || parse_flag(lookup(PREFETCHED_ENV).as_deref())?;

        Ok(Self {
            datadir,
            k6_binary,
            grammar,
            prefetched,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}

fn parse_flag(value: Option<&str>) -> Result<bool> {
    match value.map(str::trim) {
        None | Some("") => Ok(false),
        Some("1") | Some("true") => Ok(true),
        Some("0") | Some("false") => Ok(false),
        Some(other) => Err(anyhow!(
            "invalid {PREFETCHED_ENV} value {other:?} (expected 0/1/true/false)"
        )),
    }
}
