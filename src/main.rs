use anyhow::{Context, Result};
use clap::Parser;
use std::path::Path;

mod cli;
mod config;
mod content;
mod execution;
mod outcome;
mod process;
mod report;
mod runner;
mod secret;

use cli::{Command, ResolveArgs, RootArgs, RunArgs};
use config::{ConfigOverrides, RunnerConfig};
use content::{LocalFetcher, PrefetchedFetcher};
use execution::{Execution, ExecutionResult};
use outcome::ExitSignal;
use process::CommandInvoker;
use report::GrammarVersion;
use runner::K6Runner;

fn main() -> Result<()> {
    // Logs go to stderr so stdout carries only the result JSON.
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .try_init();

    let args = RootArgs::parse();
    match args.command {
        Command::Run(args) => cmd_run(args),
        Command::Resolve(args) => cmd_resolve(args),
    }
}

fn cmd_run(args: RunArgs) -> Result<()> {
    let config = RunnerConfig::load(ConfigOverrides {
        datadir: args.datadir,
        k6_binary: args.k6_binary,
        grammar: args.report_grammar,
        prefetched: args.prefetched,
    })?;
    let execution: Execution = read_json(&args.execution)?;
    let extra_args = match args.extra_args.as_deref() {
        Some(raw) => shell_words::split(raw).with_context(|| format!("parse extra args: {raw}"))?,
        None => Vec::new(),
    };

    let result = if config.prefetched {
        K6Runner::new(config, PrefetchedFetcher, CommandInvoker)
            .with_extra_args(extra_args)
            .run(&execution)?
    } else {
        K6Runner::new(config, LocalFetcher::default(), CommandInvoker)
            .with_extra_args(extra_args)
            .run(&execution)?
    };
    write_result(&result, args.out.as_deref())
}

fn cmd_resolve(args: ResolveArgs) -> Result<()> {
    let grammar = match args.report_grammar.as_deref() {
        Some(value) => value.parse::<GrammarVersion>()?,
        None => GrammarVersion::default(),
    };
    let bytes = std::fs::read(&args.report)
        .with_context(|| format!("read report {}", args.report.display()))?;
    let report = String::from_utf8_lossy(&bytes);
    let exit = match (args.exit_code, args.exit_descriptor.as_deref()) {
        (Some(code), _) => ExitSignal::from_code(code),
        (None, Some(descriptor)) => {
            ExitSignal::from_descriptor(descriptor).context("--exit-descriptor")?
        }
        (None, None) => ExitSignal::Clean,
    };

    let result = outcome::resolve(&report, &exit, grammar.grammar());
    write_result(&result, args.out.as_deref())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let bytes = std::fs::read(path).with_context(|| format!("read {}", path.display()))?;
    serde_json::from_slice(&bytes).with_context(|| format!("parse {}", path.display()))
}

fn write_result(result: &ExecutionResult, out: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(result).context("serialize execution result")?;
    match out {
        Some(path) => {
            std::fs::write(path, format!("{json}\n"))
                .with_context(|| format!("write {}", path.display()))?;
        }
        None => println!("{json}"),
    }
    Ok(())
}
