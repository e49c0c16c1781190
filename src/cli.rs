//! CLI argument parsing for the k6 execution adapter.
//!
//! The CLI stays thin: it loads inputs, hands them to the runner or the
//! resolver, and prints the execution result as JSON.
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Root CLI entrypoint.
#[derive(Parser, Debug)]
#[command(
    name = "k6-runner",
    version,
    about = "Run k6 load tests and resolve their reports into execution results",
    after_help = "Commands:\n  run --execution <file>   Fetch content, run k6, print the execution result\n  resolve --report <file>  Resolve a saved k6 report without running k6\n\nExamples:\n  RUNNER_DATADIR=/data k6-runner run --execution execution.json\n  k6-runner resolve --report summary.txt --exit-code 99",
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct RootArgs {
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    Run(RunArgs),
    Resolve(ResolveArgs),
}

/// Run command inputs for a single execution.
#[derive(Parser, Debug)]
#[command(about = "Run an execution with k6 and print the result")]
pub struct RunArgs {
    /// Execution JSON (testType, content, envs, args, variables)
    #[arg(long, value_name = "FILE")]
    pub execution: PathBuf,

    /// Data directory for fetched content (defaults to $RUNNER_DATADIR)
    #[arg(long, value_name = "DIR")]
    pub datadir: Option<PathBuf>,

    /// k6 binary name or path (defaults to $K6_BINARY, then `k6`)
    #[arg(long, value_name = "BIN")]
    pub k6_binary: Option<String>,

    /// Content is already in the data directory; skip fetching
    #[arg(long)]
    pub prefetched: bool,

    /// Report grammar version used to read the k6 summary
    #[arg(long, value_name = "VERSION")]
    pub report_grammar: Option<String>,

    /// Extra k6 arguments, shell-quoted, appended after the execution's args
    #[arg(long, value_name = "ARGS", allow_hyphen_values = true)]
    pub extra_args: Option<String>,

    /// Write the result JSON here instead of stdout
    #[arg(long, value_name = "PATH")]
    pub out: Option<PathBuf>,
}

/// Resolve command inputs for an already captured report.
#[derive(Parser, Debug)]
#[command(about = "Resolve a captured k6 report into an execution result")]
pub struct ResolveArgs {
    /// Captured k6 console output
    #[arg(long, value_name = "FILE")]
    pub report: PathBuf,

    /// Process exit code of the captured run
    #[arg(long, conflicts_with = "exit_descriptor")]
    pub exit_code: Option<i32>,

    /// Raw exit descriptor of a failed run (e.g. "exit status 99")
    #[arg(long, value_name = "TEXT", conflicts_with = "exit_code")]
    pub exit_descriptor: Option<String>,

    /// Report grammar version used to read the k6 summary
    #[arg(long, value_name = "VERSION")]
    pub report_grammar: Option<String>,

    /// Write the result JSON here instead of stdout
    #[arg(long, value_name = "PATH")]
    pub out: Option<PathBuf>,
}
