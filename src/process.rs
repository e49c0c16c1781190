//! Process invocation for the k6 binary.
use crate::outcome::ExitSignal;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

/// A fully built k6 invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub working_dir: PathBuf,
    pub binary: String,
    pub args: Vec<String>,
    /// Per-invocation environment, layered over the inherited one.
    pub env: BTreeMap<String, String>,
}

/// Captured output of a terminated process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutput {
    pub output: Vec<u8>,
    pub exit: ExitSignal,
}

pub trait ProcessInvoker {
    /// Run to completion. A process that cannot be spawned yields a failed
    /// exit signal rather than an error.
    fn run(&self, invocation: &Invocation) -> ProcessOutput;
}

/// Runs the binary with `std::process::Command`, stdout then stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommandInvoker;

impl ProcessInvoker for CommandInvoker {
    fn run(&self, invocation: &Invocation) -> ProcessOutput {
        let program = resolve_binary(&invocation.binary);
        let mut cmd = Command::new(&program);
        cmd.args(&invocation.args);
        cmd.envs(&invocation.env);
        cmd.current_dir(&invocation.working_dir);

        match cmd.output() {
            Ok(output) => {
                let mut combined = output.stdout;
                combined.extend_from_slice(&output.stderr);
                let exit = if output.status.success() {
                    ExitSignal::Clean
                } else {
                    ExitSignal::Failed(exit_status_string(&output.status))
                };
                ProcessOutput {
                    output: combined,
                    exit,
                }
            }
            Err(err) => {
                tracing::warn!(binary = %program.display(), error = %err, "failed to spawn");
                ProcessOutput {
                    output: Vec::new(),
                    exit: ExitSignal::Failed(format!("spawn {}: {err}", invocation.binary)),
                }
            }
        }
    }
}

/// Bare names are looked up on PATH; anything with a separator is used as is.
fn resolve_binary(binary: &str) -> PathBuf {
    let path = Path::new(binary);
    if path.components().count() > 1 {
        return path.to_path_buf();
    }
    which::which(binary).unwrap_or_else(|_| path.to_path_buf())
}

fn exit_status_string(status: &ExitStatus) -> String {
    if let Some(code) = status.code() {
        return format!("exit status {code}");
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return format!("signal: {signal}");
        }
    }
    "terminated by signal".to_string()
}

/// Shell-style rendering of a command line for logs.
pub fn format_command_line(binary: &str, args: &[String]) -> String {
    shell_words::join(std::iter::once(binary).chain(args.iter().map(String::as_str)))
}
