//! k6 execution adapter: content, arguments, invocation, then resolution.
//!
//! Setup problems are returned as errors; anything that happens once k6 has
//! been invoked is reported through the execution result.
pub(crate) mod args;

use crate::config::RunnerConfig;
use crate::content::{ContentFetcher, ContentLayout};
use crate::execution::{Execution, ExecutionResult};
use crate::outcome;
use crate::process::{format_command_line, Invocation, ProcessInvoker};
use crate::secret::SecretManager;
use anyhow::{anyhow, Context, Result};
use std::path::Path;

use args::build_command;

pub struct K6Runner<F, P> {
    config: RunnerConfig,
    fetcher: F,
    invoker: P,
    extra_args: Vec<String>,
}

impl<F: ContentFetcher, P: ProcessInvoker> K6Runner<F, P> {
    pub fn new(config: RunnerConfig, fetcher: F, invoker: P) -> Self {
        Self {
            config,
            fetcher,
            invoker,
            extra_args: Vec::new(),
        }
    }

    /// Arguments appended after the execution's own arguments.
    pub fn with_extra_args(mut self, extra_args: Vec<String>) -> Self {
        self.extra_args = extra_args;
        self
    }

    pub fn run(&self, execution: &Execution) -> Result<ExecutionResult> {
        let datadir = &self.config.datadir;
        if !datadir.is_dir() {
            return Err(anyhow!("data directory {} does not exist", datadir.display()));
        }

        let mut command = build_command(execution, &self.extra_args)?;
        let layout = self
            .fetcher
            .fetch(&execution.content, datadir)
            .context("fetch test content")?;

        match &layout {
            ContentLayout::File { script, .. } => command.args.push(script.clone()),
            ContentLayout::Directory { directory } => {
                let user_args = execution.args.len() + self.extra_args.len();
                let script = command.args.last().filter(|_| user_args > 0);
                ensure_script(directory, script)?;
            }
        }

        let directory = layout.directory();
        let mut working_dir = directory.to_path_buf();
        if let Some(sub) = execution.content.working_dir() {
            working_dir = directory.join(sub);
            if let Some(last) = command.args.last_mut() {
                *last = directory.join(last.as_str()).display().to_string();
            }
        }

        let secrets = SecretManager::for_execution(execution);
        tracing::info!(
            directory = %working_dir.display(),
            command = %secrets.obfuscate(&format_command_line(&self.config.k6_binary, &command.args)),
            "running k6"
        );

        let invocation = Invocation {
            working_dir,
            binary: self.config.k6_binary.clone(),
            args: command.args,
            env: command.env,
        };
        let captured = self.invoker.run(&invocation);
        let output = secrets.obfuscate(&String::from_utf8_lossy(&captured.output));

        Ok(outcome::resolve(
            &output,
            &captured.exit,
            self.config.grammar.grammar(),
        ))
    }
}

/// Directory content runs the script named by the last argument.
fn ensure_script(directory: &Path, script: Option<&String>) -> Result<()> {
    let Some(script) = script else {
        return Err(anyhow!(
            "k6 test script not specified: directory content needs the script path as the last argument"
        ));
    };
    let script_path = directory.join(script);
    if !script_path.is_file() {
        return Err(anyhow!("k6 test script {} not found", script_path.display()));
    }
    Ok(())
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
