use crate::execution::Execution;
use anyhow::{anyhow, Result};
use std::collections::BTreeMap;

/// Passed to k6 through the process environment, never as `-e`.
pub const CLOUD_TOKEN_VAR: &str = "K6_CLOUD_TOKEN";

const K6_CLOUD: &str = "cloud";
const K6_RUN: &str = "run";

/// k6 arguments and process environment derived from an execution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct K6Command {
    pub args: Vec<String>,
    pub env: BTreeMap<String, String>,
}

impl K6Command {
    fn push_variable(&mut self, name: &str, value: &str) {
        if name == CLOUD_TOKEN_VAR {
            self.env.insert(name.to_string(), value.to_string());
        } else {
            self.args.push("-e".to_string());
            self.args.push(format!("{name}={value}"));
        }
    }
}

/// `<family>/<subtype>` with exactly two parts.
pub fn test_subtype(test_type: &str) -> Result<&str> {
    let parts: Vec<&str> = test_type.split('/').collect();
    match parts.as_slice() {
        [_, subtype] => Ok(*subtype),
        _ => Err(anyhow!("invalid test type {test_type}")),
    }
}

/// Subcommand, variables, envs, then the user's free-form args.
///
/// The script argument is appended later, once the content layout is known.
pub fn build_command(execution: &Execution, extra_args: &[String]) -> Result<K6Command> {
    let subtype = test_subtype(&execution.test_type)?;
    let mut command = K6Command::default();
    command.args.push(if subtype == K6_CLOUD { K6_CLOUD } else { K6_RUN }.to_string());

    for variable in &execution.variables {
        command.push_variable(&variable.name, &variable.value);
    }
    for (key, value) in &execution.envs {
        command.push_variable(key, value);
    }

    command.args.extend(execution.args.iter().cloned());
    command.args.extend(extra_args.iter().cloned());
    Ok(command)
}
