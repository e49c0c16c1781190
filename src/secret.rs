//! Obfuscation of sensitive variable values in captured output.
use crate::execution::Execution;
use crate::runner::args::CLOUD_TOKEN_VAR;

pub const REDACTION_MARKER: &str = "********";

/// Replaces sensitive values with [`REDACTION_MARKER`].
#[derive(Debug, Clone, Default)]
pub struct SecretManager {
    secrets: Vec<String>,
}

impl SecretManager {
    pub fn new<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut secrets: Vec<String> = values
            .into_iter()
            .map(Into::into)
            .filter(|value| !value.is_empty())
            .collect();
        // Longest first so a secret containing another is replaced whole.
        secrets.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        secrets.dedup();
        Self { secrets }
    }

    /// Secret variables plus the cloud token, wherever it was supplied.
    pub fn for_execution(execution: &Execution) -> Self {
        let variables = execution
            .variables
            .iter()
            .filter(|variable| variable.secret || variable.name == CLOUD_TOKEN_VAR)
            .map(|variable| variable.value.clone());
        let envs = execution
            .envs
            .iter()
            .filter(|(key, _)| key.as_str() == CLOUD_TOKEN_VAR)
            .map(|(_, value)| value.clone());
        Self::new(variables.chain(envs))
    }

    pub fn obfuscate(&self, text: &str) -> String {
        let mut out = text.to_string();
        for secret in &self.secrets {
            if out.contains(secret.as_str()) {
                out = out.replace(secret.as_str(), REDACTION_MARKER);
            }
        }
        out
    }
}
