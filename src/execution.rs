//! Execution request and result types exchanged with the orchestrator.
//!
//! Field names follow the orchestrator's camelCase JSON.
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Output type recorded whenever report text is attached to a result.
pub const OUTPUT_TYPE_TEXT: &str = "text/plain";

/// Step status; k6 only reports aggregate check success, not per scenario.
pub const STEP_STATUS_RUN: &str = "run";

/// One request to run a k6 test.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Execution {
    pub test_type: String,
    pub content: TestContent,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub envs: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variables: Vec<Variable>,
}

/// Named variable handed to k6; secret values are obfuscated in output.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Variable {
    pub name: String,
    pub value: String,
    #[serde(default)]
    pub secret: bool,
}

/// Test content reference plus an optional working directory override.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestContent {
    #[serde(flatten)]
    pub source: ContentSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub working_dir: Option<String>,
}

/// Where the k6 script comes from.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ContentSource {
    String { data: String },
    File { path: String },
    Uri { uri: String },
    GitDir { repository: Repository },
    GitFile { repository: Repository },
}

/// Git repository reference for git-backed content.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Repository {
    pub uri: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl TestContent {
    pub fn working_dir(&self) -> Option<&str> {
        self.working_dir
            .as_deref()
            .filter(|value| !value.trim().is_empty())
    }
}

/// Overall run status; there is no partial status at this layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionStatus {
    Passed,
    Failed,
    Error,
}

/// Structured result returned to the orchestrator.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionResult {
    pub status: ExecutionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_type: Option<String>,
    #[serde(default)]
    pub steps: Vec<ExecutionStepResult>,
}

/// Per-scenario step extracted from the report.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ExecutionStepResult {
    pub name: String,
    pub duration: String,
    pub status: String,
}

impl ExecutionStepResult {
    pub fn run(name: impl Into<String>, duration: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            duration: duration.into(),
            status: STEP_STATUS_RUN.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_string_content_execution() {
        let json = r#"{
            "testType": "k6/script",
            "content": {"type": "string", "data": "export default function () {}"},
            "envs": {"TARGET": "example.com"},
            "args": ["--vus", "2"],
            "variables": [{"name": "TOKEN", "value": "s3cr3t", "secret": true}]
        }"#;
        let execution: Execution = serde_json::from_str(json).unwrap();
        assert_eq!(execution.test_type, "k6/script");
        assert!(matches!(
            execution.content.source,
            ContentSource::String { ref data } if data.starts_with("export")
        ));
        assert_eq!(execution.envs["TARGET"], "example.com");
        assert!(execution.variables[0].secret);
    }

    #[test]
    fn deserializes_git_dir_with_working_dir() {
        let json = r#"{
            "testType": "k6/run",
            "content": {
                "type": "git-dir",
                "repository": {"uri": "https://example.com/repo.git", "branch": "main"},
                "workingDir": "tests"
            }
        }"#;
        let execution: Execution = serde_json::from_str(json).unwrap();
        assert!(matches!(
            execution.content.source,
            ContentSource::GitDir { ref repository } if repository.branch.as_deref() == Some("main")
        ));
        assert_eq!(execution.content.working_dir(), Some("tests"));
        assert!(execution.args.is_empty());
    }

    #[test]
    fn blank_working_dir_is_ignored() {
        let content = TestContent {
            source: ContentSource::Uri {
                uri: "https://example.com/test.js".to_string(),
            },
            working_dir: Some("  ".to_string()),
        };
        assert_eq!(content.working_dir(), None);
    }

    #[test]
    fn result_serializes_camel_case_and_omits_empty_fields() {
        let result = ExecutionResult {
            status: ExecutionStatus::Error,
            error_message: Some("exit status 1".to_string()),
            output: None,
            output_type: None,
            steps: Vec::new(),
        };
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["status"], "error");
        assert_eq!(value["errorMessage"], "exit status 1");
        assert!(value.get("output").is_none());
        assert_eq!(value["steps"], serde_json::json!([]));
    }
}
