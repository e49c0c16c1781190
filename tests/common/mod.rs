//! Shared test infrastructure for integration tests.
#![allow(dead_code)]

use std::env;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

pub fn manifest_dir() -> PathBuf {
    PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".into()))
}

pub fn fixture_path(name: &str) -> PathBuf {
    manifest_dir().join("tests/fixtures").join(name)
}

/// Built `k6-runner` binary.
pub fn runner_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_k6-runner"))
}

/// Parsed result JSON from a successful invocation.
pub fn result_json(output: &Output) -> serde_json::Value {
    assert!(
        output.status.success(),
        "k6-runner failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("result JSON on stdout")
}

/// Temporary data directory plus a fake `k6` that prints a report fixture.
pub struct FakeK6 {
    pub root: TempDir,
}

impl FakeK6 {
    /// The fake prints `report`, records its argv to `argv.txt`, then exits
    /// with `exit_code`.
    #[cfg(unix)]
    pub fn new(report: &str, exit_code: i32) -> Self {
        use std::os::unix::fs::PermissionsExt;

        let root = TempDir::new().expect("create temp dir");
        std::fs::create_dir_all(root.path().join("data")).expect("create data dir");
        let report_path = fixture_path(report);
        let argv_path = root.path().join("argv.txt");
        let script = format!(
            "#!/bin/sh\nprintf '%s\\n' \"$@\" > '{}'\nprintf '%s\\n' \"${{K6_CLOUD_TOKEN:-}}\" >> '{}'\ncat '{}'\nexit {exit_code}\n",
            argv_path.display(),
            argv_path.display(),
            report_path.display(),
        );
        let bin = root.path().join("k6");
        std::fs::write(&bin, script).expect("write fake k6");
        let mut perms = std::fs::metadata(&bin).expect("stat fake k6").permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&bin, perms).expect("chmod fake k6");
        Self { root }
    }

    pub fn bin(&self) -> PathBuf {
        self.root.path().join("k6")
    }

    pub fn datadir(&self) -> PathBuf {
        self.root.path().join("data")
    }

    /// Lines recorded by the fake: every argv entry, then the cloud token.
    pub fn recorded(&self) -> Vec<String> {
        std::fs::read_to_string(self.root.path().join("argv.txt"))
            .expect("fake k6 ran")
            .lines()
            .map(str::to_string)
            .collect()
    }

    pub fn write_execution(&self, json: &serde_json::Value) -> PathBuf {
        let path = self.root.path().join("execution.json");
        std::fs::write(&path, serde_json::to_vec_pretty(json).expect("serialize"))
            .expect("write execution");
        path
    }

    pub fn run(&self, execution: &Path, extra: &[&str]) -> Output {
        runner_bin()
            .arg("run")
            .arg("--execution")
            .arg(execution)
            .arg("--datadir")
            .arg(self.datadir())
            .arg("--k6-binary")
            .arg(self.bin())
            .args(extra)
            .env_remove("RUNNER_DATADIR")
            .env_remove("K6_CLOUD_TOKEN")
            .output()
            .expect("run k6-runner")
    }
}
