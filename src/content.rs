//! Test content retrieval into the runner data directory.
//!
//! Fetching only materialises files; deciding how k6 is invoked over them is
//! the runner's job.
use crate::execution::{ContentSource, Repository, TestContent};
use crate::secret::SecretManager;
use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// File name used for single-script content inside the data directory.
pub const TEST_CONTENT_FILE: &str = "test-content";
/// Checkout directory for git content inside the data directory.
pub const REPO_DIR: &str = "repo";

/// Where fetched content lives and how k6 should be pointed at it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentLayout {
    /// Run in `directory` with `script` appended as the final argument.
    File { directory: PathBuf, script: String },
    /// Run in `directory`; the user's last argument names the script.
    Directory { directory: PathBuf },
}

impl ContentLayout {
    pub fn directory(&self) -> &Path {
        match self {
            ContentLayout::File { directory, .. } | ContentLayout::Directory { directory } => {
                directory
            }
        }
    }
}

pub trait ContentFetcher {
    fn fetch(&self, content: &TestContent, datadir: &Path) -> Result<ContentLayout>;
}

/// Layout of `content` under `datadir`, without touching the filesystem.
pub fn layout_for(content: &TestContent, datadir: &Path) -> Result<ContentLayout> {
    Ok(match &content.source {
        ContentSource::String { .. } | ContentSource::File { .. } | ContentSource::Uri { .. } => {
            ContentLayout::File {
                directory: datadir.to_path_buf(),
                script: TEST_CONTENT_FILE.to_string(),
            }
        }
        ContentSource::GitFile { repository } => {
            let script = repository
                .path
                .as_deref()
                .filter(|path| !path.trim().is_empty())
                .ok_or_else(|| anyhow!("git-file content requires repository.path"))?;
            ContentLayout::File {
                directory: datadir.join(REPO_DIR),
                script: script.to_string(),
            }
        }
        ContentSource::GitDir { .. } => ContentLayout::Directory {
            directory: datadir.join(REPO_DIR),
        },
    })
}

/// Content was placed in the data directory before the runner started.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrefetchedFetcher;

impl ContentFetcher for PrefetchedFetcher {
    fn fetch(&self, content: &TestContent, datadir: &Path) -> Result<ContentLayout> {
        layout_for(content, datadir)
    }
}

/// Materialises every content type into the data directory.
#[derive(Debug, Clone)]
pub struct LocalFetcher {
    git_binary: String,
}

impl Default for LocalFetcher {
    fn default() -> Self {
        Self {
            git_binary: "git".to_string(),
        }
    }
}

impl ContentFetcher for LocalFetcher {
    fn fetch(&self, content: &TestContent, datadir: &Path) -> Result<ContentLayout> {
        let layout = layout_for(content, datadir)?;
        let script_path = datadir.join(TEST_CONTENT_FILE);
        match &content.source {
            ContentSource::String { data } => {
                fs::write(&script_path, data)
                    .with_context(|| format!("write {}", script_path.display()))?;
            }
            ContentSource::File { path } => {
                let source = Path::new(path);
                if source != script_path {
                    fs::copy(source, &script_path).with_context(|| {
                        format!("copy {} to {}", source.display(), script_path.display())
                    })?;
                }
            }
            ContentSource::Uri { uri } => {
                let body = download(uri)?;
                fs::write(&script_path, body)
                    .with_context(|| format!("write {}", script_path.display()))?;
            }
            ContentSource::GitDir { repository } | ContentSource::GitFile { repository } => {
                self.checkout(repository, &datadir.join(REPO_DIR))?;
            }
        }
        tracing::info!(directory = %layout.directory().display(), "fetched test content");
        Ok(layout)
    }
}

impl LocalFetcher {
    fn checkout(&self, repository: &Repository, dest: &Path) -> Result<()> {
        if dest.exists() {
            fs::remove_dir_all(dest).with_context(|| format!("remove {}", dest.display()))?;
        }
        let dest_str = dest
            .to_str()
            .ok_or_else(|| anyhow!("checkout path is not valid UTF-8"))?;
        let redactor = SecretManager::new(repository.token.clone());

        let mut clone_args = vec!["clone".to_string()];
        if let Some(branch) = repository.branch.as_deref().filter(|b| !b.is_empty()) {
            // A pinned commit may be older than the shallow tip.
            if repository.commit.is_none() {
                clone_args.extend(["--depth".to_string(), "1".to_string()]);
            }
            clone_args.extend(["--branch".to_string(), branch.to_string()]);
        }
        clone_args.push(authenticated_uri(repository));
        clone_args.push(dest_str.to_string());
        self.git(&clone_args, None, &redactor)
            .with_context(|| format!("clone {}", repository.uri))?;

        if let Some(commit) = repository.commit.as_deref().filter(|c| !c.is_empty()) {
            let checkout_args = ["checkout".to_string(), commit.to_string()];
            self.git(&checkout_args, Some(dest), &redactor)
                .with_context(|| format!("checkout {commit}"))?;
        }
        Ok(())
    }

    fn git(&self, args: &[String], cwd: Option<&Path>, redactor: &SecretManager) -> Result<()> {
        let mut cmd = Command::new(&self.git_binary);
        cmd.args(args);
        if let Some(cwd) = cwd {
            cmd.current_dir(cwd);
        }
        let output = cmd
            .output()
            .with_context(|| format!("spawn {}", self.git_binary))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(anyhow!(
                "git {} failed: {}",
                args.first().map(String::as_str).unwrap_or_default(),
                redactor.obfuscate(stderr.trim())
            ));
        }
        Ok(())
    }
}

fn download(uri: &str) -> Result<String> {
    let mut response = ureq::get(uri)
        .call()
        .with_context(|| format!("download {uri}"))?;
    response
        .body_mut()
        .read_to_string()
        .with_context(|| format!("read body of {uri}"))
}

/// Embed credentials into https URIs; other schemes are left alone.
fn authenticated_uri(repository: &Repository) -> String {
    let Some(token) = repository.token.as_deref().filter(|t| !t.is_empty()) else {
        return repository.uri.clone();
    };
    let Some(rest) = repository.uri.strip_prefix("https://") else {
        return repository.uri.clone();
    };
    let username = repository
        .username
        .as_deref()
        .filter(|u| !u.is_empty())
        .unwrap_or("oauth2");
    format!("https://{username}:{token}@{rest}")
}
