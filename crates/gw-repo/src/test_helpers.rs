//! Git repository test helpers for unit and integration testing.
//!
//! Utilities for creating scratch git repositories in temporary directories,
//! used by the test suites across the workspace.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tempfile::TempDir;

/// Check if git is available on the system.
pub fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Configuration options for scratch repository creation.
#[derive(Debug, Clone)]
pub struct ScratchRepoConfig {
    /// Git user email (default: "test@example.com")
    pub user_email: String,
    /// Git user name (default: "Test User")
    pub user_name: String,
    /// Whether to create an initial commit with README.md (default: true)
    pub create_initial_commit: bool,
    /// Initial commit message (default: "Initial commit")
    pub initial_commit_message: String,
}

impl ScratchRepoConfig {
    /// Create a config with default values, allowing fluent customization.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the git user email.
    pub fn user_email(mut self, email: impl Into<String>) -> Self {
        self.user_email = email.into();
        self
    }

    /// Set the git user name.
    pub fn user_name(mut self, name: impl Into<String>) -> Self {
        self.user_name = name.into();
        self
    }

    /// Set whether to create an initial commit (default: true).
    pub fn create_initial_commit(mut self, create: bool) -> Self {
        self.create_initial_commit = create;
        self
    }

    /// Set the initial commit message.
    pub fn initial_commit_message(mut self, message: impl Into<String>) -> Self {
        self.initial_commit_message = message.into();
        self
    }
}

impl Default for ScratchRepoConfig {
    fn default() -> Self {
        Self {
            user_email: "test@example.com".to_string(),
            user_name: "Test User".to_string(),
            create_initial_commit: true,
            initial_commit_message: "Initial commit".to_string(),
        }
    }
}

/// A scratch git repository backed by a temporary directory.
pub struct ScratchRepo {
    /// Temporary directory containing the repository; dropped with the value.
    pub dir: TempDir,
    /// Path to the repository work tree.
    pub path: PathBuf,
}

impl ScratchRepo {
    /// Create a scratch repository with default configuration.
    pub fn create() -> std::io::Result<Self> {
        Self::create_with(ScratchRepoConfig::default())
    }

    /// Create a scratch repository with the given configuration.
    pub fn create_with(config: ScratchRepoConfig) -> std::io::Result<Self> {
        let dir = TempDir::new()?;
        let path = dir.path().to_path_buf();

        run_git(&path, &["init", "-b", "main"])?;
        run_git(&path, &["config", "user.email", &config.user_email])?;
        run_git(&path, &["config", "user.name", &config.user_name])?;
        run_git(&path, &["config", "commit.gpgsign", "false"])?;
        run_git(&path, &["config", "tag.gpgsign", "false"])?;

        if config.create_initial_commit {
            fs::write(path.join("README.md"), "Initial content\n")?;
            run_git(&path, &["add", "README.md"])?;
            run_git(&path, &["commit", "-m", &config.initial_commit_message])?;
        }

        Ok(Self { dir, path })
    }

    /// Run a git command in the scratch repository and return trimmed stdout.
    pub fn git(&self, args: &[&str]) -> std::io::Result<String> {
        run_git(&self.path, args)
    }

    /// Write a file into the work tree.
    pub fn write_file(&self, name: &str, contents: &str) -> std::io::Result<()> {
        fs::write(self.path.join(name), contents)
    }
}

fn run_git(dir: &Path, args: &[&str]) -> std::io::Result<String> {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .env("GIT_CONFIG_NOSYSTEM", "1")
        .env("GIT_TERMINAL_PROMPT", "0")
        .stdin(Stdio::null())
        .output()?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(std::io::Error::new(
            std::io::ErrorKind::Other,
            format!("git {} failed: {}", args.join(" "), stderr.trim()),
        ));
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}
