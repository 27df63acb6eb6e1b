use regex::Regex;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::debug;

use crate::error::{RepoError, RepoResult};
use crate::identity::Identity;

/// Branch names that tasks must never create or delete.
pub const PROTECTED_BRANCHES: &[&str] = &["main", "master", "trunk", "default"];

/// Handle to an already-initialized git repository.
///
/// The handle carries no state beyond the repository root; every operation is
/// one synchronous `git` invocation. Write operations that attribute authorship
/// take an [`Identity`] and apply it through the committer environment.
#[derive(Debug)]
pub struct GitRepo {
    root: PathBuf,
}

impl GitRepo {
    /// Open the repository containing `path_in_repo`, walking up to find the root.
    pub fn new<P: AsRef<Path>>(path_in_repo: P) -> RepoResult<Self> {
        let root = Self::find_repo_root(path_in_repo.as_ref())?;
        Ok(Self { root })
    }

    /// Get the repository root path
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the current branch name
    pub fn current_branch(&self) -> RepoResult<String> {
        let branch = self.run_git(&["rev-parse", "--abbrev-ref", "HEAD"], &[])?;

        if branch.is_empty() {
            return Err(RepoError::Other(
                "Could not determine current branch".to_string(),
            ));
        }

        Ok(branch)
    }

    /// Validate a branch name
    pub fn valid_branch_name(name: &str) -> bool {
        // Branch name validation: alphanumeric, dots, underscores, hyphens only
        let re = Regex::new(r"^[A-Za-z0-9._-]+$").unwrap();
        re.is_match(name)
    }

    /// Check if a branch name is protected
    pub fn is_protected_branch(name: &str) -> bool {
        PROTECTED_BRANCHES.contains(&name)
    }

    /// Create a local branch at HEAD without switching to it
    pub fn create_branch(&self, name: &str) -> RepoResult<()> {
        if !Self::valid_branch_name(name) {
            return Err(RepoError::InvalidBranchName(name.to_string()));
        }

        if Self::is_protected_branch(name) {
            return Err(RepoError::ProtectedBranch(name.to_string()));
        }

        self.run_git(&["branch", name], &[])?;
        Ok(())
    }

    /// Delete a local branch
    pub fn delete_branch(&self, name: &str, force: bool) -> RepoResult<()> {
        if Self::is_protected_branch(name) {
            return Err(RepoError::ProtectedBranch(name.to_string()));
        }

        let flag = if force { "-D" } else { "-d" };
        self.run_git(&["branch", flag, name], &[])?;
        Ok(())
    }

    /// Switch the work tree to a branch or revision
    pub fn checkout(&self, target: &str) -> RepoResult<()> {
        self.run_git(&["checkout", target], &[])?;
        Ok(())
    }

    /// Check if a branch exists
    pub fn branch_exists(&self, name: &str) -> RepoResult<bool> {
        Ok(self.branches()?.contains(&name.to_string()))
    }

    /// List all local branches
    pub fn branches(&self) -> RepoResult<Vec<String>> {
        let output = self.run_git(&["branch", "--list"], &[])?;
        let branches = output
            .lines()
            .map(|line| line.trim_start_matches(|c: char| c == '*' || c == ' ').trim().to_string())
            .filter(|line| !line.is_empty())
            .collect();
        Ok(branches)
    }

    /// Stage all pending changes and commit them attributed to `identity`
    pub fn commit_all(&self, message: &str, identity: &Identity) -> RepoResult<()> {
        self.run_git(&["add", "--all"], &[])?;
        self.run_git(&["commit", "-m", message], &identity.env())?;
        Ok(())
    }

    /// Create an annotated tag attributed to `identity`
    pub fn tag(&self, name: &str, identity: &Identity, message: &str) -> RepoResult<()> {
        self.run_git(&["tag", "--annotate", name, "--message", message], &identity.env())?;
        Ok(())
    }

    /// Delete a tag
    pub fn delete_tag(&self, name: &str) -> RepoResult<()> {
        self.run_git(&["tag", "--delete", name], &[])?;
        Ok(())
    }

    /// Check if a tag exists
    pub fn tag_exists(&self, name: &str) -> RepoResult<bool> {
        let output = self.run_git(&["tag", "--list", name], &[])?;
        Ok(!output.is_empty())
    }

    /// Get the annotation message of a tag, if the tag exists
    pub fn tag_message(&self, name: &str) -> RepoResult<Option<String>> {
        let refname = format!("refs/tags/{}", name);
        let output = self.run_git(&["for-each-ref", "--format=%(contents)", &refname], &[])?;

        if output.is_empty() {
            return Ok(None);
        }

        Ok(Some(output))
    }

    /// Get the tagger of an annotated tag as `Name <email>`, if the tag exists
    pub fn tagger(&self, name: &str) -> RepoResult<Option<String>> {
        let refname = format!("refs/tags/{}", name);
        let output = self
            .run_git(&["for-each-ref", "--format=%(taggername) %(taggeremail)", &refname], &[])?;

        if output.is_empty() {
            return Ok(None);
        }

        Ok(Some(output))
    }

    /// Resolve a revision to its commit hash
    pub fn rev_parse(&self, rev: &str) -> RepoResult<String> {
        self.run_git(&["rev-parse", rev], &[])
    }

    /// Get working copy status in porcelain format
    pub fn status_porcelain(&self) -> RepoResult<String> {
        self.run_git(&["status", "--porcelain"], &[])
    }

    fn find_repo_root(start_path: &Path) -> RepoResult<PathBuf> {
        let mut current_dir = start_path
            .canonicalize()
            .map_err(|_| RepoError::RepositoryNotFound(start_path.display().to_string()))?;

        // If the start path is a file, get its parent directory
        if current_dir.is_file() {
            current_dir = current_dir
                .parent()
                .ok_or_else(|| RepoError::RepositoryNotFound(start_path.display().to_string()))?
                .to_path_buf();
        }

        loop {
            if current_dir.join(".git").exists() {
                return Ok(current_dir);
            }

            let parent = current_dir
                .parent()
                .ok_or_else(|| RepoError::RepositoryNotFound(start_path.display().to_string()))?;

            if parent == current_dir {
                break;
            }

            current_dir = parent.to_path_buf();
        }

        Err(RepoError::RepositoryNotFound(start_path.display().to_string()))
    }

    fn run_git(&self, args: &[&str], env: &[(String, String)]) -> RepoResult<String> {
        let mut command = Command::new("git");
        command
            .args(args)
            .current_dir(&self.root)
            .env("GIT_CONFIG_NOSYSTEM", "1")
            .env("GIT_TERMINAL_PROMPT", "0")
            .env("GIT_ASKPASS", "echo")
            .env("SSH_ASKPASS", "echo")
            .stdin(Stdio::null());

        for (key, value) in env {
            command.env(key, value);
        }

        let command_string = format!("git {}", args.join(" "));
        let output = command.output().map_err(|e| RepoError::CommandFailed {
            command: command_string.clone(),
            exit_code: -1,
            stderr: e.to_string(),
        })?;

        if output.status.success() {
            let stdout = String::from_utf8(output.stdout)?;
            Ok(stdout.trim().to_string())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            debug!(command = %command_string, stderr = %stderr, "git command failed");
            Err(RepoError::CommandFailed {
                command: command_string,
                exit_code: output.status.code().unwrap_or(-1),
                stderr: stderr.to_string(),
            })
        }
    }
}
