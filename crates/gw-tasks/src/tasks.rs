//! Task elements and their execution context.
//!
//! Each task owns the attributes it was declared with and delegates exactly
//! one repository operation. Failures from the repository handle are remapped
//! into [`TaskError`] variants that name the subject and chain the cause.

use gw_repo::GitRepo;
use serde::Deserialize;
use tracing::debug;

use crate::error::TaskError;
use crate::settings::{GitSettings, SettingsLookup};

/// Execution context handed to every task: the open repository handle and the
/// settings lookup, both owned by the surrounding pipeline.
pub struct TaskContext<'a> {
    pub repo: &'a GitRepo,
    pub settings: &'a dyn SettingsLookup,
}

impl<'a> TaskContext<'a> {
    pub fn new(repo: &'a GitRepo, settings: &'a dyn SettingsLookup) -> Self {
        Self { repo, settings }
    }

    /// Resolve settings, failing when none are configured.
    ///
    /// Called before any repository mutation is attempted, so a
    /// missing-settings failure never leaves partial state behind.
    fn require_settings(&self) -> Result<GitSettings, TaskError> {
        self.settings.resolve().ok_or(TaskError::MissingSettings)
    }
}

/// Create an annotated tag.
#[derive(Debug, Clone, Deserialize)]
pub struct TagTask {
    /// Tag name to create. Not validated locally; an empty name is passed
    /// through and fails inside git.
    pub name: String,
    /// Tag annotation message; defaulted when absent.
    #[serde(default)]
    pub message: Option<String>,
}

impl TagTask {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    fn compose_message(&self, branding: &str) -> String {
        let body = match &self.message {
            Some(message) => message.clone(),
            None => format!("Creating tag '{}'", self.name),
        };
        format!("{} {}", branding, body)
    }

    pub fn execute(&self, ctx: &TaskContext<'_>) -> Result<(), TaskError> {
        let settings = ctx.require_settings()?;
        let message = self.compose_message(&settings.branding);

        ctx.repo
            .tag(&self.name, &settings.identity, &message)
            .map_err(|source| TaskError::TagCreation {
                name: self.name.clone(),
                source,
            })
    }
}

/// Delete a tag.
#[derive(Debug, Clone, Deserialize)]
pub struct TagDeleteTask {
    pub name: String,
}

impl TagDeleteTask {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn execute(&self, ctx: &TaskContext<'_>) -> Result<(), TaskError> {
        ctx.repo
            .delete_tag(&self.name)
            .map_err(|source| TaskError::TagDeletion {
                name: self.name.clone(),
                source,
            })
    }
}

/// Create a local branch at HEAD.
#[derive(Debug, Clone, Deserialize)]
pub struct BranchTask {
    pub name: String,
}

impl BranchTask {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn execute(&self, ctx: &TaskContext<'_>) -> Result<(), TaskError> {
        ctx.repo
            .create_branch(&self.name)
            .map_err(|source| TaskError::BranchCreation {
                name: self.name.clone(),
                source,
            })
    }
}

/// Delete a local branch.
#[derive(Debug, Clone, Deserialize)]
pub struct BranchDeleteTask {
    pub name: String,
    /// Delete even when the branch is not fully merged.
    #[serde(default)]
    pub force: bool,
}

impl BranchDeleteTask {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            force: false,
        }
    }

    pub fn execute(&self, ctx: &TaskContext<'_>) -> Result<(), TaskError> {
        ctx.repo
            .delete_branch(&self.name, self.force)
            .map_err(|source| TaskError::BranchDeletion {
                name: self.name.clone(),
                source,
            })
    }
}

/// Switch the work tree to a branch or revision.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutTask {
    pub target: String,
}

impl CheckoutTask {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
        }
    }

    pub fn execute(&self, ctx: &TaskContext<'_>) -> Result<(), TaskError> {
        ctx.repo
            .checkout(&self.target)
            .map_err(|source| TaskError::Checkout {
                target: self.target.clone(),
                source,
            })
    }
}

/// Stage all pending changes and commit them with the settings identity.
#[derive(Debug, Clone, Deserialize)]
pub struct CommitTask {
    pub message: String,
}

impl CommitTask {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn execute(&self, ctx: &TaskContext<'_>) -> Result<(), TaskError> {
        let settings = ctx.require_settings()?;

        ctx.repo
            .commit_all(&self.message, &settings.identity)
            .map_err(|source| TaskError::Commit { source })
    }
}

/// A task element as declared in a pipeline document.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Task {
    Tag(TagTask),
    DeleteTag(TagDeleteTask),
    Branch(BranchTask),
    DeleteBranch(BranchDeleteTask),
    Checkout(CheckoutTask),
    Commit(CommitTask),
}

impl Task {
    /// The element name this task was declared as.
    pub fn element(&self) -> &'static str {
        match self {
            Task::Tag(_) => "tag",
            Task::DeleteTag(_) => "delete-tag",
            Task::Branch(_) => "branch",
            Task::DeleteBranch(_) => "delete-branch",
            Task::Checkout(_) => "checkout",
            Task::Commit(_) => "commit",
        }
    }

    /// Execute the task against the given context.
    pub fn run(&self, ctx: &TaskContext<'_>) -> Result<(), TaskError> {
        debug!(element = self.element(), "executing task");
        match self {
            Task::Tag(task) => task.execute(ctx),
            Task::DeleteTag(task) => task.execute(ctx),
            Task::Branch(task) => task.execute(ctx),
            Task::DeleteBranch(task) => task.execute(ctx),
            Task::Checkout(task) => task.execute(ctx),
            Task::Commit(task) => task.execute(ctx),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::DEFAULT_BRANDING;

    #[test]
    fn tag_message_defaults_from_name() {
        let task = TagTask::new("v1.0");
        assert_eq!(
            task.compose_message(DEFAULT_BRANDING),
            format!("{} Creating tag 'v1.0'", DEFAULT_BRANDING)
        );
    }

    #[test]
    fn tag_message_uses_supplied_message() {
        let task = TagTask::new("v1.0").with_message("First stable release");
        assert_eq!(
            task.compose_message(DEFAULT_BRANDING),
            format!("{} First stable release", DEFAULT_BRANDING)
        );
    }

    #[test]
    fn tag_message_uses_configured_branding() {
        let task = TagTask::new("v2.0");
        assert_eq!(
            task.compose_message("[release-bot]"),
            "[release-bot] Creating tag 'v2.0'"
        );
    }

    #[test]
    fn task_elements_deserialize() {
        let task: Task = toml::from_str(
            r#"
            kind = "tag"
            name = "v1.0"
            message = "Release"
            "#,
        )
        .unwrap();

        match task {
            Task::Tag(tag) => {
                assert_eq!(tag.name, "v1.0");
                assert_eq!(tag.message.as_deref(), Some("Release"));
            }
            other => panic!("unexpected task: {:?}", other),
        }

        let task: Task = toml::from_str(
            r#"
            kind = "delete-branch"
            name = "stale"
            force = true
            "#,
        )
        .unwrap();

        match task {
            Task::DeleteBranch(del) => {
                assert_eq!(del.name, "stale");
                assert!(del.force);
            }
            other => panic!("unexpected task: {:?}", other),
        }
    }

    #[test]
    fn tag_message_is_optional_in_documents() {
        let task: Task = toml::from_str(
            r#"
            kind = "tag"
            name = "v1.0"
            "#,
        )
        .unwrap();

        match task {
            Task::Tag(tag) => assert!(tag.message.is_none()),
            other => panic!("unexpected task: {:?}", other),
        }
    }
}
