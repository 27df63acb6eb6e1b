//! Pipeline: a declared sequence of tasks against one repository.

use std::fs;
use std::path::{Path, PathBuf};

use gw_repo::GitRepo;
use serde::Deserialize;
use tracing::info;

use crate::error::PipelineError;
use crate::settings::{GitSettings, SettingsRegistry};
use crate::tasks::{Task, TaskContext};

/// A pipeline document: the repository directory, optional settings, and the
/// tasks to run in declaration order.
///
/// ```toml
/// directory = "."
///
/// [settings]
/// name = "Release Bot"
/// email = "release@example.com"
///
/// [[tasks]]
/// kind = "tag"
/// name = "v1.0"
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct Pipeline {
    /// Directory inside (or at the root of) the repository to operate on.
    #[serde(default = "default_directory")]
    pub directory: PathBuf,

    /// Repository settings; tasks that need attribution fail without them.
    #[serde(default)]
    pub settings: Option<GitSettings>,

    /// Tasks in execution order.
    #[serde(default)]
    pub tasks: Vec<Task>,
}

fn default_directory() -> PathBuf {
    PathBuf::from(".")
}

impl Pipeline {
    /// Parse a pipeline from a TOML document.
    pub fn from_toml_str(document: &str) -> Result<Self, PipelineError> {
        Ok(toml::from_str(document)?)
    }

    /// Load a pipeline from a TOML file.
    ///
    /// A relative `directory` in the document is resolved against the file's
    /// parent directory, so a pipeline runs the same from any working
    /// directory.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, PipelineError> {
        let path = path.as_ref();
        let document = fs::read_to_string(path).map_err(|source| PipelineError::Read {
            path: path.display().to_string(),
            source,
        })?;

        let mut pipeline = Self::from_toml_str(&document)?;
        if pipeline.directory.is_relative() {
            if let Some(parent) = path.parent() {
                pipeline.directory = parent.join(&pipeline.directory);
            }
        }

        Ok(pipeline)
    }

    /// Open the repository and execute the tasks in order, stopping at the
    /// first failure.
    pub fn run(&self) -> Result<(), PipelineError> {
        let repo = GitRepo::new(&self.directory)?;
        let registry = SettingsRegistry::new(self.settings.clone());
        let ctx = TaskContext::new(&repo, &registry);

        for task in &self.tasks {
            info!(element = task.element(), "running task");
            task.run(&ctx).map_err(|source| PipelineError::Task {
                element: task.element(),
                source,
            })?;
        }

        Ok(())
    }
}
