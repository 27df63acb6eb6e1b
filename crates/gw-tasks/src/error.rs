use gw_repo::RepoError;
use thiserror::Error;

/// Errors raised by task execution.
///
/// None of these are retried; a task failure is fatal to the invocation and
/// propagates to the caller, which decides whether the surrounding run aborts.
#[derive(Debug, Error)]
pub enum TaskError {
    /// No repository settings were configured for the pipeline.
    #[error("No git settings are configured for this repository")]
    MissingSettings,

    #[error("Could not create tag {name}")]
    TagCreation {
        name: String,
        #[source]
        source: RepoError,
    },

    #[error("Could not delete tag {name}")]
    TagDeletion {
        name: String,
        #[source]
        source: RepoError,
    },

    #[error("Could not create branch {name}")]
    BranchCreation {
        name: String,
        #[source]
        source: RepoError,
    },

    #[error("Could not delete branch {name}")]
    BranchDeletion {
        name: String,
        #[source]
        source: RepoError,
    },

    #[error("Could not checkout {target}")]
    Checkout {
        target: String,
        #[source]
        source: RepoError,
    },

    #[error("Could not commit changes")]
    Commit {
        #[source]
        source: RepoError,
    },
}

/// Errors raised while loading or running a pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Failed to read pipeline file {path}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid pipeline document: {0}")]
    Parse(#[from] toml::de::Error),

    #[error(transparent)]
    Repository(#[from] RepoError),

    #[error("Task '{element}' failed")]
    Task {
        element: &'static str,
        #[source]
        source: TaskError,
    },
}
