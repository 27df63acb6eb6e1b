use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Repository not found from path: {0}")]
    RepositoryNotFound(String),

    #[error("Invalid branch name: {0}")]
    InvalidBranchName(String),

    #[error("Branch '{0}' is a protected branch")]
    ProtectedBranch(String),

    #[error("Command execution failed: {command} (exit code: {exit_code})")]
    CommandFailed {
        command: String,
        exit_code: i32,
        stderr: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("UTF-8 encoding error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("Unknown git error: {0}")]
    Other(String),
}

pub type RepoResult<T> = Result<T, RepoError>;
