//! Git repository handle for gitwright.
//!
//! This crate provides a thin synchronous wrapper over the `git` binary:
//! repository discovery, branch and tag operations, and identity-attributed
//! writes. All version-control logic stays inside git itself; this layer only
//! builds commands, applies the committer environment, and maps failures to
//! typed errors.

pub mod error;
pub mod identity;
pub mod repo;
pub mod test_helpers;

pub use error::{RepoError, RepoResult};
pub use identity::Identity;
pub use repo::GitRepo;
