//! Declarative git tasks for gitwright.
//!
//! This crate turns git operations into build-file elements: small task
//! structs deserialized from a pipeline document and executed against an
//! already-open repository handle. Each task reads its attributes, resolves
//! repository settings where attribution is needed, delegates exactly one
//! operation to [`gw_repo::GitRepo`], and remaps any failure into a typed
//! task error.

pub mod error;
pub mod pipeline;
pub mod settings;
pub mod tasks;

pub use error::{PipelineError, TaskError};
pub use pipeline::Pipeline;
pub use settings::{GitSettings, SettingsLookup, SettingsRegistry, DEFAULT_BRANDING};
pub use tasks::{
    BranchDeleteTask, BranchTask, CheckoutTask, CommitTask, TagDeleteTask, TagTask, Task,
    TaskContext,
};
