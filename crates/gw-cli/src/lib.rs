//! gitwright CLI library

pub mod run;
pub mod tag;

// Re-export CLI types for testing
pub use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "gw")]
#[command(about = "Declarative git tasks runner")]
#[command(version, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Execute a pipeline file
    Run(run::RunArgs),
    /// Create a single annotated tag
    Tag(tag::TagArgs),
}
