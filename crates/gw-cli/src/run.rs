use anyhow::{Context, Result};
use clap::Args;
use gw_tasks::Pipeline;
use std::path::PathBuf;
use tracing::info;

/// Arguments for executing a pipeline file
#[derive(Args)]
pub struct RunArgs {
    /// Pipeline file to execute
    #[arg(value_name = "FILE", default_value = "gitwright.toml")]
    pub file: PathBuf,
}

impl RunArgs {
    /// Load the pipeline file and run its tasks in order
    pub fn run(self) -> Result<()> {
        let pipeline = Pipeline::from_path(&self.file)
            .with_context(|| format!("Failed to load pipeline {}", self.file.display()))?;

        info!(file = %self.file.display(), tasks = pipeline.tasks.len(), "loaded pipeline");

        pipeline.run().context("Pipeline failed")?;

        println!(
            "Ran {} task(s) against {}",
            pipeline.tasks.len(),
            pipeline.directory.display()
        );
        Ok(())
    }
}
