use anyhow::{Context, Result};
use clap::Args;
use gw_repo::{GitRepo, Identity};
use gw_tasks::{GitSettings, SettingsRegistry, TagTask, TaskContext};
use std::path::PathBuf;

/// Arguments for creating a single annotated tag
#[derive(Args)]
pub struct TagArgs {
    /// Tag name to create
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Tag annotation message (defaulted if absent)
    #[arg(short = 'm', long = "message", value_name = "TEXT")]
    pub message: Option<String>,

    /// Repository directory
    #[arg(long = "directory", value_name = "DIR", default_value = ".")]
    pub directory: PathBuf,

    /// Tagger name; required together with --user-email for attribution
    #[arg(long = "user-name", value_name = "NAME")]
    pub user_name: Option<String>,

    /// Tagger email; required together with --user-name for attribution
    #[arg(long = "user-email", value_name = "EMAIL")]
    pub user_email: Option<String>,

    /// Branding prefix for the tag message
    #[arg(long = "branding", value_name = "TEXT")]
    pub branding: Option<String>,
}

impl TagArgs {
    /// Execute the tag creation
    pub fn run(self) -> Result<()> {
        let repo = GitRepo::new(&self.directory).context("Failed to open repository")?;

        let settings = match (self.user_name.as_deref(), self.user_email.as_deref()) {
            (Some(name), Some(email)) => {
                let mut settings = GitSettings::new(Identity::new(name, email));
                if let Some(branding) = &self.branding {
                    settings = settings.with_branding(branding);
                }
                Some(settings)
            }
            _ => None,
        };
        let registry = SettingsRegistry::new(settings);
        let ctx = TaskContext::new(&repo, &registry);

        let mut task = TagTask::new(self.name.as_str());
        if let Some(message) = self.message.clone() {
            task = task.with_message(message);
        }

        task.execute(&ctx).context("Tag creation failed")?;

        println!("Created tag '{}'", self.name);
        Ok(())
    }
}
