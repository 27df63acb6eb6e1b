//! Repository-level settings and their lookup.

use gw_repo::Identity;
use serde::Deserialize;

/// Default branding string prepended to generated tag messages.
pub const DEFAULT_BRANDING: &str = "[gitwright]";

/// Repository-scoped settings: the identity used to attribute tags and
/// commits, and the branding string for generated messages.
///
/// Settings are not owned by any task; they are looked up through a
/// [`SettingsLookup`] on every invocation and never cached across invocations.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GitSettings {
    /// Tagger/committer identity.
    #[serde(flatten)]
    pub identity: Identity,

    /// Branding prefix for generated messages.
    #[serde(default = "default_branding")]
    pub branding: String,
}

fn default_branding() -> String {
    DEFAULT_BRANDING.to_string()
}

impl GitSettings {
    /// Create settings for the given identity with the default branding.
    pub fn new(identity: Identity) -> Self {
        Self {
            identity,
            branding: default_branding(),
        }
    }

    /// Replace the branding string.
    pub fn with_branding(mut self, branding: impl Into<String>) -> Self {
        self.branding = branding.into();
        self
    }
}

/// Capability to resolve the settings configured for a repository.
pub trait SettingsLookup {
    /// Resolve the configured settings, or `None` when nothing is configured.
    fn resolve(&self) -> Option<GitSettings>;
}

/// The standard [`SettingsLookup`] implementation: holds the settings a
/// pipeline was configured with, possibly none.
#[derive(Debug, Default)]
pub struct SettingsRegistry {
    settings: Option<GitSettings>,
}

impl SettingsRegistry {
    /// Create a registry holding the given settings.
    pub fn new(settings: Option<GitSettings>) -> Self {
        Self { settings }
    }

    /// A registry with no settings configured.
    pub fn empty() -> Self {
        Self::default()
    }
}

impl SettingsLookup for SettingsRegistry {
    fn resolve(&self) -> Option<GitSettings> {
        self.settings.clone()
    }
}
