use chrono::{DateTime, Utc};
use serde::Deserialize;

/// The identity attributed to tags and commits created through a [`GitRepo`].
///
/// Applied to git via the author/committer environment rather than repository
/// configuration, so a repository's own `user.name`/`user.email` are never
/// consulted or modified.
///
/// [`GitRepo`]: crate::GitRepo
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Identity {
    /// Author/committer name.
    pub name: String,
    /// Author/committer email.
    pub email: String,
    /// Fixed timestamp for the identity. When absent, git uses the current time.
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

impl Identity {
    /// Create an identity with the given name and email and no fixed timestamp.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            timestamp: None,
        }
    }

    /// Pin the identity to a fixed timestamp.
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// The `GIT_AUTHOR_*`/`GIT_COMMITTER_*` environment for this identity.
    pub fn env(&self) -> Vec<(String, String)> {
        let mut env = vec![
            ("GIT_AUTHOR_NAME".to_string(), self.name.clone()),
            ("GIT_AUTHOR_EMAIL".to_string(), self.email.clone()),
            ("GIT_COMMITTER_NAME".to_string(), self.name.clone()),
            ("GIT_COMMITTER_EMAIL".to_string(), self.email.clone()),
        ];

        if let Some(ts) = self.timestamp {
            let stamp = ts.to_rfc3339();
            env.push(("GIT_AUTHOR_DATE".to_string(), stamp.clone()));
            env.push(("GIT_COMMITTER_DATE".to_string(), stamp));
        }

        env
    }
}

impl std::fmt::Display for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} <{}>", self.name, self.email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn env_without_timestamp() {
        let identity = Identity::new("A", "a@x.com");
        let env = identity.env();

        assert_eq!(env.len(), 4);
        assert!(env.contains(&("GIT_COMMITTER_NAME".to_string(), "A".to_string())));
        assert!(env.contains(&("GIT_COMMITTER_EMAIL".to_string(), "a@x.com".to_string())));
        assert!(!env.iter().any(|(k, _)| k == "GIT_COMMITTER_DATE"));
    }

    #[test]
    fn env_with_timestamp() {
        let ts = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let identity = Identity::new("A", "a@x.com").with_timestamp(ts);
        let env = identity.env();

        assert!(env
            .iter()
            .any(|(k, v)| k == "GIT_COMMITTER_DATE" && v.starts_with("2024-05-01T12:00:00")));
        assert!(env.iter().any(|(k, _)| k == "GIT_AUTHOR_DATE"));
    }

    #[test]
    fn display_is_name_email() {
        let identity = Identity::new("A", "a@x.com");
        assert_eq!(identity.to_string(), "A <a@x.com>");
    }
}
