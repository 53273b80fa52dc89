//! Sync configuration loading.
//!
//! The configuration names the mirror repository and the ordered list of
//! partner repositories, both by URL:
//!
//! ```toml
//! mirror = "https://github.com/acme/directory"
//! duplicate-policy = "first-match"
//! propagate-assignees = true
//! partners = [
//!     "https://github.com/acme/widgets",
//!     "https://github.com/other/project/issues/12",
//! ]
//! ```

mod error;
mod file;

pub use error::ConfigError;
pub use file::ConfigFile;

use crate::reconcile::DuplicatePolicy;
use crate::repository::Repository;
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info, warn};

/// Default config file name.
pub const DEFAULT_CONFIG_FILE: &str = "issue-mirror.toml";

/// Validated sync configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncConfig {
    /// Repository receiving the mirror issues.
    pub mirror: Repository,

    /// Partner repositories in sync order, without duplicates.
    pub partners: Vec<Repository>,

    /// How ambiguous identity matches are resolved.
    pub duplicate_policy: DuplicatePolicy,

    /// Whether partner assignees are copied onto mirror issues.
    pub propagate_assignees: bool,
}

impl SyncConfig {
    /// Loads and validates a config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file is missing, unparseable, or fails
    /// validation.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        info!(path = %path.display(), "Loading sync config");

        if !path.exists() {
            return Err(ConfigError::MissingFile {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;

        Self::parse(&content, &path.display().to_string())
    }

    /// Parses and validates config content. `origin` names the source in
    /// error messages.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the content is unparseable or invalid.
    pub fn parse(content: &str, origin: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(content).map_err(|e| ConfigError::TomlError {
            path: origin.to_string(),
            source: e,
        })?;
        Self::from_file(file, origin)
    }

    /// Validates a deserialized config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] on invalid URLs or when the
    /// mirror repository is also listed as a partner.
    pub fn from_file(file: ConfigFile, origin: &str) -> Result<Self, ConfigError> {
        let mirror = parse_repository(&file.mirror, origin, "mirror")?;

        let mut seen = HashSet::new();
        let mut partners = Vec::with_capacity(file.partners.len());
        for url in &file.partners {
            let partner = parse_repository(url, origin, "partners")?;
            if partner == mirror {
                return Err(ConfigError::ValidationError {
                    path: origin.to_string(),
                    message: format!("mirror repository {mirror} is also listed as a partner"),
                });
            }
            if seen.insert(partner.clone()) {
                partners.push(partner);
            } else {
                warn!(repo = %partner, "Partner repository listed more than once, ignoring");
            }
        }

        debug!(mirror = %mirror, partners = partners.len(), "Sync config validated");
        Ok(Self {
            mirror,
            partners,
            duplicate_policy: file.duplicate_policy,
            propagate_assignees: file.propagate_assignees,
        })
    }

    /// Replaces the mirror repository with the one at `url`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] if the URL is invalid or
    /// names one of the partners.
    pub fn with_mirror_url(mut self, url: &str) -> Result<Self, ConfigError> {
        let mirror = parse_repository(url, "--mirror", "mirror")?;
        if self.partners.contains(&mirror) {
            return Err(ConfigError::ValidationError {
                path: "--mirror".to_string(),
                message: format!("mirror repository {mirror} is also listed as a partner"),
            });
        }
        self.mirror = mirror;
        Ok(self)
    }
}

fn parse_repository(url: &str, origin: &str, key: &str) -> Result<Repository, ConfigError> {
    Repository::parse_url(url).map_err(|e| ConfigError::ValidationError {
        path: origin.to_string(),
        message: format!("{key}: {e}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const VALID: &str = r#"
mirror = "https://github.com/dir/mirror"
partners = [
    "https://github.com/acme/widgets",
    "https://github.com/other/project/issues/12",
]
"#;

    #[test]
    fn parses_valid_config_with_defaults() {
        let config = SyncConfig::parse(VALID, "test").unwrap();

        assert_eq!(config.mirror, Repository::new("dir", "mirror"));
        assert_eq!(
            config.partners,
            vec![
                Repository::new("acme", "widgets"),
                Repository::new("other", "project")
            ]
        );
        assert_eq!(config.duplicate_policy, DuplicatePolicy::FirstMatch);
        assert!(config.propagate_assignees);
    }

    #[test]
    fn parses_explicit_options() {
        let config = SyncConfig::parse(
            r#"
mirror = "https://github.com/dir/mirror"
duplicate-policy = "skip"
propagate-assignees = false
partners = []
"#,
            "test",
        )
        .unwrap();

        assert_eq!(config.duplicate_policy, DuplicatePolicy::Skip);
        assert!(!config.propagate_assignees);
        assert!(config.partners.is_empty());
    }

    #[test]
    fn collapses_repeated_partners() {
        let config = SyncConfig::parse(
            r#"
mirror = "https://github.com/dir/mirror"
partners = [
    "https://github.com/acme/widgets",
    "https://github.com/b/c",
    "https://github.com/acme/widgets/issues/3",
]
"#,
            "test",
        )
        .unwrap();

        assert_eq!(
            config.partners,
            vec![Repository::new("acme", "widgets"), Repository::new("b", "c")]
        );
    }

    #[test]
    fn rejects_invalid_partner_url() {
        let result = SyncConfig::parse(
            r#"
mirror = "https://github.com/dir/mirror"
partners = ["https://github.com/only-owner"]
"#,
            "test",
        );
        assert!(matches!(result, Err(ConfigError::ValidationError { .. })));
    }

    #[test]
    fn rejects_mirror_listed_as_partner() {
        let result = SyncConfig::parse(
            r#"
mirror = "https://github.com/dir/mirror"
partners = ["https://github.com/dir/mirror"]
"#,
            "test",
        );
        assert!(matches!(result, Err(ConfigError::ValidationError { .. })));
    }

    #[test]
    fn rejects_unknown_policy() {
        let result = SyncConfig::parse(
            r#"
mirror = "https://github.com/dir/mirror"
duplicate-policy = "newest"
partners = []
"#,
            "test",
        );
        assert!(matches!(result, Err(ConfigError::TomlError { .. })));
    }

    #[test]
    fn overrides_mirror_url() {
        let config = SyncConfig::parse(VALID, "test")
            .unwrap()
            .with_mirror_url("https://github.com/dir/other")
            .unwrap();
        assert_eq!(config.mirror, Repository::new("dir", "other"));

        let clash = SyncConfig::parse(VALID, "test")
            .unwrap()
            .with_mirror_url("https://github.com/acme/widgets");
        assert!(clash.is_err());
    }

    #[test]
    fn loads_config_from_disk() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(DEFAULT_CONFIG_FILE);
        fs::write(&path, VALID).unwrap();

        let config = SyncConfig::load(&path).unwrap();
        assert_eq!(config.partners.len(), 2);
    }

    #[test]
    fn missing_file_is_reported() {
        let temp = TempDir::new().unwrap();
        let result = SyncConfig::load(&temp.path().join("absent.toml"));
        assert!(matches!(result, Err(ConfigError::MissingFile { .. })));
    }
}
