//! Repository references and URL parsing.
//!
//! Partner repositories are configured by URL, and mirror issue bodies hold
//! partner issue URLs. Both are parsed here.

mod error;

pub use error::RepositoryError;

use serde::Serialize;
use std::fmt;
use url::Url;

/// An `owner/name` repository on an issue tracker.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Repository {
    /// Repository owner (user or organization).
    pub owner: String,

    /// Repository name.
    pub name: String,
}

impl Repository {
    /// Creates a repository reference.
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// Parses a repository URL of the form
    /// `https://<host>/<owner>/<repo>[/issues/<number>]`.
    ///
    /// Anything after the second path segment is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError`] if the URL is invalid or lacks an owner
    /// or repository segment.
    pub fn parse_url(input: &str) -> Result<Self, RepositoryError> {
        let url = Url::parse(input).map_err(|source| RepositoryError::InvalidUrl {
            url: input.to_string(),
            source,
        })?;
        let segments = path_segments(&url);

        match segments.as_slice() {
            [owner, name, ..] => Ok(Self::new(*owner, *name)),
            _ => Err(RepositoryError::MissingSegments {
                url: input.to_string(),
            }),
        }
    }

    /// Full repository name in `owner/name` format.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

impl fmt::Display for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// A reference to a single issue, parsed from its URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueRef {
    /// Repository containing the issue.
    pub repository: Repository,

    /// Issue number.
    pub number: u64,
}

impl IssueRef {
    /// Parses an issue URL of the form
    /// `https://<host>/<owner>/<repo>/issues/<number>`.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError`] if the URL is not an issue URL.
    pub fn parse_url(input: &str) -> Result<Self, RepositoryError> {
        let url = Url::parse(input.trim()).map_err(|source| RepositoryError::InvalidUrl {
            url: input.to_string(),
            source,
        })?;
        let segments = path_segments(&url);

        let [owner, name, "issues", number] = segments.as_slice() else {
            return Err(RepositoryError::NotAnIssueUrl {
                url: input.to_string(),
            });
        };

        let number = number
            .parse::<u64>()
            .map_err(|_| RepositoryError::NotAnIssueUrl {
                url: input.to_string(),
            })?;

        Ok(Self {
            repository: Repository::new(*owner, *name),
            number,
        })
    }
}

/// Returns the non-empty path segments of a URL.
fn path_segments(url: &Url) -> Vec<&str> {
    url.path_segments()
        .map(|segments| segments.filter(|s| !s.is_empty()).collect())
        .unwrap_or_default()
}
