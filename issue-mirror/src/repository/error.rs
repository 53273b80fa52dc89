//! Repository URL error types.

use thiserror::Error;

/// Errors that can occur while parsing repository or issue URLs.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Not a valid absolute URL.
    #[error("Invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// URL path lacks owner and repository segments.
    #[error("URL '{url}' does not name an owner and repository")]
    MissingSegments { url: String },

    /// URL does not point at a single issue.
    #[error("URL '{url}' is not an issue URL")]
    NotAnIssueUrl { url: String },
}
