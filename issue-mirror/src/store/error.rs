//! Issue store error types.

use thiserror::Error;

/// Errors that can occur while talking to an issue tracker.
#[derive(Debug, Error)]
pub enum StoreError {
    /// GitHub API error.
    #[error("GitHub API error: {0}")]
    GitHubError(#[from] octocrab::Error),

    /// Repository does not exist in the store.
    #[error("Repository not found: {repository}")]
    RepositoryNotFound { repository: String },

    /// Issue does not exist in the repository.
    #[error("Issue not found: {repository}#{number}")]
    IssueNotFound { repository: String, number: u64 },

    /// Failure injected or reported by a non-GitHub backend.
    #[error("Issue store failure: {message}")]
    Backend { message: String },
}
