//! Assignee propagation error types.

use crate::repository::RepositoryError;
use crate::store::StoreError;
use thiserror::Error;

/// Errors that stop propagation for a single mirror issue.
#[derive(Debug, Error)]
pub enum AssigneeError {
    /// Mirror issue has no body to read the partner URL from.
    #[error("Mirror issue #{number} has no body")]
    MissingBody { number: u64 },

    /// Mirror issue body is not a partner issue URL.
    #[error("Mirror issue #{number} body is not a partner issue URL: {source}")]
    InvalidBody {
        number: u64,
        #[source]
        source: RepositoryError,
    },

    /// Partner issue lookup or mirror write failed.
    #[error("Issue store error: {0}")]
    Store(#[from] StoreError),
}
