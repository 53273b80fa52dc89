//! Issue tracker access.
//!
//! [`IssueStore`] is the capability the runner is given to read and write
//! issues. [`GitHubIssueStore`] talks to the GitHub REST API through
//! octocrab; [`MemoryIssueStore`] keeps everything in process.

mod error;
mod github;
mod memory;

pub use error::StoreError;
pub use github::GitHubIssueStore;
pub use memory::{MemoryIssueStore, StoreWrite};

use crate::issue::{Issue, IssueUpdate, NewIssue};
use crate::repository::Repository;
use async_trait::async_trait;

/// Read and write access to the issues of any repository.
#[async_trait]
pub trait IssueStore: Send + Sync {
    /// Lists every issue of a repository regardless of state.
    ///
    /// Pull requests are never returned.
    async fn list_issues(&self, repository: &Repository) -> Result<Vec<Issue>, StoreError>;

    /// Fetches a single issue with its current assignee.
    async fn get_issue(&self, repository: &Repository, number: u64) -> Result<Issue, StoreError>;

    /// Creates an issue.
    async fn create_issue(
        &self,
        repository: &Repository,
        issue: NewIssue,
    ) -> Result<Issue, StoreError>;

    /// Applies a partial update to an issue.
    async fn update_issue(
        &self,
        repository: &Repository,
        number: u64,
        update: IssueUpdate,
    ) -> Result<Issue, StoreError>;
}
