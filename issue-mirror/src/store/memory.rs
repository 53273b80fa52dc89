//! In-process issue store.

use super::{IssueStore, StoreError};
use crate::issue::{Issue, IssueState, IssueUpdate, NewIssue};
use crate::repository::Repository;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};

/// A write performed against a [`MemoryIssueStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreWrite {
    /// An issue was created.
    Created {
        /// Target repository.
        repository: Repository,
        /// Number assigned to the new issue.
        number: u64,
    },

    /// An issue was updated.
    Updated {
        /// Target repository.
        repository: Repository,
        /// Updated issue number.
        number: u64,
        /// Applied update.
        update: IssueUpdate,
    },
}

#[derive(Debug, Default)]
struct Inner {
    repositories: HashMap<Repository, Vec<Issue>>,
    writes: Vec<StoreWrite>,
    failing_repositories: HashSet<Repository>,
    failing_issues: HashSet<(Repository, u64)>,
    next_id: u64,
}

/// [`IssueStore`] holding issues in memory.
///
/// Cloning shares the underlying state. Ids are assigned from a store-wide
/// counter; numbers are assigned per repository.
#[derive(Debug, Clone, Default)]
pub struct MemoryIssueStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryIssueStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Registers an empty repository.
    pub fn add_repository(&self, repository: &Repository) {
        self.lock()
            .repositories
            .entry(repository.clone())
            .or_default();
    }

    /// Inserts an issue as-is, registering the repository if needed.
    pub fn insert_issue(&self, repository: &Repository, issue: Issue) {
        self.lock()
            .repositories
            .entry(repository.clone())
            .or_default()
            .push(issue);
    }

    /// Returns a snapshot of a repository's issues in insertion order.
    #[must_use]
    pub fn issues(&self, repository: &Repository) -> Vec<Issue> {
        self.lock()
            .repositories
            .get(repository)
            .cloned()
            .unwrap_or_default()
    }

    /// Returns every write performed so far.
    #[must_use]
    pub fn writes(&self) -> Vec<StoreWrite> {
        self.lock().writes.clone()
    }

    /// Makes every call against `repository` fail.
    pub fn fail_repository(&self, repository: &Repository) {
        self.lock().failing_repositories.insert(repository.clone());
    }

    /// Makes `get_issue` and `update_issue` fail for one issue.
    pub fn fail_issue(&self, repository: &Repository, number: u64) {
        self.lock()
            .failing_issues
            .insert((repository.clone(), number));
    }
}

impl Inner {
    fn check(&self, repository: &Repository, number: Option<u64>) -> Result<(), StoreError> {
        let failing = self.failing_repositories.contains(repository)
            || number.is_some_and(|n| self.failing_issues.contains(&(repository.clone(), n)));
        if failing {
            return Err(StoreError::Backend {
                message: format!("injected failure for {repository}"),
            });
        }
        Ok(())
    }

    fn repository_mut(&mut self, repository: &Repository) -> Result<&mut Vec<Issue>, StoreError> {
        self.repositories
            .get_mut(repository)
            .ok_or_else(|| StoreError::RepositoryNotFound {
                repository: repository.full_name(),
            })
    }
}

#[async_trait]
impl IssueStore for MemoryIssueStore {
    async fn list_issues(&self, repository: &Repository) -> Result<Vec<Issue>, StoreError> {
        let mut inner = self.lock();
        inner.check(repository, None)?;
        Ok(inner.repository_mut(repository)?.clone())
    }

    async fn get_issue(&self, repository: &Repository, number: u64) -> Result<Issue, StoreError> {
        let mut inner = self.lock();
        inner.check(repository, Some(number))?;
        inner
            .repository_mut(repository)?
            .iter()
            .find(|issue| issue.number == number)
            .cloned()
            .ok_or_else(|| StoreError::IssueNotFound {
                repository: repository.full_name(),
                number,
            })
    }

    async fn create_issue(
        &self,
        repository: &Repository,
        issue: NewIssue,
    ) -> Result<Issue, StoreError> {
        let mut inner = self.lock();
        inner.check(repository, None)?;
        inner.next_id += 1;
        let id = inner.next_id;

        let issues = inner.repository_mut(repository)?;
        let number = issues.iter().map(|i| i.number).max().unwrap_or(0) + 1;
        let created = Issue {
            id: format!("memory-{id}"),
            number,
            url: format!(
                "https://github.com/{}/{}/issues/{number}",
                repository.owner, repository.name
            ),
            title: issue.title,
            state: IssueState::Open,
            labels: issue.labels,
            body: Some(issue.body),
            assignee: None,
        };
        issues.push(created.clone());

        inner.writes.push(StoreWrite::Created {
            repository: repository.clone(),
            number,
        });
        Ok(created)
    }

    async fn update_issue(
        &self,
        repository: &Repository,
        number: u64,
        update: IssueUpdate,
    ) -> Result<Issue, StoreError> {
        let mut inner = self.lock();
        inner.check(repository, Some(number))?;

        let issue = inner
            .repository_mut(repository)?
            .iter_mut()
            .find(|issue| issue.number == number)
            .ok_or_else(|| StoreError::IssueNotFound {
                repository: repository.full_name(),
                number,
            })?;

        if let Some(title) = &update.title {
            issue.title = title.clone();
        }
        if let Some(state) = update.state {
            issue.state = state;
        }
        if let Some(labels) = &update.labels {
            issue.labels = labels.clone();
        }
        if let Some(assignees) = &update.assignees {
            issue.assignee = assignees.first().cloned();
        }
        let updated = issue.clone();

        inner.writes.push(StoreWrite::Updated {
            repository: repository.clone(),
            number,
            update,
        });
        Ok(updated)
    }
}
