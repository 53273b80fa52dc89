//! GitHub-backed issue store.

use super::{IssueStore, StoreError};
use crate::issue::{Issue, IssueUpdate, NewIssue};
use crate::repository::Repository;
use async_trait::async_trait;
use octocrab::{models, params, Octocrab};
use tracing::debug;

/// Results per page when listing issues.
const RESULTS_PER_PAGE: u8 = 100;

/// [`IssueStore`] over the GitHub REST API.
#[derive(Clone)]
pub struct GitHubIssueStore {
    octocrab: Octocrab,
}

impl GitHubIssueStore {
    /// Builds a store authenticated with a personal access token.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the client cannot be built.
    pub fn new(token: impl Into<String>) -> Result<Self, StoreError> {
        let octocrab = Octocrab::builder().personal_token(token.into()).build()?;
        Ok(Self { octocrab })
    }
}

#[async_trait]
impl IssueStore for GitHubIssueStore {
    async fn list_issues(&self, repository: &Repository) -> Result<Vec<Issue>, StoreError> {
        debug!(repo = %repository, "Listing issues");

        let first_page = self
            .octocrab
            .issues(&repository.owner, &repository.name)
            .list()
            .state(params::State::All)
            .per_page(RESULTS_PER_PAGE)
            .send()
            .await?;

        let issues = self.octocrab.all_pages(first_page).await?;
        let total = issues.len();
        let issues = into_issues(issues);

        debug!(
            repo = %repository,
            issues = issues.len(),
            pull_requests = total - issues.len(),
            "Listed issues"
        );
        Ok(issues)
    }

    async fn get_issue(&self, repository: &Repository, number: u64) -> Result<Issue, StoreError> {
        let issue = self
            .octocrab
            .issues(&repository.owner, &repository.name)
            .get(number)
            .await?;

        if issue.pull_request.is_some() {
            return Err(StoreError::IssueNotFound {
                repository: repository.full_name(),
                number,
            });
        }

        Ok(Issue::from(issue))
    }

    async fn create_issue(
        &self,
        repository: &Repository,
        issue: NewIssue,
    ) -> Result<Issue, StoreError> {
        let created = self
            .octocrab
            .issues(&repository.owner, &repository.name)
            .create(issue.title)
            .body(issue.body)
            .labels(issue.labels)
            .send()
            .await?;

        Ok(Issue::from(created))
    }

    async fn update_issue(
        &self,
        repository: &Repository,
        number: u64,
        update: IssueUpdate,
    ) -> Result<Issue, StoreError> {
        let handler = self.octocrab.issues(&repository.owner, &repository.name);
        let mut request = handler.update(number);

        if let Some(title) = &update.title {
            request = request.title(title);
        }
        if let Some(state) = update.state {
            request = request.state(models::IssueState::from(state));
        }
        if let Some(labels) = &update.labels {
            request = request.labels(labels.as_slice());
        }
        if let Some(assignees) = &update.assignees {
            request = request.assignees(assignees.as_slice());
        }

        let updated = request.send().await?;
        Ok(Issue::from(updated))
    }
}

/// Converts listed GitHub issues, dropping pull requests.
fn into_issues(issues: Vec<models::issues::Issue>) -> Vec<Issue> {
    issues
        .into_iter()
        .filter(|issue| issue.pull_request.is_none())
        .map(Issue::from)
        .collect()
}

impl From<models::issues::Issue> for Issue {
    fn from(issue: models::issues::Issue) -> Self {
        Self {
            id: issue.id.0.to_string(),
            number: issue.number,
            url: issue.html_url.to_string(),
            title: issue.title,
            state: issue.state.into(),
            labels: issue.labels.into_iter().map(|label| label.name).collect(),
            body: issue.body,
            assignee: issue.assignee.map(|author| author.login),
        }
    }
}
