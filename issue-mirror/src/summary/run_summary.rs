//! Run summary types.

use super::result::RepositoryResult;
use crate::assignees::{AssigneeOutcome, AssigneeResult};
use serde::Serialize;

/// Summary of a complete run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    /// Number of partner repositories processed.
    pub partners_processed: usize,

    /// Number of partner repositories whose sync failed.
    pub partners_failed: usize,

    /// Number of mirror issues created.
    pub issues_created: usize,

    /// Number of mirror issues updated.
    pub issues_updated: usize,

    /// Number of mirror issues already in sync.
    pub issues_unchanged: usize,

    /// Number of closed partner issues skipped because they were never mirrored.
    pub issues_skipped: usize,

    /// Number of partner issues matched by several mirror issues.
    pub ambiguous_matches: usize,

    /// Number of mirror issues that received a partner assignee.
    pub assignees_updated: usize,

    /// Number of mirror issues whose assignee needed no change.
    pub assignees_unchanged: usize,

    /// Number of mirror issues whose assignee lookup or write failed.
    pub assignees_failed: usize,

    /// Whether this was a dry run.
    pub dry_run: bool,

    /// Per-partner results in sync order.
    pub repositories: Vec<RepositoryResult>,
}

impl RunSummary {
    /// Creates a new empty summary.
    #[must_use]
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            ..Default::default()
        }
    }

    /// Updates the summary with a partner repository result.
    pub fn record_result(&mut self, result: RepositoryResult) {
        self.partners_processed += 1;
        if matches!(result, RepositoryResult::Failed { .. }) {
            self.partners_failed += 1;
        }

        let counts = result.counts();
        self.issues_created += counts.created;
        self.issues_updated += counts.updated;
        self.issues_unchanged += counts.unchanged;
        self.issues_skipped += counts.skipped_closed;
        self.ambiguous_matches += counts.ambiguous;

        self.repositories.push(result);
    }

    /// Updates the summary with an assignee propagation result.
    pub fn record_assignee(&mut self, result: &AssigneeResult) {
        match &result.outcome {
            Ok(AssigneeOutcome::Assigned { .. }) => self.assignees_updated += 1,
            Ok(AssigneeOutcome::Unassigned) => self.assignees_unchanged += 1,
            Err(_) => self.assignees_failed += 1,
        }
    }

    /// Returns true if any failures occurred.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.partners_failed > 0 || self.assignees_failed > 0
    }

    /// Returns true if all operations were successful.
    #[must_use]
    pub fn all_success(&self) -> bool {
        !self.has_failures()
    }
}
