//! Orchestrates a mirror sync run.
//!
//! The mirror issue set is fetched once, then each partner repository is
//! reconciled and its plan applied, one repository at a time. Assignee
//! propagation runs afterwards over the same mirror snapshot.

mod config;
mod error;

pub use config::{RunnerConfig, DEFAULT_CONCURRENCY};
pub use error::RunnerError;

use crate::assignees::propagate_assignees;
use crate::issue::Issue;
use crate::reconcile::{reconcile, Action};
use crate::repository::Repository;
use crate::store::{IssueStore, StoreError};
use crate::summary::{RepositoryResult, RunSummary, SyncCounts};
use std::sync::Arc;
use tracing::{error, info, info_span, warn, Instrument};

/// Orchestrates a full mirror sync over an injected [`IssueStore`].
pub struct Runner {
    config: RunnerConfig,
    store: Arc<dyn IssueStore>,
}

impl Runner {
    /// Builds a runner from the provided configuration and store.
    pub fn new(config: RunnerConfig, store: Arc<dyn IssueStore>) -> Self {
        Self { config, store }
    }

    /// Syncs every partner repository into the mirror repository.
    ///
    /// A failure inside one partner repository stops that repository only;
    /// it is recorded in the summary and the next repository is synced.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::MirrorFetch`] if the mirror issues cannot be
    /// listed.
    pub async fn run(&self, partners: &[Repository]) -> Result<RunSummary, RunnerError> {
        let mirror = self.config.mirror();
        let mut summary = RunSummary::new(self.config.dry_run());

        info!(mirror = %mirror, "Fetching mirror issues");
        let mirror_issues =
            self.store
                .list_issues(mirror)
                .await
                .map_err(|source| RunnerError::MirrorFetch {
                    repository: mirror.full_name(),
                    source,
                })?;
        info!(count = mirror_issues.len(), "Fetched mirror issues");

        if partners.is_empty() {
            warn!("No partner repositories configured");
        }

        for partner in partners {
            let span = info_span!("sync_partner", repo = %partner);
            let result = self
                .sync_partner(partner, &mirror_issues)
                .instrument(span)
                .await;
            summary.record_result(result);
        }

        if self.config.propagate_assignees() {
            let results = propagate_assignees(
                self.store.as_ref(),
                mirror,
                &mirror_issues,
                self.config.concurrency(),
                self.config.dry_run(),
            )
            .await;

            for result in &results {
                summary.record_assignee(result);
            }
        }

        Ok(summary)
    }

    async fn sync_partner(&self, partner: &Repository, mirror_issues: &[Issue]) -> RepositoryResult {
        info!("Syncing partner repository");

        let partner_issues = match self.store.list_issues(partner).await {
            Ok(issues) => issues,
            Err(e) => {
                error!(error = %e, "Failed to fetch partner issues");
                return RepositoryResult::Failed {
                    repository: partner.full_name(),
                    error: e.to_string(),
                    counts: SyncCounts::default(),
                };
            }
        };

        let plan = reconcile(
            mirror_issues,
            &partner_issues,
            partner,
            self.config.duplicate_policy(),
        );
        info!(
            issues = partner_issues.len(),
            create = plan.creates(),
            update = plan.updates(),
            unchanged = plan.unchanged(),
            skipped = plan.skipped_closed.len(),
            "Planned partner sync"
        );

        let mut counts = SyncCounts {
            skipped_closed: plan.skipped_closed.len(),
            ambiguous: plan.ambiguities.len(),
            ..Default::default()
        };

        for action in &plan.actions {
            if let Err(e) = self.apply(action).await {
                error!(error = %e, "Failed to apply mirror change, stopping partner sync");
                return RepositoryResult::Failed {
                    repository: partner.full_name(),
                    error: e.to_string(),
                    counts,
                };
            }
            match action {
                Action::CreateMirror { .. } => counts.created += 1,
                Action::UpdateMirror { .. } => counts.updated += 1,
                Action::NoOp { .. } => counts.unchanged += 1,
            }
        }

        RepositoryResult::Synced {
            repository: partner.full_name(),
            counts,
        }
    }

    /// Applies one action to the mirror repository.
    async fn apply(&self, action: &Action) -> Result<(), StoreError> {
        let mirror = self.config.mirror();
        let dry_run = self.config.dry_run();

        match action {
            Action::CreateMirror { partner, .. } => {
                if dry_run {
                    info!(partner_id = %partner.id, "Would create: {}", partner.url);
                    return Ok(());
                }
                if let Some(new_issue) = action.new_issue() {
                    let created = self.store.create_issue(mirror, new_issue).await?;
                    info!(issue_number = created.number, "Created: {}", created.url);
                }
            }
            Action::UpdateMirror { url, .. } => {
                if dry_run {
                    info!("Would update: {url}");
                    return Ok(());
                }
                if let Some((number, update)) = action.issue_update() {
                    let updated = self.store.update_issue(mirror, number, update).await?;
                    info!(issue_number = number, "Updated: {}", updated.url);
                }
            }
            Action::NoOp { url, number, .. } => {
                info!(issue_number = *number, "No updates: {url}");
            }
        }

        Ok(())
    }
}
