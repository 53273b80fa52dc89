//! Propagation of partner assignees onto mirror issues.
//!
//! Runs over the existing mirror issues rather than the partner issues. Each
//! mirror issue's body is parsed as its partner issue URL, the live partner
//! issue is fetched, and its assignee is copied over.
//!
//! Assignees are only ever added. A mirror issue keeps its assignee even
//! after the partner issue is unassigned.

mod error;

pub use error::AssigneeError;

use crate::issue::{Issue, IssueUpdate};
use crate::labels::MirrorMetadata;
use crate::repository::{IssueRef, Repository};
use crate::store::IssueStore;
use futures::stream::{self, StreamExt};
use serde::Serialize;
use tracing::{debug, info, info_span, warn, Instrument};

/// What happened to one mirror issue's assignee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AssigneeOutcome {
    /// The partner assignee was written to the mirror issue.
    Assigned {
        /// Login of the assigned user.
        login: String,
    },

    /// The partner issue has no assignee. Nothing was cleared.
    Unassigned,
}

/// Propagation result for one mirror issue.
#[derive(Debug)]
pub struct AssigneeResult {
    /// Mirror issue number.
    pub number: u64,

    /// Outcome, or the error that stopped propagation for this issue.
    pub outcome: Result<AssigneeOutcome, AssigneeError>,
}

/// Copies partner assignees onto mirror issues.
///
/// Only issues that carry an identity label are considered. At most
/// `concurrency` lookups run at once; results come back in completion order.
/// A failure for one issue never aborts the others. With `dry_run` set the
/// would-be assignments are reported but not written.
pub async fn propagate_assignees(
    store: &dyn IssueStore,
    mirror: &Repository,
    mirror_issues: &[Issue],
    concurrency: usize,
    dry_run: bool,
) -> Vec<AssigneeResult> {
    let candidates: Vec<&Issue> = mirror_issues
        .iter()
        .filter(|issue| MirrorMetadata::from_labels(&issue.labels).is_some())
        .collect();

    info!(
        count = candidates.len(),
        concurrency, "Propagating partner assignees"
    );

    stream::iter(candidates)
        .map(|issue| {
            let span = info_span!("propagate_assignee", issue_number = issue.number);
            async move {
                let outcome = propagate_one(store, mirror, issue, dry_run).await;
                if let Err(e) = &outcome {
                    warn!(error = %e, "Failed to propagate assignee");
                }
                AssigneeResult {
                    number: issue.number,
                    outcome,
                }
            }
            .instrument(span)
        })
        .buffer_unordered(concurrency.max(1))
        .collect()
        .await
}

async fn propagate_one(
    store: &dyn IssueStore,
    mirror: &Repository,
    issue: &Issue,
    dry_run: bool,
) -> Result<AssigneeOutcome, AssigneeError> {
    let body = issue
        .body
        .as_deref()
        .ok_or(AssigneeError::MissingBody {
            number: issue.number,
        })?;
    let partner_ref = IssueRef::parse_url(body).map_err(|source| AssigneeError::InvalidBody {
        number: issue.number,
        source,
    })?;

    let partner = store
        .get_issue(&partner_ref.repository, partner_ref.number)
        .await?;

    let Some(login) = partner.assignee else {
        debug!("Partner issue has no assignee");
        return Ok(AssigneeOutcome::Unassigned);
    };

    if dry_run {
        info!(login = %login, "Would assign: {}", issue.url);
        return Ok(AssigneeOutcome::Assigned { login });
    }

    store
        .update_issue(
            mirror,
            issue.number,
            IssueUpdate {
                assignees: Some(vec![login.clone()]),
                ..Default::default()
            },
        )
        .await?;

    info!(login = %login, "Assigned: {}", issue.url);
    Ok(AssigneeOutcome::Assigned { login })
}
