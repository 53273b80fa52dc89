//! Actions produced by reconciliation.

use crate::issue::{Issue, IssueState, IssueUpdate, NewIssue};

/// A change required to bring the mirror repository in line with a partner
/// issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Create a mirror for a partner issue seen open for the first time.
    CreateMirror {
        /// The partner issue being mirrored.
        partner: Issue,
        /// Labels to write onto the new mirror issue.
        labels: Vec<String>,
    },

    /// Overwrite the title, state and labels of an existing mirror.
    UpdateMirror {
        /// Mirror issue number.
        number: u64,
        /// URL of the mirror issue.
        url: String,
        /// New title.
        title: String,
        /// New state.
        state: IssueState,
        /// Replacement labels.
        labels: Vec<String>,
    },

    /// The mirror is already in sync.
    NoOp {
        /// The partner issue.
        partner: Issue,
        /// Mirror issue number.
        number: u64,
        /// URL of the mirror issue.
        url: String,
    },
}

impl Action {
    /// Returns the creation payload for [`Action::CreateMirror`].
    ///
    /// The mirror body is the partner issue URL.
    #[must_use]
    pub fn new_issue(&self) -> Option<NewIssue> {
        match self {
            Self::CreateMirror { partner, labels } => Some(NewIssue {
                title: partner.title.clone(),
                body: partner.url.clone(),
                labels: labels.clone(),
            }),
            _ => None,
        }
    }

    /// Returns the mirror number and update payload for
    /// [`Action::UpdateMirror`].
    #[must_use]
    pub fn issue_update(&self) -> Option<(u64, IssueUpdate)> {
        match self {
            Self::UpdateMirror {
                number,
                title,
                state,
                labels,
                ..
            } => Some((
                *number,
                IssueUpdate {
                    title: Some(title.clone()),
                    state: Some(*state),
                    labels: Some(labels.clone()),
                    assignees: None,
                },
            )),
            _ => None,
        }
    }
}

/// A partner issue matched by more than one mirror issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ambiguity {
    /// Id of the partner issue.
    pub partner_id: String,

    /// Numbers of all matching mirror issues, in mirror list order.
    pub mirror_numbers: Vec<u64>,

    /// Mirror number used for reconciliation, or `None` if skipped.
    pub resolved_to: Option<u64>,
}
