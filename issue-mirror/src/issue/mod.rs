//! Issue data model shared by the mirror and partner repositories.
//!
//! Both sides of a sync expose the same [`Issue`] shape. Pull requests are
//! never represented here; stores filter them out before handing issues over.

mod state;
mod update;

pub use state::IssueState;
pub use update::{IssueUpdate, NewIssue};

use serde::Serialize;

/// An issue as returned by an [`IssueStore`](crate::store::IssueStore).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    /// Stable identifier assigned by the source tracker. Used as the
    /// cross-repository join key.
    pub id: String,

    /// Tracker-local sequence number, only used to address updates.
    pub number: u64,

    /// Canonical link to the issue.
    pub url: String,

    /// Issue title.
    pub title: String,

    /// Open or closed.
    pub state: IssueState,

    /// Label names. Order carries no meaning.
    pub labels: Vec<String>,

    /// Free text body. On a mirror issue this holds the partner issue URL.
    pub body: Option<String>,

    /// Login of the assigned user, if any.
    pub assignee: Option<String>,
}

impl Issue {
    /// Returns true if the issue carries a label with exactly this name.
    #[must_use]
    pub fn has_label(&self, name: &str) -> bool {
        self.labels.iter().any(|label| label == name)
    }
}
