//! Write payloads for issue creation and updates.

/// Fields of an issue to be created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewIssue {
    /// Issue title.
    pub title: String,

    /// Issue body.
    pub body: String,

    /// Labels applied at creation.
    pub labels: Vec<String>,
}

/// Partial update of an existing issue. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueUpdate {
    /// New title.
    pub title: Option<String>,

    /// New state.
    pub state: Option<super::IssueState>,

    /// Replacement label set.
    pub labels: Option<Vec<String>>,

    /// Replacement assignee logins.
    pub assignees: Option<Vec<String>>,
}
