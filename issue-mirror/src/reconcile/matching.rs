//! Lookup of existing mirror issues by identity label.

use crate::issue::Issue;
use crate::labels::identity_label;
use serde::Deserialize;

/// Result of looking up the mirror of a partner issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MirrorMatch<'a> {
    /// Exactly one mirror issue carries the identity label.
    Found(&'a Issue),

    /// No mirror issue carries the identity label.
    NotFound,

    /// Several mirror issues carry the identity label, in mirror list order.
    Ambiguous(Vec<&'a Issue>),
}

/// How to resolve an [`MirrorMatch::Ambiguous`] lookup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicatePolicy {
    /// Reconcile against the first match in mirror list order.
    #[default]
    FirstMatch,

    /// Leave the partner issue alone.
    Skip,
}

/// Finds the mirror issues whose labels contain `identity_label(partner_id)`.
///
/// Matching uses exact label-name equality.
#[must_use]
pub fn find_mirror<'a>(mirror_issues: &'a [Issue], partner_id: &str) -> MirrorMatch<'a> {
    let label = identity_label(partner_id);
    let mut matches: Vec<&Issue> = mirror_issues
        .iter()
        .filter(|issue| issue.has_label(&label))
        .collect();

    match matches.len() {
        0 => MirrorMatch::NotFound,
        1 => MirrorMatch::Found(matches.remove(0)),
        _ => MirrorMatch::Ambiguous(matches),
    }
}
