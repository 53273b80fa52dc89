//! Identity, origin and price labels written onto mirror issues.
//!
//! Mirror issues carry three labels derived from their partner issue:
//!
//! - `id: <partner-issue-id>` joins a mirror issue to its partner issue.
//! - `Partner: <owner>/<repo>` names the partner repository.
//! - `Pricing: <amount>` carries the bounty, or `Pricing: not set`.
//!
//! Upstream automation strips manually added `Price:` labels, so the legacy
//! prefix is always rewritten to `Pricing:` on the mirror side.

mod metadata;

pub use metadata::MirrorMetadata;

use crate::issue::Issue;
use crate::repository::Repository;

/// Prefix of the identity label.
pub const IDENTITY_PREFIX: &str = "id: ";

/// Prefix of the partner-origin label.
pub const ORIGIN_PREFIX: &str = "Partner: ";

/// Canonical price label prefix.
pub const PRICING_PREFIX: &str = "Pricing:";

/// Legacy price label prefix.
pub const LEGACY_PRICE_PREFIX: &str = "Price:";

/// Price label used when the partner issue carries none.
pub const PRICE_NOT_SET: &str = "Pricing: not set";

/// Returns the identity label for a partner issue id.
#[must_use]
pub fn identity_label(partner_issue_id: &str) -> String {
    format!("{IDENTITY_PREFIX}{partner_issue_id}")
}

/// Returns the partner-origin label for a repository.
#[must_use]
pub fn origin_label(owner: &str, repo: &str) -> String {
    format!("{ORIGIN_PREFIX}{owner}/{repo}")
}

/// Returns the canonical price label of an issue.
///
/// The first label containing `Price:` or `Pricing:` wins, with `Price`
/// rewritten to `Pricing`. Issues without a price label yield
/// [`PRICE_NOT_SET`].
#[must_use]
pub fn price_label(issue: &Issue) -> String {
    price_label_from(&issue.labels)
}

/// Returns the canonical price label from a list of label names.
#[must_use]
pub fn price_label_from(labels: &[String]) -> String {
    labels
        .iter()
        .find(|label| label.contains(LEGACY_PRICE_PREFIX) || label.contains(PRICING_PREFIX))
        .map(|label| label.replacen("Price", "Pricing", 1))
        .unwrap_or_else(|| PRICE_NOT_SET.to_string())
}

/// Returns the full label set written onto the mirror of `partner_issue`.
///
/// Order is `[price, origin, identity]`.
#[must_use]
pub fn mirror_labels(partner_issue: &Issue, repository: &Repository) -> Vec<String> {
    MirrorMetadata::for_partner(partner_issue, repository).labels()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issue::IssueState;

    fn issue_with_labels(labels: &[&str]) -> Issue {
        Issue {
            id: "A1".to_string(),
            number: 1,
            url: "https://github.com/o/r/issues/1".to_string(),
            title: "Fix bug".to_string(),
            state: IssueState::Open,
            labels: labels.iter().map(|l| l.to_string()).collect(),
            body: None,
            assignee: None,
        }
    }

    #[test]
    fn identity_label_is_prefixed_id() {
        assert_eq!(identity_label("A1"), "id: A1");
        assert_ne!(identity_label("A1"), identity_label("A10"));
    }

    #[test]
    fn origin_label_names_repository() {
        assert_eq!(origin_label("acme", "widgets"), "Partner: acme/widgets");
    }

    #[test]
    fn legacy_price_is_normalized() {
        let issue = issue_with_labels(&["bug", "Price: 100"]);
        assert_eq!(price_label(&issue), "Pricing: 100");
    }

    #[test]
    fn pricing_label_is_kept() {
        let issue = issue_with_labels(&["Pricing: 250 USD"]);
        assert_eq!(price_label(&issue), "Pricing: 250 USD");
    }

    #[test]
    fn missing_price_yields_sentinel() {
        let issue = issue_with_labels(&["bug", "help wanted"]);
        assert_eq!(price_label(&issue), PRICE_NOT_SET);
        assert_eq!(price_label(&issue_with_labels(&[])), "Pricing: not set");
    }

    #[test]
    fn first_price_label_wins() {
        let issue = issue_with_labels(&["Price: 50", "Pricing: 75"]);
        assert_eq!(price_label(&issue), "Pricing: 50");
    }

    #[test]
    fn price_prefix_may_appear_inside_label() {
        let issue = issue_with_labels(&["Bounty Price: 10"]);
        assert_eq!(price_label(&issue), "Bounty Pricing: 10");
    }

    #[test]
    fn mirror_labels_are_price_origin_identity() {
        let issue = issue_with_labels(&[]);
        let labels = mirror_labels(&issue, &Repository::new("o", "r"));
        assert_eq!(labels, vec!["Pricing: not set", "Partner: o/r", "id: A1"]);
    }
}
