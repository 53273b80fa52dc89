//! Reconciliation of partner issues against the mirror repository.
//!
//! For each partner issue this module decides whether its mirror must be
//! created, updated, or left alone. It performs no I/O; the
//! [`Runner`](crate::runner::Runner) applies the resulting [`Plan`].

mod action;
mod matching;

pub use action::{Action, Ambiguity};
pub use matching::{find_mirror, DuplicatePolicy, MirrorMatch};

use crate::issue::{Issue, IssueState};
use crate::labels::{mirror_labels, price_label};
use crate::repository::Repository;
use tracing::{debug, warn};

/// Actions required to sync one partner repository.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Plan {
    /// Actions in partner issue order.
    pub actions: Vec<Action>,

    /// Partner issues matched by several mirror issues.
    pub ambiguities: Vec<Ambiguity>,

    /// Ids of closed partner issues that were never mirrored.
    pub skipped_closed: Vec<String>,
}

impl Plan {
    /// Number of [`Action::CreateMirror`] entries.
    #[must_use]
    pub fn creates(&self) -> usize {
        self.count(|action| matches!(action, Action::CreateMirror { .. }))
    }

    /// Number of [`Action::UpdateMirror`] entries.
    #[must_use]
    pub fn updates(&self) -> usize {
        self.count(|action| matches!(action, Action::UpdateMirror { .. }))
    }

    /// Number of [`Action::NoOp`] entries.
    #[must_use]
    pub fn unchanged(&self) -> usize {
        self.count(|action| matches!(action, Action::NoOp { .. }))
    }

    fn count(&self, predicate: impl Fn(&Action) -> bool) -> usize {
        self.actions.iter().filter(|action| predicate(*action)).count()
    }
}

/// Computes the actions needed to mirror `partner_issues` from `repository`.
///
/// `mirror_issues` is the full issue set of the mirror repository. Closed
/// partner issues without a mirror are skipped and never created.
#[must_use]
pub fn reconcile(
    mirror_issues: &[Issue],
    partner_issues: &[Issue],
    repository: &Repository,
    policy: DuplicatePolicy,
) -> Plan {
    let mut plan = Plan::default();

    for partner in partner_issues {
        let mirror = match find_mirror(mirror_issues, &partner.id) {
            MirrorMatch::Found(mirror) => Some(mirror),
            MirrorMatch::NotFound => None,
            MirrorMatch::Ambiguous(mirrors) => {
                let mirror_numbers: Vec<u64> = mirrors.iter().map(|m| m.number).collect();
                let resolved = match policy {
                    DuplicatePolicy::FirstMatch => mirrors.first().copied(),
                    DuplicatePolicy::Skip => None,
                };
                warn!(
                    partner_id = %partner.id,
                    mirrors = ?mirror_numbers,
                    resolved_to = ?resolved.map(|m| m.number),
                    "Partner issue has several mirror issues"
                );
                plan.ambiguities.push(Ambiguity {
                    partner_id: partner.id.clone(),
                    mirror_numbers,
                    resolved_to: resolved.map(|m| m.number),
                });
                match resolved {
                    Some(mirror) => Some(mirror),
                    None => continue,
                }
            }
        };

        match mirror {
            Some(mirror) => plan.actions.push(compare(mirror, partner, repository)),
            None if partner.state == IssueState::Closed => {
                debug!(partner_id = %partner.id, "Skipping closed partner issue without mirror");
                plan.skipped_closed.push(partner.id.clone());
            }
            None => plan.actions.push(Action::CreateMirror {
                partner: partner.clone(),
                labels: mirror_labels(partner, repository),
            }),
        }
    }

    plan
}

/// Decides between an update and a no-op for an existing mirror.
fn compare(mirror: &Issue, partner: &Issue, repository: &Repository) -> Action {
    let changed = mirror.title != partner.title
        || mirror.state != partner.state
        || price_label(mirror) != price_label(partner);

    if changed {
        Action::UpdateMirror {
            number: mirror.number,
            url: mirror.url.clone(),
            title: partner.title.clone(),
            state: partner.state,
            labels: mirror_labels(partner, repository),
        }
    } else {
        Action::NoOp {
            partner: partner.clone(),
            number: mirror.number,
            url: mirror.url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo() -> Repository {
        Repository::new("o", "r")
    }

    fn partner(id: &str, state: IssueState, title: &str, labels: &[&str]) -> Issue {
        Issue {
            id: id.to_string(),
            number: 100,
            url: format!("https://github.com/o/r/issues/{id}"),
            title: title.to_string(),
            state,
            labels: labels.iter().map(|l| l.to_string()).collect(),
            body: None,
            assignee: None,
        }
    }

    fn mirror(number: u64, state: IssueState, title: &str, labels: &[&str]) -> Issue {
        Issue {
            id: format!("mirror-{number}"),
            number,
            url: format!("https://github.com/dir/mirror/issues/{number}"),
            title: title.to_string(),
            state,
            labels: labels.iter().map(|l| l.to_string()).collect(),
            body: None,
            assignee: None,
        }
    }

    #[test]
    fn creates_mirror_for_new_open_issue() {
        let partners = vec![partner("A1", IssueState::Open, "Fix bug", &[])];

        let plan = reconcile(&[], &partners, &repo(), DuplicatePolicy::FirstMatch);

        assert_eq!(
            plan.actions,
            vec![Action::CreateMirror {
                partner: partners[0].clone(),
                labels: vec![
                    "Pricing: not set".to_string(),
                    "Partner: o/r".to_string(),
                    "id: A1".to_string()
                ],
            }]
        );
    }

    #[test]
    fn create_payload_uses_partner_url_as_body() {
        let partners = vec![partner("A1", IssueState::Open, "Fix bug", &["Price: 5"])];
        let plan = reconcile(&[], &partners, &repo(), DuplicatePolicy::FirstMatch);

        let new_issue = plan.actions[0].new_issue().unwrap();
        assert_eq!(new_issue.title, "Fix bug");
        assert_eq!(new_issue.body, "https://github.com/o/r/issues/A1");
        assert_eq!(new_issue.labels[0], "Pricing: 5");
    }

    #[test]
    fn updates_mirror_when_partner_closes() {
        let mirrors = vec![mirror(
            5,
            IssueState::Open,
            "Fix bug",
            &["id: A1", "Pricing: not set"],
        )];
        let partners = vec![partner("A1", IssueState::Closed, "Fix bug", &[])];

        let plan = reconcile(&mirrors, &partners, &repo(), DuplicatePolicy::FirstMatch);

        let [Action::UpdateMirror {
            number,
            title,
            state,
            labels,
            ..
        }] = plan.actions.as_slice()
        else {
            panic!("expected a single update, got {:?}", plan.actions);
        };
        assert_eq!(*number, 5);
        assert_eq!(title, "Fix bug");
        assert_eq!(*state, IssueState::Closed);
        assert_eq!(labels, &mirror_labels(&partners[0], &repo()));
    }

    #[test]
    fn updates_mirror_when_title_changes() {
        let mirrors = vec![mirror(5, IssueState::Open, "Old", &["id: A1"])];
        let partners = vec![partner("A1", IssueState::Open, "New", &[])];

        let plan = reconcile(&mirrors, &partners, &repo(), DuplicatePolicy::FirstMatch);

        assert_eq!(plan.updates(), 1);
        let (number, update) = plan.actions[0].issue_update().unwrap();
        assert_eq!(number, 5);
        assert_eq!(update.title.as_deref(), Some("New"));
        assert_eq!(update.assignees, None);
    }

    #[test]
    fn updates_mirror_when_price_changes() {
        let mirrors = vec![mirror(
            5,
            IssueState::Open,
            "Fix bug",
            &["Pricing: 50", "id: A1"],
        )];
        let partners = vec![partner("A1", IssueState::Open, "Fix bug", &["Price: 75"])];

        let plan = reconcile(&mirrors, &partners, &repo(), DuplicatePolicy::FirstMatch);

        assert_eq!(plan.updates(), 1);
    }

    #[test]
    fn legacy_price_on_partner_matches_canonical_mirror_price() {
        let mirrors = vec![mirror(
            5,
            IssueState::Open,
            "Fix bug",
            &["Pricing: 50", "Partner: o/r", "id: A1"],
        )];
        let partners = vec![partner("A1", IssueState::Open, "Fix bug", &["Price: 50"])];

        let plan = reconcile(&mirrors, &partners, &repo(), DuplicatePolicy::FirstMatch);

        assert_eq!(plan.unchanged(), 1);
    }

    #[test]
    fn identical_mirror_is_noop() {
        let mirrors = vec![mirror(
            5,
            IssueState::Open,
            "Fix bug",
            &["id: A1", "Pricing: not set"],
        )];
        let partners = vec![partner("A1", IssueState::Open, "Fix bug", &[])];

        let plan = reconcile(&mirrors, &partners, &repo(), DuplicatePolicy::FirstMatch);

        assert_eq!(
            plan.actions,
            vec![Action::NoOp {
                partner: partners[0].clone(),
                number: 5,
                url: "https://github.com/dir/mirror/issues/5".to_string(),
            }]
        );
    }

    #[test]
    fn closed_issue_without_mirror_is_skipped() {
        let partners = vec![partner("A1", IssueState::Closed, "Fix bug", &[])];

        let plan = reconcile(&[], &partners, &repo(), DuplicatePolicy::FirstMatch);

        assert!(plan.actions.is_empty());
        assert_eq!(plan.skipped_closed, vec!["A1".to_string()]);
    }

    #[test]
    fn never_creates_duplicate_for_mirrored_id() {
        let mirrors = vec![mirror(5, IssueState::Closed, "Anything", &["id: X"])];
        let partners = vec![
            partner("X", IssueState::Open, "Reopened", &[]),
            partner("X", IssueState::Closed, "Closed", &["Price: 1"]),
        ];

        let plan = reconcile(&mirrors, &partners, &repo(), DuplicatePolicy::FirstMatch);

        assert_eq!(plan.creates(), 0);
    }

    #[test]
    fn applying_plan_makes_second_run_noop() {
        let partners = vec![
            partner("A", IssueState::Open, "One", &["Price: 10"]),
            partner("B", IssueState::Open, "Two", &[]),
            partner("C", IssueState::Closed, "Three", &[]),
        ];
        let mut mirrors = vec![mirror(1, IssueState::Open, "Stale", &["id: B"])];

        let plan = reconcile(&mirrors, &partners, &repo(), DuplicatePolicy::FirstMatch);
        for action in &plan.actions {
            match action {
                Action::CreateMirror { partner, labels } => {
                    let number = mirrors.len() as u64 + 1;
                    mirrors.push(Issue {
                        labels: labels.clone(),
                        number,
                        ..partner.clone()
                    });
                }
                Action::UpdateMirror {
                    number,
                    title,
                    state,
                    labels,
                    ..
                } => {
                    let existing = mirrors.iter_mut().find(|m| m.number == *number).unwrap();
                    existing.title = title.clone();
                    existing.state = *state;
                    existing.labels = labels.clone();
                }
                Action::NoOp { .. } => {}
            }
        }

        let second = reconcile(&mirrors, &partners, &repo(), DuplicatePolicy::FirstMatch);

        assert_eq!(second.unchanged(), 2);
        assert_eq!(second.creates() + second.updates(), 0);
    }

    #[test]
    fn ambiguous_match_uses_first_mirror_by_default() {
        let mirrors = vec![
            mirror(8, IssueState::Open, "Old", &["id: A"]),
            mirror(3, IssueState::Open, "Old", &["id: A"]),
        ];
        let partners = vec![partner("A", IssueState::Open, "New", &[])];

        let plan = reconcile(&mirrors, &partners, &repo(), DuplicatePolicy::FirstMatch);

        assert_eq!(plan.actions[0].issue_update().unwrap().0, 8);
        assert_eq!(
            plan.ambiguities,
            vec![Ambiguity {
                partner_id: "A".to_string(),
                mirror_numbers: vec![8, 3],
                resolved_to: Some(8),
            }]
        );
    }

    #[test]
    fn ambiguous_match_is_left_alone_under_skip_policy() {
        let mirrors = vec![
            mirror(8, IssueState::Open, "Old", &["id: A"]),
            mirror(3, IssueState::Open, "Old", &["id: A"]),
        ];
        let partners = vec![partner("A", IssueState::Open, "New", &[])];

        let plan = reconcile(&mirrors, &partners, &repo(), DuplicatePolicy::Skip);

        assert!(plan.actions.is_empty());
        assert_eq!(plan.ambiguities[0].resolved_to, None);
    }
}
