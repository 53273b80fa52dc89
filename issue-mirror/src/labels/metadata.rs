//! Structured form of the labels carried by a mirror issue.

use super::{identity_label, origin_label, price_label_from, IDENTITY_PREFIX, ORIGIN_PREFIX};
use crate::issue::Issue;
use crate::repository::Repository;
use serde::Serialize;

/// Facts a mirror issue records about its partner issue.
///
/// Persisted as label strings; see [`MirrorMetadata::labels`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MirrorMetadata {
    /// Id of the partner issue.
    pub partner_id: String,

    /// Owner of the partner repository, if recorded.
    pub partner_owner: Option<String>,

    /// Name of the partner repository, if recorded.
    pub partner_repo: Option<String>,

    /// Canonical price label text, e.g. `Pricing: 50`.
    pub price: String,
}

impl MirrorMetadata {
    /// Builds the metadata for the mirror of `partner_issue`.
    #[must_use]
    pub fn for_partner(partner_issue: &Issue, repository: &Repository) -> Self {
        Self {
            partner_id: partner_issue.id.clone(),
            partner_owner: Some(repository.owner.clone()),
            partner_repo: Some(repository.name.clone()),
            price: price_label_from(&partner_issue.labels),
        }
    }

    /// Reads the metadata back from a mirror issue's labels.
    ///
    /// Returns `None` when no identity label is present. With several
    /// identity labels the first one is used.
    #[must_use]
    pub fn from_labels(labels: &[String]) -> Option<Self> {
        let partner_id = labels
            .iter()
            .find_map(|label| label.strip_prefix(IDENTITY_PREFIX))?
            .to_string();

        let (partner_owner, partner_repo) = labels
            .iter()
            .find_map(|label| label.strip_prefix(ORIGIN_PREFIX))
            .and_then(|origin| origin.split_once('/'))
            .map(|(owner, repo)| (Some(owner.to_string()), Some(repo.to_string())))
            .unwrap_or((None, None));

        Some(Self {
            partner_id,
            partner_owner,
            partner_repo,
            price: price_label_from(labels),
        })
    }

    /// Renders the label strings, ordered `[price, origin, identity]`.
    ///
    /// The origin label is omitted when the partner repository is unknown.
    #[must_use]
    pub fn labels(&self) -> Vec<String> {
        let mut labels = Vec::with_capacity(3);
        labels.push(self.price.clone());
        if let (Some(owner), Some(repo)) = (&self.partner_owner, &self.partner_repo) {
            labels.push(origin_label(owner, repo));
        }
        labels.push(identity_label(&self.partner_id));
        labels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn reads_metadata_from_mirror_labels() {
        let metadata =
            MirrorMetadata::from_labels(&labels(&["Pricing: 50", "Partner: acme/widgets", "id: 9"]))
                .unwrap();

        assert_eq!(metadata.partner_id, "9");
        assert_eq!(metadata.partner_owner.as_deref(), Some("acme"));
        assert_eq!(metadata.partner_repo.as_deref(), Some("widgets"));
        assert_eq!(metadata.price, "Pricing: 50");
    }

    #[test]
    fn issue_without_identity_label_has_no_metadata() {
        assert!(MirrorMetadata::from_labels(&labels(&["Partner: acme/widgets", "bug"])).is_none());
    }

    #[test]
    fn missing_origin_label_is_tolerated() {
        let metadata = MirrorMetadata::from_labels(&labels(&["id: 9"])).unwrap();

        assert_eq!(metadata.partner_owner, None);
        assert_eq!(metadata.price, crate::labels::PRICE_NOT_SET);
        assert_eq!(metadata.labels(), labels(&["Pricing: not set", "id: 9"]));
    }

    #[test]
    fn labels_survive_reparse() {
        let original =
            MirrorMetadata::from_labels(&labels(&["Price: 5", "Partner: o/r", "id: X"])).unwrap();
        let reparsed = MirrorMetadata::from_labels(&original.labels()).unwrap();

        assert_eq!(reparsed, original);
        assert_eq!(reparsed.price, "Pricing: 5");
    }
}
