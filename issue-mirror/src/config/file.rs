//! On-disk config file shape.

use crate::reconcile::DuplicatePolicy;
use serde::Deserialize;

/// Raw contents of a sync config file, before validation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ConfigFile {
    /// URL of the mirror repository.
    pub mirror: String,

    /// Partner repository URLs in sync order.
    pub partners: Vec<String>,

    /// Resolution of ambiguous identity matches (defaults to first match).
    #[serde(default)]
    pub duplicate_policy: DuplicatePolicy,

    /// Whether to copy partner assignees (defaults to true).
    #[serde(default = "default_propagate_assignees")]
    pub propagate_assignees: bool,
}

pub(crate) fn default_propagate_assignees() -> bool {
    true
}
