//! Per-repository sync results.

use serde::Serialize;

/// Counts of reconciliation outcomes for one partner repository.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SyncCounts {
    /// Mirror issues created.
    pub created: usize,

    /// Mirror issues updated.
    pub updated: usize,

    /// Mirror issues already in sync.
    pub unchanged: usize,

    /// Closed partner issues that were never mirrored.
    pub skipped_closed: usize,

    /// Partner issues with more than one mirror issue.
    pub ambiguous: usize,
}

/// Result of syncing a single partner repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RepositoryResult {
    /// Every planned action was applied.
    Synced {
        /// Repository full name.
        repository: String,
        /// Outcome counts.
        #[serde(flatten)]
        counts: SyncCounts,
    },

    /// Sync stopped at the first failure. `counts` covers work done before it.
    Failed {
        /// Repository full name.
        repository: String,
        /// Error message.
        error: String,
        /// Outcome counts up to the failure.
        #[serde(flatten)]
        counts: SyncCounts,
    },
}

impl RepositoryResult {
    /// Returns the outcome counts.
    #[must_use]
    pub fn counts(&self) -> &SyncCounts {
        match self {
            Self::Synced { counts, .. } | Self::Failed { counts, .. } => counts,
        }
    }

    /// Returns the repository full name.
    #[must_use]
    pub fn repository(&self) -> &str {
        match self {
            Self::Synced { repository, .. } | Self::Failed { repository, .. } => repository,
        }
    }
}
