//! Runner configuration.

use crate::config::SyncConfig;
use crate::reconcile::DuplicatePolicy;
use crate::repository::Repository;

/// Default bound on concurrent assignee lookups.
pub const DEFAULT_CONCURRENCY: usize = 5;

/// Configuration for running a sync.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Repository receiving the mirror issues.
    mirror: Repository,
    /// Whether to plan without writing.
    dry_run: bool,
    /// Maximum concurrent assignee lookups.
    concurrency: usize,
    /// How ambiguous identity matches are resolved.
    duplicate_policy: DuplicatePolicy,
    /// Whether partner assignees are copied onto mirror issues.
    propagate_assignees: bool,
}

impl RunnerConfig {
    /// Creates a new configuration for a run.
    pub fn new(mirror: Repository, dry_run: bool, concurrency: usize) -> Self {
        Self {
            mirror,
            dry_run,
            concurrency,
            duplicate_policy: DuplicatePolicy::default(),
            propagate_assignees: true,
        }
    }

    /// Creates a configuration from a loaded sync config.
    pub fn from_sync_config(config: &SyncConfig, dry_run: bool, concurrency: usize) -> Self {
        Self::new(config.mirror.clone(), dry_run, concurrency)
            .with_duplicate_policy(config.duplicate_policy)
            .with_propagate_assignees(config.propagate_assignees)
    }

    /// Sets the duplicate identity policy.
    pub fn with_duplicate_policy(mut self, duplicate_policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = duplicate_policy;
        self
    }

    /// Enables or disables assignee propagation.
    pub fn with_propagate_assignees(mut self, propagate_assignees: bool) -> Self {
        self.propagate_assignees = propagate_assignees;
        self
    }

    /// Returns the mirror repository.
    pub fn mirror(&self) -> &Repository {
        &self.mirror
    }

    /// Returns whether dry-run mode is enabled.
    pub fn dry_run(&self) -> bool {
        self.dry_run
    }

    /// Returns the max concurrent assignee lookups.
    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Returns the duplicate identity policy.
    pub fn duplicate_policy(&self) -> DuplicatePolicy {
        self.duplicate_policy
    }

    /// Returns whether assignee propagation is enabled.
    pub fn propagate_assignees(&self) -> bool {
        self.propagate_assignees
    }
}
