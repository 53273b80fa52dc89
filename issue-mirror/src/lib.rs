#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

pub mod assignees;
pub mod config;
pub mod issue;
pub mod labels;
pub mod reconcile;
pub mod repository;
pub mod runner;
pub mod store;
pub mod summary;

pub use assignees::{propagate_assignees, AssigneeError, AssigneeOutcome, AssigneeResult};
pub use config::{ConfigError, ConfigFile, SyncConfig, DEFAULT_CONFIG_FILE};
pub use issue::{Issue, IssueState, IssueUpdate, NewIssue};
pub use labels::{
    identity_label, mirror_labels, origin_label, price_label, MirrorMetadata, PRICE_NOT_SET,
};
pub use reconcile::{
    find_mirror, reconcile, Action, Ambiguity, DuplicatePolicy, MirrorMatch, Plan,
};
pub use repository::{IssueRef, Repository, RepositoryError};
pub use runner::{Runner, RunnerConfig, RunnerError, DEFAULT_CONCURRENCY};
pub use store::{GitHubIssueStore, IssueStore, MemoryIssueStore, StoreError, StoreWrite};
pub use summary::{RepositoryResult, RunSummary, SyncCounts};
