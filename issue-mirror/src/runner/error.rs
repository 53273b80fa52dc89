//! Runner error types.

/// Errors that abort a whole run.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// Configuration loading errors.
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),

    /// Issue store initialization errors.
    #[error(transparent)]
    Store(#[from] crate::store::StoreError),

    /// The mirror issue set could not be fetched.
    #[error("Failed to fetch mirror issues from {repository}: {source}")]
    MirrorFetch {
        repository: String,
        #[source]
        source: crate::store::StoreError,
    },
}
