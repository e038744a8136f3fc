use thiserror::Error;

/// Errors surfaced by remote storage collaborators.
///
/// The pipeline's retry policy keys off this classification: transient
/// failures are retried indefinitely with a fixed delay, configuration
/// failures are fatal to startup, and anything unclassified terminates the
/// worker that hit it.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Network-level failure expected to resolve itself with time, such as a
    /// temporary outage between the booth and the remote API.
    #[error("Transient connectivity failure: {0}")]
    Transient(String),

    /// Bad credentials or malformed remote state. Retrying will not help;
    /// an operator has to fix the configuration.
    #[error("Remote configuration error: {0}")]
    Configuration(String),

    /// Anything the collaborator could not classify.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StorageError {
    pub fn transient(message: impl Into<String>) -> Self {
        StorageError::Transient(message.into())
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        StorageError::Configuration(message.into())
    }

    /// Whether the pipeline should retry the failed operation.
    pub fn is_transient(&self) -> bool {
        matches!(self, StorageError::Transient(_))
    }
}
