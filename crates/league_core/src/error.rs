use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    /// A caller invoked an operation whose contract was not met (applying a
    /// non-completed match, reverting a never-applied one). Programming
    /// error: surfaced, never retried, never silently ignored.
    #[error("precondition violated: {0}")]
    Precondition(String),

    /// A top-level record the operation was addressed to does not exist.
    /// Dangling references *inside* a match are not errors; they are skipped
    /// and reported, see `ApplyReport::skipped`.
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    /// The match record changed under the caller. Retryable: re-read and
    /// retry the whole operation, never merge partial results.
    #[error("version conflict on match {id}: expected {expected}, found {found}")]
    Conflict { id: String, expected: u64, found: u64 },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl EngineError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, EngineError::Conflict { .. })
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
