use thiserror::Error;

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Failures of the backing store.
///
/// A uniqueness conflict on insert is not an error; it is reported as
/// [`InsertOutcome::Conflict`](crate::repository::InsertOutcome::Conflict).
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
    #[error("storage operation timed out: {0}")]
    Timeout(String),
    #[error("storage query failed: {0}")]
    Query(String),
    #[error("stored data is invalid: {0}")]
    InvalidData(String),
    #[error("storage operation failed: {0}")]
    Operation(String),
}

#[derive(Debug, Clone, Error)]
pub enum TokenizerError {
    /// Every insert attempt for an identifier hit a uniqueness conflict.
    #[error("failed to generate unique token after {attempts} attempts")]
    IssuanceExhausted { attempts: usize },
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exhausted_message_names_attempts() {
        let err = TokenizerError::IssuanceExhausted { attempts: 5 };
        assert_eq!(
            err.to_string(),
            "failed to generate unique token after 5 attempts"
        );
    }

    #[test]
    fn storage_error_converts_into_tokenizer_error() {
        let err: TokenizerError = StorageError::Timeout("pool".to_string()).into();
        assert!(matches!(err, TokenizerError::Storage(StorageError::Timeout(_))));
        assert_eq!(
            err.to_string(),
            "storage error: storage operation timed out: pool"
        );
    }
}
