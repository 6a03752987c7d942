use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::error;
use veil_core::TokenizerError;

pub type Result<T> = std::result::Result<T, AppError>;

pub const MALFORMED_BODY_MESSAGE: &str = "Required request body is missing or incorrect";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("required request body is missing or incorrect")]
    MalformedBody(#[source] serde_json::Error),
    #[error(transparent)]
    Tokenizer(#[from] TokenizerError),
}

/// Text of a 500 body. Exhaustion keeps the capitalised wording clients
/// already match on; everything else uses the error's own message.
fn internal_message(source: &TokenizerError) -> String {
    match source {
        TokenizerError::IssuanceExhausted { attempts } => format!(
            "An error occurred: Failed to generate unique token after {attempts} attempts"
        ),
        other => format!("An error occurred: {other}"),
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::MalformedBody(_) => {
                (StatusCode::BAD_REQUEST, MALFORMED_BODY_MESSAGE).into_response()
            }
            AppError::Tokenizer(source) => {
                error!(error = %source, "tokenizer request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, internal_message(&source)).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use veil_core::StorageError;

    #[test]
    fn exhaustion_body_is_capitalised() {
        let err = TokenizerError::IssuanceExhausted { attempts: 5 };
        assert_eq!(
            internal_message(&err),
            "An error occurred: Failed to generate unique token after 5 attempts"
        );
    }

    #[test]
    fn storage_body_uses_error_text() {
        let err = TokenizerError::Storage(StorageError::Timeout("pool".to_string()));
        assert_eq!(
            internal_message(&err),
            format!("An error occurred: {err}")
        );
    }
}
