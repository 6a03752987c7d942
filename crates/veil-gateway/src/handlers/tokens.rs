use crate::error::Result;
use crate::model::parse_batch;
use crate::state::AppState;
use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use tracing::debug;
use veil_core::Token;

pub async fn tokenize_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Vec<Token>>> {
    let identifiers = parse_batch(&body)?;
    if identifiers.is_empty() {
        return Ok(Json(Vec::new()));
    }

    let tokens = state.tokenizer().issue(&identifiers).await?;
    debug!(count = tokens.len(), "tokenized batch");
    Ok(Json(tokens))
}

pub async fn detokenize_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Vec<Option<String>>>> {
    let tokens = parse_batch(&body)?;
    if tokens.is_empty() {
        return Ok(Json(Vec::new()));
    }

    let identifiers = state.tokenizer().reverse(&tokens).await?;
    debug!(
        count = identifiers.len(),
        unresolved = identifiers.iter().filter(|id| id.is_none()).count(),
        "detokenized batch"
    );
    Ok(Json(identifiers))
}
