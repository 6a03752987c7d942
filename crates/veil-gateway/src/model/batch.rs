use crate::error::{AppError, Result};

/// Parses a request body holding a JSON array of strings.
///
/// An empty body and a JSON `null` both mean "no items". Anything that is
/// not an array of strings is rejected.
pub fn parse_batch(body: &[u8]) -> Result<Vec<String>> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }

    let batch: Option<Vec<String>> = serde_json::from_slice(body).map_err(AppError::MalformedBody)?;
    Ok(batch.unwrap_or_default())
}
