use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// An opaque token standing in for a sensitive identifier.
///
/// Tokens carry no structure derived from the identifier they replace. The
/// only way back to the identifier is the stored [`Mapping`][crate::Mapping].
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Token(String);

impl Token {
    /// Creates a `Token` by encoding the given bytes as URL-safe base64
    /// without padding.
    ///
    /// Encoding is deterministic: the same bytes always produce the same token.
    ///
    /// # Examples
    ///
    /// ```
    /// use veil_core::Token;
    ///
    /// let token = Token::encode([0u8; 24]);
    /// assert_eq!(token.as_str(), "A".repeat(32));
    /// ```
    pub fn encode<T: AsRef<[u8]>>(bytes: T) -> Self {
        Self(URL_SAFE_NO_PAD.encode(bytes))
    }

    /// Wraps an already-encoded token without validation.
    ///
    /// Use this for values read back from storage or received from callers.
    pub fn new_unchecked(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the token as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Token").field(&self.0).finish()
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<Token> for String {
    fn from(token: Token) -> Self {
        token.0
    }
}
