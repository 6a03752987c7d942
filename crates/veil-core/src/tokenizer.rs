use crate::token::Token;
use async_trait::async_trait;

type Result<T> = std::result::Result<T, crate::error::TokenizerError>;

#[async_trait]
pub trait Tokenizer: Send + Sync + 'static {
    /// Returns one token per identifier, in input order.
    ///
    /// Identifiers that already have a mapping get their existing token back;
    /// the rest are minted and persisted. Fails on the first identifier that
    /// cannot be issued, leaving earlier issuances committed.
    async fn issue(&self, identifiers: &[String]) -> Result<Vec<Token>>;

    /// Returns the identifier behind each token, in input order.
    /// Unknown tokens yield `None` in their slot.
    async fn reverse(&self, tokens: &[String]) -> Result<Vec<Option<String>>>;
}
