use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, trace, warn};
use veil_core::{InsertOutcome, Mapping, Repository, Token, Tokenizer, TokenizerError};
use veil_generator::Generator;

/// Upper bound on insert attempts for a single identifier.
pub const MAX_ISSUE_ATTEMPTS: usize = 5;

/// A concrete implementation of the `Tokenizer` trait.
///
/// This service wraps a `Repository` and a `Generator` to handle:
/// - Idempotent issuance (an identifier keeps its first token forever)
/// - Collision retry, bounded by [`MAX_ISSUE_ATTEMPTS`]
/// - Reverse lookups that never mint
///
/// Token uniqueness is enforced by the repository's atomic insert, not by a
/// read-then-write check here, so several services may share one store.
#[derive(Debug)]
pub struct TokenizerService<R, G> {
    repository: Arc<R>,
    generator: Arc<G>,
}

impl<R, G> Clone for TokenizerService<R, G> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            generator: Arc::clone(&self.generator),
        }
    }
}

impl<R: Repository, G: Generator> TokenizerService<R, G> {
    pub fn new(repository: R, generator: G) -> Self {
        Self {
            repository: Arc::new(repository),
            generator: Arc::new(generator),
        }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Returns the token for one identifier, minting it on first sight.
    async fn issue_one(&self, identifier: &str) -> Result<Token, TokenizerError> {
        if let Some(existing) = self.repository.find_by_identifier(identifier).await? {
            trace!("identifier already tokenized");
            return Ok(existing.token);
        }

        for attempt in 1..=MAX_ISSUE_ATTEMPTS {
            let mapping = Mapping::new(identifier, self.generator.generate());

            match self.repository.insert(&mapping).await? {
                InsertOutcome::Inserted => {
                    debug!(attempt, "minted token");
                    return Ok(mapping.token);
                }
                InsertOutcome::Conflict => {
                    // A concurrent writer may have claimed this identifier;
                    // its token is then the answer.
                    if let Some(existing) = self.repository.find_by_identifier(identifier).await? {
                        debug!(attempt, "identifier tokenized concurrently");
                        return Ok(existing.token);
                    }
                    debug!(attempt, "token collision, retrying");
                }
            }
        }

        warn!(
            attempts = MAX_ISSUE_ATTEMPTS,
            "giving up after repeated token collisions"
        );
        Err(TokenizerError::IssuanceExhausted {
            attempts: MAX_ISSUE_ATTEMPTS,
        })
    }
}

#[async_trait]
impl<R: Repository, G: Generator> Tokenizer for TokenizerService<R, G> {
    async fn issue(&self, identifiers: &[String]) -> Result<Vec<Token>, TokenizerError> {
        trace!(count = identifiers.len(), "issuing tokens");

        let mut tokens = Vec::with_capacity(identifiers.len());
        for identifier in identifiers {
            tokens.push(self.issue_one(identifier).await?);
        }
        Ok(tokens)
    }

    async fn reverse(&self, tokens: &[String]) -> Result<Vec<Option<String>>, TokenizerError> {
        trace!(count = tokens.len(), "reversing tokens");

        let mut identifiers = Vec::with_capacity(tokens.len());
        for token in tokens {
            let found = self.repository.find_by_token(token).await?;
            identifiers.push(found.map(|mapping| mapping.identifier));
        }
        Ok(identifiers)
    }
}
