use crate::error::Result;
use crate::token::Token;
use async_trait::async_trait;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// A stored identifier to token pairing.
///
/// Both `identifier` and `token` are unique across all mappings. A mapping
/// is written once and never rotated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mapping {
    /// The sensitive value being pseudonymized.
    pub identifier: String,
    /// The opaque substitute handed out to callers.
    pub token: Token,
    /// When the mapping was minted.
    pub issued_at: Timestamp,
}

impl Mapping {
    /// Creates a mapping stamped with the current time.
    pub fn new(identifier: impl Into<String>, token: Token) -> Self {
        Self {
            identifier: identifier.into(),
            token,
            issued_at: Timestamp::now(),
        }
    }
}

/// Result of an insert attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// The mapping was persisted.
    Inserted,
    /// The identifier or the token is already taken; nothing was written.
    Conflict,
}

/// A read-only view of a repository.
///
/// Reverse lookups only need this half, so read replicas can implement it
/// without exposing inserts.
#[async_trait]
pub trait ReadRepository: Send + Sync + 'static {
    /// Retrieves the mapping for an identifier.
    /// Returns `None` if the identifier has never been tokenized.
    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<Mapping>>;

    /// Retrieves the mapping for a token.
    /// Returns `None` if no mapping holds this token.
    async fn find_by_token(&self, token: &str) -> Result<Option<Mapping>>;
}

#[async_trait]
pub trait Repository: ReadRepository {
    /// Atomically inserts a new mapping.
    ///
    /// Implementations must enforce uniqueness of both `identifier` and
    /// `token` as part of the insert itself, returning
    /// [`InsertOutcome::Conflict`] instead of writing when either is taken.
    /// Existing mappings are never overwritten.
    async fn insert(&self, mapping: &Mapping) -> Result<InsertOutcome>;
}
