use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::trace;
use veil_core::error::Result;
use veil_core::repository::{InsertOutcome, Mapping, ReadRepository, Repository};

/// In-memory implementation of the repository contract using DashMap.
///
/// Mappings are indexed twice, by identifier and by token. An insert claims
/// the identifier slot first and the token slot second while holding both
/// shard guards, so the uniqueness check and the write are a single atomic
/// step and readers never see half of a mapping.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    by_identifier: DashMap<String, Mapping>,
    by_token: DashMap<String, Mapping>,
}

impl InMemoryRepository {
    /// Creates a new in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new in-memory repository with the specified capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            by_identifier: DashMap::with_capacity(capacity),
            by_token: DashMap::with_capacity(capacity),
        }
    }

    /// Number of stored mappings.
    pub fn len(&self) -> usize {
        self.by_identifier.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_identifier.is_empty()
    }
}

#[async_trait]
impl ReadRepository for InMemoryRepository {
    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<Mapping>> {
        Ok(self
            .by_identifier
            .get(identifier)
            .map(|entry| entry.value().clone()))
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<Mapping>> {
        Ok(self.by_token.get(token).map(|entry| entry.value().clone()))
    }
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn insert(&self, mapping: &Mapping) -> Result<InsertOutcome> {
        let Entry::Vacant(identifier_slot) = self.by_identifier.entry(mapping.identifier.clone())
        else {
            trace!("identifier already mapped");
            return Ok(InsertOutcome::Conflict);
        };

        let Entry::Vacant(token_slot) = self.by_token.entry(mapping.token.as_str().to_owned())
        else {
            trace!(token = %mapping.token, "token already taken");
            return Ok(InsertOutcome::Conflict);
        };

        token_slot.insert(mapping.clone());
        identifier_slot.insert(mapping.clone());
        Ok(InsertOutcome::Inserted)
    }
}
