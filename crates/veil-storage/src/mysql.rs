use async_trait::async_trait;
use jiff::Timestamp;
use sqlx::mysql::MySqlRow;
use sqlx::{MySqlPool, Row};
use tracing::debug;
use veil_core::error::{Result, StorageError};
use veil_core::repository::{InsertOutcome, Mapping, ReadRepository, Repository};
use veil_core::Token;

/// Schema for the `token_mappings` table.
pub const TOKEN_MAPPINGS_DDL: &str = include_str!("../ddl/mysql/token_mappings.sql");

/// MySQL implementation of the repository contract.
///
/// Uniqueness of both `identifier` and `token` is delegated to `UNIQUE`
/// indexes, so concurrent writers in separate processes are arbitrated by
/// the database. A duplicate-key error on insert is reported as
/// [`InsertOutcome::Conflict`]. Rows are never updated or deleted.
///
/// Both key columns use binary collations: tokens are case-sensitive base64
/// and identifiers must match exactly. Identifiers longer than 255
/// characters are rejected by the server and surface as
/// [`StorageError::Query`].
#[derive(Debug, Clone)]
pub struct MySqlRepository {
    pool: MySqlPool,
}

impl MySqlRepository {
    /// Creates a repository from an existing MySQL connection pool.
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Creates a repository by opening a new MySQL connection pool.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = MySqlPool::connect(database_url)
            .await
            .map_err(map_sqlx_error)?;
        Ok(Self::new(pool))
    }

    /// Creates the `token_mappings` table if it does not exist yet.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::query(TOKEN_MAPPINGS_DDL)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        debug!("token_mappings schema is in place");
        Ok(())
    }

    /// Returns a reference to the underlying pool.
    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }
}

fn parse_issued_at(seconds: i64) -> Result<Timestamp> {
    Timestamp::from_second(seconds).map_err(|e| {
        StorageError::InvalidData(format!("invalid issued_at timestamp '{}': {e}", seconds))
    })
}

fn row_to_mapping(row: MySqlRow) -> Result<Mapping> {
    let identifier: String = row.try_get("identifier").map_err(map_sqlx_error)?;
    let token: String = row.try_get("token").map_err(map_sqlx_error)?;
    let issued_at: i64 = row.try_get("issued_at").map_err(map_sqlx_error)?;

    Ok(Mapping {
        identifier,
        token: Token::new_unchecked(token),
        issued_at: parse_issued_at(issued_at)?,
    })
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(sqlx::error::DatabaseError::is_unique_violation)
}

fn map_sqlx_error(err: sqlx::Error) -> StorageError {
    let message = err.to_string();

    match err {
        sqlx::Error::PoolTimedOut => StorageError::Timeout(message),
        sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_) => StorageError::Unavailable(message),
        sqlx::Error::ColumnIndexOutOfBounds { .. }
        | sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::TypeNotFound { .. }
        | sqlx::Error::Decode(_)
        | sqlx::Error::RowNotFound => StorageError::InvalidData(message),
        _ => StorageError::Query(message),
    }
}

#[async_trait]
impl ReadRepository for MySqlRepository {
    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<Mapping>> {
        let row = sqlx::query(
            r#"
            SELECT identifier, token, issued_at
            FROM token_mappings
            WHERE identifier = ?
            LIMIT 1
            "#,
        )
        .bind(identifier)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.map(row_to_mapping).transpose()
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<Mapping>> {
        let row = sqlx::query(
            r#"
            SELECT identifier, token, issued_at
            FROM token_mappings
            WHERE token = ?
            LIMIT 1
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.map(row_to_mapping).transpose()
    }
}

#[async_trait]
impl Repository for MySqlRepository {
    async fn insert(&self, mapping: &Mapping) -> Result<InsertOutcome> {
        let result = sqlx::query(
            r#"
            INSERT INTO token_mappings (identifier, token, issued_at)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(mapping.identifier.as_str())
        .bind(mapping.token.as_str())
        .bind(mapping.issued_at.as_second())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(InsertOutcome::Inserted),
            Err(err) if is_unique_violation(&err) => {
                debug!(error = %err, "insert rejected by unique key");
                Ok(InsertOutcome::Conflict)
            }
            Err(err) => Err(map_sqlx_error(err)),
        }
    }
}
