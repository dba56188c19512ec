//! Document store collaborators.
//!
//! The protocol layer only depends on the [`DocumentStore`] contract; the
//! concrete handle is constructed in `main` (or a test harness) and injected
//! through router state.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{json, Map, Value};
use thiserror::Error;
use uuid::Uuid;

pub use memory::MemoryStore;
pub use postgres::PgDocumentStore;

/// Errors from store implementations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Invalid database URL")]
    InvalidDatabaseUrl,

    #[error("Invalid collection name: {0}")]
    InvalidCollection(String),

    #[error("Query error: {0}")]
    Query(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// A stored document: store-assigned identity and timestamps, the owning
/// user, and the kind-specific attribute object.
#[derive(Debug, Clone)]
pub struct Document {
    pub id: Uuid,
    pub owner: Uuid,
    pub attrs: Map<String, Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Document {
    /// Client-facing representation: identifier, owner and attributes.
    /// Store-maintained timestamps are internal metadata and are excluded.
    pub fn to_public(&self) -> Value {
        let mut map = Map::new();
        map.insert("id".to_string(), json!(self.id));
        map.insert("owner".to_string(), json!(self.owner));
        for (key, value) in &self.attrs {
            map.insert(key.clone(), value.clone());
        }
        Value::Object(map)
    }
}

/// Minimal persistence contract required by the mutation protocol.
///
/// `apply_partial` performs a shallow key-wise merge: keys present in
/// `fields` overwrite, all other attributes keep their prior values.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn insert(
        &self,
        collection: &str,
        owner: Uuid,
        attrs: Map<String, Value>,
    ) -> Result<Document, StoreError>;

    async fn find_all(&self, collection: &str) -> Result<Vec<Document>, StoreError>;

    async fn find_by_id(&self, collection: &str, id: Uuid) -> Result<Option<Document>, StoreError>;

    /// Returns the merged document, or `None` when the id no longer exists.
    async fn apply_partial(
        &self,
        collection: &str,
        id: Uuid,
        fields: Map<String, Value>,
    ) -> Result<Option<Document>, StoreError>;

    /// Returns whether a document was removed.
    async fn delete_by_id(&self, collection: &str, id: Uuid) -> Result<bool, StoreError>;

    /// Liveness probe for the health endpoint.
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
