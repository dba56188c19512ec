//! Ownership-gated CRUD over a resource kind.
//!
//! Every mutation follows the same rule set: the owner is assigned from the
//! authenticated identity at creation and can never be changed; updates and
//! deletes are allowed only to the owner; reads are open. The existence
//! check deliberately precedes the ownership check, so probing a
//! nonexistent id yields `NotFound` while touching someone else's record
//! yields `Unauthorized`.

use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::Arc;

use serde_json::Value;
use uuid::Uuid;

use crate::resources::Resource;
use crate::store::{Document, DocumentStore, StoreError};

#[derive(Debug, thiserror::Error)]
pub enum ResourceError {
    #[error("record not found")]
    NotFound,
    #[error("identity does not own this record")]
    Unauthorized,
    #[error("validation failed")]
    Validation(HashMap<String, String>),
    #[error(transparent)]
    Store(#[from] StoreError),
}

pub struct ResourceService<R: Resource> {
    store: Arc<dyn DocumentStore>,
    _kind: PhantomData<R>,
}

impl<R: Resource> ResourceService<R> {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store, _kind: PhantomData }
    }

    /// All records of the kind, in store order. Reads are not
    /// owner-restricted.
    pub async fn list(&self) -> Result<Vec<Document>, ResourceError> {
        Ok(self.store.find_all(R::COLLECTION).await?)
    }

    pub async fn show(&self, id: Uuid) -> Result<Document, ResourceError> {
        self.store
            .find_by_id(R::COLLECTION, id)
            .await?
            .ok_or(ResourceError::NotFound)
    }

    /// Create a record owned by `owner`. The draft cannot carry an owner;
    /// whatever the client sent under that key never reaches the store.
    pub async fn create(&self, owner: Uuid, draft: R::Draft) -> Result<Document, ResourceError> {
        let attrs = R::attributes(draft).map_err(ResourceError::Validation)?;
        Ok(self.store.insert(R::COLLECTION, owner, attrs).await?)
    }

    /// Partial update. Fields the patch leaves out, and fields sent as
    /// empty strings, keep their stored values.
    ///
    /// The existence check and the merge are two separate store calls; a
    /// delete landing between them surfaces as `NotFound` from the merge.
    pub async fn update(
        &self,
        identity: Option<Uuid>,
        id: Uuid,
        patch: R::Patch,
    ) -> Result<(), ResourceError> {
        let document = self
            .store
            .find_by_id(R::COLLECTION, id)
            .await?
            .ok_or(ResourceError::NotFound)?;

        require_ownership(identity, &document)?;

        let fields = R::changes(patch).map_err(ResourceError::Validation)?;
        self.store
            .apply_partial(R::COLLECTION, id, fields)
            .await?
            .ok_or(ResourceError::NotFound)?;

        Ok(())
    }

    pub async fn delete(&self, identity: Option<Uuid>, id: Uuid) -> Result<(), ResourceError> {
        let document = self
            .store
            .find_by_id(R::COLLECTION, id)
            .await?
            .ok_or(ResourceError::NotFound)?;

        require_ownership(identity, &document)?;

        if !self.store.delete_by_id(R::COLLECTION, id).await? {
            return Err(ResourceError::NotFound);
        }
        Ok(())
    }
}

/// Mutations require the requesting identity to match the record's owner.
/// An absent identity is treated the same as a mismatched one.
fn require_ownership(identity: Option<Uuid>, document: &Document) -> Result<(), ResourceError> {
    match identity {
        Some(user_id) if user_id == document.owner => Ok(()),
        _ => Err(ResourceError::Unauthorized),
    }
}

/// Serialize documents for a list response.
pub fn to_public_list(documents: &[Document]) -> Vec<Value> {
    documents.iter().map(Document::to_public).collect()
}
