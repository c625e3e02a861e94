use async_trait::async_trait;
use thiserror::Error;

use crate::object_id::ObjectId;

/// Field holding the record key in every stored document.
pub const ID_FIELD: &str = "_id";

/// A stored record: a JSON object with an `_id` string field.
pub type Document = serde_json::Map<String, serde_json::Value>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("cannot connect with the document store")]
    Unavailable,

    #[error("value written to '{collection}' is not a JSON object")]
    NotADocument { collection: String },

    #[error("failed to encode document for '{collection}': {source}")]
    Encode {
        collection: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("document in '{collection}' has an unexpected shape: {source}")]
    Decode {
        collection: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("document store failure: {0}")]
    Backend(String),
}

/// Collection-oriented document storage shared by request handlers.
///
/// Implementations must be safe for concurrent use; handlers hold an
/// `Arc<dyn DocumentStore>` and never coordinate among themselves.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Every document of the collection in key order.
    async fn find_all(&self, collection: &str) -> Result<Vec<Document>, StoreError>;

    async fn find_one(
        &self,
        collection: &str,
        id: &ObjectId,
    ) -> Result<Option<Document>, StoreError>;

    /// Store a new document under a freshly generated `_id` and return it.
    async fn insert(&self, collection: &str, document: Document) -> Result<Document, StoreError>;

    /// Overwrite the given top-level fields and return the updated document,
    /// or `None` when no document has that id.
    async fn set_fields(
        &self,
        collection: &str,
        id: &ObjectId,
        fields: Document,
    ) -> Result<Option<Document>, StoreError>;

    /// Remove a document, returning it if it existed.
    async fn delete_one(
        &self,
        collection: &str,
        id: &ObjectId,
    ) -> Result<Option<Document>, StoreError>;
}
