use std::{
    collections::{BTreeMap, HashMap},
    sync::atomic::{AtomicBool, Ordering},
};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::{
    object_id::ObjectId,
    store::{Document, DocumentStore, StoreError, ID_FIELD},
};

type Table = BTreeMap<ObjectId, Document>;

/// In-process document store.
///
/// Collections are created on first write. The store can be closed to
/// simulate a lost database connection: every operation then fails with
/// [`StoreError::Unavailable`] until it is reopened.
#[derive(Debug)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Table>>,
    open: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            collections: RwLock::new(HashMap::new()),
            open: AtomicBool::new(true),
        }
    }

    pub fn close(&self) {
        tracing::warn!("document store closed");
        self.open.store(false, Ordering::SeqCst);
    }

    pub fn reopen(&self) {
        tracing::info!("document store reopened");
        self.open.store(true, Ordering::SeqCst);
    }

    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::SeqCst)
    }

    fn ensure_open(&self) -> Result<(), StoreError> {
        if self.is_open() {
            Ok(())
        } else {
            Err(StoreError::Unavailable)
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find_all(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        self.ensure_open()?;
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .map(|table| table.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn find_one(
        &self,
        collection: &str,
        id: &ObjectId,
    ) -> Result<Option<Document>, StoreError> {
        self.ensure_open()?;
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|table| table.get(id))
            .cloned())
    }

    async fn insert(
        &self,
        collection: &str,
        mut document: Document,
    ) -> Result<Document, StoreError> {
        self.ensure_open()?;
        let id = ObjectId::new();
        document.insert(ID_FIELD.to_string(), Value::String(id.to_string()));

        let mut collections = self.collections.write().await;
        collections
            .entry(collection.to_string())
            .or_default()
            .insert(id, document.clone());

        tracing::debug!(collection, id = %id, "document inserted");
        Ok(document)
    }

    async fn set_fields(
        &self,
        collection: &str,
        id: &ObjectId,
        fields: Document,
    ) -> Result<Option<Document>, StoreError> {
        self.ensure_open()?;
        let mut collections = self.collections.write().await;
        let Some(document) = collections
            .get_mut(collection)
            .and_then(|table| table.get_mut(id))
        else {
            return Ok(None);
        };

        for (field, value) in fields {
            if field == ID_FIELD {
                continue;
            }
            document.insert(field, value);
        }

        tracing::debug!(collection, id = %id, "document updated");
        Ok(Some(document.clone()))
    }

    async fn delete_one(
        &self,
        collection: &str,
        id: &ObjectId,
    ) -> Result<Option<Document>, StoreError> {
        self.ensure_open()?;
        let mut collections = self.collections.write().await;
        Ok(collections
            .get_mut(collection)
            .and_then(|table| table.remove(id)))
    }
}
