use std::{marker::PhantomData, sync::Arc};

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::{
    object_id::ObjectId,
    store::{Document, DocumentStore, StoreError},
};

/// Typed view over one named collection of a [`DocumentStore`].
pub struct Collection<T> {
    store: Arc<dyn DocumentStore>,
    name: &'static str,
    _record: PhantomData<fn() -> T>,
}

impl<T> Clone for Collection<T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            name: self.name,
            _record: PhantomData,
        }
    }
}

impl<T> Collection<T>
where
    T: DeserializeOwned,
{
    pub fn new(store: Arc<dyn DocumentStore>, name: &'static str) -> Self {
        Self {
            store,
            name,
            _record: PhantomData,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub async fn find_all(&self) -> Result<Vec<T>, StoreError> {
        self.store
            .find_all(self.name)
            .await?
            .into_iter()
            .map(|document| self.decode(document))
            .collect()
    }

    pub async fn find_one(&self, id: &ObjectId) -> Result<Option<T>, StoreError> {
        self.store
            .find_one(self.name, id)
            .await?
            .map(|document| self.decode(document))
            .transpose()
    }

    /// Insert a new record built from `new` and return it with its id.
    pub async fn insert<N>(&self, new: &N) -> Result<T, StoreError>
    where
        N: Serialize + ?Sized,
    {
        let document = self.encode(new)?;
        let saved = self.store.insert(self.name, document).await?;
        self.decode(saved)
    }

    /// Set a single top-level field; `None` when the record does not exist.
    pub async fn set<V>(&self, id: &ObjectId, field: &str, value: V) -> Result<Option<T>, StoreError>
    where
        V: Serialize,
    {
        let value = serde_json::to_value(value).map_err(|source| StoreError::Encode {
            collection: self.name.to_string(),
            source,
        })?;

        let mut fields = Document::new();
        fields.insert(field.to_string(), value);

        self.store
            .set_fields(self.name, id, fields)
            .await?
            .map(|document| self.decode(document))
            .transpose()
    }

    /// Remove a record; `true` when something was deleted.
    pub async fn delete(&self, id: &ObjectId) -> Result<bool, StoreError> {
        Ok(self.store.delete_one(self.name, id).await?.is_some())
    }

    fn encode<N>(&self, new: &N) -> Result<Document, StoreError>
    where
        N: Serialize + ?Sized,
    {
        match serde_json::to_value(new) {
            Ok(Value::Object(document)) => Ok(document),
            Ok(_) => Err(StoreError::NotADocument {
                collection: self.name.to_string(),
            }),
            Err(source) => Err(StoreError::Encode {
                collection: self.name.to_string(),
                source,
            }),
        }
    }

    fn decode(&self, document: Document) -> Result<T, StoreError> {
        serde_json::from_value(Value::Object(document)).map_err(|source| StoreError::Decode {
            collection: self.name.to_string(),
            source,
        })
    }
}
