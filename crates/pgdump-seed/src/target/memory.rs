//! In-process document store used for dry runs and tests.

use super::{DocumentStore, StoredDocument};
use crate::error::{Result, SeedError};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::{BTreeMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
struct Inner {
    collections: BTreeMap<String, BTreeMap<String, Value>>,
    reject_create: HashSet<String>,
    reject_delete: HashSet<String>,
    reject_list: HashSet<String>,
    unreachable: bool,
}

/// Document store kept entirely in memory.
///
/// Collections spring into existence on first write. Creating an id that
/// already exists fails with a 409, like a real store would.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Insert a document directly, bypassing failure injection.
    pub fn insert(&self, collection: &str, document_id: &str, data: Value) {
        self.lock()
            .collections
            .entry(collection.to_string())
            .or_default()
            .insert(document_id.to_string(), data);
    }

    /// Make every create of `document_id` fail.
    pub fn reject_create(&self, document_id: &str) {
        self.lock().reject_create.insert(document_id.to_string());
    }

    /// Make every delete of `document_id` fail.
    pub fn reject_delete(&self, document_id: &str) {
        self.lock().reject_delete.insert(document_id.to_string());
    }

    /// Make every listing of `collection` fail.
    pub fn reject_list(&self, collection: &str) {
        self.lock().reject_list.insert(collection.to_string());
    }

    /// Make [`DocumentStore::ping`] fail.
    pub fn set_unreachable(&self, unreachable: bool) {
        self.lock().unreachable = unreachable;
    }

    /// Number of documents in a collection.
    pub fn count(&self, collection: &str) -> usize {
        self.lock()
            .collections
            .get(collection)
            .map_or(0, BTreeMap::len)
    }

    /// Fetch one document body.
    pub fn get(&self, collection: &str, document_id: &str) -> Option<Value> {
        self.lock()
            .collections
            .get(collection)
            .and_then(|docs| docs.get(document_id))
            .cloned()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn create(
        &self,
        collection: &str,
        document_id: &str,
        data: Value,
    ) -> Result<StoredDocument> {
        let mut inner = self.lock();
        if inner.reject_create.contains(document_id) {
            return Err(SeedError::api(400, format!("Rejected document {}", document_id)));
        }
        if document_id.is_empty() {
            return Err(SeedError::api(400, "Document ID is required"));
        }

        let docs = inner.collections.entry(collection.to_string()).or_default();
        if docs.contains_key(document_id) {
            return Err(SeedError::api(
                409,
                "Document with the requested ID already exists",
            ));
        }
        docs.insert(document_id.to_string(), data.clone());

        Ok(StoredDocument {
            id: document_id.to_string(),
            data,
        })
    }

    async fn list(&self, collection: &str) -> Result<Vec<StoredDocument>> {
        let inner = self.lock();
        if inner.reject_list.contains(collection) {
            return Err(SeedError::api(500, "Server Error"));
        }
        Ok(inner
            .collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .map(|(id, data)| StoredDocument {
                        id: id.clone(),
                        data: data.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn delete(&self, collection: &str, document_id: &str) -> Result<()> {
        let mut inner = self.lock();
        if inner.reject_delete.contains(document_id) {
            return Err(SeedError::api(401, "The current user is not authorized"));
        }
        let removed = inner
            .collections
            .get_mut(collection)
            .and_then(|docs| docs.remove(document_id));
        match removed {
            Some(_) => Ok(()),
            None => Err(SeedError::api(
                404,
                "Document with the requested ID could not be found",
            )),
        }
    }

    async fn ping(&self) -> Result<()> {
        if self.lock().unreachable {
            return Err(SeedError::Unreachable("memory store offline".to_string()));
        }
        Ok(())
    }

    fn store_type(&self) -> &str {
        "memory"
    }
}
