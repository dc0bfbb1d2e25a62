//! Target document store operations.
//!
//! The loader only needs three calls, create/list/delete, plus a
//! reachability probe. Anything transactional or batch-native is left out
//! on purpose so that any document store can sit behind [`DocumentStore`].

mod appwrite;
mod memory;

pub use appwrite::AppwriteStore;
pub use memory::MemoryStore;

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A document as returned by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredDocument {
    /// Document id within its collection.
    pub id: String,
    /// Document body.
    pub data: Value,
}

/// Trait for target document store operations.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Create a document with a caller-chosen id.
    async fn create(&self, collection: &str, document_id: &str, data: Value)
        -> Result<StoredDocument>;

    /// List every document in a collection.
    async fn list(&self, collection: &str) -> Result<Vec<StoredDocument>>;

    /// Delete one document.
    async fn delete(&self, collection: &str, document_id: &str) -> Result<()>;

    /// Check that the store is reachable and accepts our credentials.
    async fn ping(&self) -> Result<()>;

    /// Store type for logging.
    fn store_type(&self) -> &str;
}
