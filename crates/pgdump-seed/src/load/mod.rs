//! Document loading with partial-failure tolerance.
//!
//! This module writes transformed documents to the target store:
//! - [`LoadOrchestrator::clear`] empties a collection, best effort
//! - [`LoadOrchestrator::seed_sequential`] creates documents one at a time
//! - [`LoadOrchestrator::seed_batched`] creates fixed-size groups concurrently,
//!   joining each group and pausing before the next one
//!
//! A failed create or delete is recorded and the run moves on. Nothing is
//! retried: the recovery path is a fresh run, which clears first.

use crate::target::DocumentStore;
use crate::transform::SeedDocument;
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

/// A failure scoped to one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemError {
    /// Which document failed (e.g. "Listing 10").
    pub label: String,
    /// Error reported for it.
    pub message: String,
}

/// Outcome of loading one entity class.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferResult {
    pub success_count: usize,
    pub error_count: usize,
    /// Item failures in the order they were recorded.
    pub errors: Vec<ItemError>,
}

impl TransferResult {
    fn record_success(&mut self) {
        self.success_count += 1;
    }

    fn record_error(&mut self, label: String, message: String) {
        self.error_count += 1;
        self.errors.push(ItemError { label, message });
    }

    /// Whether no item failed.
    pub fn is_clean(&self) -> bool {
        self.error_count == 0
    }

    /// The first `n` error messages, formatted for display.
    pub fn first_errors(&self, n: usize) -> Vec<String> {
        self.errors
            .iter()
            .take(n)
            .map(|e| format!("{}: {}", e.label, e.message))
            .collect()
    }
}

/// Outcome of clearing one collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClearStats {
    /// Documents found by the listing call.
    pub listed: usize,
    pub deleted: usize,
    pub failed: usize,
    /// Set when the collection could not be listed at all.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_error: Option<String>,
}

/// Writes documents to a [`DocumentStore`].
#[derive(Clone)]
pub struct LoadOrchestrator {
    store: Arc<dyn DocumentStore>,
}

impl LoadOrchestrator {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Delete every document in `collection`.
    ///
    /// Never fails: listing and delete errors are logged and tallied.
    pub async fn clear(&self, collection: &str) -> ClearStats {
        let mut stats = ClearStats::default();

        let documents = match self.store.list(collection).await {
            Ok(docs) => docs,
            Err(e) => {
                warn!("Could not list {} for clearing: {}", collection, e);
                stats.list_error = Some(e.to_string());
                return stats;
            }
        };
        stats.listed = documents.len();

        for doc in &documents {
            match self.store.delete(collection, &doc.id).await {
                Ok(()) => stats.deleted += 1,
                Err(e) => {
                    stats.failed += 1;
                    warn!("Could not delete {}/{}: {}", collection, doc.id, e);
                }
            }
        }

        info!(
            "Cleared {} of {} documents from {} ({} failed)",
            stats.deleted, stats.listed, collection, stats.failed
        );
        stats
    }

    /// Create documents one at a time, in input order.
    pub async fn seed_sequential<D: SeedDocument>(
        &self,
        collection: &str,
        documents: &[D],
    ) -> TransferResult {
        let start = Instant::now();
        let mut result = TransferResult::default();

        for doc in documents {
            let outcome = self.create_one(collection, doc).await;
            record(&mut result, doc, outcome);
        }

        info!(
            "{}: {} success, {} errors in {:.1}s",
            collection,
            result.success_count,
            result.error_count,
            start.elapsed().as_secs_f64()
        );
        result
    }

    /// Create documents in consecutive groups of `batch_size`.
    ///
    /// Every create in a group is issued at once and the group is joined
    /// before moving on; `delay` is then slept before the next group. A
    /// failure never cancels its siblings or later groups.
    pub async fn seed_batched<D: SeedDocument>(
        &self,
        collection: &str,
        documents: &[D],
        batch_size: usize,
        delay: Duration,
    ) -> TransferResult {
        let start = Instant::now();
        let mut result = TransferResult::default();
        let batch_size = batch_size.max(1);
        let total_batches = documents.len().div_ceil(batch_size);

        for (idx, batch) in documents.chunks(batch_size).enumerate() {
            let outcomes = join_all(batch.iter().map(|doc| self.create_one(collection, doc))).await;
            for (doc, outcome) in batch.iter().zip(outcomes) {
                record(&mut result, doc, outcome);
            }

            info!(
                "{}: batch {}/{} done ({} documents, {} success, {} errors so far)",
                collection,
                idx + 1,
                total_batches,
                batch.len(),
                result.success_count,
                result.error_count
            );

            if idx + 1 < total_batches && !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
        }

        info!(
            "{}: {} success, {} errors in {} batches ({:.1}s)",
            collection,
            result.success_count,
            result.error_count,
            total_batches,
            start.elapsed().as_secs_f64()
        );
        result
    }

    async fn create_one<D: SeedDocument>(
        &self,
        collection: &str,
        doc: &D,
    ) -> std::result::Result<(), String> {
        let data = serde_json::to_value(doc).map_err(|e| e.to_string())?;
        self.store
            .create(collection, doc.document_id(), data)
            .await
            .map(|_| ())
            .map_err(|e| e.to_string())
    }
}

fn record<D: SeedDocument>(
    result: &mut TransferResult,
    doc: &D,
    outcome: std::result::Result<(), String>,
) {
    match outcome {
        Ok(()) => {
            debug!("Created {}", doc.label());
            result.record_success();
        }
        Err(message) => {
            error!("{}: {}", doc.label(), message);
            result.record_error(doc.label(), message);
        }
    }
}
