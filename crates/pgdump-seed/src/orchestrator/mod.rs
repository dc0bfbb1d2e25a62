//! Seeding orchestrator - main workflow coordinator.

use crate::config::Config;
use crate::dump::{DecodedRow, DumpScanner};
use crate::error::{Result, SeedError};
use crate::load::{ClearStats, LoadOrchestrator, TransferResult};
use crate::target::{AppwriteStore, DocumentStore};
use crate::transform::{
    transform_category, transform_listing, LegacyCategoryDescriptionRow, LegacyCategoryRow,
    LegacyItemDescriptionRow, LegacyItemRow, TargetCategoryDocument, TargetListingDocument,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// Seeding orchestrator.
pub struct Orchestrator {
    config: Config,
    store: Arc<dyn DocumentStore>,
    skip_clear: bool,
}

/// Result of a seeding run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedResult {
    /// Unique run identifier.
    pub run_id: String,

    /// Final status: "completed" or "failed".
    pub status: String,

    /// Total duration in seconds.
    pub duration_seconds: f64,

    /// When the run started.
    pub started_at: DateTime<Utc>,

    /// When the run completed.
    pub completed_at: DateTime<Utc>,

    /// Clearing outcome for the category collection.
    pub categories_cleared: ClearStats,

    /// Clearing outcome for the listing collection.
    pub listings_cleared: ClearStats,

    /// Category load outcome.
    pub categories: TransferResult,

    /// Listing load outcome.
    pub listings: TransferResult,
}

/// Health check result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthCheckResult {
    pub store_type: String,
    pub connected: bool,
    pub latency_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Orchestrator {
    /// Create an orchestrator writing to the configured remote store.
    ///
    /// Fails when the endpoint, project or credential is missing.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        config.validate_remote()?;
        let store = AppwriteStore::new(&config.target)?;
        Ok(Self::with_store(config, Arc::new(store)))
    }

    /// Create an orchestrator writing to an arbitrary store.
    pub fn with_store(config: Config, store: Arc<dyn DocumentStore>) -> Self {
        Self {
            config,
            store,
            skip_clear: false,
        }
    }

    /// Leave existing documents in place instead of clearing first.
    pub fn with_skip_clear(mut self, skip: bool) -> Self {
        self.skip_clear = skip;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Probe the target store.
    pub async fn health_check(&self) -> HealthCheckResult {
        let start = std::time::Instant::now();
        let outcome = self.store.ping().await;
        HealthCheckResult {
            store_type: self.store.store_type().to_string(),
            connected: outcome.is_ok(),
            latency_ms: start.elapsed().as_millis() as u64,
            error: outcome.err().map(|e| e.to_string()),
        }
    }

    /// Read the configured dump file and run the pipeline on it.
    pub async fn run(&self) -> Result<SeedResult> {
        let path = &self.config.source.dump_path;
        info!("Reading dump file {:?}", path);
        let dump = std::fs::read_to_string(path)?;
        self.run_with_dump(&dump).await
    }

    /// Run the pipeline over dump text already in memory.
    ///
    /// Item-level failures do not make this return `Err`; they are reported
    /// in the result and flip its status to "failed".
    pub async fn run_with_dump(&self, dump: &str) -> Result<SeedResult> {
        let started_at = Utc::now();
        let run_id = uuid::Uuid::new_v4().to_string();
        let target = &self.config.target;
        info!(
            "Starting seeding run {} (store: {}, database: {})",
            run_id,
            self.store.store_type(),
            target.database_id
        );

        self.store.ping().await.map_err(|e| match e {
            SeedError::Unreachable(_) => e,
            other => SeedError::Unreachable(other.to_string()),
        })?;

        let loader = LoadOrchestrator::new(self.store.clone());
        let scanner = DumpScanner::new(dump);

        // Phase 1: Clear target collections
        let (categories_cleared, listings_cleared) = if self.skip_clear {
            info!("Phase 1: Skipping clear of existing documents");
            (ClearStats::default(), ClearStats::default())
        } else {
            info!("Phase 1: Clearing existing documents");
            (
                loader.clear(&target.categories_collection).await,
                loader.clear(&target.listings_collection).await,
            )
        };

        // Phase 2: Categories, fully loaded before any listing
        info!("Phase 2: Seeding categories");
        let categories = self.build_categories(&scanner);
        let category_result = loader
            .seed_sequential(&target.categories_collection, &categories)
            .await;

        // Phase 3: Listings
        info!("Phase 3: Seeding listings");
        let listings = self.build_listings(&scanner);
        let listing_result = loader
            .seed_batched(
                &target.listings_collection,
                &listings,
                self.config.load.batch_size,
                self.config.load.batch_delay(),
            )
            .await;

        let completed_at = Utc::now();
        let duration = (completed_at - started_at).num_milliseconds() as f64 / 1000.0;
        let status = if category_result.is_clean() && listing_result.is_clean() {
            "completed"
        } else {
            "failed"
        };

        let result = SeedResult {
            run_id,
            status: status.to_string(),
            duration_seconds: duration,
            started_at,
            completed_at,
            categories_cleared,
            listings_cleared,
            categories: category_result,
            listings: listing_result,
        };

        info!(
            "Seeding {}: categories {}/{} ok, listings {}/{} ok in {:.1}s",
            result.status,
            result.categories.success_count,
            categories.len(),
            result.listings.success_count,
            listings.len(),
            result.duration_seconds
        );

        Ok(result)
    }

    fn build_categories(&self, scanner: &DumpScanner<'_>) -> Vec<TargetCategoryDocument> {
        let source = &self.config.source;
        let rows = read_rows(
            scanner,
            &source.tables.categories,
            &source.namespaces,
            LegacyCategoryRow::from_row,
        );
        let descriptions = read_rows(
            scanner,
            &source.tables.category_descriptions,
            &source.namespaces,
            LegacyCategoryDescriptionRow::from_row,
        );
        info!(
            "Parsed {} categories and {} category descriptions",
            rows.len(),
            descriptions.len()
        );

        rows.iter()
            .map(|row| transform_category(row, &descriptions))
            .collect()
    }

    fn build_listings(&self, scanner: &DumpScanner<'_>) -> Vec<TargetListingDocument> {
        let source = &self.config.source;
        let rows = read_rows(
            scanner,
            &source.tables.items,
            &source.namespaces,
            LegacyItemRow::from_row,
        );
        let descriptions = read_rows(
            scanner,
            &source.tables.item_descriptions,
            &source.namespaces,
            LegacyItemDescriptionRow::from_row,
        );
        info!(
            "Parsed {} items and {} item descriptions",
            rows.len(),
            descriptions.len()
        );

        rows.iter()
            .map(|row| transform_listing(row, &descriptions, &self.config.transform))
            .collect()
    }
}

/// Extract `table` and map every decoded row with `from_row`.
fn read_rows<T>(
    scanner: &DumpScanner<'_>,
    table: &str,
    namespaces: &[String],
    from_row: fn(&DecodedRow<'_>) -> T,
) -> Vec<T> {
    let extract = scanner.extract_table(table, namespaces);
    if extract.is_empty() {
        return Vec::new();
    }
    info!("Found {} rows in {}", extract.row_count(), extract.full_name());
    extract.rows().map(|row| from_row(&row)).collect()
}

impl SeedResult {
    /// Whether both entity classes loaded without item errors.
    pub fn is_success(&self) -> bool {
        self.categories.is_clean() && self.listings.is_clean()
    }

    /// Convert into an error when any item failed.
    pub fn into_outcome(self) -> Result<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(SeedError::ItemErrors {
                categories: self.categories.error_count,
                listings: self.listings.error_count,
            })
        }
    }

    /// Convert to JSON string.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
