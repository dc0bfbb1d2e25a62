//! # pgdump-seed
//!
//! One-shot seeding of a document store from a PostgreSQL text dump.
//!
//! This library provides the extract, transform and load steps used to move
//! a legacy classifieds database into document collections:
//!
//! - **Dump scanning** of `COPY ... FROM stdin;` blocks with namespace fallback
//! - **Row decoding** of tab-separated data lines with NULL handling
//! - **Pure transforms** from legacy category/item rows to documents
//! - **Resilient loading** with sequential and batched concurrent writes
//!
//! ## Example
//!
//! ```rust,no_run
//! use pgdump_seed::{Config, Orchestrator};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.yaml")?.with_env_overrides();
//!     let orchestrator = Orchestrator::new(config)?;
//!     let result = orchestrator.run().await?;
//!     println!("Seeded {} listings", result.listings.success_count);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod dump;
pub mod error;
pub mod load;
pub mod orchestrator;
pub mod target;
pub mod transform;

#[cfg(test)]
mod test_support;

// Re-exports for convenient access
pub use config::{Config, LoadConfig, SourceConfig, TargetConfig, TransformOptions};
pub use dump::{decode_row, extract_table, DecodedRow, DumpScanner, TableExtract};
pub use error::{Result, SeedError};
pub use load::{ClearStats, ItemError, LoadOrchestrator, TransferResult};
pub use orchestrator::{HealthCheckResult, Orchestrator, SeedResult};
pub use target::{AppwriteStore, DocumentStore, MemoryStore, StoredDocument};
pub use transform::{transform_category, transform_listing};
