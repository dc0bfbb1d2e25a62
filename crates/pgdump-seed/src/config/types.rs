//! Configuration type definitions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Dump file and table lookup configuration.
    #[serde(default)]
    pub source: SourceConfig,

    /// Document store configuration.
    #[serde(default)]
    pub target: TargetConfig,

    /// Load pacing configuration.
    #[serde(default)]
    pub load: LoadConfig,

    /// Defaults used when mapping legacy rows to documents.
    #[serde(default)]
    pub transform: TransformOptions,
}

/// Source dump configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Path to the textual dump (default: "full_remote_backup.sql").
    #[serde(default = "default_dump_path")]
    pub dump_path: PathBuf,

    /// Namespaces to try, highest priority first.
    #[serde(default = "default_namespaces")]
    pub namespaces: Vec<String>,

    /// Legacy table names.
    #[serde(default)]
    pub tables: TableNames,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            dump_path: default_dump_path(),
            namespaces: default_namespaces(),
            tables: TableNames::default(),
        }
    }
}

/// Names of the legacy tables read from the dump.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableNames {
    #[serde(default = "default_category_table")]
    pub categories: String,

    #[serde(default = "default_category_description_table")]
    pub category_descriptions: String,

    #[serde(default = "default_item_table")]
    pub items: String,

    #[serde(default = "default_item_description_table")]
    pub item_descriptions: String,
}

impl Default for TableNames {
    fn default() -> Self {
        Self {
            categories: default_category_table(),
            category_descriptions: default_category_description_table(),
            items: default_item_table(),
            item_descriptions: default_item_description_table(),
        }
    }
}

/// Target document store configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct TargetConfig {
    /// REST endpoint, including the version prefix (e.g. "https://host/v1").
    #[serde(default)]
    pub endpoint: String,

    /// Project identifier sent with every request.
    #[serde(default)]
    pub project_id: String,

    /// API key. Usually supplied through the environment rather than the file.
    #[serde(default, skip_serializing)]
    pub api_key: String,

    /// Database holding the target collections.
    #[serde(default = "default_database_id")]
    pub database_id: String,

    /// Collection receiving category documents (default: "categories").
    #[serde(default = "default_categories_collection")]
    pub categories_collection: String,

    /// Collection receiving listing documents (default: "listings").
    #[serde(default = "default_listings_collection")]
    pub listings_collection: String,

    /// Permissions attached to every created document.
    #[serde(default = "default_permissions")]
    pub permissions: Vec<String>,

    /// Optional per-request timeout in seconds. Unset means a stalled
    /// call waits for the server (default: none).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            project_id: String::new(),
            api_key: String::new(),
            database_id: default_database_id(),
            categories_collection: default_categories_collection(),
            listings_collection: default_listings_collection(),
            permissions: default_permissions(),
            timeout_secs: None,
        }
    }
}

impl fmt::Debug for TargetConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TargetConfig")
            .field("endpoint", &self.endpoint)
            .field("project_id", &self.project_id)
            .field("api_key", &"[REDACTED]")
            .field("database_id", &self.database_id)
            .field("categories_collection", &self.categories_collection)
            .field("listings_collection", &self.listings_collection)
            .field("permissions", &self.permissions)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Load pacing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadConfig {
    /// Listings created concurrently per group (default: 10).
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Pause after each listing group, in milliseconds (default: 100).
    #[serde(default = "default_batch_delay_ms")]
    pub batch_delay_ms: u64,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
            batch_delay_ms: default_batch_delay_ms(),
        }
    }
}

/// Fallback values and limits applied by the transformer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransformOptions {
    /// Owner assigned to listings without a user key (default: "1").
    #[serde(default = "default_user_id")]
    pub default_user_id: String,

    /// Currency assigned when the item has none (default: "LKR").
    #[serde(default = "default_currency")]
    pub default_currency: String,

    /// Location used when no pattern matches the description.
    #[serde(default = "default_location")]
    pub default_location: String,

    #[serde(default = "default_slug_max_len")]
    pub slug_max_len: usize,

    #[serde(default = "default_seo_title_max_len")]
    pub seo_title_max_len: usize,

    /// Maximum keywords kept per listing, before de-duplication.
    #[serde(default = "default_keyword_limit")]
    pub keyword_limit: usize,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            default_user_id: default_user_id(),
            default_currency: default_currency(),
            default_location: default_location(),
            slug_max_len: default_slug_max_len(),
            seo_title_max_len: default_seo_title_max_len(),
            keyword_limit: default_keyword_limit(),
        }
    }
}

// Default value functions
fn default_dump_path() -> PathBuf {
    PathBuf::from("full_remote_backup.sql")
}

fn default_namespaces() -> Vec<String> {
    vec!["backup_osclass".to_string(), "public".to_string()]
}

fn default_category_table() -> String {
    "oc_t_category".to_string()
}

fn default_category_description_table() -> String {
    "oc_t_category_description".to_string()
}

fn default_item_table() -> String {
    "oc_t_item".to_string()
}

fn default_item_description_table() -> String {
    "oc_t_item_description".to_string()
}

fn default_database_id() -> String {
    "osclass_landsale_db".to_string()
}

fn default_categories_collection() -> String {
    "categories".to_string()
}

fn default_listings_collection() -> String {
    "listings".to_string()
}

fn default_permissions() -> Vec<String> {
    vec!["read(\"any\")".to_string()]
}

fn default_batch_size() -> usize {
    10
}

fn default_batch_delay_ms() -> u64 {
    100
}

fn default_user_id() -> String {
    "1".to_string()
}

fn default_currency() -> String {
    "LKR".to_string()
}

fn default_location() -> String {
    "Sri Lanka".to_string()
}

fn default_slug_max_len() -> usize {
    200
}

fn default_seo_title_max_len() -> usize {
    60
}

fn default_keyword_limit() -> usize {
    10
}
