//! Configuration validation.

use super::Config;
use crate::error::{Result, SeedError};

/// Validate the configuration.
///
/// Connection settings are only checked for shape here; the credential is
/// checked separately by [`Config::require_credentials`] so that dry runs
/// can go without one.
pub fn validate(config: &Config) -> Result<()> {
    // Source validation
    if config.source.namespaces.is_empty() {
        return Err(SeedError::Config(
            "source.namespaces must list at least one namespace".into(),
        ));
    }
    if config.source.namespaces.iter().any(|n| n.trim().is_empty()) {
        return Err(SeedError::Config(
            "source.namespaces cannot contain empty names".into(),
        ));
    }
    let tables = &config.source.tables;
    for (key, name) in [
        ("categories", &tables.categories),
        ("category_descriptions", &tables.category_descriptions),
        ("items", &tables.items),
        ("item_descriptions", &tables.item_descriptions),
    ] {
        if name.trim().is_empty() {
            return Err(SeedError::Config(format!(
                "source.tables.{} is required",
                key
            )));
        }
    }

    // Target validation
    if config.target.database_id.is_empty() {
        return Err(SeedError::Config("target.database_id is required".into()));
    }
    if config.target.categories_collection.is_empty() {
        return Err(SeedError::Config(
            "target.categories_collection is required".into(),
        ));
    }
    if config.target.listings_collection.is_empty() {
        return Err(SeedError::Config(
            "target.listings_collection is required".into(),
        ));
    }
    if config.target.categories_collection == config.target.listings_collection {
        return Err(SeedError::Config(
            "categories and listings cannot share a collection".into(),
        ));
    }

    // Load validation
    if config.load.batch_size == 0 {
        return Err(SeedError::Config(
            "load.batch_size must be at least 1".into(),
        ));
    }

    Ok(())
}

/// Validate the settings needed to talk to a real document store.
pub fn validate_remote(config: &Config) -> Result<()> {
    if config.target.endpoint.is_empty() {
        return Err(SeedError::Config("target.endpoint is required".into()));
    }
    if !config.target.endpoint.starts_with("http://")
        && !config.target.endpoint.starts_with("https://")
    {
        return Err(SeedError::Config(format!(
            "target.endpoint must be an http(s) URL, got '{}'",
            config.target.endpoint
        )));
    }
    if config.target.project_id.is_empty() {
        return Err(SeedError::Config("target.project_id is required".into()));
    }
    config.require_credentials()
}
