//! Configuration loading and validation.

mod types;
mod validation;

pub use types::*;

use crate::error::{Result, SeedError};
use std::path::Path;
use std::time::Duration;

/// Environment variable holding the document store API key.
pub const ENV_API_KEY: &str = "APPWRITE_API_KEY";
pub const ENV_ENDPOINT: &str = "APPWRITE_ENDPOINT";
pub const ENV_PROJECT_ID: &str = "APPWRITE_PROJECT_ID";
pub const ENV_DATABASE_ID: &str = "APPWRITE_DATABASE_ID";

impl Config {
    /// Load configuration from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        validation::validate(self)
    }

    /// Validate endpoint, project and credential for a live run.
    pub fn validate_remote(&self) -> Result<()> {
        validation::validate_remote(self)
    }

    /// Fill target settings from the process environment.
    ///
    /// Variables that are set and non-empty win over file values.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Same as [`Config::with_env_overrides`] with an injectable lookup.
    pub fn with_overrides_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = get(ENV_API_KEY) {
            self.target.api_key = v;
        }
        if let Some(v) = get(ENV_ENDPOINT) {
            self.target.endpoint = v;
        }
        if let Some(v) = get(ENV_PROJECT_ID) {
            self.target.project_id = v;
        }
        if let Some(v) = get(ENV_DATABASE_ID) {
            self.target.database_id = v;
        }
        self
    }

    /// Fail unless an API key is present.
    pub fn require_credentials(&self) -> Result<()> {
        if self.target.api_key.trim().is_empty() {
            return Err(SeedError::Config(format!(
                "{} environment variable is required",
                ENV_API_KEY
            )));
        }
        Ok(())
    }
}

impl LoadConfig {
    /// Pause inserted after every listing group.
    pub fn batch_delay(&self) -> Duration {
        Duration::from_millis(self.batch_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_mapping() {
        let config = Config::from_yaml("{}").unwrap();
        assert_eq!(config.source.namespaces, vec!["backup_osclass", "public"]);
        assert_eq!(config.source.tables.items, "oc_t_item");
        assert_eq!(config.target.categories_collection, "categories");
        assert_eq!(config.load.batch_size, 10);
        assert_eq!(config.load.batch_delay(), Duration::from_millis(100));
        assert_eq!(config.transform.default_location, "Sri Lanka");
    }

    #[test]
    fn test_yaml_overrides() {
        let yaml = r#"
source:
  dump_path: /tmp/dump.sql
  namespaces: [legacy]
target:
  endpoint: https://store.example/v1
  project_id: proj
load:
  batch_size: 25
"#;
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.source.dump_path, Path::new("/tmp/dump.sql"));
        assert_eq!(config.source.namespaces, vec!["legacy"]);
        assert_eq!(config.target.endpoint, "https://store.example/v1");
        assert_eq!(config.load.batch_size, 25);
        assert_eq!(config.load.batch_delay_ms, 100);
    }

    #[test]
    fn test_request_timeout_is_opt_in() {
        let config = Config::from_yaml("{}").unwrap();
        assert_eq!(config.target.timeout_secs, None);

        let config = Config::from_yaml("target:\n  timeout_secs: 45\n").unwrap();
        assert_eq!(config.target.timeout_secs, Some(45));
    }

    #[test]
    fn test_env_overrides_ignore_blank_values() {
        let config = Config::default().with_overrides_from(|key| match key {
            ENV_API_KEY => Some("secret".to_string()),
            ENV_PROJECT_ID => Some("   ".to_string()),
            _ => None,
        });
        assert_eq!(config.target.api_key, "secret");
        assert_eq!(config.target.project_id, "");
        assert!(config.require_credentials().is_ok());
    }

    #[test]
    fn test_missing_credential_is_rejected() {
        let config = Config::default();
        let err = config.require_credentials().unwrap_err();
        assert!(err.to_string().contains(ENV_API_KEY));
    }

    #[test]
    fn test_api_key_is_not_serialized() {
        let mut config = Config::default();
        config.target.api_key = "super_secret".to_string();
        let yaml = serde_yaml::to_string(&config).unwrap();
        assert!(!yaml.contains("super_secret"));
    }
}
