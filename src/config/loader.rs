//! Configuration loading
//!
//! Precedence order (highest to lowest):
//! 1. Environment variable overrides
//! 2. Config file
//! 3. Built-in defaults

use super::{defaults, paths, schema::Config};
use anyhow::{Context, Result};
use std::path::Path;

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from the default location with env overrides applied
    ///
    /// A missing file is not an error; a malformed one is.
    pub fn load() -> Result<Config> {
        let path = paths::root_config_path();
        let config = if path.exists() {
            Self::load_file(&path)?
        } else {
            Self::load_defaults()
        };

        Ok(Self::apply_env_overrides(config))
    }

    /// Load configuration from a file
    pub fn load_file(path: &Path) -> Result<Config> {
        if !path.exists() {
            return Err(anyhow::anyhow!("Config file not found: {}", path.display()));
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Load default configuration
    pub fn load_defaults() -> Config {
        defaults::default_config()
    }

    /// Check values that parse fine but cannot work
    pub fn validate(config: &Config) -> Result<()> {
        if config.cluster.connect_timeout_secs == 0 {
            anyhow::bail!("cluster.connectTimeoutSecs must be greater than 0");
        }
        if config.cluster.request_timeout_secs == 0 {
            anyhow::bail!("cluster.requestTimeoutSecs must be greater than 0");
        }
        if config.cluster.list_page_size == 0 {
            anyhow::bail!("cluster.listPageSize must be greater than 0");
        }
        if config.detail_base_path.trim().is_empty() {
            anyhow::bail!("detailBasePath must not be empty");
        }
        Ok(())
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(config: Config) -> Config {
        Self::apply_overrides(config, |key| std::env::var(key).ok())
    }

    fn apply_overrides(mut config: Config, lookup: impl Fn(&str) -> Option<String>) -> Config {
        // KUBECONFIG wins over the file, matching kubectl
        if let Some(kubeconfig) = lookup("KUBECONFIG").filter(|v| !v.is_empty()) {
            config.kubeconfig = Some(kubeconfig);
        }

        if let Some(timeout) = lookup("TRACEFLOW_REQUEST_TIMEOUT_SECS") {
            match timeout.parse::<u64>() {
                Ok(secs) => config.cluster.request_timeout_secs = secs,
                Err(_) => tracing::warn!(
                    "Ignoring TRACEFLOW_REQUEST_TIMEOUT_SECS={:?}: not a number",
                    timeout
                ),
            }
        }

        config
    }

    /// Save configuration to a file
    pub fn save(config: &Config, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let yaml =
            serde_yaml::to_string(config).context("Failed to serialize configuration to YAML")?;

        std::fs::write(path, yaml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_load_defaults_validate() {
        let config = ConfigLoader::load_defaults();
        assert!(ConfigLoader::validate(&config).is_ok());
    }

    #[test]
    fn test_save_then_load_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("nested").join("config.yaml");

        let mut config = Config::default();
        config.detail_base_path = "/custom/traceflows".to_string();
        config.cluster.list_page_size = 50;

        ConfigLoader::save(&config, &path).unwrap();
        let loaded = ConfigLoader::load_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_file_rejects_bad_yaml() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.yaml");
        std::fs::write(&path, "cluster: [not, a, map]").unwrap();

        assert!(ConfigLoader::load_file(&path).is_err());
        assert!(ConfigLoader::load_file(&tmp.path().join("missing.yaml")).is_err());
    }

    #[test]
    fn test_validate_rejects_zero_values() {
        let mut config = Config::default();
        config.cluster.request_timeout_secs = 0;
        assert!(ConfigLoader::validate(&config).is_err());

        let mut config = Config::default();
        config.cluster.list_page_size = 0;
        assert!(ConfigLoader::validate(&config).is_err());

        let mut config = Config::default();
        config.detail_base_path = " ".to_string();
        assert!(ConfigLoader::validate(&config).is_err());
    }

    #[test]
    fn test_overrides() {
        let env = HashMap::from([
            ("KUBECONFIG", "/home/me/.kube/lab"),
            ("TRACEFLOW_REQUEST_TIMEOUT_SECS", "7"),
        ]);

        let config = ConfigLoader::apply_overrides(Config::default(), |key| {
            env.get(key).map(|v| v.to_string())
        });

        assert_eq!(config.kubeconfig.as_deref(), Some("/home/me/.kube/lab"));
        assert_eq!(config.cluster.request_timeout_secs, 7);
    }

    #[test]
    fn test_empty_kubeconfig_and_bad_timeout_are_ignored() {
        let env = HashMap::from([
            ("KUBECONFIG", ""),
            ("TRACEFLOW_REQUEST_TIMEOUT_SECS", "soon"),
        ]);

        let config = ConfigLoader::apply_overrides(Config::default(), |key| {
            env.get(key).map(|v| v.to_string())
        });

        assert!(config.kubeconfig.is_none());
        assert_eq!(config.cluster.request_timeout_secs, 30);
    }
}
