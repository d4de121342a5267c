//! Configuration loading and merging logic
//!
//! Handles loading configuration from multiple sources and merging them
//! according to precedence rules.

use super::{
    defaults, paths,
    schema::{Config, UiConfig},
};
use crate::plugins::PluginValidator;
use anyhow::{Context, Result};
use std::path::Path;

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with all layers merged
    ///
    /// Precedence order (highest to lowest):
    /// 1. Environment variable overrides
    /// 2. Explicit config file (must exist)
    /// 3. Root config
    /// 4. Built-in defaults
    pub fn load(explicit: Option<&Path>) -> Result<Config> {
        let mut config = Self::load_defaults();

        let root_path = paths::root_config_path();
        if root_path.exists() {
            match Self::load_file(&root_path) {
                Ok(root_config) => config = Self::merge_config(config, root_config),
                Err(e) => tracing::warn!("Ignoring root config: {:#}", e),
            }
        }

        if let Some(path) = explicit {
            let file_config = Self::load_file(path)?;
            config = Self::merge_config(config, file_config);
        }

        config = Self::apply_env_overrides(config, |key| std::env::var(key).ok());

        Ok(config)
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

    /// Validate configuration by loading it and checking the plugin list
    ///
    /// Fails on invalid YAML, invalid value types, unreadable files and
    /// descriptor problems (see [`PluginValidator::validate_config`]).
    pub fn validate(explicit: Option<&Path>) -> Result<Config> {
        let config = Self::load(explicit).context("Failed to load merged configuration")?;
        PluginValidator::validate_config(&config).context("Invalid plugin configuration")?;
        Ok(config)
    }

    /// Load default configuration
    pub fn load_defaults() -> Config {
        defaults::default_config()
    }

    /// Merge two configurations, with `other` taking precedence
    ///
    /// The plugin list is replaced as a whole, never merged per entry.
    fn merge_config(_base: Config, other: Config) -> Config {
        Config {
            require_authentication: other.require_authentication,
            ui: UiConfig {
                title: other.ui.title,
                default_plugin: other.ui.default_plugin,
                no_icons: other.ui.no_icons,
                expand_all: other.ui.expand_all,
            },
            plugins: other.plugins,
        }
    }

    /// Apply environment variable overrides read through `lookup`
    fn apply_env_overrides<F>(mut config: Config, lookup: F) -> Config
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("PLUGDASH_REQUIRE_AUTH") {
            match value.parse::<bool>() {
                Ok(flag) => config.require_authentication = flag,
                Err(_) => tracing::warn!(
                    "PLUGDASH_REQUIRE_AUTH must be 'true' or 'false', got '{}'",
                    value
                ),
            }
        }

        if let Some(plugin) = lookup("PLUGDASH_DEFAULT_PLUGIN") {
            config.ui.default_plugin = if plugin.is_empty() { None } else { Some(plugin) };
        }

        if let Some(title) = lookup("PLUGDASH_TITLE") {
            config.ui.title = title;
        }

        config
    }

    /// Save configuration to a file
    pub fn save(config: &Config, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            paths::ensure_dir(parent)?;
        }

        let yaml =
            serde_yaml::to_string(config).context("Failed to serialize configuration to YAML")?;

        std::fs::write(path, yaml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Save root configuration
    pub fn save_root(config: &Config) -> Result<()> {
        Self::save(config, &paths::root_config_path())
    }
}
