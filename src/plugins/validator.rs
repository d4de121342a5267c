//! Plugin descriptor validation
//!
//! Validates configured plugin descriptors and provides helpful error messages
//! for common issues.

use super::{PluginError, PluginResult};
use crate::config::{Config, PluginDescriptor};
use std::collections::HashSet;

/// Plugin descriptor validator
pub struct PluginValidator;

impl PluginValidator {
    /// Validate a single plugin descriptor
    pub fn validate(descriptor: &PluginDescriptor) -> PluginResult<()> {
        Self::validate_id(&descriptor.id)?;
        Self::require_text(&descriptor.name, "name", &descriptor.id)?;
        Self::require_text(&descriptor.version, "version", &descriptor.id)?;
        Self::require_text(&descriptor.category, "category", &descriptor.id)?;
        Self::validate_api_urls(descriptor)?;
        Ok(())
    }

    /// Validate every descriptor of a configuration and the links between them
    ///
    /// Descriptors are registered in list order and disabled ones are never
    /// registered, so a dependency has to be enabled and appear before the
    /// plugin that needs it.
    pub fn validate_config(config: &Config) -> PluginResult<()> {
        let mut seen_ids = HashSet::new();
        let mut enabled_ids = HashSet::new();

        for descriptor in &config.plugins {
            Self::validate(descriptor)?;

            if descriptor.enabled {
                for dependency in &descriptor.dependencies {
                    if !enabled_ids.contains(dependency.as_str()) {
                        return Err(PluginError::ValidationError(format!(
                            "Plugin '{}' depends on '{}', which {}",
                            descriptor.id,
                            dependency,
                            Self::dependency_problem(config, dependency)
                        )));
                    }
                }
            }

            if !seen_ids.insert(descriptor.id.as_str()) {
                return Err(PluginError::ValidationError(format!(
                    "Duplicate plugin id '{}'",
                    descriptor.id
                )));
            }
            if descriptor.enabled {
                enabled_ids.insert(descriptor.id.as_str());
            }
        }

        if let Some(default_plugin) = &config.ui.default_plugin {
            if !seen_ids.contains(default_plugin.as_str()) {
                return Err(PluginError::ValidationError(format!(
                    "ui.defaultPlugin '{}' does not match any configured plugin",
                    default_plugin
                )));
            }
        }

        Ok(())
    }

    fn dependency_problem(config: &Config, dependency: &str) -> &'static str {
        match config.plugins.iter().find(|p| p.id == dependency) {
            Some(target) if !target.enabled => "is disabled",
            Some(_) => "is declared after it",
            None => "is not configured",
        }
    }

    /// Validate plugin id
    fn validate_id(id: &str) -> PluginResult<()> {
        if id.is_empty() {
            return Err(PluginError::ValidationError(
                "Plugin id cannot be empty".to_string(),
            ));
        }

        // Ids end up in route paths
        if !id.chars().all(|c| c.is_alphanumeric() || c == '-' || c == '_') {
            return Err(PluginError::ValidationError(format!(
                "Plugin id '{}' contains invalid characters. Use only alphanumeric, hyphens, and underscores",
                id
            )));
        }

        Ok(())
    }

    fn require_text(value: &str, field: &str, plugin_id: &str) -> PluginResult<()> {
        if value.trim().is_empty() {
            return Err(PluginError::ValidationError(format!(
                "Plugin '{}' is missing required field '{}'",
                plugin_id, field
            )));
        }
        Ok(())
    }

    /// Every configured API base URL must be an absolute http(s) URL
    fn validate_api_urls(descriptor: &PluginDescriptor) -> PluginResult<()> {
        for (name, raw) in &descriptor.config.api_base_urls {
            let parsed = url::Url::parse(raw).map_err(|e| {
                PluginError::ValidationError(format!(
                    "Plugin '{}' has an invalid apiBaseUrls.{} '{}': {}",
                    descriptor.id, name, raw, e
                ))
            })?;

            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(PluginError::ValidationError(format!(
                    "Plugin '{}' apiBaseUrls.{} must use http or https, got '{}'",
                    descriptor.id,
                    name,
                    parsed.scheme()
                )));
            }
        }
        Ok(())
    }
}
