//! Plugin CLI commands
//!
//! Inspect and validate the configured plugins.

use crate::config::{Config, ConfigLoader, PluginDescriptor};
use crate::plugins::{PluginLoader, PluginRegistry, PluginValidator};
use crate::shell::{Content, ContentArea};
use anyhow::{Context, Result, bail};
use clap::Subcommand;
use std::path::{Path, PathBuf};

/// Plugin subcommands
#[derive(Subcommand, Debug)]
pub enum PluginSubcommand {
    /// List configured plugins
    List,

    /// Validate a config file's plugin list
    Validate {
        /// Path to a config YAML file
        path: PathBuf,
    },

    /// Register the configured plugins and render one of them
    Show {
        /// Plugin id
        id: String,
    },
}

/// Handle plugin CLI commands
pub async fn handle_plugin_command(subcommand: PluginSubcommand, explicit: Option<&Path>) -> Result<()> {
    tracing::debug!("Handling plugin command: {:?}", subcommand);

    match subcommand {
        PluginSubcommand::List => {
            let config = ConfigLoader::load(explicit).context("Failed to load configuration")?;
            list_plugins(&config);
            Ok(())
        }
        PluginSubcommand::Validate { path } => validate_plugins(&path),
        PluginSubcommand::Show { id } => {
            let config = ConfigLoader::load(explicit).context("Failed to load configuration")?;
            show_plugin(&config, &id).await
        }
    }
}

/// List every configured plugin with its component status
fn list_plugins(config: &Config) {
    if config.plugins.is_empty() {
        println!("No plugins configured.");
        return;
    }

    let loader = PluginLoader::new();
    println!("Configured plugins ({}):\n", config.plugins.len());

    for plugin in &config.plugins {
        let status = if !plugin.enabled {
            "disabled"
        } else if loader.is_available(plugin.component_name()) {
            "available"
        } else {
            "missing component"
        };
        println!("  {} (v{}) [{}]", plugin.id, plugin.version, status);
        println!("    Name: {}", plugin.name);
        println!("    Category: {}", plugin.category);
        if let Some(desc) = &plugin.description {
            println!("    Description: {}", desc);
        }
        println!("    Component: {}", plugin.component_name());
        if !plugin.dependencies.is_empty() {
            println!("    Depends on: {}", plugin.dependencies.join(", "));
        }
        println!();
    }
}

/// Validate the plugin list of a config file
fn validate_plugins(path: &Path) -> Result<()> {
    println!("Validating plugins in: {}", path.display());

    let config = ConfigLoader::load_file(path)?;
    PluginValidator::validate_config(&config)
        .with_context(|| format!("Plugin validation failed: {}", path.display()))?;

    let loader = PluginLoader::new();
    for plugin in config.plugins.iter().filter(|p| p.enabled) {
        if !loader.is_available(plugin.component_name()) {
            println!(
                "  warning: plugin '{}' uses unknown component '{}' and will be skipped",
                plugin.id,
                plugin.component_name()
            );
        }
    }

    println!("✓ {} plugin(s) valid", config.plugins.len());
    Ok(())
}

/// Register all plugins, then render the requested one
async fn show_plugin(config: &Config, id: &str) -> Result<()> {
    let registry = PluginRegistry::new();
    let report = PluginLoader::new()
        .register_all(&registry, &config.plugins)
        .await;
    for (failed_id, err) in &report.failed {
        eprintln!("warning: plugin '{}' failed to register: {}", failed_id, err);
    }

    let descriptor = find_enabled(config, id)?;
    match ContentArea::resolve(&registry, Some(descriptor))? {
        Content::Plugin { body, .. } => print!("{}", body),
        Content::Welcome => {}
    }
    Ok(())
}

/// Look up a descriptor that the loader would have registered
fn find_enabled<'a>(config: &'a Config, id: &str) -> Result<&'a PluginDescriptor> {
    let Some(descriptor) = config.plugins.iter().find(|p| p.id == id) else {
        bail!("Plugin '{}' is not configured", id);
    };
    if !descriptor.enabled {
        bail!("Plugin '{}' is disabled", id);
    }
    Ok(descriptor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_enabled_plugin() {
        let config = Config::default();
        let descriptor = find_enabled(&config, "dashboard-1").unwrap();
        assert_eq!(descriptor.name, "Analytics Dashboard");
    }

    #[test]
    fn test_disabled_plugin_is_reported() {
        let mut config = Config::default();
        config.plugins[1].enabled = false;
        let id = config.plugins[1].id.clone();

        let err = find_enabled(&config, &id).unwrap_err();
        assert_eq!(err.to_string(), format!("Plugin '{}' is disabled", id));
    }

    #[test]
    fn test_unknown_plugin_is_reported() {
        let err = find_enabled(&Config::default(), "ghost").unwrap_err();
        assert_eq!(err.to_string(), "Plugin 'ghost' is not configured");
    }

    #[tokio::test]
    async fn test_show_disabled_plugin_fails() {
        let mut config = Config::default();
        config.plugins[2].enabled = false;
        let id = config.plugins[2].id.clone();

        let err = show_plugin(&config, &id).await.unwrap_err();
        assert!(err.to_string().contains("is disabled"));
    }
}
