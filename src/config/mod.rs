//! Configuration system for plugdash
//!
//! Layered configuration (built-in defaults, root config file, an explicit
//! file, environment overrides) holding the dashboard settings and the static
//! plugin descriptor list.

mod defaults;
pub mod loader;
pub mod paths;
pub mod schema;

pub use defaults::default_plugins;
pub use loader::ConfigLoader;
pub use schema::{AuthSettings, AuthType, Config, PluginDescriptor, PluginSettings, UiConfig};

/// Get a configuration value by key (dot notation)
pub fn get_config_value(config: &schema::Config, key: &str) -> anyhow::Result<String> {
    match key {
        "requireAuthentication" => Ok(config.require_authentication.to_string()),
        "ui.title" => Ok(config.ui.title.clone()),
        "ui.defaultPlugin" => Ok(config.ui.default_plugin.clone().unwrap_or_default()),
        "ui.noIcons" => Ok(config.ui.no_icons.to_string()),
        "ui.expandAll" => Ok(config.ui.expand_all.to_string()),
        "plugins" => {
            // Return the ids as a YAML array
            let ids: Vec<&str> = config.plugins.iter().map(|p| p.id.as_str()).collect();
            serde_yaml::to_string(&ids)
                .map_err(|e| anyhow::anyhow!("Failed to serialize plugins: {}", e))
        }
        _ => Err(anyhow::anyhow!("Unknown configuration key: {}", key)),
    }
}

/// Set a configuration value by key (dot notation)
///
/// The plugin list is read-only here; edit the config file to change it.
pub fn set_config_value(config: &mut schema::Config, key: &str, value: &str) -> anyhow::Result<()> {
    use anyhow::Context;
    match key {
        "requireAuthentication" => {
            config.require_authentication = value
                .parse()
                .context("requireAuthentication must be 'true' or 'false'")?;
        }
        "ui.title" => {
            config.ui.title = value.to_string();
        }
        "ui.defaultPlugin" => {
            if value.is_empty() {
                config.ui.default_plugin = None;
            } else {
                config.ui.default_plugin = Some(value.to_string());
            }
        }
        "ui.noIcons" => {
            config.ui.no_icons = value
                .parse()
                .context("ui.noIcons must be 'true' or 'false'")?;
        }
        "ui.expandAll" => {
            config.ui.expand_all = value
                .parse()
                .context("ui.expandAll must be 'true' or 'false'")?;
        }
        "plugins" => {
            return Err(anyhow::anyhow!(
                "plugins cannot be set from the command line, edit the config file instead"
            ));
        }
        _ => return Err(anyhow::anyhow!("Unknown configuration key: {}", key)),
    }

    Ok(())
}

/// Keys accepted by [`get_config_value`]
pub const CONFIG_KEYS: &[&str] = &[
    "requireAuthentication",
    "ui.title",
    "ui.defaultPlugin",
    "ui.noIcons",
    "ui.expandAll",
    "plugins",
];
