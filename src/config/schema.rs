//! Configuration schema definitions
//!
//! Defines the structure of configuration files using serde for serialization.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Show the login screen until a user is signed in
    #[serde(default = "default_true")]
    pub require_authentication: bool,

    /// UI configuration
    #[serde(default)]
    pub ui: UiConfig,

    /// Static list of plugin descriptors, in navigation order
    #[serde(default = "super::defaults::default_plugins")]
    pub plugins: Vec<PluginDescriptor>,
}

/// UI configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UiConfig {
    /// Title shown in the header
    #[serde(default = "default_title")]
    pub title: String,

    /// Plugin selected on startup
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_plugin: Option<String>,

    /// Disable Unicode icons for compatibility
    #[serde(default = "default_false")]
    pub no_icons: bool,

    /// Start with every navigation category expanded
    #[serde(default = "default_false")]
    pub expand_all: bool,
}

/// A statically configured plugin
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PluginDescriptor {
    pub id: String,

    pub name: String,

    pub version: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Navigation group
    pub category: String,

    /// Settings forwarded untouched to the rendered component
    #[serde(default)]
    pub config: PluginSettings,

    /// Catalog name of the component to render; the id when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,

    /// Plugin ids that must be registered first
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<String>,

    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl PluginDescriptor {
    /// Name of the component this descriptor resolves to
    pub fn component_name(&self) -> &str {
        self.component.as_deref().unwrap_or(&self.id)
    }
}

/// Per-plugin settings bag
///
/// Only the keys below are recognized; anything else is kept in `extra` and
/// passed along as-is.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PluginSettings {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub connection_strings: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub api_base_urls: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_settings: Option<AuthSettings>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PluginSettings {
    /// Settings as a JSON value, the shape components receive
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AuthSettings {
    #[serde(rename = "type")]
    pub auth_type: AuthType,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub credentials: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AuthType {
    Oauth,
    Apikey,
    Basic,
    None,
}

impl std::fmt::Display for AuthType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            AuthType::Oauth => "oauth",
            AuthType::Apikey => "apikey",
            AuthType::Basic => "basic",
            AuthType::None => "none",
        };
        f.write_str(name)
    }
}

// Default value functions
fn default_true() -> bool {
    true
}

fn default_false() -> bool {
    false
}

fn default_title() -> String {
    "Plugin Dashboard".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            require_authentication: default_true(),
            ui: UiConfig::default(),
            plugins: super::defaults::default_plugins(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            default_plugin: None,
            no_icons: default_false(),
            expand_all: default_false(),
        }
    }
}
