//! Default configuration values
//!
//! Provides default configuration instances and the demo plugin list.

use super::schema::{AuthSettings, AuthType, Config, PluginDescriptor, PluginSettings};
use std::collections::BTreeMap;

/// Get the default configuration
pub fn default_config() -> Config {
    Config::default()
}

/// The three demo plugins shipped with the dashboard
pub fn default_plugins() -> Vec<PluginDescriptor> {
    vec![
        descriptor(
            "data-loader-1",
            "CSV Data Loader",
            "Load data from CSV files",
            "Loaders",
            "CsvDataLoaderPlugin",
            PluginSettings {
                connection_strings: pairs(&[("default", "file://./data")]),
                api_base_urls: pairs(&[("validation", "https://api.validation.example.com")]),
                auth_settings: Some(AuthSettings {
                    auth_type: AuthType::Apikey,
                    credentials: pairs(&[("apiKey", "demo-key")]),
                }),
                ..Default::default()
            },
        ),
        descriptor(
            "data-loader-2",
            "JSON Data Loader",
            "Load data from JSON files",
            "Loaders",
            "JsonDataLoaderPlugin",
            PluginSettings {
                connection_strings: pairs(&[("default", "file://./json-data")]),
                auth_settings: Some(AuthSettings {
                    auth_type: AuthType::None,
                    credentials: BTreeMap::new(),
                }),
                ..Default::default()
            },
        ),
        descriptor(
            "dashboard-1",
            "Analytics Dashboard",
            "View analytics and metrics",
            "Dashboards",
            "AnalyticsDashboardPlugin",
            PluginSettings {
                api_base_urls: pairs(&[("analytics", "https://api.analytics.example.com")]),
                auth_settings: Some(AuthSettings {
                    auth_type: AuthType::Oauth,
                    credentials: pairs(&[
                        ("clientId", "demo-client"),
                        ("clientSecret", "demo-secret"),
                    ]),
                }),
                ..Default::default()
            },
        ),
    ]
}

fn descriptor(
    id: &str,
    name: &str,
    description: &str,
    category: &str,
    component: &str,
    config: PluginSettings,
) -> PluginDescriptor {
    PluginDescriptor {
        id: id.to_string(),
        name: name.to_string(),
        version: "1.0.0".to_string(),
        description: Some(description.to_string()),
        category: category.to_string(),
        config,
        component: Some(component.to_string()),
        dependencies: Vec::new(),
        enabled: true,
    }
}

fn pairs(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
