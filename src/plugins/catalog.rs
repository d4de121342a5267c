//! Component catalog
//!
//! Maps component names to the components compiled into the binary. Plugin
//! descriptors pick their component from here by name.

use super::manifest::{Component, ComponentProps, ComponentRef};
use crate::config::PluginSettings;
use indexmap::IndexMap;
use std::fmt::Write;
use std::sync::Arc;

/// Name to component lookup table
#[derive(Clone, Default)]
pub struct ComponentCatalog {
    components: IndexMap<String, ComponentRef>,
}

impl ComponentCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog holding the components shipped with the dashboard
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        catalog.register(Arc::new(SummaryView::new(
            "CsvDataLoaderPlugin",
            "Loads tabular data from CSV files",
        )));
        catalog.register(Arc::new(SummaryView::new(
            "JsonDataLoaderPlugin",
            "Loads records from JSON documents",
        )));
        catalog.register(Arc::new(SummaryView::new(
            "AnalyticsDashboardPlugin",
            "Shows analytics and metrics",
        )));
        catalog
    }

    /// Add a component under its own name, replacing any previous entry
    pub fn register(&mut self, component: ComponentRef) {
        self.components
            .insert(component.name().to_string(), component);
    }

    /// Add a component under an alias
    pub fn register_as(&mut self, name: impl Into<String>, component: ComponentRef) {
        self.components.insert(name.into(), component);
    }

    pub fn get(&self, name: &str) -> Option<ComponentRef> {
        self.components.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.components.contains_key(name)
    }

    /// Registered names, in registration order
    pub fn names(&self) -> Vec<String> {
        self.components.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

impl std::fmt::Debug for ComponentCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.components.keys()).finish()
    }
}

/// Text view summarizing a plugin's settings
///
/// Credentials are never rendered, only the auth type.
#[derive(Debug, Clone)]
pub struct SummaryView {
    name: String,
    summary: String,
}

impl SummaryView {
    pub fn new(name: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            summary: summary.into(),
        }
    }
}

impl Component for SummaryView {
    fn name(&self) -> &str {
        &self.name
    }

    fn render(&self, props: &ComponentProps) -> String {
        let title = props
            .props
            .get("title")
            .and_then(|v| v.as_str())
            .unwrap_or(&props.plugin_id);

        let mut out = String::new();
        let _ = writeln!(out, "{} [{}]", title, props.plugin_id);
        let _ = writeln!(out, "{}", self.summary);

        let settings: PluginSettings =
            serde_json::from_value(props.config.clone()).unwrap_or_default();

        for (name, target) in &settings.connection_strings {
            let _ = writeln!(out, "  connection {}: {}", name, target);
        }
        for (name, url) in &settings.api_base_urls {
            let _ = writeln!(out, "  api {}: {}", name, url);
        }
        if let Some(auth) = &settings.auth_settings {
            let _ = writeln!(out, "  auth: {}", auth.auth_type);
        }
        for key in settings.extra.keys() {
            let _ = writeln!(out, "  option: {}", key);
        }

        out
    }
}
