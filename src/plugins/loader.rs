//! Plugin loader
//!
//! Turns configured plugin descriptors into registrable bundles by resolving
//! their component from the catalog, and registers them in order.

use super::bundle::{PluginBundle, PluginLifecycle};
use super::catalog::ComponentCatalog;
use super::context::PluginContext;
use super::events::EventBus;
use super::manifest::{MenuItem, PluginComponent, PluginMetadata, PluginRoute};
use super::registry::PluginRegistry;
use super::PluginError;
use crate::config::PluginDescriptor;
use anyhow::Result;
use async_trait::async_trait;
use serde_json::{Map, Value, json};
use std::sync::OnceLock;

/// Event emitted once a descriptor-backed plugin has initialized
pub const PLUGIN_INITIALIZED: &str = "plugin:initialized";

/// Event emitted when a descriptor-backed plugin is destroyed
pub const PLUGIN_DESTROYED: &str = "plugin:destroyed";

/// Route under which a plugin's content is served
pub fn plugin_path(plugin_id: &str) -> String {
    format!("/plugins/{}", plugin_id)
}

/// Plugin loader
#[derive(Debug, Clone)]
pub struct PluginLoader {
    catalog: ComponentCatalog,
}

/// Outcome of [`PluginLoader::register_all`]
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Ids registered successfully, in order
    pub registered: Vec<String>,
    /// Ids whose registration failed, with the error
    pub failed: Vec<(String, PluginError)>,
    /// Ids not attempted: disabled or without a matching component
    pub skipped: Vec<String>,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

impl PluginLoader {
    /// Create a loader backed by the built-in component catalog
    pub fn new() -> Self {
        Self::with_catalog(ComponentCatalog::builtin())
    }

    /// Create a loader with a custom catalog
    pub fn with_catalog(catalog: ComponentCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &ComponentCatalog {
        &self.catalog
    }

    /// Build a bundle for a descriptor
    ///
    /// Returns `None` (and logs a warning) when the catalog has no component
    /// named after the descriptor.
    pub fn load_plugin(&self, descriptor: &PluginDescriptor) -> Option<PluginBundle> {
        let component_name = descriptor.component_name();
        let Some(component) = self.catalog.get(component_name) else {
            tracing::warn!(
                "Plugin component '{}' not found for plugin '{}'",
                component_name,
                descriptor.id
            );
            return None;
        };

        let mut metadata = PluginMetadata::new(&descriptor.id, &descriptor.name, &descriptor.version)
            .with_description(descriptor.description.clone().unwrap_or_default());
        metadata.dependencies = descriptor.dependencies.clone();

        let mut props = Map::new();
        props.insert("title".to_string(), Value::String(descriptor.name.clone()));
        props.insert("category".to_string(), Value::String(descriptor.category.clone()));

        let path = plugin_path(&descriptor.id);
        let bundle = PluginBundle::new(
            metadata,
            DescriptorLifecycle {
                plugin_id: descriptor.id.clone(),
                events: OnceLock::new(),
            },
        )
        .with_component(
            descriptor.id.clone(),
            PluginComponent::new(component.clone()).with_props(props),
        )
        .with_route(PluginRoute::new(path.clone(), component).exact())
        .with_menu_item(MenuItem::new(&descriptor.id, &descriptor.name).with_path(path));

        tracing::debug!(
            "Loaded plugin '{}' with component '{}'",
            descriptor.id,
            component_name
        );
        Some(bundle)
    }

    /// Build bundles for every enabled descriptor that resolves
    pub fn load_plugins(&self, descriptors: &[PluginDescriptor]) -> Vec<PluginBundle> {
        descriptors
            .iter()
            .filter(|descriptor| {
                if !descriptor.enabled {
                    tracing::info!("Plugin {} is disabled", descriptor.id);
                }
                descriptor.enabled
            })
            .filter_map(|descriptor| self.load_plugin(descriptor))
            .collect()
    }

    /// Component names the catalog can resolve
    pub fn available_components(&self) -> Vec<String> {
        self.catalog.names()
    }

    pub fn is_available(&self, component_name: &str) -> bool {
        self.catalog.contains(component_name)
    }

    /// Register descriptors into the registry in list order
    ///
    /// A failed registration is recorded and logged; the remaining
    /// descriptors are still attempted.
    pub async fn register_all(
        &self,
        registry: &PluginRegistry,
        descriptors: &[PluginDescriptor],
    ) -> LoadReport {
        let mut report = LoadReport::default();

        for descriptor in descriptors {
            if !descriptor.enabled {
                tracing::info!("Plugin {} is disabled", descriptor.id);
                report.skipped.push(descriptor.id.clone());
                continue;
            }
            let Some(bundle) = self.load_plugin(descriptor) else {
                report.skipped.push(descriptor.id.clone());
                continue;
            };

            match registry.register_plugin(bundle).await {
                Ok(()) => report.registered.push(descriptor.id.clone()),
                Err(e) => {
                    tracing::warn!("Failed to register plugin {}: {}", descriptor.id, e);
                    report.failed.push((descriptor.id.clone(), e));
                }
            }
        }

        if report.is_clean() {
            tracing::info!(
                "Successfully registered {} plugin(s): {}",
                report.registered.len(),
                report.registered.join(", ")
            );
        } else {
            tracing::warn!(
                "Registered {} plugins with {} errors",
                report.registered.len(),
                report.failed.len()
            );
        }

        report
    }
}

impl Default for PluginLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Lifecycle of a descriptor-backed plugin: announces itself on the event bus
struct DescriptorLifecycle {
    plugin_id: String,
    events: OnceLock<EventBus>,
}

#[async_trait]
impl PluginLifecycle for DescriptorLifecycle {
    async fn initialize(&self, ctx: &PluginContext) -> Result<()> {
        tracing::debug!("Initializing plugin '{}'", self.plugin_id);
        if self.events.set(ctx.event_bus()).is_err() {
            tracing::debug!(
                "Plugin '{}' was initialized before, keeping its first event bus",
                self.plugin_id
            );
        }
        ctx.emit(PLUGIN_INITIALIZED, Some(&json!({ "id": self.plugin_id })));
        Ok(())
    }

    async fn destroy(&self) -> Result<()> {
        tracing::debug!("Destroying plugin '{}'", self.plugin_id);
        if let Some(events) = self.events.get() {
            events.emit(PLUGIN_DESTROYED, Some(&json!({ "id": self.plugin_id })));
        }
        Ok(())
    }
}
