// Plugin system for plugdash
//
// Registers plugin bundles (metadata, components, routes, menu items and
// lifecycle hooks) into an in-memory registry and dispatches lifecycle,
// routing and cross-plugin events to them.

pub mod bundle;
pub mod catalog;
pub mod context;
pub mod events;
pub mod loader;
pub mod manifest;
pub mod registry;
mod state;
pub mod validator;

pub use bundle::{HookFuture, LifecycleHook, PluginBundle, PluginHooks, PluginLifecycle, RouteChangeHook};
pub use catalog::{ComponentCatalog, SummaryView};
pub use context::PluginContext;
pub use events::{EventBus, EventListener, listener};
pub use loader::{LoadReport, PLUGIN_DESTROYED, PLUGIN_INITIALIZED, PluginLoader, plugin_path};
pub use manifest::{
    ClickHandler, Component, ComponentProps, ComponentRef, MenuItem, PluginComponent,
    PluginMetadata, PluginRoute,
};
pub use registry::PluginRegistry;
pub use validator::PluginValidator;

/// Plugin errors
#[derive(Debug, thiserror::Error)]
pub enum PluginError {
    #[error("Plugin with id \"{0}\" is already registered")]
    DuplicatePlugin(String),

    #[error("Plugin \"{plugin}\" depends on \"{dependency}\" which is not loaded")]
    MissingDependency { plugin: String, dependency: String },

    #[error("Plugin with id \"{0}\" is not registered")]
    PluginNotFound(String),

    #[error("Component not found: {0}")]
    ComponentNotFound(String),

    #[error("Route not found: {0}")]
    RouteNotFound(String),

    #[error("Plugin \"{plugin}\" failed in {hook}")]
    Lifecycle {
        plugin: String,
        hook: &'static str,
        #[source]
        source: anyhow::Error,
    },

    #[error("Validation error: {0}")]
    ValidationError(String),
}

/// Result type for plugin operations
pub type PluginResult<T> = Result<T, PluginError>;
