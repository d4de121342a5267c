//! Plugin bundles
//!
//! A bundle is the unit of registration: metadata, the UI contributions it
//! declares, optional lifecycle hooks, and a required lifecycle
//! implementation (`initialize`/`destroy`).

use super::context::PluginContext;
use super::manifest::{MenuItem, PluginComponent, PluginMetadata, PluginRoute};
use anyhow::Result;
use async_trait::async_trait;
use futures::future::BoxFuture;
use indexmap::IndexMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

/// Required lifecycle entry and exit points of a plugin
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PluginLifecycle: Send + Sync {
    /// Called once before the bundle's contributions are registered
    async fn initialize(&self, ctx: &PluginContext) -> Result<()>;

    /// Called once while the bundle is being unregistered
    async fn destroy(&self) -> Result<()>;
}

/// Future returned by a lifecycle hook
pub type HookFuture = BoxFuture<'static, Result<()>>;

/// `on_load` / `on_unload` hook
pub type LifecycleHook = Arc<dyn Fn() -> HookFuture + Send + Sync>;

/// `on_route_change` hook, receives the new route
pub type RouteChangeHook = Arc<dyn Fn(String) -> HookFuture + Send + Sync>;

/// Optional hooks invoked by the registry at defined points
#[derive(Clone, Default)]
pub struct PluginHooks {
    pub on_load: Option<LifecycleHook>,
    pub on_unload: Option<LifecycleHook>,
    pub on_route_change: Option<RouteChangeHook>,
}

impl fmt::Debug for PluginHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginHooks")
            .field("on_load", &self.on_load.is_some())
            .field("on_unload", &self.on_unload.is_some())
            .field("on_route_change", &self.on_route_change.is_some())
            .finish()
    }
}

/// A plugin bundle ready for registration
pub struct PluginBundle {
    pub metadata: PluginMetadata,
    /// Component slots, in declaration order
    pub components: IndexMap<String, PluginComponent>,
    pub routes: Vec<PluginRoute>,
    pub menu_items: Vec<MenuItem>,
    pub hooks: PluginHooks,
    lifecycle: Arc<dyn PluginLifecycle>,
}

impl PluginBundle {
    pub fn new(metadata: PluginMetadata, lifecycle: impl PluginLifecycle + 'static) -> Self {
        Self::with_lifecycle(metadata, Arc::new(lifecycle))
    }

    /// Create a bundle around an already shared lifecycle implementation
    pub fn with_lifecycle(metadata: PluginMetadata, lifecycle: Arc<dyn PluginLifecycle>) -> Self {
        Self {
            metadata,
            components: IndexMap::new(),
            routes: Vec::new(),
            menu_items: Vec::new(),
            hooks: PluginHooks::default(),
            lifecycle,
        }
    }

    pub fn id(&self) -> &str {
        &self.metadata.id
    }

    pub fn with_component(mut self, slot_id: impl Into<String>, component: PluginComponent) -> Self {
        self.components.insert(slot_id.into(), component);
        self
    }

    pub fn with_route(mut self, route: PluginRoute) -> Self {
        self.routes.push(route);
        self
    }

    pub fn with_menu_item(mut self, item: MenuItem) -> Self {
        self.menu_items.push(item);
        self
    }

    pub fn on_load<F, Fut>(mut self, hook: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<()>> + Send + 'static,
    {
        let boxed: LifecycleHook = Arc::new(move || -> HookFuture { Box::pin(hook()) });
        self.hooks.on_load = Some(boxed);
        self
    }

    pub fn on_unload<F, Fut>(mut self, hook: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<()>> + Send + 'static,
    {
        let boxed: LifecycleHook = Arc::new(move || -> HookFuture { Box::pin(hook()) });
        self.hooks.on_unload = Some(boxed);
        self
    }

    pub fn on_route_change<F, Fut>(mut self, hook: F) -> Self
    where
        F: Fn(String) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<()>> + Send + 'static,
    {
        let boxed: RouteChangeHook =
            Arc::new(move |route: String| -> HookFuture { Box::pin(hook(route)) });
        self.hooks.on_route_change = Some(boxed);
        self
    }

    pub(crate) async fn initialize(&self, ctx: &PluginContext) -> Result<()> {
        self.lifecycle.initialize(ctx).await
    }

    pub(crate) async fn destroy(&self) -> Result<()> {
        self.lifecycle.destroy().await
    }
}

impl fmt::Debug for PluginBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginBundle")
            .field("metadata", &self.metadata)
            .field("components", &self.components.keys().collect::<Vec<_>>())
            .field("routes", &self.routes)
            .field("menu_items", &self.menu_items)
            .field("hooks", &self.hooks)
            .finish_non_exhaustive()
    }
}
