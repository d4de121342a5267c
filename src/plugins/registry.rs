//! Plugin registry
//!
//! Owns the active plugin bundles and the indexes derived from them, runs
//! lifecycle hooks in a fixed order and hosts the event bus plugins use to
//! signal each other.

use super::bundle::PluginBundle;
use super::context::PluginContext;
use super::events::{EventBus, EventListener};
use super::manifest::{MenuItem, PluginComponent, PluginRoute};
use super::state::{self, RegistryState, SharedRegistryState};
use super::{PluginError, PluginResult};
use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::sync::{Arc, RwLock};

/// Registry of active plugin bundles
///
/// No lock is held while a lifecycle hook runs, so hooks may call back into
/// the registry and a hook that never finishes only stalls its own call.
pub struct PluginRegistry {
    state: SharedRegistryState,
    events: EventBus,
}

impl PluginRegistry {
    /// Create a new empty plugin registry
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(RegistryState::default())),
            events: EventBus::new(),
        }
    }

    /// Register a plugin bundle
    ///
    /// Fails without touching any state when the id is already registered or a
    /// dependency is missing. Otherwise runs, in order: `initialize`, the
    /// registration of components, routes and menu items, `on_load`, and
    /// finally records the bundle.
    ///
    /// A failure after `initialize` has started is returned as-is. Whatever the
    /// plugin contributed up to that point stays registered, while the bundle
    /// itself is not recorded.
    pub async fn register_plugin(&self, bundle: impl Into<Arc<PluginBundle>>) -> PluginResult<()> {
        let bundle: Arc<PluginBundle> = bundle.into();
        let id = bundle.id().to_string();

        {
            let state = state::read(&self.state);
            if state.plugins.contains_key(&id) {
                return Err(PluginError::DuplicatePlugin(id));
            }
            if let Some(missing) = bundle
                .metadata
                .dependencies
                .iter()
                .find(|dependency| !state.plugins.contains_key(dependency.as_str()))
            {
                return Err(PluginError::MissingDependency {
                    plugin: id,
                    dependency: missing.clone(),
                });
            }
        }

        tracing::debug!("Registering plugin '{}' v{}", id, bundle.metadata.version);

        let ctx = self.context(&id);
        if let Err(err) = Self::activate(&bundle, &ctx).await {
            tracing::warn!(
                "Registration of plugin '{}' failed, contributions applied so far are kept: {}",
                id,
                err
            );
            return Err(err);
        }

        {
            // Another registration of the same id may have finished while our hooks ran
            let mut state = state::write(&self.state);
            if state.plugins.contains_key(&id) {
                tracing::warn!("Plugin '{}' was registered concurrently, keeping the first", id);
                return Err(PluginError::DuplicatePlugin(id));
            }
            state.plugins.insert(id.clone(), Arc::clone(&bundle));
        }

        tracing::info!("Registered plugin '{}'", id);
        Ok(())
    }

    async fn activate(bundle: &PluginBundle, ctx: &PluginContext) -> PluginResult<()> {
        let id = bundle.id();

        bundle
            .initialize(ctx)
            .await
            .map_err(|source| lifecycle_error(id, "initialize", source))?;

        for (slot_id, component) in &bundle.components {
            ctx.register_component(slot_id, component.clone());
        }
        for route in &bundle.routes {
            ctx.register_route(route.clone());
        }
        for item in &bundle.menu_items {
            ctx.register_menu_item(item.clone());
        }

        if let Some(on_load) = &bundle.hooks.on_load {
            on_load()
                .await
                .map_err(|source| lifecycle_error(id, "on_load", source))?;
        }
        Ok(())
    }

    /// Unregister a plugin bundle by id
    ///
    /// Runs `on_unload` and `destroy`, then removes the bundle's component
    /// slots, one route per declared route path and one menu item per
    /// declared menu item id. A hook failure aborts the remaining steps.
    pub async fn unregister_plugin(&self, id: &str) -> PluginResult<()> {
        let bundle = state::read(&self.state)
            .plugins
            .get(id)
            .cloned()
            .ok_or_else(|| PluginError::PluginNotFound(id.to_string()))?;

        tracing::debug!("Unregistering plugin '{}'", id);

        if let Some(on_unload) = &bundle.hooks.on_unload {
            on_unload()
                .await
                .map_err(|source| lifecycle_error(id, "on_unload", source))?;
        }
        bundle
            .destroy()
            .await
            .map_err(|source| lifecycle_error(id, "destroy", source))?;

        let mut state = state::write(&self.state);
        // A concurrent unregister of the same id already cleaned up
        if !state
            .plugins
            .get(id)
            .is_some_and(|current| Arc::ptr_eq(current, &bundle))
        {
            return Err(PluginError::PluginNotFound(id.to_string()));
        }
        for slot_id in bundle.components.keys() {
            state.components.shift_remove(slot_id);
        }
        for route in &bundle.routes {
            state.remove_route(&route.path);
        }
        for item in &bundle.menu_items {
            state.remove_menu_item(&item.id);
        }
        state.plugins.shift_remove(id);
        drop(state);

        tracing::info!("Unregistered plugin '{}'", id);
        Ok(())
    }

    /// Get a registered bundle by id
    pub fn get_plugin(&self, id: &str) -> Option<Arc<PluginBundle>> {
        state::read(&self.state).plugins.get(id).cloned()
    }

    /// Get all registered bundles in registration order
    pub fn get_plugins(&self) -> Vec<Arc<PluginBundle>> {
        state::read(&self.state).plugins.values().cloned().collect()
    }

    /// Get the component registered under a slot id
    pub fn get_component(&self, slot_id: &str) -> Option<PluginComponent> {
        state::read(&self.state).components.get(slot_id).cloned()
    }

    /// Get every registered component keyed by slot id
    pub fn get_components(&self) -> IndexMap<String, PluginComponent> {
        state::read(&self.state).components.clone()
    }

    pub fn get_routes(&self) -> Vec<PluginRoute> {
        state::read(&self.state).routes.clone()
    }

    pub fn get_menu_items(&self) -> Vec<MenuItem> {
        state::read(&self.state).menu_items.clone()
    }

    /// Check if a plugin is registered
    pub fn contains(&self, id: &str) -> bool {
        state::read(&self.state).plugins.contains_key(id)
    }

    /// Get the number of registered plugins
    pub fn len(&self) -> usize {
        state::read(&self.state).plugins.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        state::read(&self.state).plugins.is_empty()
    }

    /// Notify every bundle defining `on_route_change`, one at a time
    ///
    /// Bundles are visited in registration order. The first hook error is
    /// returned and later bundles are not notified.
    pub async fn notify_route_change(&self, path: &str) -> PluginResult<()> {
        let hooks: Vec<_> = state::read(&self.state)
            .plugins
            .values()
            .filter_map(|bundle| {
                bundle
                    .hooks
                    .on_route_change
                    .clone()
                    .map(|hook| (bundle.id().to_string(), hook))
            })
            .collect();

        tracing::debug!("Route changed to '{}', notifying {} plugin(s)", path, hooks.len());

        for (id, hook) in hooks {
            hook(path.to_string())
                .await
                .map_err(|source| lifecycle_error(&id, "on_route_change", source))?;
        }
        Ok(())
    }

    /// Emit an event to every current subscriber; returns how many were invoked
    pub fn emit(&self, event: &str, data: Option<&Value>) -> usize {
        self.events.emit(event, data)
    }

    pub fn on(&self, event: &str, listener: EventListener) {
        self.events.on(event, listener);
    }

    pub fn off(&self, event: &str, listener: &EventListener) -> bool {
        self.events.off(event, listener)
    }

    /// Create a context bound to this registry for the given plugin id
    pub fn context(&self, plugin_id: &str) -> PluginContext {
        PluginContext::new(plugin_id, Arc::clone(&self.state), self.events.clone())
    }

    /// Copy of the shared state bag
    pub fn shared_state(&self) -> Map<String, Value> {
        state::read(&self.state).shared_state.clone()
    }

    /// Shallow-merge keys into the shared state bag
    pub fn set_shared_state(&self, patch: Map<String, Value>) {
        state::write(&self.state).merge_shared_state(patch);
    }
}

impl Default for PluginRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PluginRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = state::read(&self.state);
        f.debug_struct("PluginRegistry")
            .field("plugins", &state.plugins.keys().collect::<Vec<_>>())
            .field("components", &state.components.len())
            .field("routes", &state.routes.len())
            .field("menu_items", &state.menu_items.len())
            .finish_non_exhaustive()
    }
}

fn lifecycle_error(plugin: &str, hook: &'static str, source: anyhow::Error) -> PluginError {
    PluginError::Lifecycle {
        plugin: plugin.to_string(),
        hook,
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugins::bundle::{MockPluginLifecycle, PluginLifecycle};
    use crate::plugins::events::listener;
    use crate::plugins::manifest::{Component, ComponentProps, ComponentRef, PluginMetadata};
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex as StdMutex;

    struct Widget(&'static str);

    impl Component for Widget {
        fn name(&self) -> &str {
            self.0
        }

        fn render(&self, _props: &ComponentProps) -> String {
            self.0.to_string()
        }
    }

    struct Noop;

    #[async_trait]
    impl PluginLifecycle for Noop {
        async fn initialize(&self, _ctx: &PluginContext) -> anyhow::Result<()> {
            Ok(())
        }

        async fn destroy(&self) -> anyhow::Result<()> {
            Ok(())
        }
    }

    /// Lifecycle that appends "<id>:<step>" to a shared log
    struct Recording {
        id: &'static str,
        log: Arc<StdMutex<Vec<String>>>,
    }

    #[async_trait]
    impl PluginLifecycle for Recording {
        async fn initialize(&self, _ctx: &PluginContext) -> anyhow::Result<()> {
            self.log.lock().unwrap().push(format!("{}:initialize", self.id));
            Ok(())
        }

        async fn destroy(&self) -> anyhow::Result<()> {
            self.log.lock().unwrap().push(format!("{}:destroy", self.id));
            Ok(())
        }
    }

    fn create_test_plugin(id: &str, dependencies: &[&str]) -> PluginBundle {
        let mut metadata = PluginMetadata::new(id, id, "1.0.0");
        for dependency in dependencies {
            metadata = metadata.with_dependency(*dependency);
        }
        PluginBundle::new(metadata, Noop)
    }

    fn widget(name: &'static str) -> ComponentRef {
        Arc::new(Widget(name))
    }

    fn plugin_ids(registry: &PluginRegistry) -> Vec<String> {
        registry
            .get_plugins()
            .iter()
            .map(|p| p.id().to_string())
            .collect()
    }

    #[test]
    fn test_empty_registry() {
        let registry = PluginRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
        assert!(registry.get_plugin("anything").is_none());
        assert!(registry.get_component("anything").is_none());
        assert!(registry.get_routes().is_empty());
        assert!(registry.get_menu_items().is_empty());
    }

    #[tokio::test]
    async fn test_register_and_get_plugin() {
        let registry = PluginRegistry::new();
        let bundle = Arc::new(create_test_plugin("dashboard", &[]));

        registry.register_plugin(Arc::clone(&bundle)).await.unwrap();

        let retrieved = registry.get_plugin("dashboard").unwrap();
        assert!(Arc::ptr_eq(&retrieved, &bundle));
        assert!(registry.contains("dashboard"));
        assert_eq!(registry.len(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_registration_fails_without_mutation() {
        let registry = PluginRegistry::new();
        registry
            .register_plugin(create_test_plugin("dashboard", &[]))
            .await
            .unwrap();

        let log = Arc::new(StdMutex::new(Vec::new()));
        let duplicate = PluginBundle::new(
            PluginMetadata::new("dashboard", "Other", "2.0.0"),
            Recording {
                id: "dashboard",
                log: Arc::clone(&log),
            },
        )
        .with_component("dup", PluginComponent::new(widget("Dup")));

        let err = registry.register_plugin(duplicate).await.unwrap_err();

        assert!(matches!(err, PluginError::DuplicatePlugin(ref id) if id == "dashboard"));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get_plugin("dashboard").unwrap().metadata.version, "1.0.0");
        assert!(registry.get_component("dup").is_none());
        assert!(log.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_dependency_fails_without_mutation() {
        let registry = PluginRegistry::new();
        let bundle = create_test_plugin("reports", &["missing"])
            .with_route(PluginRoute::new("/reports", widget("Reports")));

        let err = registry.register_plugin(bundle).await.unwrap_err();

        match err {
            PluginError::MissingDependency { plugin, dependency } => {
                assert_eq!(plugin, "reports");
                assert_eq!(dependency, "missing");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(registry.is_empty());
        assert!(registry.get_routes().is_empty());
    }

    #[tokio::test]
    async fn test_registration_steps_run_in_order() {
        let registry = Arc::new(PluginRegistry::new());
        let log = Arc::new(StdMutex::new(Vec::new()));

        let hook_log = Arc::clone(&log);
        let observer = Arc::downgrade(&registry);
        let bundle = PluginBundle::new(
            PluginMetadata::new("users", "Users", "1.0.0"),
            Recording {
                id: "users",
                log: Arc::clone(&log),
            },
        )
        .with_component("users.list", PluginComponent::new(widget("UserList")))
        .on_load(move || {
            let log = Arc::clone(&hook_log);
            let observer = observer.clone();
            async move {
                let registry = observer.upgrade().expect("registry alive");
                log.lock().unwrap().push(format!(
                    "on_load:component={} registered={}",
                    registry.get_component("users.list").is_some(),
                    registry.contains("users")
                ));
                Ok(())
            }
        });

        registry.register_plugin(bundle).await.unwrap();

        assert_eq!(
            *log.lock().unwrap(),
            vec![
                "users:initialize".to_string(),
                "on_load:component=true registered=false".to_string()
            ]
        );
        assert!(registry.contains("users"));
    }

    #[tokio::test]
    async fn test_initialize_receives_plugin_context() {
        let mut lifecycle = MockPluginLifecycle::new();
        lifecycle
            .expect_initialize()
            .withf(|ctx| ctx.plugin_id() == "mocked")
            .times(1)
            .returning(|ctx| {
                ctx.set_state(json!({"mocked": true}).as_object().cloned().unwrap());
                Ok(())
            });
        lifecycle.expect_destroy().times(1).returning(|| Ok(()));

        let registry = PluginRegistry::new();
        let bundle = PluginBundle::new(PluginMetadata::new("mocked", "Mocked", "0.1.0"), lifecycle);

        registry.register_plugin(bundle).await.unwrap();
        assert_eq!(registry.shared_state()["mocked"], json!(true));

        registry.unregister_plugin("mocked").await.unwrap();
        assert!(registry.is_empty());
    }

    #[tokio::test]
    async fn test_initialize_failure_is_not_rolled_back() {
        let mut lifecycle = MockPluginLifecycle::new();
        lifecycle.expect_initialize().times(1).returning(|ctx| {
            ctx.register_menu_item(MenuItem::new("early", "Early"));
            Err(anyhow::anyhow!("boom"))
        });
        lifecycle.expect_destroy().never();

        let registry = PluginRegistry::new();
        let bundle = PluginBundle::new(PluginMetadata::new("flaky", "Flaky", "0.1.0"), lifecycle)
            .with_component("flaky.main", PluginComponent::new(widget("Flaky")));

        let err = registry.register_plugin(bundle).await.unwrap_err();

        assert!(matches!(
            err,
            PluginError::Lifecycle { ref plugin, hook: "initialize", .. } if plugin == "flaky"
        ));
        assert!(!registry.contains("flaky"));
        // Contributions made before the failure stay in place
        assert_eq!(registry.get_menu_items().len(), 1);
        // Declared components were never reached
        assert!(registry.get_component("flaky.main").is_none());
    }

    #[tokio::test]
    async fn test_on_load_failure_keeps_contributions() {
        let registry = PluginRegistry::new();
        let bundle = create_test_plugin("broken", &[])
            .with_component("broken.main", PluginComponent::new(widget("Broken")))
            .with_route(PluginRoute::new("/broken", widget("Broken")))
            .on_load(|| async { Err(anyhow::anyhow!("cannot load")) });

        let err = registry.register_plugin(bundle).await.unwrap_err();

        assert!(matches!(err, PluginError::Lifecycle { hook: "on_load", .. }));
        assert!(registry.get_plugin("broken").is_none());
        assert!(registry.get_component("broken.main").is_some());
        assert_eq!(registry.get_routes().len(), 1);
    }

    #[tokio::test]
    async fn test_unregister_removes_contributions() {
        let registry = PluginRegistry::new();
        let bundle = create_test_plugin("w", &[])
            .with_component("w", PluginComponent::new(widget("CompA")))
            .with_route(PluginRoute::new("/w", widget("CompA")).exact())
            .with_menu_item(MenuItem::new("w", "W").with_path("/w"));

        registry.register_plugin(bundle).await.unwrap();
        assert_eq!(registry.get_component("w").unwrap().component.name(), "CompA");

        registry.unregister_plugin("w").await.unwrap();

        assert!(registry.get_component("w").is_none());
        assert!(registry.get_routes().is_empty());
        assert!(registry.get_menu_items().is_empty());
        assert!(registry.is_empty());
    }

    #[tokio::test]
    async fn test_unregister_unknown_plugin() {
        let registry = PluginRegistry::new();
        registry
            .register_plugin(create_test_plugin("dashboard", &[]))
            .await
            .unwrap();

        let err = registry.unregister_plugin("ghost").await.unwrap_err();

        assert!(matches!(err, PluginError::PluginNotFound(ref id) if id == "ghost"));
        assert_eq!(plugin_ids(&registry), vec!["dashboard"]);
    }

    #[tokio::test]
    async fn test_unregister_runs_on_unload_then_destroy() {
        let registry = PluginRegistry::new();
        let log = Arc::new(StdMutex::new(Vec::new()));
        let hook_log = Arc::clone(&log);

        let bundle = PluginBundle::new(
            PluginMetadata::new("a", "A", "1.0.0"),
            Recording {
                id: "a",
                log: Arc::clone(&log),
            },
        )
        .on_unload(move || {
            let log = Arc::clone(&hook_log);
            async move {
                log.lock().unwrap().push("a:on_unload".to_string());
                Ok(())
            }
        });

        registry.register_plugin(bundle).await.unwrap();
        registry.unregister_plugin("a").await.unwrap();

        assert_eq!(
            *log.lock().unwrap(),
            vec!["a:initialize", "a:on_unload", "a:destroy"]
        );
    }

    #[tokio::test]
    async fn test_destroy_failure_keeps_plugin_registered() {
        let mut lifecycle = MockPluginLifecycle::new();
        lifecycle.expect_initialize().returning(|_| Ok(()));
        lifecycle
            .expect_destroy()
            .times(1)
            .returning(|| Err(anyhow::anyhow!("still busy")));

        let registry = PluginRegistry::new();
        let bundle = PluginBundle::new(PluginMetadata::new("busy", "Busy", "1.0.0"), lifecycle)
            .with_component("busy", PluginComponent::new(widget("Busy")));
        registry.register_plugin(bundle).await.unwrap();

        let err = registry.unregister_plugin("busy").await.unwrap_err();

        assert!(matches!(err, PluginError::Lifecycle { hook: "destroy", .. }));
        assert!(registry.contains("busy"));
        assert!(registry.get_component("busy").is_some());
    }

    #[tokio::test]
    async fn test_shared_route_path_removed_once_per_declaration() {
        let registry = PluginRegistry::new();
        registry
            .register_plugin(
                create_test_plugin("first", &[]).with_route(PluginRoute::new("/x", widget("First"))),
            )
            .await
            .unwrap();
        registry
            .register_plugin(
                create_test_plugin("second", &[]).with_route(PluginRoute::new("/x", widget("Second"))),
            )
            .await
            .unwrap();
        assert_eq!(registry.get_routes().len(), 2);

        registry.unregister_plugin("first").await.unwrap();

        let routes = registry.get_routes();
        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].path, "/x");
        // The earliest matching entry goes, leaving the route "second" registered
        assert_eq!(routes[0].component.name(), "Second");
    }

    #[tokio::test]
    async fn test_component_slot_last_registration_wins() {
        let registry = PluginRegistry::new();
        registry
            .register_plugin(
                create_test_plugin("a", &[]).with_component("shared", PluginComponent::new(widget("A"))),
            )
            .await
            .unwrap();
        registry
            .register_plugin(
                create_test_plugin("b", &[]).with_component("shared", PluginComponent::new(widget("B"))),
            )
            .await
            .unwrap();

        assert_eq!(registry.get_component("shared").unwrap().component.name(), "B");

        // Unregistering "a" removes the slot even though "b" owns the current entry
        registry.unregister_plugin("a").await.unwrap();
        assert!(registry.get_component("shared").is_none());
    }

    #[tokio::test]
    async fn test_snapshots_are_independent() {
        let registry = PluginRegistry::new();
        registry
            .register_plugin(create_test_plugin("one", &[]).with_menu_item(MenuItem::new("one", "One")))
            .await
            .unwrap();

        let plugins = registry.get_plugins();
        let menu = registry.get_menu_items();

        registry
            .register_plugin(create_test_plugin("two", &[]).with_menu_item(MenuItem::new("two", "Two")))
            .await
            .unwrap();

        assert_eq!(plugins.len(), 1);
        assert_eq!(menu.len(), 1);
        assert_eq!(registry.get_plugins().len(), 2);
        assert_eq!(registry.get_menu_items().len(), 2);
    }

    #[tokio::test]
    async fn test_notify_route_change_in_registration_order() {
        let registry = PluginRegistry::new();
        let seen = Arc::new(StdMutex::new(Vec::new()));

        for id in ["alpha", "silent", "beta"] {
            let mut bundle = create_test_plugin(id, &[]);
            if id != "silent" {
                let seen = Arc::clone(&seen);
                bundle = bundle.on_route_change(move |route| {
                    let seen = Arc::clone(&seen);
                    async move {
                        seen.lock().unwrap().push(format!("{}:{}", id, route));
                        Ok(())
                    }
                });
            }
            registry.register_plugin(bundle).await.unwrap();
        }

        registry.notify_route_change("/r").await.unwrap();

        assert_eq!(*seen.lock().unwrap(), vec!["alpha:/r", "beta:/r"]);
    }

    #[tokio::test]
    async fn test_notify_route_change_stops_at_first_error() {
        let registry = PluginRegistry::new();
        let seen = Arc::new(StdMutex::new(Vec::new()));

        registry
            .register_plugin(
                create_test_plugin("failing", &[])
                    .on_route_change(|_| async { Err(anyhow::anyhow!("bad route")) }),
            )
            .await
            .unwrap();

        let tail = Arc::clone(&seen);
        registry
            .register_plugin(create_test_plugin("after", &[]).on_route_change(move |route| {
                let tail = Arc::clone(&tail);
                async move {
                    tail.lock().unwrap().push(route);
                    Ok(())
                }
            }))
            .await
            .unwrap();

        let err = registry.notify_route_change("/r").await.unwrap_err();

        assert!(matches!(
            err,
            PluginError::Lifecycle { ref plugin, hook: "on_route_change", .. } if plugin == "failing"
        ));
        assert!(seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_emit_on_off() {
        let registry = PluginRegistry::new();
        let received = Arc::new(StdMutex::new(Vec::new()));

        let sink = Arc::clone(&received);
        let handler = listener(move |data| {
            sink.lock().unwrap().push(data.cloned());
        });

        registry.on("e", Arc::clone(&handler));
        assert_eq!(registry.emit("e", Some(&json!({"n": 1}))), 1);

        assert!(registry.off("e", &handler));
        assert_eq!(registry.emit("e", Some(&json!({"n": 2}))), 0);

        assert_eq!(*received.lock().unwrap(), vec![Some(json!({"n": 1}))]);
    }

    #[tokio::test]
    async fn test_plugin_context_reaches_registry_bus_and_state() {
        let registry = PluginRegistry::new();
        let hits = Arc::new(StdMutex::new(0));
        let counter = Arc::clone(&hits);
        registry.on(
            "ready",
            listener(move |_| {
                *counter.lock().unwrap() += 1;
            }),
        );

        let ctx = registry.context("external");
        ctx.emit("ready", None);
        ctx.set_state(json!({"theme": "dark"}).as_object().cloned().unwrap());
        registry.set_shared_state(json!({"locale": "en"}).as_object().cloned().unwrap());

        assert_eq!(*hits.lock().unwrap(), 1);
        assert_eq!(
            Value::Object(registry.shared_state()),
            json!({"theme": "dark", "locale": "en"})
        );
    }

    #[tokio::test]
    async fn test_dependency_scenario() {
        let registry = PluginRegistry::new();

        registry
            .register_plugin(
                create_test_plugin("dashboard", &[])
                    .with_component("dashboard.main", PluginComponent::new(widget("Dashboard"))),
            )
            .await
            .unwrap();
        assert_eq!(registry.get_plugins().len(), 1);

        registry
            .register_plugin(create_test_plugin("users", &["dashboard"]))
            .await
            .unwrap();

        let err = registry
            .register_plugin(create_test_plugin("reports", &["missing"]))
            .await
            .unwrap_err();
        assert!(matches!(err, PluginError::MissingDependency { .. }));
        assert_eq!(registry.get_plugins().len(), 2);

        registry.unregister_plugin("dashboard").await.unwrap();
        assert_eq!(plugin_ids(&registry), vec!["users"]);
        assert!(!registry.get_components().contains_key("dashboard.main"));
    }
}
