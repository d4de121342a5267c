//! Plugin-scoped context
//!
//! Handed to a plugin's `initialize` and used by the registry to apply the
//! bundle's declared contributions. Every method writes straight into the
//! shared registry indexes; nothing checks that a plugin only touches its own
//! entries.

use super::events::{EventBus, EventListener};
use super::manifest::{MenuItem, PluginComponent, PluginRoute};
use super::state::{self, SharedRegistryState};
use serde_json::{Map, Value};

/// Context bound to one plugin and to the registry's shared state
#[derive(Clone)]
pub struct PluginContext {
    plugin_id: String,
    state: SharedRegistryState,
    events: EventBus,
}

impl PluginContext {
    pub(crate) fn new(plugin_id: &str, state: SharedRegistryState, events: EventBus) -> Self {
        Self {
            plugin_id: plugin_id.to_string(),
            state,
            events,
        }
    }

    /// Id of the plugin this context was created for
    pub fn plugin_id(&self) -> &str {
        &self.plugin_id
    }

    /// Register a component under a slot id, replacing any existing entry
    pub fn register_component(&self, slot_id: &str, component: PluginComponent) {
        let mut state = state::write(&self.state);
        if state.components.contains_key(slot_id) {
            tracing::debug!(
                "Plugin '{}' replaces component slot '{}'",
                self.plugin_id,
                slot_id
            );
        }
        state.components.insert(slot_id.to_string(), component);
    }

    pub fn register_route(&self, route: PluginRoute) {
        state::write(&self.state).routes.push(route);
    }

    pub fn register_menu_item(&self, item: MenuItem) {
        state::write(&self.state).menu_items.push(item);
    }

    /// Copy of the shared state bag
    pub fn get_state(&self) -> Map<String, Value> {
        state::read(&self.state).shared_state.clone()
    }

    /// Shallow-merge keys into the shared state bag
    pub fn set_state(&self, patch: Map<String, Value>) {
        state::write(&self.state).merge_shared_state(patch);
    }

    pub fn emit(&self, event: &str, data: Option<&Value>) -> usize {
        self.events.emit(event, data)
    }

    pub fn on(&self, event: &str, listener: EventListener) {
        self.events.on(event, listener);
    }

    pub fn off(&self, event: &str, listener: &EventListener) -> bool {
        self.events.off(event, listener)
    }

    /// Handle to the shared event bus, usable after the context is gone
    pub fn event_bus(&self) -> EventBus {
        self.events.clone()
    }
}

impl std::fmt::Debug for PluginContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginContext")
            .field("plugin_id", &self.plugin_id)
            .finish_non_exhaustive()
    }
}
