//! Registry state store
//!
//! The indexes shared between the registry and every plugin context.

use super::bundle::PluginBundle;
use super::manifest::{MenuItem, PluginComponent, PluginRoute};
use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Mutable registry state, guarded by a single lock
#[derive(Default)]
pub(crate) struct RegistryState {
    /// Registered bundles, in registration order
    pub plugins: IndexMap<String, Arc<PluginBundle>>,
    /// Components flattened across all bundles, keyed by slot id
    pub components: IndexMap<String, PluginComponent>,
    pub routes: Vec<PluginRoute>,
    pub menu_items: Vec<MenuItem>,
    /// Open key/value bag any plugin may read or merge into
    pub shared_state: Map<String, Value>,
}

impl RegistryState {
    /// Shallow-merge `patch` into the shared state bag
    pub fn merge_shared_state(&mut self, patch: Map<String, Value>) {
        for (key, value) in patch {
            self.shared_state.insert(key, value);
        }
    }

    /// Remove the first route with this path, if any
    pub fn remove_route(&mut self, path: &str) -> bool {
        match self.routes.iter().position(|r| r.path == path) {
            Some(index) => {
                self.routes.remove(index);
                true
            }
            None => false,
        }
    }

    /// Remove the first menu item with this id, if any
    pub fn remove_menu_item(&mut self, id: &str) -> bool {
        match self.menu_items.iter().position(|m| m.id == id) {
            Some(index) => {
                self.menu_items.remove(index);
                true
            }
            None => false,
        }
    }
}

pub(crate) type SharedRegistryState = Arc<RwLock<RegistryState>>;

// Poisoned locks are recovered: no write leaves the state half-updated.

pub(crate) fn read(state: &RwLock<RegistryState>) -> RwLockReadGuard<'_, RegistryState> {
    state.read().unwrap_or_else(PoisonError::into_inner)
}

pub(crate) fn write(state: &RwLock<RegistryState>) -> RwLockWriteGuard<'_, RegistryState> {
    state.write().unwrap_or_else(PoisonError::into_inner)
}

pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
