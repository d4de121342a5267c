//! Event bus for cross-plugin signaling
//!
//! Listeners are kept per event name in subscription order. Dispatch works on
//! a snapshot of the listener list taken when `emit` starts, so listeners may
//! subscribe or unsubscribe from inside a callback without deadlocking.

use super::manifest::same_ref;
use super::state::lock;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Listener callback receiving an optional payload
pub type EventListener = Arc<dyn Fn(Option<&Value>) + Send + Sync>;

/// Wrap a closure as an [`EventListener`]
///
/// Keep the returned handle around if you want to unsubscribe it later:
/// `off` matches listeners by identity.
pub fn listener<F>(f: F) -> EventListener
where
    F: Fn(Option<&Value>) + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Publish/subscribe bus shared by the registry and every plugin context
#[derive(Clone, Default)]
pub struct EventBus {
    subscriptions: Arc<Mutex<HashMap<String, Vec<EventListener>>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe a listener to an event
    pub fn on(&self, event: &str, listener: EventListener) {
        let mut subscriptions = lock(&self.subscriptions);
        subscriptions
            .entry(event.to_string())
            .or_default()
            .push(listener);
    }

    /// Remove the first subscription of this exact listener handle
    ///
    /// Returns `false` (and changes nothing) when it was not subscribed.
    pub fn off(&self, event: &str, listener: &EventListener) -> bool {
        let mut subscriptions = lock(&self.subscriptions);
        let Some(listeners) = subscriptions.get_mut(event) else {
            return false;
        };
        let Some(index) = listeners.iter().position(|l| same_ref(l, listener)) else {
            return false;
        };
        listeners.remove(index);
        if listeners.is_empty() {
            subscriptions.remove(event);
        }
        true
    }

    /// Invoke every current subscriber of `event` in subscription order
    ///
    /// Returns the number of listeners invoked.
    pub fn emit(&self, event: &str, data: Option<&Value>) -> usize {
        let listeners: Vec<EventListener> = {
            let subscriptions = lock(&self.subscriptions);
            subscriptions.get(event).cloned().unwrap_or_default()
        };

        tracing::trace!("Emitting '{}' to {} listener(s)", event, listeners.len());

        for callback in &listeners {
            callback(data);
        }
        listeners.len()
    }

    /// Number of listeners subscribed to an event
    pub fn listener_count(&self, event: &str) -> usize {
        lock(&self.subscriptions)
            .get(event)
            .map(Vec::len)
            .unwrap_or(0)
    }

    /// Names of events with at least one listener
    pub fn events(&self) -> Vec<String> {
        let mut events: Vec<String> = lock(&self.subscriptions).keys().cloned().collect();
        events.sort();
        events
    }
}
