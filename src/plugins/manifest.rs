//! Plugin manifest types
//!
//! Identity metadata for a plugin bundle and the UI contributions it declares:
//! component slots, routes and menu items. Component references are opaque to
//! the registry; only the presentation layer ever renders them.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

/// Identity and descriptive data for a plugin bundle
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginMetadata {
    /// Unique plugin id (registry primary key)
    pub id: String,

    pub name: String,

    pub version: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub author: String,

    /// Plugin ids that must already be registered before this one
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<String>,
}

impl PluginMetadata {
    pub fn new(id: impl Into<String>, name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            version: version.into(),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    pub fn with_dependency(mut self, plugin_id: impl Into<String>) -> Self {
        self.dependencies.push(plugin_id.into());
        self
    }
}

/// Properties handed to a component when the presentation layer renders it
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComponentProps {
    /// Id of the plugin whose content is being rendered
    pub plugin_id: String,

    /// Opaque plugin configuration bag
    pub config: Value,

    /// Static properties declared alongside the component
    pub props: Map<String, Value>,
}

/// A render-capable UI component
///
/// The registry stores these as uninterpreted handles and never calls
/// [`Component::render`] itself.
pub trait Component: Send + Sync {
    /// Component type name, used for lookup in the component catalog
    fn name(&self) -> &str;

    /// Render the component as text
    fn render(&self, props: &ComponentProps) -> String;
}

/// Shared handle to a component
pub type ComponentRef = Arc<dyn Component>;

/// A component contributed under a slot id
#[derive(Clone)]
pub struct PluginComponent {
    pub component: ComponentRef,

    /// Optional static properties
    pub props: Option<Map<String, Value>>,
}

impl PluginComponent {
    pub fn new(component: ComponentRef) -> Self {
        Self {
            component,
            props: None,
        }
    }

    pub fn with_props(mut self, props: Map<String, Value>) -> Self {
        self.props = Some(props);
        self
    }

    /// Whether both entries hold the same component handle
    pub fn same_component(&self, other: &PluginComponent) -> bool {
        same_ref(&self.component, &other.component)
    }
}

impl fmt::Debug for PluginComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginComponent")
            .field("component", &self.component.name())
            .field("props", &self.props)
            .finish()
    }
}

/// A route contributed by a plugin
#[derive(Clone)]
pub struct PluginRoute {
    pub path: String,
    pub component: ComponentRef,
    /// Match the path exactly instead of by prefix
    pub exact: bool,
}

impl PluginRoute {
    pub fn new(path: impl Into<String>, component: ComponentRef) -> Self {
        Self {
            path: path.into(),
            component,
            exact: false,
        }
    }

    pub fn exact(mut self) -> Self {
        self.exact = true;
        self
    }

    /// Check whether a location is served by this route
    pub fn matches(&self, location: &str) -> bool {
        if self.exact {
            return location == self.path;
        }
        match location.strip_prefix(self.path.as_str()) {
            Some(rest) => rest.is_empty() || rest.starts_with('/') || self.path.ends_with('/'),
            None => false,
        }
    }
}

impl fmt::Debug for PluginRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginRoute")
            .field("path", &self.path)
            .field("component", &self.component.name())
            .field("exact", &self.exact)
            .finish()
    }
}

/// Click callback attached to a menu item
pub type ClickHandler = Arc<dyn Fn() + Send + Sync>;

/// A navigation entry, optionally nested
#[derive(Clone)]
pub struct MenuItem {
    pub id: String,
    pub label: String,
    pub icon: Option<String>,
    pub path: Option<String>,
    pub on_click: Option<ClickHandler>,
    pub children: Vec<MenuItem>,
}

impl MenuItem {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            icon: None,
            path: None,
            on_click: None,
            children: Vec::new(),
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_on_click<F>(mut self, handler: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_click = Some(Arc::new(handler));
        self
    }

    pub fn with_child(mut self, child: MenuItem) -> Self {
        self.children.push(child);
        self
    }

    /// Invoke the click handler, if any. Returns whether one was attached.
    pub fn click(&self) -> bool {
        match &self.on_click {
            Some(handler) => {
                handler();
                true
            }
            None => false,
        }
    }
}

impl fmt::Debug for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuItem")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("icon", &self.icon)
            .field("path", &self.path)
            .field("on_click", &self.on_click.is_some())
            .field("children", &self.children)
            .finish()
    }
}

/// Pointer identity for trait-object handles (ignores vtable addresses)
pub(crate) fn same_ref<T: ?Sized>(a: &Arc<T>, b: &Arc<T>) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Blank;

    impl Component for Blank {
        fn name(&self) -> &str {
            "Blank"
        }

        fn render(&self, _props: &ComponentProps) -> String {
            String::new()
        }
    }

    #[test]
    fn test_exact_route_matching() {
        let route = PluginRoute::new("/users", Arc::new(Blank)).exact();
        assert!(route.matches("/users"));
        assert!(!route.matches("/users/42"));
    }

    #[test]
    fn test_prefix_route_matching() {
        let route = PluginRoute::new("/users", Arc::new(Blank));
        assert!(route.matches("/users"));
        assert!(route.matches("/users/42"));
        assert!(!route.matches("/usersettings"));
        assert!(!route.matches("/"));
    }

    #[test]
    fn test_menu_item_click() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let clicks = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&clicks);
        let item = MenuItem::new("home", "Home").with_on_click(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        assert!(item.click());
        assert!(!MenuItem::new("plain", "Plain").click());
        assert_eq!(clicks.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_same_component() {
        let handle: ComponentRef = Arc::new(Blank);
        let a = PluginComponent::new(Arc::clone(&handle));
        let b = PluginComponent::new(handle);
        let c = PluginComponent::new(Arc::new(Blank));

        assert!(a.same_component(&b));
        assert!(!a.same_component(&c));
    }
}
