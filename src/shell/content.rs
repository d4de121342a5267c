//! Main content area
//!
//! Resolves the selected plugin to its registered component and renders it.

use crate::config::PluginDescriptor;
use crate::plugins::{
    ComponentProps, PluginComponent, PluginError, PluginRegistry, PluginResult, PluginRoute,
};

/// What the content area shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    /// Nothing selected yet
    Welcome,
    /// Rendered output of the selected plugin's component
    Plugin {
        plugin_id: String,
        title: String,
        body: String,
    },
}

pub struct ContentArea;

impl ContentArea {
    /// Resolve the selected descriptor into renderable content
    ///
    /// The component is looked up under the plugin id slot and receives the
    /// descriptor's settings as its config.
    pub fn resolve(
        registry: &PluginRegistry,
        selected: Option<&PluginDescriptor>,
    ) -> PluginResult<Content> {
        let Some(descriptor) = selected else {
            return Ok(Content::Welcome);
        };

        let slot = Self::require_component(registry, &descriptor.id)?;
        let props = ComponentProps {
            plugin_id: descriptor.id.clone(),
            config: descriptor.config.to_value(),
            props: slot.props.clone().unwrap_or_default(),
        };

        Ok(Content::Plugin {
            plugin_id: descriptor.id.clone(),
            title: descriptor.name.clone(),
            body: slot.component.render(&props),
        })
    }

    /// Component registered under a slot id, or `ComponentNotFound`
    pub fn require_component(registry: &PluginRegistry, slot_id: &str) -> PluginResult<PluginComponent> {
        registry
            .get_component(slot_id)
            .ok_or_else(|| PluginError::ComponentNotFound(slot_id.to_string()))
    }

    /// First registered route serving `location`, or `RouteNotFound`
    pub fn require_route(registry: &PluginRegistry, location: &str) -> PluginResult<PluginRoute> {
        registry
            .get_routes()
            .into_iter()
            .find(|route| route.matches(location))
            .ok_or_else(|| PluginError::RouteNotFound(location.to_string()))
    }
}

/// Render content as text
pub fn render_content(content: &Content, app_title: &str) -> String {
    match content {
        Content::Welcome => format!(
            "Welcome to {}\nSelect a plugin from the navigation panel to get started.\n",
            app_title
        ),
        Content::Plugin { body, .. } => body.clone(),
    }
}
