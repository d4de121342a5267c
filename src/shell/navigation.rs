//! Navigation sidebar model
//!
//! Groups plugin descriptors by category and tracks which categories are
//! expanded and which plugin is selected.

use crate::config::PluginDescriptor;
use crate::plugins::{MenuItem, PluginError, PluginResult};
use indexmap::IndexMap;
use std::collections::HashSet;
use std::fmt::Write;

/// Descriptors grouped by category, in first-seen order
pub type PluginHierarchy = IndexMap<String, Vec<PluginDescriptor>>;

/// Group descriptors by category
///
/// Categories keep the order in which they first appear; plugins keep their
/// relative order within a category.
pub fn generate_hierarchy(descriptors: &[PluginDescriptor]) -> PluginHierarchy {
    let mut hierarchy = PluginHierarchy::new();
    for descriptor in descriptors {
        hierarchy
            .entry(descriptor.category.clone())
            .or_default()
            .push(descriptor.clone());
    }
    hierarchy
}

/// Sidebar state
#[derive(Debug, Clone, Default)]
pub struct Navigation {
    hierarchy: PluginHierarchy,
    expanded: HashSet<String>,
    selected: Option<String>,
}

impl Navigation {
    /// All categories start collapsed and nothing is selected
    pub fn new(hierarchy: PluginHierarchy) -> Self {
        Self {
            hierarchy,
            expanded: HashSet::new(),
            selected: None,
        }
    }

    pub fn from_descriptors(descriptors: &[PluginDescriptor]) -> Self {
        Self::new(generate_hierarchy(descriptors))
    }

    pub fn hierarchy(&self) -> &PluginHierarchy {
        &self.hierarchy
    }

    pub fn categories(&self) -> Vec<&str> {
        self.hierarchy.keys().map(String::as_str).collect()
    }

    /// Flip a category between expanded and collapsed; returns the new state
    ///
    /// Unknown categories are ignored and report `false`.
    pub fn toggle_category(&mut self, category: &str) -> bool {
        if !self.hierarchy.contains_key(category) {
            return false;
        }
        if self.expanded.remove(category) {
            false
        } else {
            self.expanded.insert(category.to_string());
            true
        }
    }

    pub fn expand_all(&mut self) {
        self.expanded = self.hierarchy.keys().cloned().collect();
    }

    pub fn is_expanded(&self, category: &str) -> bool {
        self.expanded.contains(category)
    }

    /// Select a plugin and expand its category
    pub fn select(&mut self, plugin_id: &str) -> PluginResult<()> {
        let category = self
            .find(plugin_id)
            .map(|descriptor| descriptor.category.clone())
            .ok_or_else(|| PluginError::PluginNotFound(plugin_id.to_string()))?;

        self.expanded.insert(category);
        self.selected = Some(plugin_id.to_string());
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Descriptor of the selected plugin
    pub fn selected_descriptor(&self) -> Option<&PluginDescriptor> {
        self.selected.as_deref().and_then(|id| self.find(id))
    }

    /// Look up a descriptor by plugin id
    pub fn find(&self, plugin_id: &str) -> Option<&PluginDescriptor> {
        self.hierarchy
            .values()
            .flatten()
            .find(|descriptor| descriptor.id == plugin_id)
    }
}

/// Render the sidebar as an indented text tree
pub fn render_navigation(navigation: &Navigation, no_icons: bool) -> String {
    let (open, closed) = if no_icons { ("[-]", "[+]") } else { ("▼", "▶") };

    let mut out = String::from("Plugins\n");
    for (category, plugins) in navigation.hierarchy() {
        let expanded = navigation.is_expanded(category);
        let _ = writeln!(out, "{} {}", if expanded { open } else { closed }, category);
        if !expanded {
            continue;
        }
        for plugin in plugins {
            let marker = if navigation.selected() == Some(plugin.id.as_str()) {
                ">"
            } else {
                " "
            };
            let _ = writeln!(out, "  {} {}", marker, plugin.name);
            if let Some(description) = &plugin.description {
                let _ = writeln!(out, "      {}", description);
            }
        }
    }
    out
}

/// Render registry menu items, children indented under their parent
pub fn render_menu(items: &[MenuItem], no_icons: bool) -> String {
    let mut out = String::new();
    write_menu(&mut out, items, 0, no_icons);
    out
}

fn write_menu(out: &mut String, items: &[MenuItem], depth: usize, no_icons: bool) {
    for item in items {
        let indent = "  ".repeat(depth);
        let icon = match (&item.icon, no_icons) {
            (Some(icon), false) => format!("{} ", icon),
            _ => String::new(),
        };
        match &item.path {
            Some(path) => {
                let _ = writeln!(out, "{}{}{} ({})", indent, icon, item.label, path);
            }
            None => {
                let _ = writeln!(out, "{}{}{}", indent, icon, item.label);
            }
        }
        write_menu(out, &item.children, depth + 1, no_icons);
    }
}
