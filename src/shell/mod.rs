//! Dashboard shell
//!
//! Headless model of the dashboard: it registers the configured plugins,
//! keeps the navigation and auth state, and renders the current screen as
//! plain text.

pub mod content;
pub mod guard;
pub mod navigation;

pub use content::{Content, ContentArea, render_content};
pub use guard::{AuthGuard, GuardDecision, render_login_screen};
pub use navigation::{Navigation, PluginHierarchy, generate_hierarchy, render_menu, render_navigation};

use crate::auth::AuthSession;
use crate::config::{Config, PluginDescriptor};
use crate::plugins::{LoadReport, PluginLoader, PluginRegistry, PluginResult, plugin_path};
use std::fmt::Write;
use std::sync::Arc;

/// The dashboard application state
pub struct Dashboard {
    registry: Arc<PluginRegistry>,
    loader: PluginLoader,
    config: Config,
    navigation: Navigation,
    auth: AuthSession,
}

impl Dashboard {
    pub fn new(registry: Arc<PluginRegistry>, config: Config, auth: AuthSession) -> Self {
        Self::with_loader(registry, config, auth, PluginLoader::new())
    }

    pub fn with_loader(
        registry: Arc<PluginRegistry>,
        config: Config,
        auth: AuthSession,
        loader: PluginLoader,
    ) -> Self {
        let enabled: Vec<PluginDescriptor> = config
            .plugins
            .iter()
            .filter(|descriptor| descriptor.enabled)
            .cloned()
            .collect();
        let mut navigation = Navigation::from_descriptors(&enabled);
        if config.ui.expand_all {
            navigation.expand_all();
        }

        Self {
            registry,
            loader,
            config,
            navigation,
            auth,
        }
    }

    /// Register every configured plugin and apply the default selection
    ///
    /// Registration failures are reported, never fatal.
    pub async fn start(&mut self) -> LoadReport {
        let report = self
            .loader
            .register_all(&self.registry, &self.config.plugins)
            .await;

        if let Some(default_plugin) = self.config.ui.default_plugin.clone() {
            if let Err(e) = self.select(&default_plugin).await {
                tracing::warn!("Could not select default plugin '{}': {}", default_plugin, e);
            }
        }

        report
    }

    /// Select a plugin and notify plugins of the route change
    pub async fn select(&mut self, plugin_id: &str) -> PluginResult<()> {
        self.navigation.select(plugin_id)?;
        self.registry
            .notify_route_change(&plugin_path(plugin_id))
            .await
    }

    /// Render header, sidebar and content, behind the auth guard
    pub fn view(&self) -> String {
        let mut out = self.render_header();
        out.push('\n');

        match AuthGuard::evaluate(self.auth.state(), self.config.require_authentication) {
            GuardDecision::LoginRequired { loading } => {
                out.push_str(&render_login_screen(loading));
            }
            GuardDecision::Render => {
                out.push_str(&render_navigation(&self.navigation, self.config.ui.no_icons));
                out.push_str("---\n");
                match ContentArea::resolve(&self.registry, self.navigation.selected_descriptor()) {
                    Ok(content) => out.push_str(&render_content(&content, &self.config.ui.title)),
                    Err(e) => {
                        let _ = writeln!(out, "Error: {}", e);
                    }
                }
            }
        }
        out
    }

    fn render_header(&self) -> String {
        match self.auth.user() {
            Some(user) => format!("{} | {} <{}>\n", self.config.ui.title, user.name, user.email),
            None if self.auth.is_authenticated() => format!("{} | signed in\n", self.config.ui.title),
            None => format!("{} | not signed in\n", self.config.ui.title),
        }
    }

    pub fn registry(&self) -> &Arc<PluginRegistry> {
        &self.registry
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn navigation(&self) -> &Navigation {
        &self.navigation
    }

    pub fn navigation_mut(&mut self) -> &mut Navigation {
        &mut self.navigation
    }

    pub fn auth(&self) -> &AuthSession {
        &self.auth
    }

    pub fn auth_mut(&mut self) -> &mut AuthSession {
        &mut self.auth
    }
}
