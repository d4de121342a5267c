//! Dashboard CLI commands: the rendered screen and the registered menu

use crate::auth::{AuthSession, SessionStore};
use crate::config::ConfigLoader;
use crate::plugins::PluginRegistry;
use crate::shell::{Dashboard, render_menu};
use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;

async fn start_dashboard(explicit: Option<&Path>) -> Result<Dashboard> {
    let config = ConfigLoader::load(explicit).context("Failed to load configuration")?;

    let mut auth = AuthSession::new(SessionStore::default_location());
    if let Err(e) = auth.restore() {
        tracing::warn!("Could not restore session: {}", e);
    }

    let mut dashboard = Dashboard::new(Arc::new(PluginRegistry::new()), config, auth);
    let report = dashboard.start().await;
    for (id, err) in &report.failed {
        eprintln!("warning: plugin '{}' failed to register: {}", id, err);
    }
    Ok(dashboard)
}

/// Render the dashboard, optionally with a plugin selected
pub async fn handle_view(explicit: Option<&Path>, plugin: Option<&str>) -> Result<()> {
    let mut dashboard = start_dashboard(explicit).await?;
    if let Some(id) = plugin {
        dashboard
            .select(id)
            .await
            .with_context(|| format!("Failed to select plugin '{}'", id))?;
    }
    print!("{}", dashboard.view());
    Ok(())
}

/// Print the menu items contributed by the registered plugins
pub async fn handle_nav(explicit: Option<&Path>) -> Result<()> {
    let dashboard = start_dashboard(explicit).await?;
    let items = dashboard.registry().get_menu_items();
    if items.is_empty() {
        println!("No menu items registered.");
        return Ok(());
    }
    print!("{}", render_menu(&items, dashboard.config().ui.no_icons));
    Ok(())
}
