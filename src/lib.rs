//! Plugdash Library
//!
//! A plugin-driven dashboard shell. Plugins are registered into an in-memory
//! registry that drives their lifecycle, collects their components, routes and
//! menu items, and connects them through a shared event bus and state.
//! It can be used both as a binary and as a library for testing.

pub mod auth;
pub mod cli;
pub mod config;
pub mod plugins;
pub mod shell;

// Re-export commonly used types for convenience
pub use auth::{AuthSession, User};
pub use config::{Config, PluginDescriptor};
pub use plugins::{PluginBundle, PluginError, PluginLoader, PluginRegistry, PluginResult};
pub use shell::Dashboard;
