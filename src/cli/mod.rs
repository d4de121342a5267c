//! CLI command handling module
//!
//! Handles all CLI subcommands and argument parsing.

mod commands;
mod dashboard;
mod logging;
mod plugin;
mod version;

pub use commands::{ConfigSubcommand, handle_config_command, handle_login, handle_logout};
pub use dashboard::{handle_nav, handle_view};
pub use logging::*;
pub use plugin::{PluginSubcommand, handle_plugin_command};
pub use version::{display_version, version_info};
