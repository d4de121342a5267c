//! Plugdash - A plugin-driven dashboard shell
//!
//! Registers the configured plugins and renders the dashboard, or runs one
//! of the management subcommands.

use anyhow::Result;
use clap::{Parser, Subcommand};
use plugdash::cli::{
    ConfigSubcommand, PluginSubcommand, display_version, handle_config_command, handle_login,
    handle_logout, handle_nav, handle_plugin_command, handle_view, init_logging,
};
use std::path::PathBuf;

/// Plugdash - A plugin-driven dashboard shell
#[derive(Parser, Debug)]
#[command(name = "plugdash")]
#[command(about = "A plugin-driven dashboard shell", long_about = None)]
struct Args {
    /// Enable debug logging
    #[arg(long, short = 'd')]
    debug: bool,

    /// Additional configuration file, applied over the root config
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

/// Main commands
#[derive(Subcommand, Debug)]
enum Command {
    /// Render the dashboard
    View {
        /// Plugin to select before rendering
        plugin: Option<String>,
    },
    /// Show the menu contributed by the registered plugins
    Nav,
    /// Plugin management
    Plugins {
        #[command(subcommand)]
        subcommand: PluginSubcommand,
    },
    /// Sign in
    Login {
        /// Display name
        #[arg(long)]
        name: String,
        /// Email address
        #[arg(long)]
        email: String,
    },
    /// Sign out
    Logout,
    /// Configuration management
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let log_file = init_logging(args.debug);
    if let Some(ref log_path) = log_file {
        eprintln!(
            "Debug logging enabled. Logs written to: {}",
            log_path.display()
        );
    }

    let explicit = args.config.as_deref();
    tracing::debug!("Running command: {:?}", args.command);

    match args.command {
        None => handle_view(explicit, None).await,
        Some(Command::View { plugin }) => handle_view(explicit, plugin.as_deref()).await,
        Some(Command::Nav) => handle_nav(explicit).await,
        Some(Command::Plugins { subcommand }) => handle_plugin_command(subcommand, explicit).await,
        Some(Command::Login { name, email }) => handle_login(&name, &email),
        Some(Command::Logout) => handle_logout(),
        Some(Command::Config { subcommand }) => handle_config_command(subcommand, explicit).await,
        Some(Command::Version) => {
            display_version();
            Ok(())
        }
    }
}
