//! CLI command handlers for configuration and sessions

use anyhow::{Context, Result};
use clap::Subcommand;
use std::path::Path;

use crate::auth::{AuthSession, SessionStore, User, new_token};
use crate::config::{self, ConfigLoader, paths};

/// Configuration management subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigSubcommand {
    /// Get configuration value
    Get {
        /// Configuration key (e.g., "requireAuthentication", "ui.title")
        key: Option<String>,
    },
    /// Set configuration value in the root config file
    Set {
        /// Configuration key (e.g., "requireAuthentication", "ui.title")
        key: String,
        /// Configuration value
        value: String,
    },
    /// List all configuration
    List,
    /// Show configuration file path
    Path,
    /// Validate configuration
    Validate,
}

/// Handle configuration subcommands
pub async fn handle_config_command(cmd: ConfigSubcommand, explicit: Option<&Path>) -> Result<()> {
    match cmd {
        ConfigSubcommand::Get { key } => {
            let config = ConfigLoader::load(explicit).context("Failed to load configuration")?;

            if let Some(key) = key {
                let value = config::get_config_value(&config, &key)?;
                println!("{}", value.trim_end());
            } else {
                let yaml =
                    serde_yaml::to_string(&config).context("Failed to serialize configuration")?;
                print!("{}", yaml);
            }
        }
        ConfigSubcommand::Set { key, value } => {
            // Only the root file is written, so start from it rather than the merged view
            let root_path = paths::root_config_path();
            let mut config = if root_path.exists() {
                ConfigLoader::load_file(&root_path)?
            } else {
                ConfigLoader::load_defaults()
            };

            config::set_config_value(&mut config, &key, &value)
                .with_context(|| format!("Failed to set {} = {}", key, value))?;

            ConfigLoader::save_root(&config).context("Failed to save configuration")?;
            println!("Configuration saved");
        }
        ConfigSubcommand::List => {
            let config = ConfigLoader::load(explicit).context("Failed to load configuration")?;
            for key in config::CONFIG_KEYS {
                let value = config::get_config_value(&config, key)?;
                if value.contains('\n') {
                    println!("{}:", key);
                    for line in value.lines() {
                        println!("  {}", line);
                    }
                } else {
                    println!("{}: {}", key, value);
                }
            }
        }
        ConfigSubcommand::Path => {
            println!("{}", paths::root_config_path().display());
        }
        ConfigSubcommand::Validate => {
            let config = ConfigLoader::validate(explicit)?;
            println!(
                "Configuration is valid ({} plugin(s) configured)",
                config.plugins.len()
            );
        }
    }

    Ok(())
}

/// Sign in and persist the session
pub fn handle_login(name: &str, email: &str) -> Result<()> {
    let mut session = AuthSession::new(SessionStore::default_location());
    session.begin_login();

    let user = match User::new(name, email) {
        Ok(user) => user,
        Err(e) => {
            session.fail_login();
            return Err(e).context("Login failed");
        }
    };

    session
        .complete_login(user, new_token())
        .context("Failed to store session")?;

    if let Some(user) = session.user() {
        println!("Signed in as {} <{}>", user.name, user.email);
    }
    Ok(())
}

/// Sign out and remove the persisted session
pub fn handle_logout() -> Result<()> {
    let mut session = AuthSession::new(SessionStore::default_location());
    let was_signed_in = session.restore().unwrap_or(false);
    session.logout().context("Failed to remove session")?;

    if was_signed_in {
        println!("Signed out");
    } else {
        println!("No active session");
    }
    Ok(())
}
