//! Config command for managing CLI configuration

use std::path::Path;

use anyhow::Context;
use clap::{Args, Subcommand};

use crate::config::Config;

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Get a config value
    Get {
        /// Config key name
        key: String,
    },
    /// Set a config value
    Set {
        /// Config key name
        key: String,
        /// New value
        value: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
    /// Initialize default config file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

pub fn run(args: &ConfigArgs, path: &Path) -> anyhow::Result<()> {
    match &args.command {
        ConfigCommands::Get { key } => run_get(path, key),
        ConfigCommands::Set { key, value } => run_set(path, key, value),
        ConfigCommands::List => run_list(path),
        ConfigCommands::Path => run_path(path),
        ConfigCommands::Init { force } => run_init(path, *force),
    }
}

fn run_get(path: &Path, key: &str) -> anyhow::Result<()> {
    let config = Config::load(path)?;
    match config.get(key) {
        Some(value) => println!("{}", value),
        None => anyhow::bail!(
            "Unknown config key: {} (available: {})",
            key,
            Config::keys().join(", ")
        ),
    }
    Ok(())
}

fn run_set(path: &Path, key: &str, value: &str) -> anyhow::Result<()> {
    let mut config = Config::load(path)?;
    let previous = config.get(key);
    config
        .set(key, value)
        .with_context(|| format!("Rejected {} = {}", key, value))?;
    let current = config.get(key).unwrap_or_default();

    if previous.as_deref() == Some(current.as_str()) && path.exists() {
        println!("{} is already {}", key, current);
        return Ok(());
    }

    config.save(path)?;
    match previous {
        Some(previous) if previous != current => {
            println!("Set {} = {} (was {})", key, current, previous)
        }
        _ => println!("Set {} = {}", key, current),
    }
    Ok(())
}

fn run_list(path: &Path) -> anyhow::Result<()> {
    let config = Config::load(path)?;
    let defaults = Config::default();
    let state = if path.exists() { "" } else { " (not created yet)" };
    println!("Config file: {}{}", path.display(), state);
    println!();
    for key in Config::keys() {
        let value = config.get(key).unwrap_or_default();
        if config.get(key) == defaults.get(key) {
            println!("{} = {} (default)", key, value);
        } else {
            println!("{} = {}", key, value);
        }
    }
    Ok(())
}

fn run_path(path: &Path) -> anyhow::Result<()> {
    println!("{}", path.display());
    Ok(())
}

fn run_init(path: &Path, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }

    Config::default().save(path)?;
    println!("Created config file at {}", path.display());
    Ok(())
}
