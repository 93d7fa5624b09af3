//! Linkwork CLI - Command line front end for the containers

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod output;

use commands::{completions, config as config_cmd, demo, graph, table, tree};
use config::Config;
use output::OutputFormat;

#[derive(Parser)]
#[command(name = "linkwork")]
#[command(author, version, about = "Search tree, hash table and weighted graph playground")]
pub struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(long, env = "LINKWORK_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Output format: table, json (defaults to the configured format)
    #[arg(short, long, global = true)]
    pub format: Option<String>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Get the config file path
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(config::config_file_path)
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build a search tree and query it
    Tree(tree::TreeArgs),
    /// Build a hash table and query it
    Table(table::TableArgs),
    /// Build a weighted graph and traverse it
    Graph(graph::GraphArgs),
    /// Replay the reference walkthroughs for all three containers
    Demo,
    /// Manage configuration
    Config(config_cmd::ConfigArgs),
    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Settings shared by the container commands
pub struct AppContext {
    pub config: Config,
    pub format: OutputFormat,
}

impl AppContext {
    pub fn new(cli: &Cli) -> anyhow::Result<Self> {
        let path = cli.config_path();
        tracing::debug!("Using config at: {:?}", path);

        let config = Config::load(&path)?;
        let format = OutputFormat::from(cli.format.as_deref().unwrap_or(&config.format));

        Ok(Self { config, format })
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .init();

    tracing::debug!("Starting linkwork CLI");

    match &cli.command {
        Commands::Config(args) => config_cmd::run(args, &cli.config_path())?,
        Commands::Completions(args) => completions::run(args)?,
        Commands::Tree(args) => tree::run(args, &AppContext::new(&cli)?)?,
        Commands::Table(args) => table::run(args, &AppContext::new(&cli)?)?,
        Commands::Graph(args) => graph::run(args, &AppContext::new(&cli)?)?,
        Commands::Demo => demo::run(&AppContext::new(&cli)?)?,
    }

    Ok(())
}
