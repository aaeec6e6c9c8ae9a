//! RASBITA CLI
//!
//! Command-line front end for the RASBITA risk scoring engine.
//!
//! # Usage
//!
//! ```bash
//! rasbita assess -f intake.json
//! rasbita portfolio -f assets.yaml -o json
//! rasbita classify-score 46
//! rasbita tables devices
//! rasbita config set tables_path ./tables.toml
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod output;

#[derive(Parser)]
#[command(name = "rasbita")]
#[command(author = "RASBITA")]
#[command(version)]
#[command(about = "RASBITA risk scoring command line interface", long_about = None)]
struct Cli {
    /// Output format (defaults to the profile's default_format, then table)
    #[arg(long, short = 'o', global = true)]
    format: Option<output::OutputFormat>,

    /// Reference tables file (TOML or JSON) merged over the built-in tables
    #[arg(long, global = true, env = "RASBITA_TABLES")]
    tables: Option<PathBuf>,

    /// Share of asset value spent on safeguards each year
    #[arg(long, global = true, env = "RASBITA_SAFEGUARD_COST_RATIO")]
    safeguard_cost_ratio: Option<f64>,

    /// Share of ALE remaining after controls
    #[arg(long, global = true, env = "RASBITA_RESIDUAL_LOSS_RATIO")]
    residual_loss_ratio: Option<f64>,

    /// Profile name from config file
    #[arg(long, short, global = true)]
    profile: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Assess a single asset from a form payload
    Assess {
        /// Input file (JSON, YAML or TOML)
        #[arg(short, long)]
        file: PathBuf,
    },
    /// Assess a list of named assets and summarise them
    Portfolio {
        /// Portfolio file with an `assets` list (JSON, YAML or TOML)
        #[arg(short, long)]
        file: PathBuf,
    },
    /// Classify an overall percentage risk score
    ClassifyScore {
        /// Score between 0 and 100
        score: f64,
    },
    /// Print reference tables
    Tables {
        #[arg(value_enum)]
        table: Option<commands::tables::TableKind>,
    },
    /// Configure CLI
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Set configuration value
    Set { key: String, value: String },
    /// Get configuration value
    Get { key: String },
    /// List all configuration
    List,
    /// Initialize configuration
    Init,
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let profile = cli.profile.as_deref();
    let config = config::Config::load(profile).unwrap_or_else(|e| {
        tracing::warn!("Config not readable, using defaults: {:#}", e);
        config::Config::default()
    });
    let format = cli.format.or(config.default_format).unwrap_or_default();

    let settings = commands::EngineSettings {
        tables: cli.tables.or_else(|| config.tables_path.clone()),
        safeguard_cost_ratio: cli.safeguard_cost_ratio.or(config.safeguard_cost_ratio),
        residual_loss_ratio: cli.residual_loss_ratio.or(config.residual_loss_ratio),
    };

    match cli.command {
        Commands::Assess { file } => commands::assess::handle(&file, &settings.build()?, format),
        Commands::Portfolio { file } => commands::portfolio::handle(&file, &settings.build()?, format),
        Commands::ClassifyScore { score } => commands::score::handle(score, format),
        Commands::Tables { table } => commands::tables::handle(table, &settings.build()?, format),
        Commands::Config { action } => commands::config::handle(action, profile),
    }
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
