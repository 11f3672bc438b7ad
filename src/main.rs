//! Branch Office - document numbering and memorandum service
//!
//! Serves the numbering and memorandum HTTP API, and offers offline helpers
//! for computing numbers and inspecting configuration.

use anyhow::Result;
use branch_office::{
    api::build_app,
    config::BranchOfficeConfig,
    memorandums::{MemorandumStore, MemorandumsState},
    numbering::{generator::today, DocumentKind, NumberRegistry, NumbersState},
    org::OfficeBranch,
};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "branch-office")]
#[command(version)]
#[command(about = "Document numbering and memorandum service for branch offices")]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "BRANCH_OFFICE_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Host to bind to (overrides server.host)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides server.port)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Compute the number that follows a given last number
    Number {
        /// Document kind (memorandum, dts, transaction, serial, purchase-request, package)
        kind: DocumentKind,

        /// Office branch (CEBU, CALBAYOG, FUENTE)
        #[arg(short, long)]
        branch: OfficeBranch,

        /// Last number issued in this branch, if any
        #[arg(short, long)]
        last: Option<String>,
    },

    /// Run diagnostics
    Doctor,

    /// Show configuration
    Config {
        /// Show default configuration
        #[arg(long)]
        default: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli
        .config
        .clone()
        .or_else(|| BranchOfficeConfig::default_path().filter(|p| p.exists()));
    let config = BranchOfficeConfig::load(config_path.as_deref())?;

    init_logging(&config, cli.verbose);

    match cli.command {
        Commands::Serve { host, port } => {
            run_server(config, host, port).await?;
        }
        Commands::Number { kind, branch, last } => {
            let number = kind.next_number_on(last.as_deref(), branch, today())?;
            println!("{}", number);
        }
        Commands::Doctor => {
            run_doctor(&config, config_path.as_deref()).await?;
        }
        Commands::Config { default } => {
            show_config(if default { None } else { Some(&config) })?;
        }
    }

    Ok(())
}

fn init_logging(config: &BranchOfficeConfig, verbose: bool) {
    let log_level = if verbose {
        "debug"
    } else {
        config.logging.level.as_str()
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("branch_office={},tower_http=debug", log_level).into());

    let (json, plain) = if config.logging.json {
        (Some(tracing_subscriber::fmt::layer().json()), None)
    } else {
        (None, Some(tracing_subscriber::fmt::layer()))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(json)
        .with(plain)
        .init();
}

async fn run_server(
    config: BranchOfficeConfig,
    host: Option<String>,
    port: Option<u16>,
) -> Result<()> {
    tracing::info!("Starting Branch Office");

    let registry = Arc::new(NumberRegistry::open(config.storage.base_dir.clone()).await?);
    let store = Arc::new(
        MemorandumStore::new(config.storage.memorandums_dir.clone(), registry.clone()).await?,
    );

    let app = build_app(
        MemorandumsState { store },
        NumbersState { registry },
        &config.server.cors_origins,
    );

    let addr = format!(
        "{}:{}",
        host.unwrap_or(config.server.host),
        port.unwrap_or(config.server.port)
    );
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Branch Office stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    tracing::info!("Shutting down...");
}

async fn run_doctor(config: &BranchOfficeConfig, config_path: Option<&Path>) -> Result<()> {
    println!("Branch Office Doctor");
    println!("====================");
    println!();

    println!("Checking configuration...");
    match config_path {
        Some(path) => println!("  ✓ Loaded {}", path.display()),
        None => println!("  ℹ No configuration file found (using defaults)"),
    }
    println!();

    println!("Checking storage...");
    match NumberRegistry::open(config.storage.base_dir.clone()).await {
        Ok(registry) => {
            println!("  ✓ Number registry at {}", config.storage.base_dir.display());
            for kind in DocumentKind::ALL {
                for branch in OfficeBranch::ALL {
                    if let Some(last) = registry.last(kind, branch).await {
                        println!("    {:<16} {:<9} last {}", kind.as_str(), branch.as_str(), last);
                    }
                }
            }
        }
        Err(e) => println!("  ✗ Number registry: {}", e),
    }
    match tokio::fs::create_dir_all(&config.storage.memorandums_dir).await {
        Ok(()) => println!(
            "  ✓ Memorandums at {}",
            config.storage.memorandums_dir.display()
        ),
        Err(e) => println!("  ✗ Memorandums directory: {}", e),
    }
    println!();

    Ok(())
}

fn show_config(config: Option<&BranchOfficeConfig>) -> Result<()> {
    let config = config.cloned().unwrap_or_default();
    let toml = toml::to_string_pretty(&config)?;
    println!("{}", toml);
    Ok(())
}
