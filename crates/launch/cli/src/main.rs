//! Launch CLI - deploy a source directory to a rack
//!
//! `launch deploy [DIR]` makes sure the app exists, builds the directory
//! into a release, promotes it and waits for its endpoints to answer.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod error;
mod output;

use commands::deploy::{self, DeployArgs, Overrides, Settings};
use config::LaunchConfig;
use error::CliResult;

/// Launch CLI application
#[derive(Parser)]
#[command(name = "launch")]
#[command(about = "Launch - deploy apps to a rack", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "LAUNCH_CONFIG")]
    config: Option<PathBuf>,

    /// Rack address
    #[arg(short = 'H', long, global = true, env = "LAUNCH_HOST")]
    host: Option<String>,

    /// Rack password
    #[arg(short, long, global = true, env = "LAUNCH_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Give up on the whole deploy after this many seconds
    #[arg(short, long, global = true, value_name = "SECS")]
    timeout: Option<u64>,

    /// Give up on each status wait after this many seconds
    #[arg(long, global = true, value_name = "SECS")]
    poll_timeout: Option<u64>,

    /// Attempts per endpoint before the deploy fails (default: wait forever)
    #[arg(long, global = true, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    probe_attempts: Option<u32>,

    /// Report endpoints that never answer instead of failing
    #[arg(long, global = true, requires = "probe_attempts")]
    best_effort: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand)]
enum Commands {
    /// Deploy a directory
    Deploy(DeployArgs),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    if let Err(e) = run(cli).await {
        output::print_error(&e.to_string());
        if let Some(hint) = e.hint() {
            eprintln!("  {}", hint);
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> CliResult<()> {
    let config = LaunchConfig::load(cli.config.as_deref())?;
    let settings = Settings::resolve(
        &config,
        Overrides {
            host: cli.host,
            password: cli.password,
            timeout_secs: cli.timeout,
            poll_timeout_secs: cli.poll_timeout,
            probe_attempts: cli.probe_attempts,
            best_effort: cli.best_effort,
        },
    );

    match cli.command {
        Commands::Deploy(args) => deploy::execute(args, &settings).await,
    }
}
