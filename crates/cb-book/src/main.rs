//! contact-book: in-memory address book
//!
//! Usage:
//!   contact-book                     - Start the interactive REPL
//!   contact-book --execute <command> - Run one command and exit
//!   contact-book --help              - Show help

mod cli;
mod command;
mod error;
mod outcome;

use cb_contacts::{ContactRegistry, SharedContactRegistry};
use cb_core::{Config, DEFAULT_CONFIG_FILE, SeedContact};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Run mode
#[derive(Debug, PartialEq, Eq)]
enum RunMode {
    /// Interactive REPL
    Cli,
    /// Run a single command
    Execute(String),
    /// Show help
    Help,
    /// Show version
    Version,
}

/// Parsed command line
#[derive(Debug, PartialEq, Eq)]
struct Args {
    mode: RunMode,
    config_path: Option<PathBuf>,
    no_seed: bool,
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = parse_args(std::env::args().skip(1))?;

    match args.mode {
        RunMode::Help => {
            print_help();
            return Ok(());
        }
        RunMode::Version => {
            println!("contact-book {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        _ => {}
    }

    // Load .env file
    dotenvy::dotenv().ok();

    let config_source = config_source(args.config_path.as_deref());
    let config = match &args.config_path {
        Some(path) => Config::from_toml_file(path),
        None => Config::load(),
    }
    .map_err(|e| anyhow::anyhow!("Config error: {}", e))?;

    // Logs to stderr, command output to stdout
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(&config.log.filter))?,
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("Loaded configuration from {}", config_source);

    let seeds = if args.no_seed {
        &[][..]
    } else {
        config.seed.active_contacts()
    };
    let registry = seed_registry(seeds);

    tracing::info!("Registry ready with {} contacts", registry.len().await);

    match args.mode {
        RunMode::Execute(input) => {
            if !cli::run_execute(registry, &input, args.json).await {
                std::process::exit(1);
            }
            Ok(())
        }
        _ => cli::run_cli(registry, config.cli.banner).await,
    }
}

/// Build the start-up registry from seed contacts, in order
fn seed_registry(seeds: &[SeedContact]) -> SharedContactRegistry {
    let mut registry = ContactRegistry::new();
    for seed in seeds {
        registry.add(seed.name.as_str(), seed.email.as_str(), seed.phone.as_str());
    }
    SharedContactRegistry::from_registry(registry)
}

/// Where the configuration comes from, for the start-up log
fn config_source(explicit: Option<&Path>) -> String {
    match explicit {
        Some(path) => path.display().to_string(),
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => DEFAULT_CONFIG_FILE.to_string(),
        None => "defaults and environment".to_string(),
    }
}

/// Parse command line arguments
fn parse_args<I>(args: I) -> anyhow::Result<Args>
where
    I: IntoIterator<Item = String>,
{
    let mut parsed = Args {
        mode: RunMode::Cli,
        config_path: None,
        no_seed: false,
        json: false,
    };

    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--help" | "-h" => return Ok(Args { mode: RunMode::Help, ..parsed }),
            "--version" | "-v" => return Ok(Args { mode: RunMode::Version, ..parsed }),
            "--execute" | "-e" => {
                let command = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("{} requires a command", arg))?;
                parsed.mode = RunMode::Execute(command);
            }
            "--config" | "-c" => {
                let path = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("{} requires a path", arg))?;
                parsed.config_path = Some(PathBuf::from(path));
            }
            "--no-seed" => parsed.no_seed = true,
            "--json" => parsed.json = true,
            other => anyhow::bail!("Unknown argument: {} (see --help)", other),
        }
    }

    Ok(parsed)
}

/// Print help message
fn print_help() {
    println!("contact-book - in-memory address book");
    println!();
    println!("Usage:");
    println!("  contact-book                      Start the interactive REPL");
    println!("  contact-book -e, --execute <cmd>  Run one command (e.g. \"/search ali\") and exit");
    println!("  contact-book -c, --config <path>  Use a config file instead of ./contact-book.toml");
    println!("  contact-book --no-seed            Start with an empty address book");
    println!("  contact-book --json               Print --execute results as JSON");
    println!("  contact-book -h, --help           Show this help message");
    println!("  contact-book -v, --version        Show version");
    println!();
    println!("Environment Variables:");
    println!("  CONTACT_BOOK_LOG     Log filter (default: warn, RUST_LOG wins)");
    println!("  CONTACT_BOOK_SEED    Add the configured demo contacts (default: true)");
    println!("  CONTACT_BOOK_BANNER  Show the welcome banner (default: true)");
}
