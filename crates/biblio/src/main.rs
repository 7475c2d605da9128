use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{anyhow, Result};
use biblio_config::{get_config_path, get_log_dir, get_log_path, Config};
use biblio_store::RecordStore;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::console::{ConsoleDriver, DisplayOptions};

mod console;

const MAIN_HELP: &str = r#"Biblio is a console library catalog manager. It keeps a catalog of
registered users and books for the lifetime of the session and lets you
register, list and search them from a simple numbered menu.

Run `biblio` with no arguments to start the interactive console. Books can be
searched by any part of their title, and each book can be marked as available
or not available by its ISBN.

Nothing is saved when the program exits."#;

#[derive(Parser)]
#[command(name = "biblio")]
#[command(about = MAIN_HELP)]
#[command(version)]
struct Cli {
    #[arg(long, global = true, help = "Print records as JSON")]
    json: bool,

    #[arg(long, global = true, help = "Path to an alternate config file")]
    config: Option<PathBuf>,

    #[arg(long, global = true, help = "Log level (overrides the config file)")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Start the interactive console (default).")]
    Run,

    #[command(about = "Print config file location and contents.")]
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Config => {
            let config_path = cli.config.unwrap_or_else(get_config_path);
            handle_config(&config_path)
        }
        Commands::Run => {
            let config = match &cli.config {
                Some(path) => Config::load_from(path)?,
                None => Config::load()?,
            };
            let filter = build_filter(cli.log_level.as_deref(), &config.log.level)?;
            init_logging(filter)?;
            handle_run(&config, cli.json)
        }
    }
}

/// `--log-level` wins over `RUST_LOG`, which wins over the config file.
fn build_filter(cli_level: Option<&str>, config_level: &str) -> Result<EnvFilter> {
    if let Some(level) = cli_level {
        return Ok(EnvFilter::default().add_directive(parse_level(level)?.into()));
    }
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    Ok(EnvFilter::default().add_directive(parse_level(config_level)?.into()))
}

fn parse_level(level: &str) -> Result<LevelFilter> {
    level.trim().parse::<LevelFilter>().map_err(|_| {
        anyhow!(
            "Invalid log level '{}' (expected off, error, warn, info, debug or trace)",
            level
        )
    })
}

fn init_logging(filter: EnvFilter) -> Result<()> {
    let log_dir = get_log_dir();
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(get_log_path())?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .init();

    Ok(())
}

fn handle_run(config: &Config, json: bool) -> Result<()> {
    let display = DisplayOptions {
        date_format: config.display.date_format.clone(),
        json: json || config.display.json,
    };

    let mut store = RecordStore::new();
    {
        let stdin = std::io::stdin();
        let stdout = std::io::stdout();
        let mut driver = ConsoleDriver::new(&mut store, stdin.lock(), stdout.lock(), display);
        driver.run()?;
    }

    info!(
        users = store.user_count(),
        books = store.book_count(),
        "Catalog discarded on exit"
    );
    Ok(())
}

fn handle_config(config_path: &Path) -> Result<()> {
    println!("Config file: {}", config_path.display());
    println!();

    if config_path.exists() {
        println!("{}", std::fs::read_to_string(config_path)?);
    } else {
        println!("(file does not exist, using defaults)");
    }
    Ok(())
}
