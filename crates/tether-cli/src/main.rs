//! # tether
//!
//! Checks the dependencies declared by installed plugins against what is
//! actually installed, and prints the commands that would fix any gaps.
//!
//! This is the main entry point. It parses arguments, sets up logging and
//! panic reporting, layers the configuration and dispatches to a command.

use std::process::ExitCode;

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use tether_config::{CliOverrides, ColorMode, ConfigLoader};
use tether_core::error::TetherResult;

mod commands;
mod output;

use commands::CommandContext;
use output::colors::ColorSupport;
use output::errors::ErrorFormatter;
use output::OutputHandler;

/// Resolve dependencies between installed plugins
#[derive(Parser)]
#[command(name = "tether", version, about = "Plugin dependency resolver")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Plugins directory holding the installed and origin registries
    #[arg(long, global = true, value_name = "DIR")]
    pub plugins_dir: Option<Utf8PathBuf>,

    /// Config file to use instead of ~/.tether/config.toml
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<Utf8PathBuf>,

    /// When to color output
    #[arg(long, global = true, value_enum, value_name = "WHEN")]
    pub color: Option<ColorChoice>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Show installed plugins, the dependency tree and suggested fixes (default)
    Resolve,
    /// Show the dependency tree only
    Tree,
    /// Print the full report as JSON
    Json,
    /// Show version information
    Version,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorChoice {
    Auto,
    Always,
    Never,
}

impl From<ColorChoice> for ColorMode {
    fn from(choice: ColorChoice) -> Self {
        match choice {
            ColorChoice::Auto => ColorMode::Auto,
            ColorChoice::Always => ColorMode::Always,
            ColorChoice::Never => ColorMode::Never,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.log_json);
    setup_panic_handler();

    info!("Starting tether v{}", env!("CARGO_PKG_VERSION"));

    match run_cli(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprint!("{}", ErrorFormatter::default().format_error(&e));
            ExitCode::FAILURE
        },
    }
}

fn run_cli(cli: Cli) -> TetherResult<()> {
    let mut loader = ConfigLoader::new();
    if let Some(path) = cli.config {
        loader = loader.with_config_file(path);
    }

    let overrides = CliOverrides {
        plugins_dir: cli.plugins_dir,
        color: cli.color.map(ColorMode::from),
    };
    let config = loader.load(&overrides)?;
    info!("Using plugins directory {}", config.plugins_dir);

    let output = OutputHandler::new(ColorSupport::from_mode(config.color));
    let ctx = CommandContext::new(config, output);

    commands::dispatch_command(cli.command.unwrap_or(Commands::Resolve), &ctx)
}

fn setup_logging(verbose: bool, json: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "tether={level},tether_config={level},tether_registry={level},tether_resolver={level}"
        ))
    });

    // stdout carries reports, so logs always go to stderr
    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }
}

fn setup_panic_handler() {
    std::panic::set_hook(Box::new(|panic_info| {
        error!("tether encountered an unexpected error: {}", panic_info);
        eprintln!("tether crashed! This is a bug.");
        eprintln!("Please report this at: {}/issues", env!("CARGO_PKG_REPOSITORY"));
        eprintln!("Error: {}", panic_info);
    }));
}
