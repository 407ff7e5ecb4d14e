//! archan CLI tool.
//!
//! Usage:
//! ```bash
//! archan [check] [OPTIONS] [PATH]
//! archan validate [PATH]
//! archan list-plugins
//! archan init
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;

/// archan: analyze an architecture's dependency matrix against secure design principles
#[derive(Parser)]
#[command(name = "archan")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the configured analyses (default)
    Check(CheckArgs),

    /// Load and validate the configuration without running it
    Validate {
        /// Project directory (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// List available providers and checkers
    ListPlugins,

    /// Initialize configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

#[derive(clap::Args, Debug, Default)]
struct CheckArgs {
    /// Project directory (default: current directory)
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Output format
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,

    /// CSV file holding a DSM to check instead of the configured analyses (`-` for stdin)
    #[arg(short, long)]
    input: Option<String>,

    /// Separator between entity and category in the input's row names
    #[arg(long)]
    categories_delimiter: Option<String>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Ignore any configuration file
    #[arg(long)]
    no_config: bool,
}

/// Output format for reports.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output.
    Json,
    /// One line per checker result.
    Csv,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        None => check(
            CheckArgs {
                path: PathBuf::from("."),
                ..CheckArgs::default()
            },
            cli.config,
        ),
        Some(Commands::Check(args)) => check(args, cli.config),
        Some(Commands::Validate { path }) => {
            let source = config_resolver::resolve(&path, cli.config.as_deref());
            commands::validate::run(&source)
        }
        Some(Commands::ListPlugins) => {
            commands::list_plugins::run();
            Ok(())
        }
        Some(Commands::Init { force }) => commands::init::run(force),
    }
}

fn check(args: CheckArgs, config: Option<PathBuf>) -> Result<()> {
    let source = config_resolver::resolve(&args.path, config.as_deref());
    let success = commands::check::run(&commands::check::CheckOptions {
        path: &args.path,
        format: args.format,
        input: args.input.as_deref(),
        categories_delimiter: args.categories_delimiter.as_deref(),
        color: !args.no_color,
        no_config: args.no_config,
        source: &source,
    })?;

    // Exit with error code if a blocking failure was reported
    if !success {
        std::process::exit(1);
    }
    Ok(())
}
