mod cmd;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::output::{OutputFormat, Tone, status};

/// taskweave - compose named build tasks from declared sources
#[derive(Parser)]
#[command(name = "weave")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  /// Path to the configuration file (default: weave.toml, or $WEAVE_CONFIG)
  #[arg(short, long, global = true)]
  config: Option<PathBuf>,

  /// Log filter, e.g. "info" or "taskweave_lib=debug" (overrides RUST_LOG)
  #[arg(long, global = true)]
  log_level: Option<String>,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// List the tasks generated from the configuration
  List {
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
  },

  /// Run one or more tasks
  Run {
    /// Task names
    #[arg(required = true)]
    tasks: Vec<String>,

    /// Run the tasks concurrently instead of one after another
    #[arg(short, long)]
    parallel: bool,
  },

  /// Write a starter configuration file
  Init {
    /// Directory to write weave.toml into
    #[arg(default_value = ".")]
    dir: PathBuf,

    /// Overwrite an existing weave.toml
    #[arg(short, long)]
    force: bool,
  },
}

fn init_logging(verbose: bool, log_level: Option<&str>) {
  let filter = match log_level {
    Some(level) => EnvFilter::new(level),
    None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" })),
  };

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();
}

fn run(cli: Cli) -> Result<()> {
  let config = cli.config.as_deref();

  match cli.command {
    Commands::List { format } => cmd::cmd_list(config, format, cli.verbose),
    Commands::Run { tasks, parallel } => cmd::cmd_run(config, &tasks, parallel),
    Commands::Init { dir, force } => cmd::cmd_init(&dir, force),
  }
}

fn main() -> ExitCode {
  let cli = Cli::parse();
  init_logging(cli.verbose, cli.log_level.as_deref());

  match run(cli) {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      status(Tone::Fail, &format!("{e:#}"));
      ExitCode::FAILURE
    }
  }
}
