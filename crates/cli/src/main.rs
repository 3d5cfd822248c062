//! dd-truth CLI - inspect TREC Dynamic Domain ground truth

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dd_truth::{Config, TruthError};
use tracing::warn;

mod commands;
mod format;
mod logging;

use commands::{ViewKind, cmd_check, cmd_stats, cmd_topics, cmd_view, open_store};
use logging::init_cli_logging;

/// Config file looked up in the working directory when `--config` is absent
const DEFAULT_CONFIG_FILE: &str = "dd-truth.toml";

#[derive(Parser)]
#[command(name = "dd-truth")]
#[command(about = "Inspect dynamic-domain ground truth and the views derived from it")]
#[command(version)]
#[command(after_help = "\
EXAMPLES:
  dd-truth --truth truth.xml stats                     # Topic/subtopic/document counts
  dd-truth --truth truth.xml check --strict            # Fail on annotation problems
  dd-truth --truth truth.xml view DD16-1 --kind eu     # Expected Utility input as JSON")]
struct Cli {
  /// Config file (TOML)
  #[arg(short, long, global = true)]
  config: Option<PathBuf>,

  /// Annotation XML file (overrides config)
  #[arg(long, global = true)]
  truth: Option<PathBuf>,

  /// Document length JSON file (overrides config)
  #[arg(long, global = true)]
  doc_lengths: Option<PathBuf>,

  /// Enable verbose logging
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Show summary statistics
  Stats {
    /// Output as JSON
    #[arg(long)]
    json: bool,
  },
  /// Run nugget integrity checks
  Check {
    /// Exit with status 1 when any problem is found
    #[arg(long)]
    strict: bool,
    /// Output as JSON
    #[arg(long)]
    json: bool,
  },
  /// Print one derived view of a topic as JSON
  View {
    /// Topic ID (e.g. DD16-1)
    topic: String,
    /// Which view to print
    #[arg(short, long, value_enum, default_value_t = ViewKind::Ct)]
    kind: ViewKind,
  },
  /// List topics with their subtopic counts
  Topics,
}

/// An explicit `--config` must load. The working-directory default may be
/// absent or broken; a broken one is handed back so it can be reported once
/// logging is up.
fn load_config(path: Option<&Path>, default_path: &Path) -> Result<(Config, Option<TruthError>)> {
  if let Some(path) = path {
    let config = Config::load(path).with_context(|| format!("Failed to load config {}", path.display()))?;
    return Ok((config, None));
  }
  if !default_path.exists() {
    return Ok((Config::default(), None));
  }
  match Config::load(default_path) {
    Ok(config) => Ok((config, None)),
    Err(e) => Ok((Config::default(), Some(e))),
  }
}

fn main() -> Result<()> {
  let cli = Cli::parse();

  let (config, config_error) = load_config(cli.config.as_deref(), Path::new(DEFAULT_CONFIG_FILE))?;
  init_cli_logging(cli.verbose, config.level_filter());
  if let Some(e) = config_error {
    warn!(path = DEFAULT_CONFIG_FILE, error = %e, "invalid config, using defaults");
  }

  let store = open_store(&config, cli.truth.as_deref(), cli.doc_lengths.as_deref())?;

  match cli.command {
    Commands::Stats { json } => cmd_stats(&store, json),
    Commands::Check { strict, json } => {
      let clean = cmd_check(&store, json)?;
      if strict && !clean {
        std::process::exit(1);
      }
      Ok(())
    }
    Commands::View { topic, kind } => cmd_view(&store, &topic, kind),
    Commands::Topics => cmd_topics(&store),
  }
}
