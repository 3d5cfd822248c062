//! Logging setup for the CLI

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Initialize console logging on stderr so stdout stays clean for JSON.
///
/// `--verbose` forces debug; otherwise the configured level applies. RUST_LOG
/// overrides both.
pub fn init_cli_logging(verbose: bool, configured: LevelFilter) {
  let level = if verbose { LevelFilter::DEBUG } else { configured };

  let env_filter = EnvFilter::builder()
    .with_default_directive(level.into())
    .from_env_lossy();

  tracing_subscriber::fmt()
    .with_env_filter(env_filter)
    .with_target(false)
    .with_writer(std::io::stderr)
    .init();
}
