//! CLI command implementations

mod check;
mod stats;
mod view;

use std::path::Path;

use anyhow::{Context, Result, bail};
use dd_truth::{Config, GroundTruthStore};

pub use check::cmd_check;
pub use stats::{cmd_stats, cmd_topics};
pub use view::{ViewKind, cmd_view};

/// Load the store, preferring command-line paths over configured ones.
pub fn open_store(config: &Config, truth: Option<&Path>, doc_lengths: Option<&Path>) -> Result<GroundTruthStore> {
  let Some(truth_path) = truth.or(config.paths.truth.as_deref()) else {
    bail!("No truth file given; pass --truth or set paths.truth in the config");
  };
  let doc_lengths_path = doc_lengths.or(config.paths.doc_lengths.as_deref());

  GroundTruthStore::open_with_schema(truth_path, doc_lengths_path, &config.schema)
    .with_context(|| format!("Failed to load ground truth from {}", truth_path.display()))
}
