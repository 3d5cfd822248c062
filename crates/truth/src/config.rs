//! Configuration for loading ground truth.
//!
//! A TOML file with three parts: the tag vocabulary of the annotation tree,
//! default input paths, and the log level used by the command-line tool.
//!
//! ```toml
//! log_level = "info"
//!
//! [schema]
//! manual_marker = "MANUAL"
//!
//! [paths]
//! truth = "data/trec_dd_16/truth/dynamic-domain-2016-truth-data.xml"
//! doc_lengths = "data/trec_dd_16/doc_len.json"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::level_filters::LevelFilter;
use tracing::warn;

use crate::error::Result;

// ============================================================================
// Schema Configuration
// ============================================================================

/// Element and attribute names of the annotation tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaConfig {
  /// Tag of topic children that are subtopics (other children are skipped)
  pub subtopic_tag: String,
  /// Identifying attribute of topics, subtopics and passages
  pub id_attribute: String,
  /// Passage field naming the owning document
  pub docno_tag: String,
  /// Passage field carrying the integer rating
  pub rating_tag: String,
  /// Passage field carrying the annotation type
  pub type_tag: String,
  /// Annotation type value that starts a new nugget
  pub manual_marker: String,
}

impl Default for SchemaConfig {
  fn default() -> Self {
    Self {
      subtopic_tag: "subtopic".to_string(),
      id_attribute: "id".to_string(),
      docno_tag: "docno".to_string(),
      rating_tag: "rating".to_string(),
      type_tag: "type".to_string(),
      manual_marker: "MANUAL".to_string(),
    }
  }
}

// ============================================================================
// Path Configuration
// ============================================================================

/// Default input locations, overridable from the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
  /// Annotation XML file
  #[serde(skip_serializing_if = "Option::is_none")]
  pub truth: Option<PathBuf>,
  /// Document length JSON file
  #[serde(skip_serializing_if = "Option::is_none")]
  pub doc_lengths: Option<PathBuf>,
}

// ============================================================================
// Main Configuration
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
  /// Log level: error, warn, info, debug, trace
  pub log_level: String,
  pub schema: SchemaConfig,
  pub paths: PathsConfig,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      log_level: "info".to_string(),
      schema: SchemaConfig::default(),
      paths: PathsConfig::default(),
    }
  }
}

impl Config {
  /// Load a config file, failing on unreadable or malformed TOML.
  pub fn load(path: &Path) -> Result<Self> {
    let content = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
  }

  /// Load a config file, falling back to defaults when it is missing or invalid.
  pub fn load_optional(path: &Path) -> Self {
    if !path.exists() {
      return Self::default();
    }
    match Self::load(path) {
      Ok(config) => config,
      Err(e) => {
        warn!(path = %path.display(), error = %e, "invalid config, using defaults");
        Self::default()
      }
    }
  }

  /// `log_level` as a filter; unknown names fall back to info.
  pub fn level_filter(&self) -> LevelFilter {
    self.log_level.parse().unwrap_or(LevelFilter::INFO)
  }
}
