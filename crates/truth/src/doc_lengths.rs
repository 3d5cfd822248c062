//! Per-document length table.
//!
//! Loaded from a separate JSON object (`{"doc_no": length, ...}`) and handed
//! to the expected-utility views untouched. An absent table is legal.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocLengths(BTreeMap<String, u64>);

impl DocLengths {
  /// Create an empty table.
  pub fn empty() -> Self {
    Self::default()
  }

  /// Load a table from a JSON object file.
  pub fn load(path: &Path) -> Result<Self> {
    let content = std::fs::read_to_string(path)?;
    Self::from_json(&content)
  }

  pub fn from_json(json: &str) -> Result<Self> {
    Ok(serde_json::from_str(json)?)
  }

  /// Length of a document, if known.
  pub fn get(&self, document_id: &str) -> Option<u64> {
    self.0.get(document_id).copied()
  }

  pub fn contains(&self, document_id: &str) -> bool {
    self.0.contains_key(document_id)
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
    self.0.iter().map(|(k, v)| (k.as_str(), *v))
  }
}

impl<K: Into<String>> FromIterator<(K, u64)> for DocLengths {
  fn from_iter<I: IntoIterator<Item = (K, u64)>>(iter: I) -> Self {
    Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
  }
}
