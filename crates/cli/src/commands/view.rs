//! Derived view dump command

use anyhow::Result;
use clap::ValueEnum;
use dd_truth::GroundTruthStore;
use serde_json::{Value, json};
use tracing::warn;

/// Which derived view to print.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ViewKind {
  /// Cube Test: doc → subtopic → summed rating
  Ct,
  /// Cube Test bound: bounded doc relevance and binary subtopic relevance
  CtBound,
  /// Session DCG: doc → total rating
  Sdcg,
  /// Expected Utility: doc → nuggets, nugget → rating, doc lengths
  Eu,
  /// Expected Utility bound: nugget → docs, nugget → rating, doc lengths
  EuBound,
  /// Recall: subtopic, doc and nugget sets
  Recall,
}

pub fn render_view(store: &GroundTruthStore, topic_id: &str, kind: ViewKind) -> Result<Value> {
  let value = match kind {
    ViewKind::Ct => serde_json::to_value(store.ct_truth(topic_id))?,
    ViewKind::CtBound => serde_json::to_value(store.ct_bound_truth(topic_id))?,
    ViewKind::Sdcg => json!({ "doc_rating": store.sdcg_truth(topic_id) }),
    ViewKind::Eu => serde_json::to_value(store.eu_truth(topic_id))?,
    ViewKind::EuBound => serde_json::to_value(store.eu_bound_truth(topic_id))?,
    ViewKind::Recall => serde_json::to_value(store.recall_truth(topic_id))?,
  };
  Ok(value)
}

pub fn cmd_view(store: &GroundTruthStore, topic_id: &str, kind: ViewKind) -> Result<()> {
  if store.topic(topic_id).is_none() {
    warn!(topic_id, "unknown topic, view will be empty");
  }
  let value = render_view(store, topic_id, kind)?;
  println!("{}", serde_json::to_string_pretty(&value)?);
  Ok(())
}
