//! Summary commands

use anyhow::Result;
use dd_truth::GroundTruthStore;

pub fn cmd_stats(store: &GroundTruthStore, json: bool) -> Result<()> {
  let stats = store.stats();
  if json {
    println!("{}", serde_json::to_string_pretty(&stats)?);
  } else {
    println!("{stats}");
  }
  Ok(())
}

pub fn cmd_topics(store: &GroundTruthStore) -> Result<()> {
  for (topic_id, topic) in store.topics() {
    let docs = store.recall_truth(topic_id).docs.len();
    println!("{topic_id}\t{} subtopics\t{docs} documents", topic.subtopics().len());
  }
  Ok(())
}
