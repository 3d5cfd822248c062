//! Summary statistics about the ground truth.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::store::{DocumentId, GroundTruthStore};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TruthStats {
  pub topic_num: usize,
  /// Subtopics summed over all topics
  pub subtopic_num: usize,
  pub avg_subtopics_per_topic: f64,
  /// Distinct relevant documents over the whole store
  pub relevant_docs: BTreeSet<DocumentId>,
  pub total_relevant_docs: usize,
  /// Distinct documents per topic, averaged over topics
  pub avg_docs_per_topic: f64,
}

impl GroundTruthStore {
  pub fn stats(&self) -> TruthStats {
    let mut subtopic_num = 0;
    let mut per_topic_docs = 0;
    let mut relevant_docs = BTreeSet::new();

    for topic in self.topics().values() {
      let mut topic_docs: BTreeSet<&str> = BTreeSet::new();
      for subtopic in topic.subtopics().values() {
        subtopic_num += 1;
        for doc_no in subtopic.documents().keys() {
          topic_docs.insert(doc_no);
          relevant_docs.insert(doc_no.clone());
        }
      }
      per_topic_docs += topic_docs.len();
    }

    let topic_num = self.topics().len();
    let average = |total: usize| {
      if topic_num == 0 {
        0.0
      } else {
        total as f64 / topic_num as f64
      }
    };

    TruthStats {
      topic_num,
      subtopic_num,
      avg_subtopics_per_topic: average(subtopic_num),
      total_relevant_docs: relevant_docs.len(),
      relevant_docs,
      avg_docs_per_topic: average(per_topic_docs),
    }
  }
}

impl fmt::Display for TruthStats {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    writeln!(f, "Topic num: {}", self.topic_num)?;
    writeln!(f, "Subtopic num: {}", self.subtopic_num)?;
    writeln!(f, "Avg subtopic per topic: {}", self.avg_subtopics_per_topic)?;
    writeln!(f, "Total Relevant Documents: {}", self.total_relevant_docs)?;
    write!(f, "Avg doc per topic: {}", self.avg_docs_per_topic)
  }
}
