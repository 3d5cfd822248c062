use std::collections::BTreeMap;

use crate::store::{DocumentId, GroundTruthStore};

impl GroundTruthStore {
  /// Gain source for session DCG: every passage rating of a document summed
  /// across all subtopics. Discounting is left to the scorer.
  pub fn sdcg_truth(&self, topic_id: &str) -> BTreeMap<DocumentId, u64> {
    let mut doc_rating: BTreeMap<DocumentId, u64> = BTreeMap::new();
    for subtopic in self.subtopics_of(topic_id).values() {
      for (doc_no, doc) in subtopic.documents() {
        *doc_rating.entry(doc_no.clone()).or_default() += doc.ratings().map(u64::from).sum::<u64>();
      }
    }
    doc_rating
  }
}
