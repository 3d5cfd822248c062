use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::store::{DocumentId, GroundTruthStore, NuggetId, SubtopicId};

/// Everything a recall metric needs to know is relevant for a topic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecallTruth {
  pub subtopics: BTreeSet<SubtopicId>,
  pub docs: BTreeSet<DocumentId>,
  pub nuggets: BTreeSet<NuggetId>,
  /// doc_no → subtopics it is relevant to
  pub doc_subtopics: BTreeMap<DocumentId, BTreeSet<SubtopicId>>,
  /// doc_no → nugget ids, one entry per passage
  pub doc_nuggets: BTreeMap<DocumentId, Vec<NuggetId>>,
}

impl GroundTruthStore {
  pub fn recall_truth(&self, topic_id: &str) -> RecallTruth {
    let mut truth = RecallTruth::default();

    for (subtopic_id, subtopic) in self.subtopics_of(topic_id) {
      truth.subtopics.insert(subtopic_id.clone());
      for (doc_no, doc) in subtopic.documents() {
        truth.docs.insert(doc_no.clone());
        truth
          .doc_subtopics
          .entry(doc_no.clone())
          .or_default()
          .insert(subtopic_id.clone());

        let nuggets = truth.doc_nuggets.entry(doc_no.clone()).or_default();
        for passage in doc.passages() {
          truth.nuggets.insert(passage.fact.nugget_id.clone());
          nuggets.push(passage.fact.nugget_id.clone());
        }
      }
    }

    truth
  }
}
