//! Expected Utility views.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::doc_lengths::DocLengths;
use crate::store::{DocumentId, GroundTruthStore, NuggetId, TopicId};

/// A nugget seen with a different rating than the one already recorded.
///
/// A nugget's grade should not depend on where it appears, so any conflict
/// points at an annotation error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingConflict {
  pub topic_id: TopicId,
  pub nugget_id: NuggetId,
  /// Document of the occurrence that disagreed
  pub document_id: DocumentId,
  /// Rating recorded before this occurrence
  pub recorded: u32,
  /// Rating of this occurrence (the one kept)
  pub observed: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpectedUtilityTruth<'a> {
  /// doc_no → nugget ids, one entry per passage
  pub doc_nuggets: BTreeMap<DocumentId, Vec<NuggetId>>,
  /// nugget_id → rating (last occurrence wins)
  pub nugget_rating: BTreeMap<NuggetId, u32>,
  pub doc_lengths: &'a DocLengths,
  /// Nuggets whose rating changed between occurrences
  pub rating_conflicts: Vec<RatingConflict>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpectedUtilityBoundTruth<'a> {
  /// nugget_id → documents containing it, first-seen order, no repeats
  pub nugget_docs: BTreeMap<NuggetId, Vec<DocumentId>>,
  /// nugget_id → rating (last occurrence wins)
  pub nugget_rating: BTreeMap<NuggetId, u32>,
  pub doc_lengths: &'a DocLengths,
}

impl GroundTruthStore {
  /// Nuggets per document and rating per nugget for Expected Utility.
  pub fn eu_truth(&self, topic_id: &str) -> ExpectedUtilityTruth<'_> {
    let mut doc_nuggets: BTreeMap<DocumentId, Vec<NuggetId>> = BTreeMap::new();
    let mut nugget_rating: BTreeMap<NuggetId, u32> = BTreeMap::new();
    let mut rating_conflicts = Vec::new();

    for subtopic in self.subtopics_of(topic_id).values() {
      for (doc_no, doc) in subtopic.documents() {
        for passage in doc.passages() {
          let fact = &passage.fact;
          doc_nuggets.entry(doc_no.clone()).or_default().push(fact.nugget_id.clone());

          if let Some(recorded) = nugget_rating.insert(fact.nugget_id.clone(), fact.rating)
            && recorded != fact.rating
          {
            warn!(
              topic_id,
              nugget_id = %fact.nugget_id,
              doc_no = %doc_no,
              recorded,
              observed = fact.rating,
              "nugget rated inconsistently"
            );
            rating_conflicts.push(RatingConflict {
              topic_id: topic_id.to_string(),
              nugget_id: fact.nugget_id.clone(),
              document_id: doc_no.clone(),
              recorded,
              observed: fact.rating,
            });
          }
        }
      }
    }

    ExpectedUtilityTruth {
      doc_nuggets,
      nugget_rating,
      doc_lengths: self.doc_lengths(),
      rating_conflicts,
    }
  }

  /// Documents per nugget and rating per nugget for the Expected Utility bound.
  pub fn eu_bound_truth(&self, topic_id: &str) -> ExpectedUtilityBoundTruth<'_> {
    let mut nugget_docs: BTreeMap<NuggetId, Vec<DocumentId>> = BTreeMap::new();
    let mut nugget_rating: BTreeMap<NuggetId, u32> = BTreeMap::new();

    for subtopic in self.subtopics_of(topic_id).values() {
      for (doc_no, doc) in subtopic.documents() {
        for passage in doc.passages() {
          let fact = &passage.fact;
          let docs = nugget_docs.entry(fact.nugget_id.clone()).or_default();
          if !docs.contains(doc_no) {
            docs.push(doc_no.clone());
          }
          nugget_rating.insert(fact.nugget_id.clone(), fact.rating);
        }
      }
    }

    ExpectedUtilityBoundTruth {
      nugget_docs,
      nugget_rating,
      doc_lengths: self.doc_lengths(),
    }
  }

  /// Run the Expected Utility view for every topic and gather its rating conflicts.
  pub fn self_check(&self) -> Vec<RatingConflict> {
    self
      .topic_ids()
      .flat_map(|topic_id| self.eu_truth(topic_id).rating_conflicts)
      .collect()
  }
}
