//! Store-wide integrity checks on nugget annotations.
//!
//! Both checks are advisory: findings are logged and returned, never raised.
//! - a nugget must belong to exactly one subtopic
//! - a nugget should be recorded at most once per document

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::store::{DocumentId, GroundTruthStore, NuggetId, SubtopicId};

/// A nugget attached to more than one subtopic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NuggetSubtopicConflict {
  pub nugget_id: NuggetId,
  /// Every distinct subtopic the nugget appears under, first-seen order
  pub subtopic_ids: Vec<SubtopicId>,
}

/// A (nugget, document) pair recorded more than once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateMembership {
  pub nugget_id: NuggetId,
  pub document_id: DocumentId,
  pub occurrences: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsistencyReport {
  pub subtopic_conflicts: Vec<NuggetSubtopicConflict>,
  pub duplicate_memberships: Vec<DuplicateMembership>,
}

impl ConsistencyReport {
  pub fn is_clean(&self) -> bool {
    self.subtopic_conflicts.is_empty() && self.duplicate_memberships.is_empty()
  }

  pub fn violation_count(&self) -> usize {
    self.subtopic_conflicts.len() + self.duplicate_memberships.len()
  }
}

impl GroundTruthStore {
  /// Check nugget/subtopic uniqueness and nugget/document duplication across
  /// every topic in one pass.
  pub fn check_consistency(&self) -> ConsistencyReport {
    let mut nugget_subtopics: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    let mut memberships: BTreeMap<(&str, &str), usize> = BTreeMap::new();

    for topic in self.topics().values() {
      for (subtopic_id, subtopic) in topic.subtopics() {
        for (doc_no, passage) in subtopic.passages() {
          let nugget_id = passage.fact.nugget_id.as_str();

          let subtopics = nugget_subtopics.entry(nugget_id).or_default();
          if !subtopics.contains(&subtopic_id.as_str()) {
            subtopics.push(subtopic_id);
          }

          *memberships.entry((nugget_id, doc_no)).or_default() += 1;
        }
      }
    }

    let subtopic_conflicts: Vec<NuggetSubtopicConflict> = nugget_subtopics
      .into_iter()
      .filter(|(_, subtopics)| subtopics.len() > 1)
      .map(|(nugget_id, subtopics)| {
        warn!(nugget_id, subtopics = ?subtopics, "nugget belongs to several subtopics");
        NuggetSubtopicConflict {
          nugget_id: nugget_id.to_string(),
          subtopic_ids: subtopics.into_iter().map(String::from).collect(),
        }
      })
      .collect();

    let duplicate_memberships: Vec<DuplicateMembership> = memberships
      .into_iter()
      .filter(|(_, occurrences)| *occurrences > 1)
      .map(|((nugget_id, doc_no), occurrences)| {
        warn!(nugget_id, doc_no, occurrences, "nugget recorded repeatedly in document");
        DuplicateMembership {
          nugget_id: nugget_id.to_string(),
          document_id: doc_no.to_string(),
          occurrences,
        }
      })
      .collect();

    debug!(
      subtopic_conflicts = subtopic_conflicts.len(),
      duplicate_memberships = duplicate_memberships.len(),
      "consistency check finished"
    );

    ConsistencyReport {
      subtopic_conflicts,
      duplicate_memberships,
    }
  }
}
