//! The ground-truth index and its construction.
//!
//! ```text
//! topic_id → subtopic_id → document_id → [passage_id → PassageFact]
//! ```
//!
//! Built once from an [`AnnotationNode`] tree and read-only afterwards. Every
//! level keeps annotation order, so "first seen" and "last wins" in the views
//! follow the order of the truth file. The
//! derived views live in [`crate::views`], the integrity checks in
//! [`crate::checks`] and the summary numbers in [`crate::stats`].

use std::path::Path;
use std::sync::LazyLock;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::SchemaConfig;
use crate::doc_lengths::DocLengths;
use crate::error::{Result, TruthError};
use crate::tree::AnnotationNode;

pub type TopicId = String;
pub type SubtopicId = String;
pub type DocumentId = String;
pub type NuggetId = String;

/// What the index records for one passage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassageFact {
  /// Nugget in effect for the passage ("" before the first manual nugget of a subtopic)
  pub nugget_id: NuggetId,
  /// Relevance grade, always ≥ 1
  pub rating: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Passage {
  pub id: String,
  pub fact: PassageFact,
}

/// Passages of one document under one subtopic, in annotation order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
  passages: Vec<Passage>,
}

impl Document {
  pub fn passages(&self) -> &[Passage] {
    &self.passages
  }

  pub fn ratings(&self) -> impl Iterator<Item = u32> + '_ {
    self.passages.iter().map(|p| p.fact.rating)
  }

  // A repeated passage id replaces the earlier fact but keeps its position.
  fn upsert(&mut self, passage: Passage) {
    match self.passages.iter_mut().find(|p| p.id == passage.id) {
      Some(existing) => *existing = passage,
      None => self.passages.push(passage),
    }
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subtopic {
  documents: IndexMap<DocumentId, Document>,
}

impl Subtopic {
  pub fn documents(&self) -> &IndexMap<DocumentId, Document> {
    &self.documents
  }

  /// Every passage of the subtopic with its document id.
  pub fn passages(&self) -> impl Iterator<Item = (&str, &Passage)> + '_ {
    self
      .documents
      .iter()
      .flat_map(|(doc_no, doc)| doc.passages.iter().map(move |p| (doc_no.as_str(), p)))
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
  subtopics: IndexMap<SubtopicId, Subtopic>,
}

impl Topic {
  pub fn subtopics(&self) -> &IndexMap<SubtopicId, Subtopic> {
    &self.subtopics
  }

  pub fn subtopic(&self, subtopic_id: &str) -> Option<&Subtopic> {
    self.subtopics.get(subtopic_id)
  }
}

/// Running values threaded through the passages of one subtopic.
///
/// Each component changes only when a passage states it explicitly; otherwise
/// the passage inherits whatever the previous passage left behind.
#[derive(Debug, Clone, PartialEq, Eq)]
struct CarryForward {
  document_id: DocumentId,
  rating: u32,
  nugget_id: NuggetId,
}

impl Default for CarryForward {
  fn default() -> Self {
    Self {
      document_id: String::new(),
      rating: 1,
      nugget_id: String::new(),
    }
  }
}

impl CarryForward {
  fn advance(mut self, passage_id: &str, passage: &AnnotationNode, schema: &SchemaConfig) -> Result<Self> {
    for field in &passage.children {
      if field.tag == schema.docno_tag {
        self.document_id = field.text_or_empty().to_string();
      } else if field.tag == schema.rating_tag {
        self.rating = parse_rating(passage_id, field.text_or_empty())?;
      } else if field.tag == schema.type_tag && field.text_or_empty() == schema.manual_marker {
        self.nugget_id = passage_id.to_string();
      }
    }
    Ok(self)
  }

  fn fact(&self) -> PassageFact {
    PassageFact {
      nugget_id: self.nugget_id.clone(),
      rating: self.rating,
    }
  }
}

/// Parse rating text; 0 counts as the minimal positive grade.
fn parse_rating(passage_id: &str, text: &str) -> Result<u32> {
  let rating: u32 = text.trim().parse().map_err(|_| TruthError::InvalidRating {
    passage_id: passage_id.to_string(),
    text: text.to_string(),
  })?;
  Ok(rating.max(1))
}

fn build_subtopic(node: &AnnotationNode, schema: &SchemaConfig) -> Result<Subtopic> {
  let (_, subtopic) = node.children.iter().try_fold(
    (CarryForward::default(), Subtopic::default()),
    |(state, mut subtopic), passage_node| {
      let passage_id = passage_node.required_attribute(&schema.id_attribute)?;
      let state = state.advance(passage_id, passage_node, schema)?;
      subtopic
        .documents
        .entry(state.document_id.clone())
        .or_default()
        .upsert(Passage {
          id: passage_id.to_string(),
          fact: state.fact(),
        });
      Ok::<_, TruthError>((state, subtopic))
    },
  )?;
  Ok(subtopic)
}

/// Immutable ground-truth index plus the document length table.
#[derive(Debug, Clone, Default)]
pub struct GroundTruthStore {
  topics: IndexMap<TopicId, Topic>,
  doc_lengths: DocLengths,
}

impl GroundTruthStore {
  /// Build the store from an annotation tree using the default vocabulary.
  pub fn new(root: &AnnotationNode, doc_lengths: DocLengths) -> Result<Self> {
    Self::with_schema(root, doc_lengths, &SchemaConfig::default())
  }

  /// Build the store from an annotation tree.
  ///
  /// Every child of the root is a domain and every child of a domain is a
  /// topic. Topic children tagged as subtopics are indexed; topics that end up
  /// without subtopics are left out. The first malformed node aborts the build.
  pub fn with_schema(root: &AnnotationNode, doc_lengths: DocLengths, schema: &SchemaConfig) -> Result<Self> {
    let mut topics: IndexMap<TopicId, Topic> = IndexMap::new();

    for domain in &root.children {
      for topic_node in &domain.children {
        let topic_id = topic_node.required_attribute(&schema.id_attribute)?;

        let mut subtopics = IndexMap::new();
        for subtopic_node in topic_node.children.iter().filter(|n| n.tag == schema.subtopic_tag) {
          let subtopic_id = subtopic_node.required_attribute(&schema.id_attribute)?;
          // A repeated subtopic id takes over the slot of the first one.
          subtopics.insert(subtopic_id.to_string(), build_subtopic(subtopic_node, schema)?);
        }

        if subtopics.is_empty() {
          debug!(topic_id, "topic has no subtopics, skipping");
          continue;
        }

        debug!(topic_id, subtopics = subtopics.len(), "indexed topic");
        topics.entry(topic_id.to_string()).or_default().subtopics.extend(subtopics);
      }
    }

    info!(
      topics = topics.len(),
      doc_lengths = doc_lengths.len(),
      "ground truth loaded"
    );

    Ok(Self { topics, doc_lengths })
  }

  /// Parse annotation XML and build the store.
  pub fn from_xml_str(xml: &str, doc_lengths: DocLengths) -> Result<Self> {
    Self::new(&AnnotationNode::parse_xml(xml)?, doc_lengths)
  }

  /// Load the truth file and, if given, the document length table.
  pub fn open(truth_path: &Path, doc_lengths_path: Option<&Path>) -> Result<Self> {
    Self::open_with_schema(truth_path, doc_lengths_path, &SchemaConfig::default())
  }

  pub fn open_with_schema(truth_path: &Path, doc_lengths_path: Option<&Path>, schema: &SchemaConfig) -> Result<Self> {
    let doc_lengths = match doc_lengths_path {
      Some(path) => DocLengths::load(path)?,
      None => DocLengths::empty(),
    };
    let root = AnnotationNode::from_path(truth_path)?;
    debug!(path = %truth_path.display(), nodes = root.node_count(), "parsed truth file");
    Self::with_schema(&root, doc_lengths, schema)
  }

  pub fn topic(&self, topic_id: &str) -> Option<&Topic> {
    self.topics.get(topic_id)
  }

  pub fn topics(&self) -> &IndexMap<TopicId, Topic> {
    &self.topics
  }

  pub fn topic_ids(&self) -> impl Iterator<Item = &str> {
    self.topics.keys().map(|k| k.as_str())
  }

  pub fn doc_lengths(&self) -> &DocLengths {
    &self.doc_lengths
  }

  /// Facts stored for one passage.
  pub fn passage(&self, topic_id: &str, subtopic_id: &str, document_id: &str, passage_id: &str) -> Option<&PassageFact> {
    self
      .topic(topic_id)?
      .subtopic(subtopic_id)?
      .documents
      .get(document_id)?
      .passages
      .iter()
      .find(|p| p.id == passage_id)
      .map(|p| &p.fact)
  }

  /// Subtopics of a topic; empty for unknown topics.
  pub(crate) fn subtopics_of(&self, topic_id: &str) -> &IndexMap<SubtopicId, Subtopic> {
    static EMPTY: LazyLock<IndexMap<SubtopicId, Subtopic>> = LazyLock::new(IndexMap::new);
    self.topics.get(topic_id).map_or(&*EMPTY, |t| &t.subtopics)
  }
}

#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;

  use super::*;

  fn field(tag: &str, text: &str) -> AnnotationNode {
    AnnotationNode::new(tag).with_text(text)
  }

  fn passage(id: &str, fields: Vec<AnnotationNode>) -> AnnotationNode {
    AnnotationNode::new("passage").with_attribute("id", id).with_children(fields)
  }

  fn single_subtopic(passages: Vec<AnnotationNode>) -> AnnotationNode {
    AnnotationNode::new("root").with_child(
      AnnotationNode::new("domain").with_child(
        AnnotationNode::new("topic").with_attribute("id", "T1").with_child(
          AnnotationNode::new("subtopic")
            .with_attribute("id", "T1.1")
            .with_children(passages),
        ),
      ),
    )
  }

  #[test]
  fn test_parse_rating() {
    assert_eq!(parse_rating("p", "3").unwrap(), 3);
    assert_eq!(parse_rating("p", " 2\n").unwrap(), 2);
    assert_eq!(parse_rating("p", "0").unwrap(), 1);
    assert!(matches!(parse_rating("p", "high"), Err(TruthError::InvalidRating { .. })));
    assert!(parse_rating("p", "-1").is_err());
    assert!(parse_rating("p", "").is_err());
  }

  #[test]
  fn test_carry_forward_defaults() {
    let state = CarryForward::default();
    assert_eq!(state.document_id, "");
    assert_eq!(state.rating, 1);
    assert_eq!(state.nugget_id, "");
  }

  #[test]
  fn test_passage_without_fields_uses_seed() {
    let store = GroundTruthStore::new(&single_subtopic(vec![passage("p1", vec![])]), DocLengths::empty()).unwrap();
    let fact = store.passage("T1", "T1.1", "", "p1").unwrap();
    assert_eq!(fact.rating, 1);
    assert_eq!(fact.nugget_id, "");
  }

  #[test]
  fn test_nugget_carries_until_next_manual_marker() {
    let root = single_subtopic(vec![
      passage("p1", vec![field("docno", "D1"), field("rating", "2"), field("type", "MANUAL")]),
      passage("p2", vec![field("docno", "D2"), field("type", "AUTO")]),
      passage("p3", vec![field("type", "MANUAL")]),
      passage("p4", vec![]),
    ]);
    let store = GroundTruthStore::new(&root, DocLengths::empty()).unwrap();

    assert_eq!(store.passage("T1", "T1.1", "D1", "p1").unwrap().nugget_id, "p1");
    assert_eq!(store.passage("T1", "T1.1", "D2", "p2").unwrap().nugget_id, "p1");
    assert_eq!(store.passage("T1", "T1.1", "D2", "p3").unwrap().nugget_id, "p3");
    assert_eq!(
      store.passage("T1", "T1.1", "D2", "p4").unwrap(),
      &PassageFact {
        nugget_id: "p3".to_string(),
        rating: 2,
      }
    );
  }

  #[test]
  fn test_repeated_passage_id_replaces_fact() {
    let root = single_subtopic(vec![
      passage("p1", vec![field("docno", "D1"), field("rating", "2")]),
      passage("p2", vec![field("rating", "3")]),
      passage("p1", vec![field("rating", "4")]),
    ]);
    let store = GroundTruthStore::new(&root, DocLengths::empty()).unwrap();
    let doc = &store.topic("T1").unwrap().subtopic("T1.1").unwrap().documents()["D1"];

    let ids: Vec<&str> = doc.passages().iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["p1", "p2"]);
    assert_eq!(doc.ratings().collect::<Vec<_>>(), vec![4, 3]);
  }

  #[test]
  fn test_non_subtopic_children_are_skipped() {
    let root = AnnotationNode::new("root").with_child(
      AnnotationNode::new("domain").with_child(
        AnnotationNode::new("topic")
          .with_attribute("id", "T1")
          .with_child(AnnotationNode::new("description").with_text("no id needed"))
          .with_child(AnnotationNode::new("subtopic").with_attribute("id", "T1.1")),
      ),
    );
    let store = GroundTruthStore::new(&root, DocLengths::empty()).unwrap();
    assert_eq!(store.topic("T1").unwrap().subtopics().len(), 1);
  }

  #[test]
  fn test_topic_without_subtopics_is_not_indexed() {
    let root = AnnotationNode::new("root")
      .with_child(AnnotationNode::new("domain").with_child(AnnotationNode::new("topic").with_attribute("id", "T9")));
    let store = GroundTruthStore::new(&root, DocLengths::empty()).unwrap();
    assert!(store.topic("T9").is_none());
    assert_eq!(store.topic_ids().count(), 0);
  }

  #[test]
  fn test_topic_split_across_domains_is_merged() {
    let topic = |sub: &str| {
      AnnotationNode::new("topic")
        .with_attribute("id", "T1")
        .with_child(AnnotationNode::new("subtopic").with_attribute("id", sub))
    };
    let root = AnnotationNode::new("root")
      .with_child(AnnotationNode::new("domain").with_child(topic("T1.1")))
      .with_child(AnnotationNode::new("domain").with_child(topic("T1.2")));
    let store = GroundTruthStore::new(&root, DocLengths::empty()).unwrap();

    let ids: Vec<&String> = store.topic("T1").unwrap().subtopics().keys().collect();
    assert_eq!(ids, vec!["T1.1", "T1.2"]);
  }

  #[test]
  fn test_levels_keep_annotation_order() {
    let topic = AnnotationNode::new("topic")
      .with_attribute("id", "T1")
      .with_child(
        AnnotationNode::new("subtopic").with_attribute("id", "T1.10").with_children(vec![
          passage("p1", vec![field("docno", "D9")]),
          passage("p2", vec![field("docno", "D10")]),
          passage("p3", vec![field("docno", "D1")]),
        ]),
      )
      .with_child(AnnotationNode::new("subtopic").with_attribute("id", "T1.2"));
    let root = AnnotationNode::new("root").with_child(AnnotationNode::new("domain").with_child(topic));
    let store = GroundTruthStore::new(&root, DocLengths::empty()).unwrap();

    let subtopics: Vec<&str> = store.topic("T1").unwrap().subtopics().keys().map(String::as_str).collect();
    assert_eq!(subtopics, vec!["T1.10", "T1.2"]);
    let docs: Vec<&str> = store.topic("T1").unwrap().subtopic("T1.10").unwrap().documents().keys().map(String::as_str).collect();
    assert_eq!(docs, vec!["D9", "D10", "D1"]);
  }

  #[test]
  fn test_duplicate_subtopic_keeps_first_position() {
    let root = AnnotationNode::new("root").with_child(
      AnnotationNode::new("domain").with_child(
        AnnotationNode::new("topic")
          .with_attribute("id", "T1")
          .with_child(AnnotationNode::new("subtopic").with_attribute("id", "T1.2"))
          .with_child(AnnotationNode::new("subtopic").with_attribute("id", "T1.1"))
          .with_child(
            AnnotationNode::new("subtopic")
              .with_attribute("id", "T1.2")
              .with_child(passage("p1", vec![field("docno", "D1")])),
          ),
      ),
    );
    let store = GroundTruthStore::new(&root, DocLengths::empty()).unwrap();
    let topic = store.topic("T1").unwrap();

    let ids: Vec<&str> = topic.subtopics().keys().map(String::as_str).collect();
    assert_eq!(ids, vec!["T1.2", "T1.1"]);
    assert!(topic.subtopic("T1.2").unwrap().documents().contains_key("D1"));
  }

  #[test]
  fn test_missing_passage_id_fails() {
    let root = single_subtopic(vec![AnnotationNode::new("passage")]);
    let err = GroundTruthStore::new(&root, DocLengths::empty()).unwrap_err();
    assert!(matches!(err, TruthError::MissingAttribute { ref tag, .. } if tag == "passage"));
  }

  #[test]
  fn test_custom_schema() {
    let schema = SchemaConfig {
      manual_marker: "HUMAN".to_string(),
      ..Default::default()
    };
    let root = single_subtopic(vec![
      passage("p1", vec![field("docno", "D1"), field("type", "MANUAL")]),
      passage("p2", vec![field("type", "HUMAN")]),
    ]);
    let store = GroundTruthStore::with_schema(&root, DocLengths::empty(), &schema).unwrap();
    assert_eq!(store.passage("T1", "T1.1", "D1", "p1").unwrap().nugget_id, "");
    assert_eq!(store.passage("T1", "T1.1", "D1", "p2").unwrap().nugget_id, "p2");
  }

  #[test]
  fn test_unknown_topic_has_no_subtopics() {
    let store = GroundTruthStore::default();
    assert!(store.subtopics_of("nope").is_empty());
  }
}
