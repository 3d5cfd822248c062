//! Common fixtures for ground-truth integration tests

use dd_truth::{AnnotationNode, DocLengths, GroundTruthStore};

/// Two domains, two topics, three subtopics.
///
/// Passage 102 inherits document ebola-01 and nugget 101 but restates the
/// rating, so nugget 101 is graded both 3 and 2. Passage 103 inherits rating
/// 2 and nugget 101 under a new document. Passage 201 is rated "0".
#[allow(dead_code)]
pub const FIXTURE_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<trecdd>
  <domain name="Ebola">
    <topic id="DD16-1" name="US Military Crisis Response">
      <subtopic id="DD16-1.1" name="troop deployment">
        <passage id="101">
          <docno>ebola-01</docno>
          <rating>3</rating>
          <type>MANUAL</type>
          <text>Soldiers were deployed to Liberia.</text>
        </passage>
        <passage id="102">
          <rating>2</rating>
        </passage>
        <passage id="103">
          <docno>ebola-02</docno>
        </passage>
      </subtopic>
      <subtopic id="DD16-1.2" name="funding">
        <passage id="201">
          <docno>ebola-02</docno>
          <rating>0</rating>
          <type>MANUAL</type>
        </passage>
        <passage id="202">
          <docno>ebola-03</docno>
          <rating>4</rating>
          <type>MANUAL</type>
        </passage>
      </subtopic>
    </topic>
  </domain>
  <domain name="Polar">
    <topic id="DD16-2" name="Ice sheets">
      <subtopic id="DD16-2.1" name="melt rate">
        <passage id="301">
          <docno>polar-01</docno>
          <rating>1</rating>
          <type>MANUAL</type>
        </passage>
      </subtopic>
    </topic>
  </domain>
</trecdd>
"#;

#[allow(dead_code)]
pub fn fixture_store() -> GroundTruthStore {
  let lengths: DocLengths = [("ebola-01", 1200_u64), ("ebola-02", 640_u64)].into_iter().collect();
  GroundTruthStore::from_xml_str(FIXTURE_XML, lengths).expect("fixture should parse")
}

/// A passage field such as `<docno>D1</docno>`.
#[allow(dead_code)]
pub fn field(tag: &str, text: &str) -> AnnotationNode {
  AnnotationNode::new(tag).with_text(text)
}

#[allow(dead_code)]
pub fn passage(id: &str, fields: Vec<AnnotationNode>) -> AnnotationNode {
  AnnotationNode::new("passage").with_attribute("id", id).with_children(fields)
}

/// A manually marked passage with explicit document and rating.
#[allow(dead_code)]
pub fn manual_passage(id: &str, docno: &str, rating: u32) -> AnnotationNode {
  passage(
    id,
    vec![
      field("docno", docno),
      field("rating", &rating.to_string()),
      field("type", "MANUAL"),
    ],
  )
}

#[allow(dead_code)]
pub fn subtopic(id: &str, passages: Vec<AnnotationNode>) -> AnnotationNode {
  AnnotationNode::new("subtopic").with_attribute("id", id).with_children(passages)
}

#[allow(dead_code)]
pub fn topic(id: &str, subtopics: Vec<AnnotationNode>) -> AnnotationNode {
  AnnotationNode::new("topic").with_attribute("id", id).with_children(subtopics)
}

/// Root with a single domain holding the given topics.
#[allow(dead_code)]
pub fn tree(topics: Vec<AnnotationNode>) -> AnnotationNode {
  AnnotationNode::new("trecdd").with_child(AnnotationNode::new("domain").with_children(topics))
}

#[allow(dead_code)]
pub fn build(topics: Vec<AnnotationNode>) -> GroundTruthStore {
  GroundTruthStore::new(&tree(topics), DocLengths::empty()).expect("tree should build")
}
