//! Parsed annotation tree.
//!
//! The store consumes an already-parsed element tree
//! (`root → domain → topic → subtopic → passage → field`). [`AnnotationNode`]
//! is that tree; it can be assembled by hand with the builder methods or read
//! from an XML truth file with [`AnnotationNode::parse_xml`].

use std::collections::BTreeMap;
use std::path::Path;

use quick_xml::Reader as XmlReader;
use quick_xml::events::{BytesStart, Event};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TruthError};

/// One element of the annotation tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationNode {
  /// Element name
  pub tag: String,
  /// Element attributes
  #[serde(default)]
  pub attributes: BTreeMap<String, String>,
  /// Direct text content, trimmed (None when the element has none)
  #[serde(default)]
  pub text: Option<String>,
  /// Child elements in document order
  #[serde(default)]
  pub children: Vec<AnnotationNode>,
}

impl AnnotationNode {
  /// Create an element with no attributes, text or children.
  pub fn new(tag: impl Into<String>) -> Self {
    Self {
      tag: tag.into(),
      ..Default::default()
    }
  }

  pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
    self.attributes.insert(name.into(), value.into());
    self
  }

  pub fn with_text(mut self, text: impl Into<String>) -> Self {
    self.text = Some(text.into());
    self
  }

  pub fn with_child(mut self, child: AnnotationNode) -> Self {
    self.children.push(child);
    self
  }

  pub fn with_children(mut self, children: impl IntoIterator<Item = AnnotationNode>) -> Self {
    self.children.extend(children);
    self
  }

  /// Look up an attribute value.
  pub fn attribute(&self, name: &str) -> Option<&str> {
    self.attributes.get(name).map(|v| v.as_str())
  }

  /// Text content, or "" when the element has none.
  pub fn text_or_empty(&self) -> &str {
    self.text.as_deref().unwrap_or("")
  }

  /// Attribute value that must be present.
  pub fn required_attribute(&self, name: &str) -> Result<&str> {
    self
      .attribute(name)
      .ok_or_else(|| TruthError::missing_attribute(&self.tag, name))
  }

  /// Total number of elements in this subtree, including self.
  pub fn node_count(&self) -> usize {
    1 + self.children.iter().map(AnnotationNode::node_count).sum::<usize>()
  }

  /// Parse an XML document into its root element.
  pub fn parse_xml(xml: &str) -> Result<Self> {
    let mut reader = XmlReader::from_str(xml);
    reader.trim_text(true);

    let mut stack: Vec<AnnotationNode> = Vec::new();
    let mut root: Option<AnnotationNode> = None;
    let mut buf = Vec::new();

    loop {
      match reader.read_event_into(&mut buf)? {
        Event::Start(ref e) => stack.push(element_from_start(e)?),
        Event::Empty(ref e) => {
          let node = element_from_start(e)?;
          attach(&mut stack, &mut root, node);
        }
        Event::Text(ref t) => {
          if let Some(current) = stack.last_mut() {
            push_text(current, &t.unescape()?);
          }
        }
        Event::CData(c) => {
          if let Some(current) = stack.last_mut() {
            push_text(current, &String::from_utf8_lossy(&c.into_inner()));
          }
        }
        Event::End(_) => {
          if let Some(node) = stack.pop() {
            attach(&mut stack, &mut root, node);
          }
        }
        Event::Eof => break,
        _ => {}
      }
      buf.clear();
    }

    if let Some(open) = stack.last() {
      return Err(TruthError::Io(std::io::Error::new(
        std::io::ErrorKind::UnexpectedEof,
        format!("unclosed <{}> element", open.tag),
      )));
    }

    root.ok_or(TruthError::EmptyDocument)
  }

  /// Read and parse an XML truth file.
  pub fn from_path(path: &Path) -> Result<Self> {
    let content = std::fs::read_to_string(path)?;
    Self::parse_xml(&content)
  }
}

fn element_from_start(e: &BytesStart<'_>) -> Result<AnnotationNode> {
  let mut node = AnnotationNode::new(String::from_utf8_lossy(e.name().as_ref()));
  for attr in e.attributes() {
    let attr = attr.map_err(quick_xml::Error::from)?;
    let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
    let value = attr.unescape_value()?.into_owned();
    node.attributes.insert(key, value);
  }
  Ok(node)
}

fn push_text(node: &mut AnnotationNode, text: &str) {
  match node.text {
    Some(ref mut existing) => existing.push_str(text),
    None => node.text = Some(text.to_string()),
  }
}

// The first completed top-level element becomes the root; anything after it is ignored.
fn attach(stack: &mut [AnnotationNode], root: &mut Option<AnnotationNode>, node: AnnotationNode) {
  match stack.last_mut() {
    Some(parent) => parent.children.push(node),
    None => {
      if root.is_none() {
        *root = Some(node);
      }
    }
  }
}
