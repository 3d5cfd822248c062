use thiserror::Error;

/// Errors raised while loading annotations or building the store.
///
/// Integrity findings (conflicting ratings, nuggets shared across subtopics)
/// are never reported through this type; see [`crate::checks`].
#[derive(Debug, Error)]
pub enum TruthError {
  #[error("IO error: {0}")]
  Io(#[from] std::io::Error),

  #[error("XML error: {0}")]
  Xml(#[from] quick_xml::Error),

  #[error("JSON error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("TOML parse error: {0}")]
  Toml(#[from] toml::de::Error),

  /// A topic, subtopic or passage node lacks its identifying attribute.
  #[error("<{tag}> element is missing required attribute '{attribute}'")]
  MissingAttribute { tag: String, attribute: String },

  /// Rating text that does not parse as a non-negative integer.
  #[error("Passage '{passage_id}' has invalid rating '{text}'")]
  InvalidRating { passage_id: String, text: String },

  /// The annotation document had no root element.
  #[error("Annotation document is empty")]
  EmptyDocument,
}

impl TruthError {
  pub(crate) fn missing_attribute(tag: impl Into<String>, attribute: impl Into<String>) -> Self {
    Self::MissingAttribute {
      tag: tag.into(),
      attribute: attribute.into(),
    }
  }
}

pub type Result<T> = std::result::Result<T, TruthError>;

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_missing_attribute_message() {
    let err = TruthError::missing_attribute("subtopic", "id");
    assert_eq!(err.to_string(), "<subtopic> element is missing required attribute 'id'");
  }
}
