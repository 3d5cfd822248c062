//! Ground truth for TREC Dynamic Domain evaluation
//!
//! Loads the hierarchical relevance annotations (domain → topic → subtopic →
//! passage) into an immutable index and reshapes one topic at a time into the
//! inputs of the evaluation metrics.
//!
//! ## Key Concepts
//!
//! - **Store**: [`GroundTruthStore`], built once from an annotation tree
//! - **Views**: Cube Test, sDCG, Expected Utility and recall inputs per topic
//! - **Checks**: nugget integrity findings, reported rather than raised
//! - **Stats**: topic, subtopic and document counts
//!
//! # Example
//! ```ignore
//! use dd_truth::GroundTruthStore;
//!
//! let store = GroundTruthStore::open(Path::new("truth.xml"), Some(Path::new("doc_len.json")))?;
//! let ct = store.ct_truth("DD16-1");
//! println!("{}", store.stats());
//! ```

pub mod checks;
pub mod config;
pub mod doc_lengths;
mod error;
pub mod stats;
pub mod store;
pub mod tree;
pub mod views;

pub use checks::{ConsistencyReport, DuplicateMembership, NuggetSubtopicConflict};
pub use config::{Config, PathsConfig, SchemaConfig};
pub use doc_lengths::DocLengths;
pub use error::{Result, TruthError};
pub use stats::TruthStats;
pub use store::{Document, GroundTruthStore, Passage, PassageFact, Subtopic, Topic};
pub use tree::AnnotationNode;
pub use views::{
  CubeTestBoundTruth, CubeTestTruth, ExpectedUtilityBoundTruth, ExpectedUtilityTruth, GradedRelevance,
  RatingConflict, RecallTruth, graded_relevance,
};
