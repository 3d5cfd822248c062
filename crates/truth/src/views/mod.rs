//! Derived views over the ground truth.
//!
//! Each view reshapes one topic of the index for a family of evaluation
//! metrics:
//! - Cube Test: per-subtopic graded relevance and its bounded form
//! - sDCG: flat per-document gain
//! - Expected Utility: nugget membership and nugget grades
//! - Recall: the relevant subtopic, document and nugget sets
//!
//! Views are computed on every call and never touch the index. An unknown
//! topic yields an empty view.

mod expected_utility;
mod recall;
mod sdcg;

pub use cube_test::{CubeTestBoundTruth, CubeTestTruth, GradedRelevance, graded_relevance};
pub use expected_utility::{ExpectedUtilityBoundTruth, ExpectedUtilityTruth, RatingConflict};
pub use recall::RecallTruth;
