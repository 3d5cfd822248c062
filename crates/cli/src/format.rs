//! Plain-text rendering of integrity findings.

use dd_truth::{ConsistencyReport, RatingConflict};

/// Render the consistency report and the rating conflicts found by the self check.
pub fn format_findings(report: &ConsistencyReport, conflicts: &[RatingConflict]) -> String {
  let mut out = String::new();

  if report.is_clean() && conflicts.is_empty() {
    out.push_str("No integrity problems found.\n");
    return out;
  }

  if !report.subtopic_conflicts.is_empty() {
    out.push_str(&format!(
      "Nuggets under several subtopics ({}):\n",
      report.subtopic_conflicts.len()
    ));
    for conflict in &report.subtopic_conflicts {
      out.push_str(&format!(
        "  {} -> {}\n",
        display_id(&conflict.nugget_id),
        conflict.subtopic_ids.join(", ")
      ));
    }
  }

  if !report.duplicate_memberships.is_empty() {
    out.push_str(&format!(
      "Nuggets repeated within a document ({}):\n",
      report.duplicate_memberships.len()
    ));
    for dup in &report.duplicate_memberships {
      out.push_str(&format!(
        "  {} in {} ({}x)\n",
        display_id(&dup.nugget_id),
        dup.document_id,
        dup.occurrences
      ));
    }
  }

  if !conflicts.is_empty() {
    out.push_str(&format!("Nuggets with inconsistent ratings ({}):\n", conflicts.len()));
    for conflict in conflicts {
      out.push_str(&format!(
        "  {} [{}] in {}: {} then {}\n",
        display_id(&conflict.nugget_id),
        conflict.topic_id,
        conflict.document_id,
        conflict.recorded,
        conflict.observed
      ));
    }
  }

  out
}

// Passages before the first manual nugget of a subtopic carry an empty nugget id.
fn display_id(nugget_id: &str) -> &str {
  if nugget_id.is_empty() { "<none>" } else { nugget_id }
}
