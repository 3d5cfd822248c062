//! Integrity check command

use anyhow::Result;
use dd_truth::GroundTruthStore;
use serde_json::json;

use crate::format::format_findings;

/// Run both store-wide checks plus the rating self check.
///
/// Returns whether the ground truth is free of findings.
pub fn cmd_check(store: &GroundTruthStore, json: bool) -> Result<bool> {
  let report = store.check_consistency();
  let rating_conflicts = store.self_check();
  let clean = report.is_clean() && rating_conflicts.is_empty();

  if json {
    let output = json!({
      "clean": clean,
      "subtopic_conflicts": report.subtopic_conflicts,
      "duplicate_memberships": report.duplicate_memberships,
      "rating_conflicts": rating_conflicts,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
  } else {
    print!("{}", format_findings(&report, &rating_conflicts));
  }

  Ok(clean)
}
