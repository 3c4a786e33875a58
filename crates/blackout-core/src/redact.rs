//! Redaction selection: which blocks survive into a single show's copy.

use std::collections::BTreeSet;

use crate::classify::{Classification, GLOBAL};
use crate::error::CoreError;

/// The keep/redact split of a document's blocks for one show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedactionPlan {
    pub keep: BTreeSet<u32>,
    pub redact: BTreeSet<u32>,
}

/// Compute the keep/redact split for `selected_show`.
///
/// Keeps the selected show's blocks plus `GLOBAL`; everything else (other
/// shows, `UNCLASSIFIED`, and `GLOBAL_REDACT` where present) is redacted.
/// Aggregate cross-show financials in `GLOBAL_REDACT` are nominally global
/// content but must never be visible in any single show's copy.
pub fn redaction_plan(
    classification: &Classification,
    selected_show: &str,
) -> Result<RedactionPlan, CoreError> {
    if !classification.shows.iter().any(|s| s == selected_show) {
        return Err(CoreError::UnknownShow(selected_show.to_string()));
    }

    let keep: BTreeSet<u32> = classification
        .ids(selected_show)
        .iter()
        .chain(classification.ids(GLOBAL))
        .copied()
        .collect();

    let redact: BTreeSet<u32> = classification
        .assignments
        .values()
        .flatten()
        .copied()
        .filter(|id| !keep.contains(id))
        .collect();

    Ok(RedactionPlan { keep, redact })
}
