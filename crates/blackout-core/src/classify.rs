//! Show classification results and the assignment reconciler.
//!
//! The classifier is an external model: it can omit block IDs, invent IDs,
//! assign one ID to two categories, or return numeric strings where numbers
//! were asked for. [`reconcile`] repairs all of that into a complete,
//! non-overlapping partition of the document's block IDs so that nothing
//! downstream needs defensive checks.

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::error::CoreError;

/// Reserved category: applies to all shows and is safe to keep in any
/// single show's redacted copy.
pub const GLOBAL: &str = "GLOBAL";

/// Reserved category: applies to all shows but carries aggregate cross-show
/// financial figures; never kept in any single show's redacted copy.
pub const GLOBAL_REDACT: &str = "GLOBAL_REDACT";

/// Reserved category: blocks the classifier could not confidently assign.
pub const UNCLASSIFIED: &str = "UNCLASSIFIED";

/// Which classification schema a deployment runs.
///
/// The two prompt/response schemas differ only in whether the model may use
/// the `GLOBAL_REDACT` category. Modelled as a variant rather than an ad hoc
/// optional key so each variant's reserved-key set is checked on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClassifyVariant {
    #[default]
    Standard,
    GlobalRedact,
}

impl ClassifyVariant {
    /// Reserved category keys guaranteed present after reconciliation.
    pub fn reserved_keys(&self) -> &'static [&'static str] {
        match self {
            Self::Standard => &[GLOBAL, UNCLASSIFIED],
            Self::GlobalRedact => &[GLOBAL, GLOBAL_REDACT, UNCLASSIFIED],
        }
    }
}

/// A reconciled classification: a complete, non-overlapping partition of a
/// document's block IDs into shows and reserved categories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    /// Distinct show names in classifier order.
    pub shows: Vec<String>,
    /// Category key (show name or reserved key) to ordered block IDs.
    pub assignments: BTreeMap<String, Vec<u32>>,
}

impl Classification {
    /// Fallback when the model response could not be parsed at all: no
    /// shows, every block unclassified. Keeps the workflow alive in a
    /// degraded state so the user can retry classification.
    pub fn fallback(full_ids: &BTreeSet<u32>, variant: ClassifyVariant) -> Self {
        let mut assignments = BTreeMap::new();
        for key in variant.reserved_keys() {
            assignments.insert((*key).to_string(), Vec::new());
        }
        assignments.insert(UNCLASSIFIED.to_string(), full_ids.iter().copied().collect());
        Self {
            shows: Vec::new(),
            assignments,
        }
    }

    /// IDs assigned to `category`, empty if the key is absent.
    pub fn ids(&self, category: &str) -> &[u32] {
        self.assignments
            .get(category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// An untrusted classification straight from the model, before repair.
///
/// Block IDs are coerced to integers at this boundary so the reconciler
/// never handles untyped data.
#[derive(Debug, Clone)]
pub struct RawClassification {
    pub shows: Vec<String>,
    pub assignments: BTreeMap<String, Vec<u32>>,
}

impl RawClassification {
    /// Parse the model's JSON object, coercing every block ID to an integer.
    ///
    /// Accepts JSON numbers (including integral floats) and numeric strings.
    /// A value that cannot be coerced fails the whole call: the list slot
    /// types are assumed well-formed even when the partition is not.
    pub fn from_json(value: &Value) -> Result<Self, CoreError> {
        let obj = value.as_object().ok_or(CoreError::NotAnObject)?;

        let shows = obj
            .get("shows")
            .and_then(Value::as_array)
            .map(|arr| {
                arr.iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        let mut assignments = BTreeMap::new();
        if let Some(map) = obj.get("assignments").and_then(Value::as_object) {
            for (category, ids) in map {
                let ids = ids.as_array().map(Vec::as_slice).unwrap_or(&[]);
                let mut coerced = Vec::with_capacity(ids.len());
                for id in ids {
                    coerced.push(coerce_block_id(id, category)?);
                }
                assignments.insert(category.clone(), coerced);
            }
        }

        Ok(Self { shows, assignments })
    }
}

fn coerce_block_id(value: &Value, category: &str) -> Result<u32, CoreError> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| {
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && *f >= 0.0)
                    .map(|f| f as u64)
            })
            .and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse::<u32>().ok(),
        _ => None,
    }
    .ok_or_else(|| CoreError::BadBlockId(value.clone(), category.to_string()))
}

/// Repair a raw classification into a complete, non-overlapping partition
/// of `full_ids`. Never fails.
///
/// - Duplicate IDs keep their first occurrence (category-key order) only.
/// - IDs the model omitted are appended to `UNCLASSIFIED` in ascending
///   order, after its existing contents: no block is ever silently dropped.
/// - IDs the model invented are filtered out of every category, preserving
///   the relative order of the survivors.
/// - The variant's reserved keys are inserted with empty lists if absent.
/// - `shows` passes through unvalidated against assignment keys; a show
///   with no assignments key is a show with zero blocks.
///
/// Already-valid input passes through unchanged apart from reserved-key
/// insertion.
pub fn reconcile(
    raw: RawClassification,
    full_ids: &BTreeSet<u32>,
    variant: ClassifyVariant,
) -> Classification {
    let RawClassification {
        shows,
        mut assignments,
    } = raw;

    // Exclusivity: an ID assigned to two categories is a model defect; keep
    // the first occurrence only.
    let mut seen: BTreeSet<u32> = BTreeSet::new();
    let mut duplicates = 0usize;
    for ids in assignments.values_mut() {
        let before = ids.len();
        ids.retain(|id| seen.insert(*id));
        duplicates += before - ids.len();
    }
    if duplicates > 0 {
        warn!(count = duplicates, "classifier assigned ids to multiple categories; keeping first occurrence");
    }

    // Completeness: append anything the model never mentioned.
    let missing: Vec<u32> = full_ids.difference(&seen).copied().collect();
    if !missing.is_empty() {
        warn!(count = missing.len(), ids = ?missing, "classifier omitted block ids; adding to UNCLASSIFIED");
        assignments
            .entry(UNCLASSIFIED.to_string())
            .or_default()
            .extend(missing);
    }

    // Soundness: drop anything the model invented.
    let extra: Vec<u32> = seen.difference(full_ids).copied().collect();
    if !extra.is_empty() {
        warn!(count = extra.len(), ids = ?extra, "classifier returned unknown block ids; dropping");
        for ids in assignments.values_mut() {
            ids.retain(|id| full_ids.contains(id));
        }
    }

    for key in variant.reserved_keys() {
        assignments.entry((*key).to_string()).or_default();
    }

    Classification { shows, assignments }
}
