//! Block classification: one model call, parsed and repaired.

use std::collections::BTreeSet;

use blackout_core::classify::{Classification, ClassifyVariant, RawClassification, reconcile};
use blackout_core::{TextBlock, strip_code_fence};
use tracing::{error, info};

use crate::client::ClaudeClient;
use crate::error::AiError;
use crate::prompt;

/// Classify a document's blocks into shows and reserved categories.
///
/// The result is always a complete, non-overlapping partition of the
/// blocks' IDs. An unparseable model response degrades to the
/// all-unclassified fallback rather than failing the call.
pub async fn classify_blocks(
    client: &ClaudeClient,
    blocks: &[TextBlock],
    variant: ClassifyVariant,
) -> Result<Classification, AiError> {
    let full_ids = TextBlock::id_set(blocks);
    info!(blocks = blocks.len(), model = client.model(), "classifying blocks");

    let reply = client
        .complete(
            prompt::classification_system(variant),
            &prompt::classification_message(blocks),
        )
        .await?;

    let classification = parse_classification(&reply, &full_ids, variant)?;
    info!(
        shows = classification.shows.len(),
        categories = classification.assignments.len(),
        "classification reconciled"
    );
    Ok(classification)
}

/// Parse a model reply into a reconciled classification.
///
/// A reply that is not JSON at all falls back to the all-unclassified
/// partition. A reply that is JSON but carries an uncoercible block ID is
/// an error: the shape is right, so silently discarding it would hide a
/// schema drift.
pub fn parse_classification(
    raw_text: &str,
    full_ids: &BTreeSet<u32>,
    variant: ClassifyVariant,
) -> Result<Classification, AiError> {
    let stripped = strip_code_fence(raw_text);
    let value: serde_json::Value = match serde_json::from_str(stripped) {
        Ok(value) => value,
        Err(err) => {
            error!(%err, "classifier reply is not JSON; treating every block as unclassified");
            return Ok(Classification::fallback(full_ids, variant));
        }
    };

    let raw = RawClassification::from_json(&value)?;
    Ok(reconcile(raw, full_ids, variant))
}

#[cfg(test)]
mod tests {
    use super::*;
    use blackout_core::classify::{GLOBAL, UNCLASSIFIED};
    use blackout_core::CoreError;

    fn full(n: u32) -> BTreeSet<u32> {
        (0..n).collect()
    }

    #[test]
    fn fenced_reply_parses() {
        let reply = "```json\n{\"shows\": [\"A\"], \"assignments\": {\"A\": [0], \"GLOBAL\": [1]}}\n```";
        let result = parse_classification(reply, &full(2), ClassifyVariant::Standard).unwrap();
        assert_eq!(result.shows, vec!["A"]);
        assert_eq!(result.ids("A"), &[0]);
        assert_eq!(result.ids(GLOBAL), &[1]);
    }

    #[test]
    fn prose_reply_falls_back_to_unclassified() {
        let result =
            parse_classification("I cannot help with that.", &full(3), ClassifyVariant::Standard)
                .unwrap();
        assert!(result.shows.is_empty());
        assert_eq!(result.ids(UNCLASSIFIED), &[0, 1, 2]);
    }

    #[test]
    fn bad_block_id_in_valid_json_is_an_error() {
        let reply = r#"{"shows": [], "assignments": {"A": ["first"]}}"#;
        let err = parse_classification(reply, &full(1), ClassifyVariant::Standard).unwrap_err();
        assert!(matches!(err, AiError::Core(CoreError::BadBlockId(_, _))));
    }

    #[test]
    fn sloppy_reply_repaired_into_full_partition() {
        // Duplicate id, missing id, invented id, all in one reply.
        let reply = r#"{"shows": ["A", "B"], "assignments": {"A": [0, 1], "B": [1, 9]}}"#;
        let result = parse_classification(reply, &full(4), ClassifyVariant::Standard).unwrap();

        let union: BTreeSet<u32> = result.assignments.values().flatten().copied().collect();
        assert_eq!(union, full(4));
        assert_eq!(result.ids("A"), &[0, 1]);
        assert_eq!(result.ids("B"), &[] as &[u32]);
        assert_eq!(result.ids(UNCLASSIFIED), &[2, 3]);
    }
}
