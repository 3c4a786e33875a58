//! Structured data extraction: one model call per document, parsed into
//! typed records.

use blackout_core::classify::Classification;
use blackout_core::{ExtractionVariant, InsertionRecord, ShowRecord, TextBlock, strip_code_fence};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::info;

use crate::client::ClaudeClient;
use crate::error::AiError;
use crate::prompt;

// `default = "Vec::new"` rather than bare `default`: the derive would
// otherwise require `T: Default`, which the record types do not implement.
#[derive(Deserialize)]
struct Envelope<T> {
    #[serde(default = "Vec::new")]
    shows: Vec<T>,
}

/// Extract one show-level record per show.
pub async fn extract_show_data(
    client: &ClaudeClient,
    blocks: &[TextBlock],
    classification: &Classification,
) -> Result<Vec<ShowRecord>, AiError> {
    let reply = complete_extraction(client, blocks, classification, ExtractionVariant::ShowLevel)
        .await?;
    parse_show_records(&reply)
}

/// Extract one per-insertion record per show.
pub async fn extract_insertion_data(
    client: &ClaudeClient,
    blocks: &[TextBlock],
    classification: &Classification,
) -> Result<Vec<InsertionRecord>, AiError> {
    let reply =
        complete_extraction(client, blocks, classification, ExtractionVariant::PerInsertion)
            .await?;
    parse_insertion_records(&reply)
}

async fn complete_extraction(
    client: &ClaudeClient,
    blocks: &[TextBlock],
    classification: &Classification,
    variant: ExtractionVariant,
) -> Result<String, AiError> {
    info!(
        shows = classification.shows.len(),
        model = client.model(),
        ?variant,
        "extracting contract data"
    );
    client
        .complete(
            prompt::extraction_system(variant),
            &prompt::extraction_message(blocks, classification),
        )
        .await
}

/// Parse a show-level extraction reply.
pub fn parse_show_records(raw_text: &str) -> Result<Vec<ShowRecord>, AiError> {
    parse_envelope(raw_text)
}

/// Parse a per-insertion extraction reply.
pub fn parse_insertion_records(raw_text: &str) -> Result<Vec<InsertionRecord>, AiError> {
    parse_envelope(raw_text)
}

/// Unlike classification there is no degraded fallback here: an
/// unparseable extraction reply has nothing salvageable, so the caller
/// gets the error and retries.
fn parse_envelope<T: DeserializeOwned>(raw_text: &str) -> Result<Vec<T>, AiError> {
    let stripped = strip_code_fence(raw_text);
    let envelope: Envelope<T> = serde_json::from_str(stripped).map_err(AiError::InvalidJson)?;
    Ok(envelope.shows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn show_records_parse_from_fenced_reply() {
        let reply = r#"```json
{"shows": [
  {"sponsor_name": "WidgetCo", "show_name": "The Morning Show",
   "contract_amount": "$10,000", "billing_cycle": "Net 30"}
]}
```"#;
        let records = parse_show_records(reply).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].show_name, "The Morning Show");
        assert_eq!(records[0].billing_cycle, "Net 30");
        // Omitted fields land on their defaults.
        assert_eq!(records[0].air_dates, "Not specified");
        assert_eq!(records[0].requires_drafts, "Unknown");
    }

    #[test]
    fn insertion_records_parse_with_pairs() {
        let reply = r#"{"shows": [
            {"podcast_booked": "Night Owls", "advertiser": "WidgetCo",
             "insertions": [
                {"date": "Jan 6, 2026", "amount": "$1,200"},
                {"date": "Jan 13, 2026", "amount": "$1,200"}
             ],
             "draft_required_yn": "Y"}
        ]}"#;
        let records = parse_insertion_records(reply).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].normalized_insertions().len(), 2);
        assert_eq!(records[0].draft_required_yn, "Y");
    }

    #[test]
    fn missing_shows_key_yields_empty_list() {
        let records = parse_show_records("{}").unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn prose_reply_is_an_error() {
        let err = parse_insertion_records("Here are the results you asked for.").unwrap_err();
        assert!(matches!(err, AiError::InvalidJson(_)));
    }
}
