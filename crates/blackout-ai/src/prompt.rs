//! Prompt construction for classification and extraction calls.

use std::collections::BTreeSet;
use std::fmt::Write as _;

use blackout_core::classify::{Classification, ClassifyVariant, GLOBAL};
use blackout_core::{ExtractionVariant, TextBlock};

/// Maximum characters per block sent to the model (saves tokens).
const MAX_BLOCK_TEXT_LEN: usize = 500;

const CLASSIFY_SYSTEM: &str = r#"You are a document analyst specializing in multi-show sponsorship contracts.

You will receive a list of text blocks extracted from a PDF contract. Each block
has an integer ID and its text content. The contract covers sponsorship terms for
MULTIPLE shows/programs.

Your task:
1. Identify every unique show/program name mentioned in the contract.
2. Classify each block into exactly ONE of the following categories:
   - A specific show name (if the block relates to that show only).
   - "GLOBAL": if the block applies to ALL shows (e.g., general terms,
     signatures, party names, dates, governing law, universal clauses).
   - "UNCLASSIFIED": if you cannot confidently determine which show
     the block belongs to.

Rules:
- Every block ID must appear in exactly one category.
- Show names should be normalized (consistent capitalization/spelling).
- Section headers that introduce a show-specific section belong to that show.
- Shared header/footer text, preamble, and signature blocks are GLOBAL.

You MUST respond with ONLY valid JSON (no markdown, no explanation) in this exact structure:
{
  "shows": ["Show Name A", "Show Name B"],
  "assignments": {
    "Show Name A": [1, 3, 5],
    "Show Name B": [2, 4, 6],
    "GLOBAL": [0, 7, 8],
    "UNCLASSIFIED": [9]
  }
}
"#;

const CLASSIFY_SYSTEM_GLOBAL_REDACT: &str = r#"You are a document analyst specializing in multi-show sponsorship contracts.

You will receive a list of text blocks extracted from a PDF contract. Each block
has an integer ID and its text content. The contract covers sponsorship terms for
MULTIPLE shows/programs.

Your task:
1. Identify every unique show/program name mentioned in the contract.
2. Classify each block into exactly ONE of the following categories:
   - A specific show name (if the block relates to that show only).
   - "GLOBAL": if the block applies to ALL shows (e.g., general terms,
     signatures, party names, dates, governing law, universal clauses).
   - "GLOBAL_REDACT": if the block applies to all shows but contains
     aggregate or combined financial figures spanning multiple shows
     (e.g., total contract value, cross-show payment schedules). These
     must never appear in any single show's redacted copy.
   - "UNCLASSIFIED": if you cannot confidently determine which show
     the block belongs to.

Rules:
- Every block ID must appear in exactly one category.
- Show names should be normalized (consistent capitalization/spelling).
- Section headers that introduce a show-specific section belong to that show.
- Shared header/footer text, preamble, and signature blocks are GLOBAL.
- When in doubt between GLOBAL and GLOBAL_REDACT for a financial figure,
  choose GLOBAL_REDACT.

You MUST respond with ONLY valid JSON (no markdown, no explanation) in this exact structure:
{
  "shows": ["Show Name A", "Show Name B"],
  "assignments": {
    "Show Name A": [1, 3, 5],
    "Show Name B": [2, 4, 6],
    "GLOBAL": [0, 7],
    "GLOBAL_REDACT": [8],
    "UNCLASSIFIED": [9]
  }
}
"#;

const EXTRACT_SHOW_LEVEL_SYSTEM: &str = r#"You are a contract data analyst specializing in multi-show sponsorship agreements.

You will receive the text of a sponsorship contract, along with a list of show names
that appear in the contract. For EACH show, extract the following fields from the
contract text. Use information from both show-specific sections and any general/global
sections that apply to all shows.

Fields to extract for each show:
1. sponsor_name: the sponsoring company or brand name
2. show_name: the show/program name (use the exact name provided)
3. contract_amount: the total dollar value or cost for this show's sponsorship
4. contract_terms: a brief summary of key contract terms (duration, exclusivity, etc.)
5. air_dates: the date range or flight dates when the sponsorship runs
6. cost: cost breakdown if available (e.g., per-spot cost, CPM); if same as contract_amount, repeat it
7. billing_cycle: payment terms (e.g., "Net 30", "Net 45", "Net 60", "Net 90", "Due on receipt")
8. requires_pixel_setup: "Yes", "No", or "Unknown"
9. requires_drafts: "Yes", "No", or "Unknown" (whether drafts/creative approval is required)
10. ad_frequency: how many times the ad/spot needs to run (e.g., "3x per week", "10 spots total")

Rules:
- If a field is not mentioned in the contract, use "Not specified".
- Be precise with dollar amounts: include the currency symbol.
- For dates, use a readable format (e.g., "Jan 1, 2026 – Mar 31, 2026").
- sponsor_name is typically the same across all shows in one contract.

You MUST respond with ONLY valid JSON (no markdown, no explanation) in this exact structure:
{
  "shows": [
    {
      "sponsor_name": "...",
      "show_name": "...",
      "contract_amount": "...",
      "contract_terms": "...",
      "air_dates": "...",
      "cost": "...",
      "billing_cycle": "...",
      "requires_pixel_setup": "...",
      "requires_drafts": "...",
      "ad_frequency": "..."
    }
  ]
}
"#;

const EXTRACT_PER_INSERTION_SYSTEM: &str = r#"You are a contract data analyst specializing in multi-show sponsorship agreements.

You will receive the text of a sponsorship contract, along with a list of show names
that appear in the contract. For EACH show, extract one record with the fields below.
Use information from both show-specific sections and any general/global sections that
apply to all shows.

Fields to extract for each show:
1. podcast_booked: the show/podcast name (use the exact name provided)
2. agency: the booking agency, if any
3. advertiser: the advertiser or sponsoring brand
4. type: the placement type (e.g., "Host-read", "Pre-roll", "Mid-roll")
5. insertions: a list of {"date": ..., "amount": ...} pairs, one per insertion
   date in the insertion order / flight schedule, each with its amount
6. draft_required_yn: "Y", "N", or "Unknown" (whether drafts/creative approval is required)
7. impressions: guaranteed impressions per insertion, if stated
8. payment_terms: payment terms (e.g., "Net 30", "Net 60", "Due on receipt")
9. requires_pixel_tracker_yn: "Y", "N", or "Unknown"
10. notes: anything material that fits no other field

Rules:
- If a field is not mentioned in the contract, use "Not specified".
- Be precise with dollar amounts: include the currency symbol.
- For dates, use a readable format (e.g., "Jan 6, 2026").
- Every insertion date listed in the contract gets its own {"date", "amount"} pair.

You MUST respond with ONLY valid JSON (no markdown, no explanation) in this exact structure:
{
  "shows": [
    {
      "podcast_booked": "...",
      "agency": "...",
      "advertiser": "...",
      "type": "...",
      "insertions": [{"date": "...", "amount": "..."}],
      "draft_required_yn": "...",
      "impressions": "...",
      "payment_terms": "...",
      "requires_pixel_tracker_yn": "...",
      "notes": "..."
    }
  ]
}
"#;

/// The classification system prompt for a schema variant.
pub fn classification_system(variant: ClassifyVariant) -> &'static str {
    match variant {
        ClassifyVariant::Standard => CLASSIFY_SYSTEM,
        ClassifyVariant::GlobalRedact => CLASSIFY_SYSTEM_GLOBAL_REDACT,
    }
}

/// The extraction system prompt for a schema variant.
pub fn extraction_system(variant: ExtractionVariant) -> &'static str {
    match variant {
        ExtractionVariant::ShowLevel => EXTRACT_SHOW_LEVEL_SYSTEM,
        ExtractionVariant::PerInsertion => EXTRACT_PER_INSERTION_SYSTEM,
    }
}

/// Format extracted blocks into a numbered list for the classifier.
pub fn classification_message(blocks: &[TextBlock]) -> String {
    let mut msg = format!("The document contains {} text blocks:\n\n", blocks.len());
    for block in blocks {
        let _ = writeln!(
            msg,
            "[Block {}] (Page {}): \"{}\"",
            block.block_id,
            block.page_number,
            truncate(&block.text, MAX_BLOCK_TEXT_LEN)
        );
    }
    msg
}

/// Build the extraction user message from a reconciled classification:
/// shared/global sections first, then one section per show, so the model
/// has the full relevant context for each record.
pub fn extraction_message(blocks: &[TextBlock], classification: &Classification) -> String {
    let mut msg = format!(
        "Shows found in this contract: {}\n\n--- FULL CONTRACT TEXT (organized by section) ---\n\n",
        classification.shows.join(", ")
    );

    let global_ids: BTreeSet<u32> = classification.ids(GLOBAL).iter().copied().collect();
    let global_blocks: Vec<&TextBlock> = blocks
        .iter()
        .filter(|b| global_ids.contains(&b.block_id))
        .collect();
    if !global_blocks.is_empty() {
        msg.push_str("== SHARED / GLOBAL SECTIONS ==\n");
        for block in &global_blocks {
            let _ = writeln!(msg, "(Page {}) {}", block.page_number, block.text);
        }
        msg.push('\n');
    }

    for show in &classification.shows {
        let show_ids: BTreeSet<u32> = classification.ids(show).iter().copied().collect();
        let show_blocks: Vec<&TextBlock> = blocks
            .iter()
            .filter(|b| show_ids.contains(&b.block_id))
            .collect();
        if show_blocks.is_empty() {
            continue;
        }
        let _ = writeln!(msg, "== SHOW: {show} ==");
        for block in &show_blocks {
            let _ = writeln!(msg, "(Page {}) {}", block.page_number, block.text);
        }
        msg.push('\n');
    }

    msg
}

/// Truncate on a char boundary, appending an ellipsis when text was cut.
fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_chars).collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use blackout_core::classify::{RawClassification, reconcile};
    use serde_json::json;

    fn block(id: u32, page: u32, text: &str) -> TextBlock {
        TextBlock {
            block_id: id,
            page_number: page,
            bbox: [0.0, 0.0, 10.0, 10.0],
            text: text.to_string(),
        }
    }

    #[test]
    fn classification_message_lists_every_block() {
        let blocks = vec![block(0, 1, "Preamble"), block(1, 2, "Show A terms")];
        let msg = classification_message(&blocks);
        assert!(msg.starts_with("The document contains 2 text blocks:"));
        assert!(msg.contains("[Block 0] (Page 1): \"Preamble\""));
        assert!(msg.contains("[Block 1] (Page 2): \"Show A terms\""));
    }

    #[test]
    fn long_block_text_truncated_with_ellipsis() {
        let long = "x".repeat(600);
        let msg = classification_message(&[block(0, 1, &long)]);
        assert!(msg.contains(&format!("{}…", "x".repeat(500))));
        assert!(!msg.contains(&"x".repeat(501)));
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        let text = "é".repeat(510);
        let out = truncate(&text, 500);
        assert_eq!(out.chars().count(), 501);
        assert!(out.ends_with('…'));
    }

    #[test]
    fn standard_system_prompt_omits_global_redact() {
        assert!(!classification_system(ClassifyVariant::Standard).contains("GLOBAL_REDACT"));
        assert!(classification_system(ClassifyVariant::GlobalRedact).contains("GLOBAL_REDACT"));
    }

    #[test]
    fn extraction_message_puts_global_before_shows() {
        let blocks = vec![
            block(0, 1, "Between the parties"),
            block(1, 1, "Show A gets two spots"),
            block(2, 2, "Show B gets one spot"),
        ];
        let raw = RawClassification::from_json(&json!({
            "shows": ["A", "B"],
            "assignments": {"A": [1], "B": [2], "GLOBAL": [0]}
        }))
        .unwrap();
        let classification = reconcile(raw, &(0..3).collect(), ClassifyVariant::Standard);

        let msg = extraction_message(&blocks, &classification);
        let global = msg.find("== SHARED / GLOBAL SECTIONS ==").unwrap();
        let show_a = msg.find("== SHOW: A ==").unwrap();
        let show_b = msg.find("== SHOW: B ==").unwrap();
        assert!(global < show_a && show_a < show_b);
        assert!(msg.contains("(Page 1) Between the parties"));
    }

    #[test]
    fn extraction_message_skips_shows_with_no_blocks() {
        let blocks = vec![block(0, 1, "Everything is global")];
        let raw = RawClassification::from_json(&json!({
            "shows": ["Ghost"],
            "assignments": {"GLOBAL": [0]}
        }))
        .unwrap();
        let classification = reconcile(raw, &(0..1).collect(), ClassifyVariant::Standard);

        let msg = extraction_message(&blocks, &classification);
        assert!(!msg.contains("== SHOW: Ghost =="));
    }
}
