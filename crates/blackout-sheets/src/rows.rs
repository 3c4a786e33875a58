//! Spreadsheet row layouts for the two extraction schemas.

use blackout_core::{InsertionRow, ShowRecord};
use serde_json::Value;

/// Header row for the show-level layout, one row per show.
pub const SHOW_LEVEL_HEADERS: [&str; 10] = [
    "Sponsor",
    "Show",
    "Contract Amount",
    "Contract Terms",
    "Air Dates",
    "Cost",
    "Billing Cycle",
    "Requires Pixel Setup",
    "Requires Drafts",
    "Ad Frequency",
];

/// Header row for the per-insertion layout, one row per insertion date.
pub const PER_INSERTION_HEADERS: [&str; 11] = [
    "Podcast Booked",
    "Agency",
    "Advertiser",
    "Type",
    "Insertion Date Per IO",
    "Draft Required (Y/N)",
    "Impressions",
    "Amount",
    "Payment Terms",
    "Requires Pixel Tracker(Y/N)",
    "Notes",
];

/// Interpret a yes/no answer as a checkbox value. Anything else (for
/// example "Unknown") is left for the cell as text.
pub fn yn_to_bool(answer: &str) -> Option<bool> {
    match answer.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

fn checkbox(answer: &str) -> Value {
    match yn_to_bool(answer) {
        Some(b) => Value::Bool(b),
        None => Value::String(answer.to_string()),
    }
}

/// A show-level record as one spreadsheet row, column order matching
/// [`SHOW_LEVEL_HEADERS`].
pub fn show_row(record: &ShowRecord) -> Vec<Value> {
    vec![
        Value::String(record.sponsor_name.clone()),
        Value::String(record.show_name.clone()),
        Value::String(record.contract_amount.clone()),
        Value::String(record.contract_terms.clone()),
        Value::String(record.air_dates.clone()),
        Value::String(record.cost.clone()),
        Value::String(record.billing_cycle.clone()),
        checkbox(&record.requires_pixel_setup),
        checkbox(&record.requires_drafts),
        Value::String(record.ad_frequency.clone()),
    ]
}

/// A per-insertion row as one spreadsheet row, column order matching
/// [`PER_INSERTION_HEADERS`]. The Y/N columns become real booleans so
/// the sheet can render them as checkboxes.
pub fn insertion_row(row: &InsertionRow) -> Vec<Value> {
    vec![
        Value::String(row.podcast_booked.clone()),
        Value::String(row.agency.clone()),
        Value::String(row.advertiser.clone()),
        Value::String(row.contract_type.clone()),
        Value::String(row.insertion_date.clone()),
        checkbox(&row.draft_required_yn),
        Value::String(row.impressions.clone()),
        Value::String(row.amount.clone()),
        Value::String(row.payment_terms.clone()),
        checkbox(&row.requires_pixel_tracker_yn),
        Value::String(row.notes.clone()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn yn_parsing() {
        assert_eq!(yn_to_bool("Y"), Some(true));
        assert_eq!(yn_to_bool("yes"), Some(true));
        assert_eq!(yn_to_bool(" n "), Some(false));
        assert_eq!(yn_to_bool("No"), Some(false));
        assert_eq!(yn_to_bool("Unknown"), None);
        assert_eq!(yn_to_bool(""), None);
    }

    #[test]
    fn insertion_row_matches_header_order() {
        let row = InsertionRow {
            podcast_booked: "Night Owls".into(),
            agency: "Acme Media".into(),
            advertiser: "WidgetCo".into(),
            contract_type: "Host-read".into(),
            insertion_date: "Jan 6, 2026".into(),
            draft_required_yn: "Y".into(),
            impressions: "30,000".into(),
            amount: "$1,200".into(),
            payment_terms: "Net 30".into(),
            requires_pixel_tracker_yn: "Unknown".into(),
            notes: "".into(),
        };
        let cells = insertion_row(&row);
        assert_eq!(cells.len(), PER_INSERTION_HEADERS.len());
        assert_eq!(cells[4], json!("Jan 6, 2026"));
        // Checkbox columns are booleans when the answer is definite.
        assert_eq!(cells[5], json!(true));
        assert_eq!(cells[9], json!("Unknown"));
    }

    #[test]
    fn show_row_matches_header_order() {
        let record = ShowRecord {
            sponsor_name: "WidgetCo".into(),
            show_name: "The Morning Show".into(),
            contract_amount: "$10,000".into(),
            contract_terms: "Q1 exclusive".into(),
            air_dates: "Jan 1, 2026 – Mar 31, 2026".into(),
            cost: "$10,000".into(),
            billing_cycle: "Net 30".into(),
            requires_pixel_setup: "No".into(),
            requires_drafts: "Yes".into(),
            ad_frequency: "3x per week".into(),
        };
        let cells = show_row(&record);
        assert_eq!(cells.len(), SHOW_LEVEL_HEADERS.len());
        assert_eq!(cells[1], json!("The Morning Show"));
        assert_eq!(cells[7], json!(false));
        assert_eq!(cells[8], json!(true));
    }
}
