//! Structured extraction records and spreadsheet row expansion.
//!
//! All fields are free text rather than numeric: contract language is
//! unstructured, and the model reports amounts and dates as written. Two
//! response schemas exist historically; they are modelled as distinct
//! record types selected by [`ExtractionVariant`], never merged.

use serde::{Deserialize, Serialize};

fn not_specified() -> String {
    "Not specified".to_string()
}

fn unknown() -> String {
    "Unknown".to_string()
}

/// Which extraction schema a deployment runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExtractionVariant {
    /// One record and one spreadsheet row per show.
    ShowLevel,
    /// One spreadsheet row per insertion date, expanded from each record.
    #[default]
    PerInsertion,
}

/// Show-level extraction record (one spreadsheet row per show).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShowRecord {
    #[serde(default = "not_specified")]
    pub sponsor_name: String,
    #[serde(default = "not_specified")]
    pub show_name: String,
    #[serde(default = "not_specified")]
    pub contract_amount: String,
    #[serde(default = "not_specified")]
    pub contract_terms: String,
    #[serde(default = "not_specified")]
    pub air_dates: String,
    #[serde(default = "not_specified")]
    pub cost: String,
    #[serde(default = "not_specified")]
    pub billing_cycle: String,
    /// "Yes", "No", or "Unknown".
    #[serde(default = "unknown")]
    pub requires_pixel_setup: String,
    /// "Yes", "No", or "Unknown".
    #[serde(default = "unknown")]
    pub requires_drafts: String,
    #[serde(default = "not_specified")]
    pub ad_frequency: String,
}

/// One billing date/amount pair within a per-insertion record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insertion {
    #[serde(default = "not_specified")]
    pub date: String,
    #[serde(default = "not_specified")]
    pub amount: String,
}

impl Default for Insertion {
    fn default() -> Self {
        Self {
            date: not_specified(),
            amount: not_specified(),
        }
    }
}

/// Per-insertion extraction record: show-level fields plus the list of
/// insertion date/amount pairs.
///
/// The legacy response shape carried a single record-level
/// `insertion_date`/`amount` instead of an `insertions` array; it is
/// detected and normalized by [`InsertionRecord::normalized_insertions`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsertionRecord {
    #[serde(default = "not_specified")]
    pub podcast_booked: String,
    #[serde(default = "not_specified")]
    pub agency: String,
    #[serde(default = "not_specified")]
    pub advertiser: String,
    #[serde(default = "not_specified", rename = "type")]
    pub contract_type: String,
    #[serde(default)]
    pub insertions: Vec<Insertion>,
    /// Legacy single-date shape.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insertion_date: Option<String>,
    /// Legacy single-amount shape.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,
    /// "Y", "N", or "Unknown".
    #[serde(default = "unknown")]
    pub draft_required_yn: String,
    #[serde(default = "not_specified")]
    pub impressions: String,
    #[serde(default = "not_specified")]
    pub payment_terms: String,
    /// "Y", "N", or "Unknown".
    #[serde(default = "unknown")]
    pub requires_pixel_tracker_yn: String,
    #[serde(default = "not_specified")]
    pub notes: String,
}

impl InsertionRecord {
    /// The record's date/amount pairs, with the legacy single-date shape
    /// normalized to a one-element list.
    pub fn normalized_insertions(&self) -> Vec<Insertion> {
        if !self.insertions.is_empty() {
            return self.insertions.clone();
        }
        match (&self.insertion_date, &self.amount) {
            (None, None) => Vec::new(),
            (date, amount) => vec![Insertion {
                date: date.clone().unwrap_or_else(not_specified),
                amount: amount.clone().unwrap_or_else(not_specified),
            }],
        }
    }
}

/// A single spreadsheet row in the per-insertion layout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsertionRow {
    pub podcast_booked: String,
    pub agency: String,
    pub advertiser: String,
    pub contract_type: String,
    pub insertion_date: String,
    pub draft_required_yn: String,
    pub impressions: String,
    pub amount: String,
    pub payment_terms: String,
    pub requires_pixel_tracker_yn: String,
    pub notes: String,
}

/// Expand one record into one row per date/amount pair, duplicating the
/// show-level fields across the rows.
///
/// A record with no pairs still emits one placeholder row, so every
/// classified show yields at least one output row.
pub fn expand_insertions(record: &InsertionRecord) -> Vec<InsertionRow> {
    let pairs = record.normalized_insertions();
    if pairs.is_empty() {
        return vec![row_for(record, &Insertion::default())];
    }
    pairs.iter().map(|pair| row_for(record, pair)).collect()
}

fn row_for(record: &InsertionRecord, pair: &Insertion) -> InsertionRow {
    InsertionRow {
        podcast_booked: record.podcast_booked.clone(),
        agency: record.agency.clone(),
        advertiser: record.advertiser.clone(),
        contract_type: record.contract_type.clone(),
        insertion_date: pair.date.clone(),
        draft_required_yn: record.draft_required_yn.clone(),
        impressions: record.impressions.clone(),
        amount: pair.amount.clone(),
        payment_terms: record.payment_terms.clone(),
        requires_pixel_tracker_yn: record.requires_pixel_tracker_yn.clone(),
        notes: record.notes.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record_with_pairs(pairs: &[(&str, &str)]) -> InsertionRecord {
        InsertionRecord {
            podcast_booked: "The Morning Show".into(),
            agency: "Acme Media".into(),
            advertiser: "WidgetCo".into(),
            contract_type: "Host-read".into(),
            insertions: pairs
                .iter()
                .map(|(date, amount)| Insertion {
                    date: (*date).into(),
                    amount: (*amount).into(),
                })
                .collect(),
            insertion_date: None,
            amount: None,
            draft_required_yn: "Y".into(),
            impressions: "30,000".into(),
            payment_terms: "Net 30".into(),
            requires_pixel_tracker_yn: "N".into(),
            notes: "".into(),
        }
    }

    #[test]
    fn k_pairs_expand_to_k_rows() {
        let record = record_with_pairs(&[
            ("Jan 6, 2026", "$1,200"),
            ("Jan 13, 2026", "$1,200"),
            ("Jan 20, 2026", "$1,500"),
        ]);
        let rows = expand_insertions(&record);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[2].insertion_date, "Jan 20, 2026");
        assert_eq!(rows[2].amount, "$1,500");
        // Show-level fields duplicated across rows.
        for row in &rows {
            assert_eq!(row.podcast_booked, "The Morning Show");
            assert_eq!(row.payment_terms, "Net 30");
        }
    }

    #[test]
    fn zero_pairs_expand_to_one_placeholder_row() {
        let record = record_with_pairs(&[]);
        let rows = expand_insertions(&record);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].insertion_date, "Not specified");
        assert_eq!(rows[0].amount, "Not specified");
        assert_eq!(rows[0].agency, "Acme Media");
    }

    #[test]
    fn legacy_single_date_shape_normalized() {
        let record: InsertionRecord = serde_json::from_value(json!({
            "podcast_booked": "Night Owls",
            "insertion_date": "Feb 2, 2026",
            "amount": "$900"
        }))
        .unwrap();

        let rows = expand_insertions(&record);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].insertion_date, "Feb 2, 2026");
        assert_eq!(rows[0].amount, "$900");
    }

    #[test]
    fn insertions_array_wins_over_legacy_fields() {
        let record: InsertionRecord = serde_json::from_value(json!({
            "insertions": [{"date": "Mar 1, 2026", "amount": "$500"}],
            "insertion_date": "ignored",
            "amount": "ignored"
        }))
        .unwrap();
        let pairs = record.normalized_insertions();
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].date, "Mar 1, 2026");
    }

    #[test]
    fn missing_show_record_fields_get_defaults() {
        let record: ShowRecord = serde_json::from_value(json!({
            "show_name": "The Morning Show",
            "contract_amount": "$10,000"
        }))
        .unwrap();
        assert_eq!(record.sponsor_name, "Not specified");
        assert_eq!(record.requires_pixel_setup, "Unknown");
        assert_eq!(record.requires_drafts, "Unknown");
        assert_eq!(record.contract_amount, "$10,000");
    }

    #[test]
    fn missing_insertion_fields_get_defaults() {
        let record: InsertionRecord = serde_json::from_value(json!({})).unwrap();
        assert_eq!(record.podcast_booked, "Not specified");
        assert_eq!(record.draft_required_yn, "Unknown");
        assert!(record.normalized_insertions().is_empty());
    }
}
