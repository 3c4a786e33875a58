//! Google Sheets values API client.

use serde::Deserialize;
use serde_json::{Value, json};
use tracing::info;

use crate::error::SheetsError;

const BASE_URL: &str = "https://sheets.googleapis.com/v4/spreadsheets";

/// Range probed by [`SheetsClient::is_empty`]. Spans every column the API
/// will return so data anywhere in the sheet counts as non-empty.
const PROBE_RANGE: &str = "A1:ZZ";

/// Appends extracted rows to a spreadsheet using an OAuth bearer token.
pub struct SheetsClient {
    client: reqwest::Client,
    token: String,
    sheet_id: String,
    base_url: String,
}

#[derive(Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

impl SheetsClient {
    pub fn new(token: String, sheet_id: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            token,
            sheet_id,
            base_url: BASE_URL.to_string(),
        }
    }

    /// Create a client from `GOOGLE_SHEETS_TOKEN` and `GOOGLE_SHEET_ID`.
    ///
    /// Missing configuration is reported before any network call.
    pub fn from_env() -> Result<Self, SheetsError> {
        let token =
            std::env::var("GOOGLE_SHEETS_TOKEN").map_err(|_| SheetsError::MissingToken)?;
        let sheet_id =
            std::env::var("GOOGLE_SHEET_ID").map_err(|_| SheetsError::MissingSheetId)?;
        Ok(Self::new(token, sheet_id))
    }

    /// Use a custom API base URL (for tests or proxies).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// The spreadsheet's browser URL.
    pub fn sheet_url(&self) -> String {
        format!("https://docs.google.com/spreadsheets/d/{}", self.sheet_id)
    }

    fn values_url(&self, range_and_query: &str) -> String {
        format!("{}/{}/values/{}", self.base_url, self.sheet_id, range_and_query)
    }

    /// Whether the sheet has no data at all (so headers must be written).
    pub async fn is_empty(&self) -> Result<bool, SheetsError> {
        let url = self.values_url(PROBE_RANGE);
        let resp = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(SheetsError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let range: ValueRange = resp.json().await?;
        Ok(range.values.is_empty())
    }

    /// Append raw rows after the sheet's existing data.
    pub async fn append(&self, rows: &[Vec<Value>]) -> Result<(), SheetsError> {
        let url = self
            .values_url("A1:append?valueInputOption=USER_ENTERED&insertDataOption=INSERT_ROWS");
        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(&json!({ "values": rows }))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(SheetsError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }

    /// Append data rows, writing the header row first if the sheet is
    /// empty. Returns the spreadsheet's browser URL.
    pub async fn append_rows(
        &self,
        headers: &[&str],
        rows: Vec<Vec<Value>>,
    ) -> Result<String, SheetsError> {
        if self.is_empty().await? {
            info!("sheet is empty; writing header row");
            let header_row: Vec<Value> =
                headers.iter().map(|h| Value::String((*h).to_string())).collect();
            self.append(&[header_row]).await?;
        }

        info!(count = rows.len(), "appending rows to sheet");
        self.append(&rows).await?;
        Ok(self.sheet_url())
    }
}
