use thiserror::Error;

#[derive(Debug, Error)]
pub enum SheetsError {
    #[error("GOOGLE_SHEETS_TOKEN is not set")]
    MissingToken,

    #[error("GOOGLE_SHEET_ID is not set")]
    MissingSheetId,

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Sheets API returned {status}: {body}")]
    Api { status: u16, body: String },
}
