//! Spreadsheet boundary: row layouts for the two extraction schemas and
//! a Google Sheets values API client.

mod client;
mod error;
mod rows;

pub use client::SheetsClient;
pub use error::SheetsError;
pub use rows::{
    PER_INSERTION_HEADERS, SHOW_LEVEL_HEADERS, insertion_row, show_row, yn_to_bool,
};
