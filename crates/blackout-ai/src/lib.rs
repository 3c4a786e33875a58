//! AI boundary: Anthropic Messages API client, prompt construction, and the
//! classification and extraction calls built on blackout-core's parsing and
//! repair.

mod classify;
mod client;
mod error;
mod extract;
pub mod prompt;

pub use classify::{classify_blocks, parse_classification};
pub use client::ClaudeClient;
pub use error::AiError;
pub use extract::{
    extract_insertion_data, extract_show_data, parse_insertion_records, parse_show_records,
};
