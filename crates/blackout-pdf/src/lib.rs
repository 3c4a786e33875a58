//! PDF boundary: text block extraction and rasterizing redaction.
//!
//! The `pdfium` feature gates everything that touches the pdfium dynamic
//! library; [`layout`] is pure math and always available.

#[cfg(feature = "pdfium")]
mod engine;
mod error;
pub mod layout;

#[cfg(feature = "pdfium")]
pub use engine::{extract_blocks, redact_blocks};
pub use error::PdfError;
