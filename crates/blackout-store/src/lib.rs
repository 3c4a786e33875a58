//! In-memory keyed document store: insert-on-upload, read-many,
//! overwrite-classification.

mod error;
mod memory;

pub use error::StoreError;
pub use memory::{DocumentRecord, DocumentStore};
