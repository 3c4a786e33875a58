pub mod block;
pub mod classify;
pub mod error;
pub mod extract;
pub mod fence;
pub mod redact;

pub use block::TextBlock;
pub use classify::{Classification, ClassifyVariant, RawClassification, reconcile};
pub use error::CoreError;
pub use extract::{
    ExtractionVariant, Insertion, InsertionRecord, InsertionRow, ShowRecord, expand_insertions,
};
pub use fence::strip_code_fence;
pub use redact::{RedactionPlan, redaction_plan};
