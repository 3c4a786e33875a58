use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("classification response is not a JSON object")]
    NotAnObject,

    #[error("block id {0} in category '{1}' is not a non-negative integer")]
    BadBlockId(serde_json::Value, String),

    #[error("show '{0}' not found in classification")]
    UnknownShow(String),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}
