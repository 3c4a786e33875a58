use thiserror::Error;

#[derive(Debug, Error)]
pub enum AiError {
    #[error("ANTHROPIC_API_KEY is not set")]
    MissingApiKey,

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("model API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("model returned no text content")]
    EmptyResponse,

    #[error("model returned invalid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    #[error(transparent)]
    Core(#[from] blackout_core::CoreError),
}
