use std::time::Duration;

/// Failures of a single inference transport, or of the whole client once
/// every transport has been tried.
#[derive(Debug, thiserror::Error)]
pub enum InferenceError {
    #[error("HTTP {status} from {url}: {body}")]
    Status { status: u16, url: String, body: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Invalid response from model endpoint: {0}")]
    InvalidResponse(String),

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Model runner '{0}' not found in PATH")]
    RunnerMissing(String),

    #[error("Model runner failed: {0}")]
    Runner(String),

    #[error("Model runner output exceeded {0} bytes")]
    OutputTooLarge(usize),

    #[error("Empty response from AI model")]
    EmptyResponse,
}

impl InferenceError {
    /// 400 and 404 mean the endpoint or model is misconfigured; retrying
    /// will not help.
    pub fn is_permanent(&self) -> bool {
        matches!(self, InferenceError::Status { status: 400 | 404, .. })
    }
}

/// Errors surfaced by the generation pipeline.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Inference(#[from] InferenceError),

    #[error("{0}")]
    Parse(String),
}
