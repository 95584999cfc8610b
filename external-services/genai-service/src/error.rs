use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenAiError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Flow request failed: {0}")]
    Request(String),

    #[error("Flow {flow} returned HTTP {status}: {body}")]
    Status { flow: String, status: u16, body: String },

    #[error("Invalid flow response: {0}")]
    InvalidResponse(String),
}

pub type GenAiResult<T> = Result<T, GenAiError>;
