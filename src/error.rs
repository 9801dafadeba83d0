use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid chart spec: {0}")]
    InvalidSpec(String),

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("chart '{chart_id}' could not be serialized: {reason}")]
    Serialization { chart_id: String, reason: String },

    #[error("rendering surface error: {0}")]
    Surface(String),

    #[error("malformed surface command: {0}")]
    Protocol(String),
}
