use thiserror::Error;

pub type Result<T> = std::result::Result<T, CommonsError>;

#[derive(Debug, Error)]
pub enum CommonsError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for CommonsError {
    fn from(err: reqwest::Error) -> Self {
        CommonsError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for CommonsError {
    fn from(err: serde_json::Error) -> Self {
        CommonsError::Parse(err.to_string())
    }
}
