use thiserror::Error;

pub type Result<T> = std::result::Result<T, LineNotifyError>;

#[derive(Debug, Error)]
pub enum LineNotifyError {
    #[error("Network error: {0}")]
    Network(String),
}

impl From<reqwest::Error> for LineNotifyError {
    fn from(err: reqwest::Error) -> Self {
        LineNotifyError::Network(err.to_string())
    }
}
