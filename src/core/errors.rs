use thiserror::Error;

#[derive(Error, Debug)]
pub enum KakitoriError {
    #[error("I/O error: {0}")]
    Io(Box<std::io::Error>),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Network error: {0}")]
    Network(Box<reqwest::Error>),

    /// The API answered with an explicit error object; the message is shown as-is.
    #[error("{0}")]
    Credential(String),

    #[error("Unexpected response from the server.")]
    UnexpectedResponse,

    #[error("Response from server timed out")]
    Timeout,

    #[error("You haven't studied any items yet. Come back after your first lessons!")]
    NothingToStudy,

    #[error("KakitoriError: {0}")]
    Custom(String),
}

impl From<std::io::Error> for KakitoriError {
    fn from(error: std::io::Error) -> Self {
        KakitoriError::Io(Box::new(error))
    }
}

impl From<reqwest::Error> for KakitoriError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            return KakitoriError::Timeout;
        }
        if error.is_decode() {
            return KakitoriError::UnexpectedResponse;
        }
        KakitoriError::Network(Box::new(error))
    }
}
