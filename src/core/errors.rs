use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExchangeError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("API error response: {0}")]
    ApiError(String),

    #[error("Authentication error: {0}")]
    AuthError(String),

    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Invalid data received: {0}")]
    InvalidResponseFormat(String),

    #[error("Deserialization error: {0}")]
    DeserializationError(String),

    #[error("Configuration error: {0}")]
    ConfigError(#[from] crate::core::config::ConfigError),

    #[error("Other error: {0}")]
    Other(String),
}

impl ExchangeError {
    /// Connection-level failures where no usable reply was received.
    ///
    /// These are the only errors the generic retry policy repeats; malformed
    /// bodies and API rejections surface immediately.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::NetworkError(_) | Self::HttpError(_))
    }

    /// Message carried by an API rejection, if this is one.
    pub fn api_message(&self) -> Option<&str> {
        match self {
            Self::ApiError(message) => Some(message),
            _ => None,
        }
    }
}
