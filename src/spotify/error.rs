use thiserror::Error;

/// Failures talking to the Spotify Web API.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ServiceError {
    pub fn is_auth(&self) -> bool {
        matches!(self, ServiceError::Auth(_))
    }
}

impl From<reqwest::Error> for ServiceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ServiceError::Parse(err.to_string())
        } else {
            ServiceError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ServiceError {
    fn from(err: serde_json::Error) -> Self {
        ServiceError::Parse(err.to_string())
    }
}
