use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Malformed inbound event: {0}")]
    MalformedEvent(String),

    #[error("Malformed stack identifier: {0}")]
    MalformedIdentifier(String),

    #[error("Failed to interact with AWS services: {0}")]
    AwsError(String),

    #[error("Failed to send HTTP request: {0}")]
    HttpError(String),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),
}

impl From<reqwest::Error> for NotifyError {
    fn from(error: reqwest::Error) -> Self {
        NotifyError::HttpError(error.to_string())
    }
}

impl From<serde_json::Error> for NotifyError {
    fn from(error: serde_json::Error) -> Self {
        NotifyError::MalformedEvent(error.to_string())
    }
}
