use thiserror::Error;

#[derive(Debug, Error)]
pub enum RushError {
    #[error("Missing or invalid session")]
    Unauthenticated,

    #[error("Record store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Failed to access summarizer API: {0}")]
    SummarizerError(String),

    #[error("Failed to parse request: {0}")]
    ParseError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Failed to send HTTP request: {0}")]
    HttpError(String),

    #[error("Invalid input: {0}")]
    ValidationError(String),
}

impl RushError {
    /// HTTP status used when this error ends a request.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            RushError::Unauthenticated => 401,
            RushError::NotFound(_) => 404,
            RushError::ParseError(_) | RushError::ValidationError(_) => 400,
            RushError::StoreUnavailable(_)
            | RushError::SummarizerError(_)
            | RushError::ConfigError(_)
            | RushError::HttpError(_) => 500,
        }
    }
}

impl From<reqwest::Error> for RushError {
    fn from(error: reqwest::Error) -> Self {
        RushError::HttpError(error.to_string())
    }
}

impl From<serde_json::Error> for RushError {
    fn from(error: serde_json::Error) -> Self {
        RushError::ParseError(error.to_string())
    }
}
