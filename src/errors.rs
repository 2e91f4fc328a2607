/*!
 * Error types for the lyrictl application.
 *
 * Every provider adapter normalizes transport and API failures into
 * `ProviderError` before they reach the pipeline, so the pipeline only ever
 * reasons about a closed set of failure kinds.
 */

use thiserror::Error;

/// Errors that can occur when talking to a translation or music API
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProviderError {
    /// The request did not complete within the configured timeout
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Error when making an API request fails for any other transport reason
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// The provider signalled rate limiting (HTTP 429 or equivalent)
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// The provider answered but produced no usable text
    #[error("Provider returned no usable translation: {0}")]
    EmptyResponse(String),

    /// The music backend rejected the session token (HTTP 401 from the backend only)
    #[error("Authentication required: {0}")]
    AuthenticationRequired(String),
}

impl ProviderError {
    /// Whether this failure is a rate-limit signal that warrants a backoff
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimitExceeded(_))
    }

    /// Normalize a reqwest transport error
    pub fn from_reqwest(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout(error.to_string())
        } else if error.is_connect() {
            Self::ConnectionError(error.to_string())
        } else if error.is_decode() {
            Self::ParseError(error.to_string())
        } else {
            Self::RequestFailed(error.to_string())
        }
    }

    /// Normalize a non-success HTTP status
    ///
    /// A 401 stays an `ApiError` here: third-party services reject bad API
    /// keys with it, which is a provider failure and not a lost session.
    pub fn from_status(status_code: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status_code {
            429 => Self::RateLimitExceeded(message),
            _ => Self::ApiError { status_code, message },
        }
    }
}

/// Errors surfaced by the translation layer to its caller
#[derive(Error, Debug)]
pub enum TranslationError {
    /// The session is missing or expired; the user has to log in again
    #[error("Not authenticated: {0}")]
    AuthenticationRequired(String),

    /// Lyrics could not be fetched for the requested song
    #[error("Lyrics unavailable: {0}")]
    LyricsUnavailable(String),

    /// Any other provider failure
    #[error("Provider error: {0}")]
    Provider(ProviderError),
}

impl From<ProviderError> for TranslationError {
    fn from(error: ProviderError) -> Self {
        match error {
            ProviderError::AuthenticationRequired(message) => Self::AuthenticationRequired(message),
            other => Self::Provider(other),
        }
    }
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from a provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from translation
    #[error("Translation error: {0}")]
    Translation(#[from] TranslationError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
