/*!
 * Error types for the stylecast application.
 *
 * This module contains custom error types for the different parts of the
 * application, using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur when talking to the completion provider
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// The API answered without any choice to read text from
    #[error("API response contained no completion")]
    EmptyResponse,
}

impl From<reqwest::Error> for ProviderError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_connect() || error.is_timeout() {
            Self::ConnectionError(error.to_string())
        } else if error.is_decode() {
            Self::ParseError(error.to_string())
        } else {
            Self::RequestFailed(error.to_string())
        }
    }
}

/// Errors that can occur while converting a piece of text
#[derive(Error, Debug)]
pub enum ConversionError {
    /// The request was missing fields or named an unknown style
    #[error("{0}")]
    Validation(String),

    /// The completion call failed
    #[error("{0}")]
    Transport(#[from] ProviderError),
}

impl ConversionError {
    /// Shorthand for a validation failure
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

/// Reasons the watched file could not be parsed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseFailure {
    #[error("first line is not a `LANGUAGE:` header")]
    MissingLanguageHeader,

    #[error("second line is not a `STYLE:` header")]
    MissingStyleHeader,

    #[error("opening sentinel line not found")]
    MissingOpeningSentinel,

    #[error("closing sentinel line not found")]
    MissingClosingSentinel,
}

/// Errors raised while starting the application
#[derive(Error, Debug)]
pub enum AppError {
    /// A required setting (the API credential) is absent
    #[error("Configuration missing: {0}")]
    ConfigMissing(String),
}
