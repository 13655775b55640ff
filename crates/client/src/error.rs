//! Client error taxonomy.

use thiserror::Error;

use teefinder_core::ValidationError;

/// Errors surfaced to the presentation layer.
///
/// `Display` is the message to show the user.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Rejected locally; nothing was sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The server answered with `{status: "error"}`.
    #[error("{message}")]
    Application { message: String },

    /// The exchange itself failed.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The base URL cannot be used to build endpoint URLs.
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),
}

impl ClientError {
    /// Whether this came from the server's application logic rather than
    /// from validation or transport.
    #[must_use]
    pub const fn is_application(&self) -> bool {
        matches!(self, Self::Application { .. })
    }
}

/// Failures below the application layer.
#[derive(Debug, Error)]
pub enum TransportError {
    /// No response: DNS, refused connection, reset, timeout.
    #[error("Network error. Please try again.")]
    Unreachable(#[source] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("Network error. Please try again.")]
    Status { status: u16 },

    /// The body is not the expected envelope.
    #[error("Server returned an invalid response.")]
    InvalidBody(String),
}
