//! Uniform error shape for REST calls.
//!
//! ERROR HANDLING
//! ==============
//! Every failure is terminal for its operation. Stores never surface an
//! `ApiError` directly; they call [`ApiError::display_message`] with the
//! operation's fallback text and keep the resulting string in state.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

/// Errors produced by the HTTP client adapter.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// An authenticated call was attempted without a session token.
    #[error("not authenticated")]
    Unauthenticated,

    /// The request never produced an HTTP response.
    #[error("request failed: {0}")]
    Transport(String),

    /// The server answered with a non-success status.
    #[error("server returned status {status}")]
    Status { status: u16, message: Option<String> },

    /// The response body did not match the expected wire type.
    #[error("response parse failed: {0}")]
    Decode(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

impl ApiError {
    /// Server-provided message, if the response carried one.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Status { message: Some(message), .. } => Some(message),
            _ => None,
        }
    }

    /// The string shown to the user: the server's message when present,
    /// otherwise the operation's fallback.
    #[must_use]
    pub fn display_message(&self, fallback: &str) -> String {
        self.server_message().unwrap_or(fallback).to_owned()
    }

    /// HTTP status code for server-side rejections.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
