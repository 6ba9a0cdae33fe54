//! Error types for the placeholder posts API.
//!
//! `NotFound` gets its own variant; every other unexpected status lands in
//! `HttpError` with the raw status and body for diagnostics.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from building, executing or parsing a posts API call.
#[derive(Debug)]
pub enum ApiError {
    /// The server returned 404.
    NotFound,
    /// The server returned an unexpected non-404 status.
    HttpError { status: u16, body: String },
    /// The request never produced a response (DNS, connect, TLS, I/O).
    Transport(String),
    /// The response body could not be deserialized into the expected type.
    DeserializationError(String),
    /// The request payload could not be serialized to JSON.
    SerializationError(String),
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound => write!(f, "resource not found"),
            Self::HttpError { status, body } => write!(f, "HTTP {status}: {body}"),
            Self::Transport(message) => write!(f, "transport failed: {message}"),
            Self::DeserializationError(message) => write!(f, "deserialization failed: {message}"),
            Self::SerializationError(message) => write!(f, "serialization failed: {message}"),
        }
    }
}

impl Error for ApiError {}
