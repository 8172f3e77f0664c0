//! Error types for the loan uploader.
//!
//! Every failure an upload can hit is an [`UploadError`]. The widget collapses
//! all of them into a single error banner whose text is the error's
//! `Display`, so the messages here are written for the end user.

use std::path::PathBuf;
use thiserror::Error;

/// Message shown when the service rejects a document without saying why.
pub const DEFAULT_REJECTION_MESSAGE: &str = "Invalid or unsupported loan document";

#[derive(Debug, Error)]
pub enum UploadError {
    /// The selected file could not be read from disk.
    #[error("Failed to read file '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The request never produced a response (connection refused, timeout...).
    #[error("{0}")]
    Transport(String),

    /// Non-JSON body on a non-2xx response.
    #[error("Upload failed with status: {0}")]
    HttpStatus(u16),

    /// The service answered `success: false`.
    #[error("{0}")]
    Rejected(String),

    /// The service answered, but not in the agreed shape.
    #[error("Malformed conversion response: {0}")]
    MalformedResponse(String),
}

impl UploadError {
    pub fn rejected(message: Option<String>) -> Self {
        match message {
            Some(message) if !message.trim().is_empty() => Self::Rejected(message),
            _ => Self::Rejected(DEFAULT_REJECTION_MESSAGE.to_string()),
        }
    }
}

/// Invalid values in the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var}={value:?} is not a valid number")]
    InvalidNumber { var: &'static str, value: String },

    #[error("{var} must be greater than zero")]
    ZeroValue { var: &'static str },

    #[error("Conversion endpoint '{0}' is not an http(s) URL")]
    InvalidEndpoint(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_uses_service_message() {
        let e = UploadError::rejected(Some("bad format".into()));
        assert_eq!(e.to_string(), "bad format");
    }

    #[test]
    fn rejection_falls_back_to_default() {
        assert_eq!(
            UploadError::rejected(None).to_string(),
            DEFAULT_REJECTION_MESSAGE
        );
        assert_eq!(
            UploadError::rejected(Some("  ".into())).to_string(),
            DEFAULT_REJECTION_MESSAGE
        );
    }

    #[test]
    fn read_error_names_the_file() {
        let e = UploadError::Read {
            path: PathBuf::from("/tmp/loan.txt"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        let msg = e.to_string();
        assert!(msg.contains("/tmp/loan.txt"), "got: {msg}");
        assert!(msg.contains("missing"), "got: {msg}");
    }

    #[test]
    fn transport_error_shows_the_bare_message() {
        assert_eq!(
            UploadError::Transport("connection refused".into()).to_string(),
            "connection refused"
        );
    }

    #[test]
    fn http_status_display() {
        assert_eq!(
            UploadError::HttpStatus(502).to_string(),
            "Upload failed with status: 502"
        );
    }
}
