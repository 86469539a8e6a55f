//! Error types for amoCRM API operations.

use thiserror::Error;

/// Errors that can occur during amoCRM API operations.
#[derive(Debug, Error)]
pub enum AmoError {
    /// Configuration is missing or incomplete.
    #[error("amoCRM configuration required: {0}")]
    ConfigMissing(String),

    /// The HTTP call itself failed (DNS, connection refused, timeout).
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a status code the operation does not accept.
    #[error("unexpected status code {status}{}", suffix(.message))]
    UnexpectedStatus {
        status: u16,
        /// Server-provided error text, when the body carried one.
        message: Option<String>,
    },

    /// The response body could not be parsed as the expected JSON shape.
    #[error("Failed to parse response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The request body could not be serialized.
    #[error("Failed to serialize request body: {0}")]
    Encode(serde_json::Error),

    /// Caller input rejected before any request was sent.
    #[error("invalid input: {0}")]
    Validation(String),

    /// A create call returned no items.
    #[error("{0}: response contained no items")]
    EmptyResult(&'static str),
}

impl AmoError {
    /// Status code carried by an [`AmoError::UnexpectedStatus`].
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

fn suffix(message: &Option<String>) -> String {
    message.as_deref().map(|m| format!(": {m}")).unwrap_or_default()
}

/// Result type alias for amoCRM operations.
pub type Result<T> = core::result::Result<T, AmoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unexpected_status_display() {
        let err = AmoError::UnexpectedStatus {
            status: 400,
            message: Some("Bad Request".to_string()),
        };
        assert_eq!(err.to_string(), "unexpected status code 400: Bad Request");
        assert_eq!(err.status(), Some(400));

        let err = AmoError::UnexpectedStatus {
            status: 500,
            message: None,
        };
        assert_eq!(err.to_string(), "unexpected status code 500");
    }

    #[test]
    fn test_status_absent_for_other_kinds() {
        let err = AmoError::Validation("id is zero".to_string());
        assert_eq!(err.status(), None);
    }
}
