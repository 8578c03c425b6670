//! Error types for the Twilio Verify client.

use thiserror::Error;

/// Result type for Twilio client operations.
pub type Result<T> = std::result::Result<T, TwilioError>;

/// Twilio client errors.
#[derive(Debug, Error)]
pub enum TwilioError {
    /// Network error (connection failed, timeout)
    #[error("Network error: {0}")]
    Network(String),

    /// API error (non-2xx response from Twilio)
    #[error("Twilio API error ({status}): {body}")]
    Api { status: u16, body: String },

    /// Parse error (unexpected response format)
    #[error("Parse error: {0}")]
    Parse(String),
}
