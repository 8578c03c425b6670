//! Response models for the Twilio Verify v2 API.

use serde::{Deserialize, Serialize};

/// A Verification resource, returned when a code is sent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Verification {
    pub sid: String,
    pub service_sid: String,
    pub account_sid: String,
    pub to: String,
    pub channel: String,
    /// "pending" until the code is checked, "canceled" if expired or revoked.
    pub status: String,
}

/// A VerificationCheck resource, returned when a submitted code is checked.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationCheck {
    pub sid: String,
    pub service_sid: String,
    pub account_sid: String,
    pub to: String,
    pub channel: String,
    /// "approved" when the code matched, otherwise "pending" or "canceled".
    pub status: String,
    #[serde(default)]
    pub valid: bool,
}
