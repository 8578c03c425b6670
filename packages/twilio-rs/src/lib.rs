//! Minimal Twilio Verify v2 client.
//!
//! Covers the two calls a phone verification flow needs: starting a
//! verification (send a one-time code to a phone number) and checking a
//! submitted code. The provider's verdict is returned as-is so callers can
//! distinguish an approved code from a pending or canceled one.

use std::collections::HashMap;

pub mod error;
pub mod models;

pub use error::{Result, TwilioError};
pub use models::{Verification, VerificationCheck};

use reqwest::Client;

const VERIFY_BASE_URL: &str = "https://verify.twilio.com/v2";

#[derive(Debug, Clone)]
pub struct TwilioOptions {
    pub account_sid: String,
    pub auth_token: String,
    pub verify_service_sid: String,
}

#[derive(Debug, Clone)]
pub struct TwilioService {
    options: TwilioOptions,
    http_client: Client,
    base_url: String,
}

impl TwilioService {
    pub fn new(options: TwilioOptions) -> Self {
        Self {
            options,
            http_client: Client::new(),
            base_url: VERIFY_BASE_URL.to_string(),
        }
    }

    /// Set a custom base URL (for proxies or test servers).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Start a verification: Twilio delivers a one-time code to `to` over the
    /// given channel ("sms", "call", "whatsapp", ...).
    pub async fn send_code(&self, to: &str, channel: &str) -> Result<Verification> {
        let url = format!(
            "{}/Services/{}/Verifications",
            self.base_url, self.options.verify_service_sid
        );

        let mut form_body: HashMap<&str, &str> = HashMap::new();
        form_body.insert("To", to);
        form_body.insert("Channel", channel);

        let response = self
            .http_client
            .post(url)
            .basic_auth(&self.options.account_sid, Some(&self.options.auth_token))
            .form(&form_body)
            .send()
            .await
            .map_err(|e| TwilioError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TwilioError::Api {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<Verification>()
            .await
            .map_err(|e| TwilioError::Parse(e.to_string()))
    }

    /// Check a submitted code against the pending verification for `to`.
    ///
    /// A non-matching code is not an error: Twilio answers 200 with status
    /// "pending". Inspect [`VerificationCheck::status`] for the verdict.
    pub async fn check_code(&self, to: &str, code: &str) -> Result<VerificationCheck> {
        let url = format!(
            "{}/Services/{}/VerificationCheck",
            self.base_url, self.options.verify_service_sid
        );

        let mut form_body: HashMap<&str, &str> = HashMap::new();
        form_body.insert("To", to);
        form_body.insert("Code", code);

        let response = self
            .http_client
            .post(url)
            .basic_auth(&self.options.account_sid, Some(&self.options.auth_token))
            .form(&form_body)
            .send()
            .await
            .map_err(|e| TwilioError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TwilioError::Api {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<VerificationCheck>()
            .await
            .map_err(|e| TwilioError::Parse(e.to_string()))
    }
}
