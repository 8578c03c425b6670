//! Phone number validation.
//!
//! Phone numbers are the identity key for the whole system, so they are
//! normalized to E.164 at the edge and rejected otherwise. Everything past
//! the request boundary can assume a well-formed number.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // E.164: leading +, country code 1-9, then 6-14 more digits
    static ref E164_REGEX: Regex = Regex::new(r"^\+[1-9]\d{6,14}$").unwrap();
}

/// Check that a phone number is in E.164 form (e.g. "+15551234567").
pub fn is_valid_phone_number(phone_number: &str) -> bool {
    E164_REGEX.is_match(phone_number)
}
