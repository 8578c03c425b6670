// Sokoni - vendor marketplace API core
//
// This crate provides the backend API for a vendor marketplace: phone-number
// identity verification, session tokens, and vendor-owned catalog records
// (products, services) with binary attachments.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
