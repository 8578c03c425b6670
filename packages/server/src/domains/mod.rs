// Business domains
pub mod auth;
pub mod catalog;
pub mod uploads;
pub mod users;
