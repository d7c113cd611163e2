//! HTTP request handlers for the cargo search API
//!
//! - `catalog` - public reference data (stations, containers, delivery terms)
//! - `account` - customer registration and login, admin login
//! - `search` - route search
//! - `booking` - booking submission for authenticated customers
//! - `admin` - back office CRUD and webhook settings

pub mod account;
pub mod admin;
pub mod booking;
pub mod catalog;
pub mod search;

/// Users are keyed by trimmed, lowercased email
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
