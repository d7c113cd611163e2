//! Rail-freight cargo search and booking platform
//!
//! The server side (`route`, `handler`, `search`, `database`) exposes the
//! `/api` surface; `client` holds the customer application logic that
//! consumes it.

pub mod auth;
pub mod client;
pub mod config;
pub mod database;
pub mod error;
pub mod extract;
pub mod handler;
pub mod middleware;
pub mod model;
pub mod route;
pub mod search;
pub mod seed;
pub mod validation;
