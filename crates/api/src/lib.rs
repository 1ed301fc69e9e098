//! Sitedesk API server library.
//!
//! Everything the binary wires together lives here as public modules, so
//! the integration tests can assemble the same router against a test pool.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod mail;
pub mod middleware;
pub mod query;
pub mod response;
pub mod routes;
pub mod state;
