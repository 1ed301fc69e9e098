//! Pure domain logic for the sitedesk back office.
//!
//! This crate has no I/O and no async: status lifecycles, line-item
//! normalization, pagination math and address formatting live here so the
//! API and repository layers (and any future CLI tooling) share one
//! implementation.

pub mod client;
pub mod error;
pub mod invoice;
pub mod quote;
pub mod search;
pub mod types;

pub use error::CoreError;
