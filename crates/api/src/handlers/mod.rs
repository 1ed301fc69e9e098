//! Request handlers, one module per resource.

pub mod auth;
pub mod catalog;
pub mod employees;
pub mod intake;
pub mod invoices;
pub mod quote_requests;
pub mod quotes;
