//! SQL access, one zero-sized repo per table. Methods are associated
//! functions taking the pool; multi-statement writes open their own
//! transaction internally.

pub mod client_repo;
pub mod employee_repo;
pub mod invoice_repo;
pub mod item_repo;
pub mod quote_repo;
pub mod quote_request_repo;
pub mod session_repo;
pub mod user_repo;

pub use client_repo::ClientRepo;
pub use employee_repo::EmployeeRepo;
pub use invoice_repo::InvoiceRepo;
pub use item_repo::ItemRepo;
pub use quote_repo::QuoteRepo;
pub use quote_request_repo::QuoteRequestRepo;
pub use session_repo::SessionRepo;
pub use user_repo::UserRepo;
