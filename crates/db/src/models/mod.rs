//! Row structs and write payloads, one module per table.
//!
//! Entity structs derive `FromRow` (plus `Serialize` where the API returns
//! the row as-is); write paths get their own input structs rather than
//! reusing entities.

pub mod client;
pub mod employee;
pub mod invoice;
pub mod item;
pub mod quote;
pub mod quote_request;
pub mod session;
pub mod user;

pub use client::{Client, ClientSummary, CreateClient};
pub use employee::{CreateEmployee, Employee};
pub use invoice::{ConvertOutcome, InvoiceDetailRow, InvoiceItemRow, InvoiceSummary};
pub use item::{CreateItem, Item, ItemSummary};
pub use quote::{QuoteHeader, QuoteItemRow, QuoteSummary, QuoteWrite, SaveQuote};
pub use quote_request::{CreateQuoteRequest, QuoteRequest};
pub use session::{CreateSession, UserSession};
pub use user::{CreateUser, User, UserResponse};
