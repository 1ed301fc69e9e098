//! Invoice lifecycle and payment terms.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Days between issue and due date (net-30 terms).
pub const PAYMENT_TERMS_DAYS: u64 = 30;

/// Lifecycle status of an invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    #[default]
    Unpaid,
    Paid,
    Void,
}

impl InvoiceStatus {
    /// The lowercase token stored in the `status` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unpaid => "unpaid",
            Self::Paid => "paid",
            Self::Void => "void",
        }
    }

    /// Parse a stored token; anything unrecognized is `None`.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "unpaid" => Some(Self::Unpaid),
            "paid" => Some(Self::Paid),
            "void" => Some(Self::Void),
            _ => None,
        }
    }

    /// Every stored status token.
    pub const ALL: &'static [&'static str] = &["unpaid", "paid", "void"];
}

impl std::fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Due date for an invoice issued on the given date.
pub fn due_date_from(issued: NaiveDate) -> NaiveDate {
    // Days::new cannot overflow for the fixed 30-day term.
    issued
        .checked_add_days(Days::new(PAYMENT_TERMS_DAYS))
        .unwrap_or(issued)
}
