//! Quote lifecycle and line-item math.
//!
//! Pure logic only, nothing async and nothing that touches the database:
//! the status enum with its transition table, normalization of
//! editor-submitted line entries into storable lines, and subtotal
//! derivation over stored lines.

use serde::{Deserialize, Serialize};

use crate::types::DbId;

// ---------------------------------------------------------------------------
// Quote status
// ---------------------------------------------------------------------------

/// Lifecycle status of a quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum QuoteStatus {
    #[default]
    Draft,
    Issued,
    Converted,
    Cancelled,
}

impl QuoteStatus {
    /// The lowercase token stored in the `status` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Issued => "issued",
            Self::Converted => "converted",
            Self::Cancelled => "cancelled",
        }
    }

    /// Parse a stored token; anything unrecognized is `None`.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "draft" => Some(Self::Draft),
            "issued" => Some(Self::Issued),
            "converted" => Some(Self::Converted),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    /// Every stored status token, in lifecycle order.
    pub const ALL: &'static [&'static str] = &["draft", "issued", "converted", "cancelled"];

    /// Whether this status admits no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Converted | Self::Cancelled)
    }

    /// The status transition table.
    ///
    /// Any non-terminal quote may be issued, cancelled, or converted (the
    /// converted state is entered by invoice conversion, which also accepts
    /// drafts); issued quotes may be withdrawn back to draft. Re-saving with
    /// the current status is a self-loop and always allowed for non-terminal
    /// states. The editor does not reject off-table moves (it only logs
    /// them); conversion is the one operation that enforces this table.
    pub fn can_transition_to(&self, next: QuoteStatus) -> bool {
        match self {
            Self::Draft => matches!(
                next,
                Self::Draft | Self::Issued | Self::Converted | Self::Cancelled
            ),
            Self::Issued => matches!(
                next,
                Self::Issued | Self::Draft | Self::Converted | Self::Cancelled
            ),
            Self::Converted | Self::Cancelled => false,
        }
    }
}

impl std::fmt::Display for QuoteStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Line items
// ---------------------------------------------------------------------------

/// One raw line entry as submitted by the quote editor.
///
/// Every field is optional: the editor posts whatever the user typed,
/// including fully blank rows. [`normalize_lines`] decides what survives.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuoteLineEntry {
    pub item_id: Option<DbId>,
    #[serde(default)]
    pub description: String,
    pub quantity: Option<f64>,
    pub rate: Option<f64>,
    pub line_total: Option<f64>,
}

/// A normalized line ready for storage.
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteLine {
    pub item_id: Option<DbId>,
    pub description: String,
    pub quantity: f64,
    pub rate: f64,
    pub line_total: f64,
}

/// Normalize editor-submitted entries into storable lines.
///
/// - Descriptions are trimmed.
/// - An item reference of 0 or less counts as no reference.
/// - Entries with an empty description AND no item reference are dropped
///   silently (blank editor rows, not errors).
/// - Missing quantity or rate defaults to 0.
/// - A missing line total is derived as quantity x rate; a supplied value
///   wins even when it disagrees with the derivation.
///
/// Deterministic: the same input always yields the same output, so
/// re-saving an unchanged quote rewrites an identical line set.
pub fn normalize_lines(entries: &[QuoteLineEntry]) -> Vec<QuoteLine> {
    entries
        .iter()
        .filter_map(|entry| {
            let description = entry.description.trim().to_string();
            let item_id = entry.item_id.filter(|id| *id > 0);

            if description.is_empty() && item_id.is_none() {
                return None;
            }

            let quantity = entry.quantity.unwrap_or(0.0);
            let rate = entry.rate.unwrap_or(0.0);
            let line_total = entry.line_total.unwrap_or(quantity * rate);

            Some(QuoteLine {
                item_id,
                description,
                quantity,
                rate,
                line_total,
            })
        })
        .collect()
}

/// Sum of line totals. Zero for an empty set.
pub fn lines_subtotal(lines: &[QuoteLine]) -> f64 {
    lines.iter().map(|line| line.line_total).sum()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
