//! Journal entry domain types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default entry type tag for general journal entries.
pub const DEFAULT_ENTRY_TYPE: &str = "DIARIO";

/// Input for a single debit/credit line ("detalle") in an entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryLineInput {
    /// The account this line posts to.
    pub account_id: Uuid,
    /// Debit amount (debe), must be >= 0.
    #[serde(default)]
    pub debit: Decimal,
    /// Credit amount (haber), must be >= 0.
    #[serde(default)]
    pub credit: Decimal,
    /// Optional line description.
    pub description: Option<String>,
}

/// Input for creating a journal entry ("partida").
#[derive(Debug, Clone)]
pub struct CreateEntryInput {
    /// Entry date; defaults to the current date when absent.
    pub entry_date: Option<NaiveDate>,
    /// Entry description.
    pub description: String,
    /// Entry type tag, defaults to `DIARIO`.
    pub entry_type: String,
    /// The entry lines (at least one required).
    pub lines: Vec<EntryLineInput>,
}

/// Entry totals used for the balance check and for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryTotals {
    /// Total debit amount across all lines.
    pub total_debit: Decimal,
    /// Total credit amount across all lines.
    pub total_credit: Decimal,
}

impl EntryTotals {
    /// Creates totals from debit and credit sums.
    #[must_use]
    pub const fn new(total_debit: Decimal, total_credit: Decimal) -> Self {
        Self {
            total_debit,
            total_credit,
        }
    }

    /// Returns the difference between debits and credits.
    #[must_use]
    pub fn difference(&self) -> Decimal {
        self.total_debit - self.total_credit
    }
}
