//! Ledger aggregation data types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::coa::{AccountType, Nature};

/// One flattened (entry, line, account) row, the aggregation input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostingRow {
    /// The owning journal entry.
    pub entry_id: Uuid,
    /// Entry date.
    pub entry_date: NaiveDate,
    /// Entry description.
    pub description: String,
    /// Entry type tag (e.g. `DIARIO`).
    pub entry_type: String,
    /// The account posted to.
    pub account_id: Uuid,
    /// Account code.
    pub account_code: String,
    /// Account name.
    pub account_name: String,
    /// Account type, drives the balance sign.
    pub account_type: AccountType,
    /// Debit amount of the line.
    pub debit: Decimal,
    /// Credit amount of the line.
    pub credit: Decimal,
}

/// Identity of the account a detail view is computed for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountMeta {
    /// Account ID.
    pub id: Uuid,
    /// Account code.
    pub code: String,
    /// Account name.
    pub name: String,
    /// Account type.
    pub account_type: AccountType,
}

/// Per-account totals in the summary view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountSummary {
    /// Account ID.
    pub account_id: Uuid,
    /// Account code.
    pub code: String,
    /// Account name.
    pub name: String,
    /// Account type.
    pub account_type: AccountType,
    /// Sum of debit amounts.
    pub total_debit: Decimal,
    /// Sum of credit amounts.
    pub total_credit: Decimal,
    /// Nature-signed balance.
    pub balance: Decimal,
}

/// Ledger summary: per-account totals plus control totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSummary {
    /// Per-account summaries, ordered by account code.
    pub accounts: Vec<AccountSummary>,
    /// Control total of all debits in the filtered set.
    pub total_debit: Decimal,
    /// Control total of all credits in the filtered set.
    pub total_credit: Decimal,
    /// Whether the control totals match (they always should when every
    /// underlying entry balances).
    pub is_balanced: bool,
}

/// One row in a single account's running-balance detail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerDetailRow {
    /// The journal entry this movement came from.
    pub entry_id: Uuid,
    /// Entry date.
    pub entry_date: NaiveDate,
    /// Entry type tag.
    pub entry_type: String,
    /// Entry description.
    pub description: String,
    /// Debit amount.
    pub debit: Decimal,
    /// Credit amount.
    pub credit: Decimal,
    /// Cumulative nature-signed balance up to and including this row.
    pub running_balance: Decimal,
}

/// Running-balance detail for one account over the filtered period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountLedger {
    /// Account ID.
    pub account_id: Uuid,
    /// Account code.
    pub code: String,
    /// Account name.
    pub name: String,
    /// Account type.
    pub account_type: AccountType,
    /// Balance nature of the account.
    pub nature: Nature,
    /// Movement rows ordered by (date, entry id).
    pub rows: Vec<LedgerDetailRow>,
    /// Final cumulative balance for the period.
    pub closing_balance: Decimal,
}
