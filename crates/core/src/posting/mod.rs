//! Ledger aggregation ("mayorización").
//!
//! This module turns a flat stream of entry/line/account rows into
//! per-account summaries and running-balance detail sequences:
//! - Flattened posting rows as the aggregation input
//! - Per-account debit/credit totals with nature-signed balances
//! - Running balance computation for a single account
//! - Control totals over the filtered set

pub mod aggregate;
pub mod types;

#[cfg(test)]
mod aggregate_props;

pub use aggregate::{account_ledger, summarize};
pub use types::{AccountLedger, AccountMeta, AccountSummary, LedgerDetailRow, LedgerSummary, PostingRow};
