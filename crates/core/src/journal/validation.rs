//! Balance validation for journal entries.
//!
//! The double-entry invariant lives here: an entry is only accepted when
//! the sum of its debit amounts equals the sum of its credit amounts. This
//! check runs in the core before anything is persisted; a presentation
//! layer may repeat it for early feedback but is never the source of truth.

use rust_decimal::Decimal;

use super::error::JournalError;
use super::types::{EntryLineInput, EntryTotals};

/// Currency rounding tolerance for the balance check (one cent).
pub const BALANCE_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Validates the lines of a journal entry and returns their totals.
///
/// Rules, checked in order:
/// 1. At least one line.
/// 2. No negative debit or credit amounts (the line index is reported).
/// 3. Sum of debits equals sum of credits within [`BALANCE_TOLERANCE`].
///
/// A line where both debit and credit are zero is tolerated; only the
/// entry-level sums are binding.
///
/// # Errors
///
/// Returns `JournalError` naming the offending line or the debit/credit
/// totals and their difference.
pub fn validate_lines(lines: &[EntryLineInput]) -> Result<EntryTotals, JournalError> {
    if lines.is_empty() {
        return Err(JournalError::NoLines);
    }

    for (index, line) in lines.iter().enumerate() {
        if line.debit < Decimal::ZERO || line.credit < Decimal::ZERO {
            return Err(JournalError::NegativeAmount { line: index });
        }
    }

    let total_debit: Decimal = lines.iter().map(|l| l.debit).sum();
    let total_credit: Decimal = lines.iter().map(|l| l.credit).sum();
    let totals = EntryTotals::new(total_debit, total_credit);

    if totals.difference().abs() >= BALANCE_TOLERANCE {
        return Err(JournalError::Unbalanced {
            debit: total_debit,
            credit: total_credit,
            difference: totals.difference(),
        });
    }

    Ok(totals)
}
