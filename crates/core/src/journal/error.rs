//! Journal entry error types.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors from journal entry validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JournalError {
    /// Entry has no lines.
    #[error("Entry must have at least one line")]
    NoLines,

    /// A line carries a negative amount.
    #[error("Line {line} has a negative amount")]
    NegativeAmount {
        /// Zero-based index of the offending line.
        line: usize,
    },

    /// Entry debits and credits do not balance.
    #[error("Entry is unbalanced: debit {debit} != credit {credit} (difference {difference})")]
    Unbalanced {
        /// Total debit amount.
        debit: Decimal,
        /// Total credit amount.
        credit: Decimal,
        /// Debit minus credit.
        difference: Decimal,
    },
}
