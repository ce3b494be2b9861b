//! Journal entry ("partida") domain logic.
//!
//! This module implements entry-level validation for double-entry
//! bookkeeping:
//! - Input types for entry creation
//! - The balance invariant (sum of debits equals sum of credits)
//! - Error types for entry validation

pub mod error;
pub mod types;
pub mod validation;

#[cfg(test)]
mod validation_props;

pub use error::JournalError;
pub use types::{DEFAULT_ENTRY_TYPE, CreateEntryInput, EntryLineInput, EntryTotals};
pub use validation::{BALANCE_TOLERANCE, validate_lines};
