//! Journal entry repository for partida database operations.
//!
//! The balance invariant is enforced here through the core validator
//! before anything touches the database; the header and all lines are
//! written inside a single database transaction so no partial entry is
//! ever visible.

use std::collections::{HashMap, HashSet};

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use libros_core::journal::{self, CreateEntryInput, EntryTotals, JournalError};
use libros_shared::types::ListParams;

use crate::entities::{accounts, entry_lines, journal_entries};

/// Error types for journal entry operations.
#[derive(Debug, thiserror::Error)]
pub enum EntryError {
    /// Core validation failed (no lines, negative amount, unbalanced).
    #[error(transparent)]
    Validation(#[from] JournalError),

    /// A line references an account that does not exist.
    #[error("Line {line} references unknown account {account_id}")]
    AccountReferenceInvalid {
        /// Zero-based index of the offending line.
        line: usize,
        /// The missing account id.
        account_id: Uuid,
    },

    /// Entry not found.
    #[error("Entry not found: {0}")]
    NotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// A journal entry with its lines and totals.
#[derive(Debug, Clone)]
pub struct EntryWithLines {
    /// The entry header.
    pub entry: journal_entries::Model,
    /// The entry lines in insertion order.
    pub lines: Vec<entry_lines::Model>,
    /// Debit/credit totals across the lines.
    pub totals: EntryTotals,
}

/// Journal entry repository.
#[derive(Debug, Clone)]
pub struct EntryRepository {
    db: DatabaseConnection,
}

impl EntryRepository {
    /// Creates a new journal entry repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a balanced journal entry with its lines.
    ///
    /// Validation order:
    /// 1. Core line validation (at least one line, no negative amounts,
    ///    debits equal credits)
    /// 2. Every referenced account exists
    /// 3. Header + lines inserted atomically
    ///
    /// # Errors
    ///
    /// Returns an error before any write if validation fails; the offending
    /// line index is reported for account and amount problems.
    pub async fn create_entry(&self, input: CreateEntryInput) -> Result<EntryWithLines, EntryError> {
        let totals = journal::validate_lines(&input.lines)?;

        self.check_account_references(&input).await?;

        let entry_date = input
            .entry_date
            .unwrap_or_else(|| chrono::Utc::now().date_naive());

        let txn = self.db.begin().await?;

        // UUIDv7 keeps id order aligned with creation order, which is the
        // tie-break for same-date entries everywhere downstream.
        let entry = journal_entries::ActiveModel {
            id: Set(Uuid::now_v7()),
            entry_date: Set(entry_date),
            description: Set(input.description.clone()),
            entry_type: Set(input.entry_type.clone()),
            created_at: Set(chrono::Utc::now().into()),
        };
        let entry = entry.insert(&txn).await?;

        let mut lines = Vec::with_capacity(input.lines.len());
        for line in &input.lines {
            let model = entry_lines::ActiveModel {
                id: Set(Uuid::now_v7()),
                entry_id: Set(entry.id),
                account_id: Set(line.account_id),
                debit: Set(line.debit),
                credit: Set(line.credit),
                description: Set(line.description.clone()),
            };
            lines.push(model.insert(&txn).await?);
        }

        txn.commit().await?;

        tracing::info!(
            entry_id = %entry.id,
            lines = lines.len(),
            total = %totals.total_debit,
            "Journal entry created"
        );

        Ok(EntryWithLines {
            entry,
            lines,
            totals,
        })
    }

    /// Finds an entry by ID with its lines.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the entry does not exist.
    pub async fn find_entry(&self, id: Uuid) -> Result<EntryWithLines, EntryError> {
        let entry = journal_entries::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(EntryError::NotFound(id))?;

        let lines = entry_lines::Entity::find()
            .filter(entry_lines::Column::EntryId.eq(entry.id))
            .order_by_asc(entry_lines::Column::Id)
            .all(&self.db)
            .await?;

        Ok(with_totals(entry, lines))
    }

    /// Lists entries with their lines, ordered by `(entry_date, id)`.
    ///
    /// Returns the page of entries and the total entry count.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_entries(
        &self,
        params: ListParams,
    ) -> Result<(Vec<EntryWithLines>, u64), EntryError> {
        let total = journal_entries::Entity::find().count(&self.db).await?;

        let entries = journal_entries::Entity::find()
            .order_by_asc(journal_entries::Column::EntryDate)
            .order_by_asc(journal_entries::Column::Id)
            .offset(params.skip)
            .limit(params.limit)
            .all(&self.db)
            .await?;

        let entry_ids: Vec<Uuid> = entries.iter().map(|e| e.id).collect();
        let mut lines_by_entry: HashMap<Uuid, Vec<entry_lines::Model>> = HashMap::new();
        if !entry_ids.is_empty() {
            let all_lines = entry_lines::Entity::find()
                .filter(entry_lines::Column::EntryId.is_in(entry_ids))
                .order_by_asc(entry_lines::Column::Id)
                .all(&self.db)
                .await?;
            for line in all_lines {
                lines_by_entry.entry(line.entry_id).or_default().push(line);
            }
        }

        let result = entries
            .into_iter()
            .map(|entry| {
                let lines = lines_by_entry.remove(&entry.id).unwrap_or_default();
                with_totals(entry, lines)
            })
            .collect();

        Ok((result, total))
    }

    /// Verifies every line references an existing account.
    async fn check_account_references(&self, input: &CreateEntryInput) -> Result<(), EntryError> {
        let referenced: HashSet<Uuid> = input.lines.iter().map(|l| l.account_id).collect();

        let found: HashSet<Uuid> = accounts::Entity::find()
            .filter(accounts::Column::Id.is_in(referenced.iter().copied()))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|a| a.id)
            .collect();

        for (index, line) in input.lines.iter().enumerate() {
            if !found.contains(&line.account_id) {
                return Err(EntryError::AccountReferenceInvalid {
                    line: index,
                    account_id: line.account_id,
                });
            }
        }

        Ok(())
    }
}

fn with_totals(entry: journal_entries::Model, lines: Vec<entry_lines::Model>) -> EntryWithLines {
    let total_debit = lines.iter().map(|l| l.debit).sum();
    let total_credit = lines.iter().map(|l| l.credit).sum();
    EntryWithLines {
        entry,
        lines,
        totals: EntryTotals::new(total_debit, total_credit),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn test_entry() -> journal_entries::Model {
        journal_entries::Model {
            id: Uuid::now_v7(),
            entry_date: chrono::NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
            description: "Venta al contado".to_string(),
            entry_type: "DIARIO".to_string(),
            created_at: chrono::Utc::now().into(),
        }
    }

    fn test_line(debit: rust_decimal::Decimal, credit: rust_decimal::Decimal) -> entry_lines::Model {
        entry_lines::Model {
            id: Uuid::now_v7(),
            entry_id: Uuid::now_v7(),
            account_id: Uuid::new_v4(),
            debit,
            credit,
            description: None,
        }
    }

    #[test]
    fn test_with_totals_sums_lines() {
        let lines = vec![
            test_line(dec!(500.00), dec!(0.00)),
            test_line(dec!(0.00), dec!(500.00)),
        ];
        let result = with_totals(test_entry(), lines);

        assert_eq!(result.totals.total_debit, dec!(500.00));
        assert_eq!(result.totals.total_credit, dec!(500.00));
        assert_eq!(result.totals.difference(), rust_decimal::Decimal::ZERO);
    }

    #[test]
    fn test_with_totals_empty_lines() {
        let result = with_totals(test_entry(), Vec::new());
        assert_eq!(result.totals.total_debit, rust_decimal::Decimal::ZERO);
        assert_eq!(result.totals.total_credit, rust_decimal::Decimal::ZERO);
    }
}
