//! Posting repository: fetches flattened ledger rows for aggregation.
//!
//! The join of entry lines against their entry headers and accounts is the
//! only query the mayorización views need; the aggregation itself lives in
//! `libros_core::posting` and works on plain rows.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, FromQueryResult, JoinType, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait,
};
use uuid::Uuid;

use libros_core::coa::AccountType;
use libros_core::posting::PostingRow;

use crate::entities::{accounts, entry_lines, journal_entries, sea_orm_active_enums};

/// Error types for posting queries.
#[derive(Debug, thiserror::Error)]
pub enum PostingError {
    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Optional filters applied to the posting row fetch.
#[derive(Debug, Clone, Default)]
pub struct PostingFilter {
    /// Inclusive lower bound on the entry date.
    pub date_from: Option<NaiveDate>,
    /// Inclusive upper bound on the entry date.
    pub date_to: Option<NaiveDate>,
    /// Restrict to a single entry type tag.
    pub entry_type: Option<String>,
    /// Restrict to a single account.
    pub account_id: Option<Uuid>,
}

#[derive(Debug, FromQueryResult)]
struct JoinedRow {
    entry_id: Uuid,
    entry_date: NaiveDate,
    description: String,
    entry_type: String,
    account_id: Uuid,
    account_code: String,
    account_name: String,
    account_type: sea_orm_active_enums::AccountType,
    debit: Decimal,
    credit: Decimal,
}

/// Posting row repository.
#[derive(Debug, Clone)]
pub struct PostingRepository {
    db: DatabaseConnection,
}

impl PostingRepository {
    /// Creates a new posting repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Fetches the flattened posting rows matching the filter, ordered by
    /// `(entry_date, entry_id)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn fetch_rows(&self, filter: &PostingFilter) -> Result<Vec<PostingRow>, PostingError> {
        let mut query = entry_lines::Entity::find()
            .select_only()
            .column_as(journal_entries::Column::Id, "entry_id")
            .column_as(journal_entries::Column::EntryDate, "entry_date")
            .column_as(journal_entries::Column::Description, "description")
            .column_as(journal_entries::Column::EntryType, "entry_type")
            .column_as(accounts::Column::Id, "account_id")
            .column_as(accounts::Column::Code, "account_code")
            .column_as(accounts::Column::Name, "account_name")
            .column_as(accounts::Column::AccountType, "account_type")
            .column_as(entry_lines::Column::Debit, "debit")
            .column_as(entry_lines::Column::Credit, "credit")
            .join(JoinType::InnerJoin, entry_lines::Relation::JournalEntries.def())
            .join(JoinType::InnerJoin, entry_lines::Relation::Accounts.def());

        if let Some(from) = filter.date_from {
            query = query.filter(journal_entries::Column::EntryDate.gte(from));
        }
        if let Some(to) = filter.date_to {
            query = query.filter(journal_entries::Column::EntryDate.lte(to));
        }
        if let Some(ref entry_type) = filter.entry_type {
            query = query.filter(journal_entries::Column::EntryType.eq(entry_type.clone()));
        }
        if let Some(account_id) = filter.account_id {
            query = query.filter(entry_lines::Column::AccountId.eq(account_id));
        }

        let rows = query
            .order_by_asc(journal_entries::Column::EntryDate)
            .order_by_asc(journal_entries::Column::Id)
            .into_model::<JoinedRow>()
            .all(&self.db)
            .await?;

        Ok(rows.into_iter().map(into_posting_row).collect())
    }
}

fn into_posting_row(row: JoinedRow) -> PostingRow {
    PostingRow {
        entry_id: row.entry_id,
        entry_date: row.entry_date,
        description: row.description,
        entry_type: row.entry_type,
        account_id: row.account_id,
        account_code: row.account_code,
        account_name: row.account_name,
        account_type: AccountType::from(row.account_type),
        debit: row.debit,
        credit: row.credit,
    }
}
