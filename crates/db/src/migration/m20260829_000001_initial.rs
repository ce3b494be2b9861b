//! Initial database migration.
//!
//! Creates the chart of accounts, journal entry, entry line, and account
//! manual tables plus their enums and indexes.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // ============================================================
        // PART 1: ENUMS
        // ============================================================
        db.execute_unprepared(ENUMS_SQL).await?;

        // ============================================================
        // PART 2: CHART OF ACCOUNTS
        // ============================================================
        db.execute_unprepared(ACCOUNTS_SQL).await?;

        // ============================================================
        // PART 3: JOURNAL ENTRIES & LINES
        // ============================================================
        db.execute_unprepared(JOURNAL_ENTRIES_SQL).await?;
        db.execute_unprepared(ENTRY_LINES_SQL).await?;

        // ============================================================
        // PART 4: ACCOUNT MANUALS
        // ============================================================
        db.execute_unprepared(ACCOUNT_MANUALS_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

// ============================================================
// SQL CONSTANTS
// ============================================================

const ENUMS_SQL: &str = r"
-- Account types
CREATE TYPE account_type AS ENUM (
    'asset',
    'liability',
    'equity',
    'revenue',
    'expense'
);
";

const ACCOUNTS_SQL: &str = r"
CREATE TABLE accounts (
    id UUID PRIMARY KEY,
    code VARCHAR(20) NOT NULL UNIQUE,
    name VARCHAR(100) NOT NULL,
    account_type account_type NOT NULL,
    level INTEGER NOT NULL DEFAULT 1,
    parent_id UUID REFERENCES accounts(id),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_accounts_code ON accounts(code);
CREATE INDEX idx_accounts_parent_id ON accounts(parent_id);
";

const JOURNAL_ENTRIES_SQL: &str = r"
CREATE TABLE journal_entries (
    id UUID PRIMARY KEY,
    entry_date DATE NOT NULL,
    description TEXT NOT NULL,
    entry_type VARCHAR(20) NOT NULL DEFAULT 'DIARIO',
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_journal_entries_date ON journal_entries(entry_date, id);
CREATE INDEX idx_journal_entries_type ON journal_entries(entry_type);
";

const ENTRY_LINES_SQL: &str = r"
CREATE TABLE entry_lines (
    id UUID PRIMARY KEY,
    entry_id UUID NOT NULL REFERENCES journal_entries(id) ON DELETE CASCADE,
    account_id UUID NOT NULL REFERENCES accounts(id),
    debit NUMERIC(12, 2) NOT NULL DEFAULT 0 CHECK (debit >= 0),
    credit NUMERIC(12, 2) NOT NULL DEFAULT 0 CHECK (credit >= 0),
    description TEXT
);

CREATE INDEX idx_entry_lines_entry_id ON entry_lines(entry_id);
CREATE INDEX idx_entry_lines_account_id ON entry_lines(account_id);
";

const ACCOUNT_MANUALS_SQL: &str = r"
CREATE TABLE account_manuals (
    id UUID PRIMARY KEY,
    account_id UUID NOT NULL REFERENCES accounts(id),
    description TEXT NOT NULL,
    examples TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_account_manuals_account_id ON account_manuals(account_id);
";

const DROP_ALL_SQL: &str = r"
DROP TABLE IF EXISTS account_manuals;
DROP TABLE IF EXISTS entry_lines;
DROP TABLE IF EXISTS journal_entries;
DROP TABLE IF EXISTS accounts;
DROP TYPE IF EXISTS account_type;
";
