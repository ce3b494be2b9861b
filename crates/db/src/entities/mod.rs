//! `SeaORM` entity definitions.

pub mod account_manuals;
pub mod accounts;
pub mod entry_lines;
pub mod journal_entries;
pub mod sea_orm_active_enums;
