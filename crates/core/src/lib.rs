//! Core accounting logic for Libros.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `coa` - Chart of accounts: account types, nature, hierarchy resolution
//! - `journal` - Journal entry ("partida") validation and balance enforcement
//! - `posting` - Ledger aggregation ("mayorización") and running balances

pub mod coa;
pub mod journal;
pub mod posting;
