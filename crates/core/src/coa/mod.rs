//! Chart of accounts logic.
//!
//! This module implements the chart-of-accounts domain:
//! - Account type classification and balance nature
//! - Hierarchy resolution from structured account codes
//! - Error types for chart-of-accounts operations

pub mod resolver;
pub mod types;

#[cfg(test)]
mod resolver_props;

pub use resolver::{
    CoaError, Placement, SEGMENT_WIDTH, ancestor_prefixes, level_for_code, resolve_placement,
};
pub use types::{AccountType, Nature};
