//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
///
/// Every variant except `Database` and `Internal` is a caller input error;
/// there are no retryable failures in this taxonomy.
#[derive(Debug, Error)]
pub enum AppError {
    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation error.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Account code collision.
    #[error("Duplicate account code: {0}")]
    DuplicateCode(String),

    /// Hierarchy resolver could not locate a valid ancestor.
    #[error("Invalid parent: {0}")]
    InvalidParent(String),

    /// Delete blocked by referential integrity.
    #[error("Account has children: {0}")]
    HasChildren(String),

    /// Delete blocked because ledger rows or manuals reference the account.
    #[error("Account is in use: {0}")]
    AccountInUse(String),

    /// Entry line references a nonexistent account.
    #[error("Invalid account reference: {0}")]
    AccountReferenceInvalid(String),

    /// Journal entry debits and credits do not balance.
    #[error("Unbalanced entry: {0}")]
    UnbalancedEntry(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::NotFound(_) => 404,
            Self::Validation(_) => 400,
            Self::DuplicateCode(_) | Self::HasChildren(_) | Self::AccountInUse(_) => 409,
            Self::InvalidParent(_)
            | Self::AccountReferenceInvalid(_)
            | Self::UnbalancedEntry(_) => 422,
            Self::Database(_) | Self::Internal(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::DuplicateCode(_) => "DUPLICATE_CODE",
            Self::InvalidParent(_) => "INVALID_PARENT",
            Self::HasChildren(_) => "HAS_CHILDREN",
            Self::AccountInUse(_) => "ACCOUNT_IN_USE",
            Self::AccountReferenceInvalid(_) => "ACCOUNT_REFERENCE_INVALID",
            Self::UnbalancedEntry(_) => "UNBALANCED_ENTRY",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}
