//! Error-to-response mapping for the shared error taxonomy.
//!
//! Repository errors are folded into [`AppError`] here so every route file
//! renders failures the same way: `{"error": CODE, "message": ...}` with the
//! status code the taxonomy defines.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracing::error;

use libros_core::journal::JournalError;
use libros_db::repositories::{AccountError, EntryError, ManualError, PostingError};
use libros_shared::AppError;

/// Renders an [`AppError`] as a JSON error response.
pub fn error_response(err: &AppError) -> Response {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        Json(json!({
            "error": err.error_code(),
            "message": err.to_string(),
        })),
    )
        .into_response()
}

/// Maps an account repository error to a response.
pub fn account_error(err: AccountError) -> Response {
    let app_err = match err {
        AccountError::DuplicateCode(code) => AppError::DuplicateCode(code),
        AccountError::EmptyCode => {
            AppError::Validation("Account code must not be empty".to_string())
        }
        AccountError::NonAsciiCode(code) => {
            AppError::Validation(format!("Account code must be ASCII: '{code}'"))
        }
        AccountError::ParentNotFound(code) => AppError::InvalidParent(format!(
            "No existing account is a prefix ancestor of code {code}"
        )),
        AccountError::NotFound(id) => AppError::NotFound(format!("Account {id}")),
        AccountError::HasChildren(count) => {
            AppError::HasChildren(format!("Account has {count} child accounts"))
        }
        AccountError::InUse { lines, manuals } => AppError::AccountInUse(format!(
            "{lines} entry lines and {manuals} manuals reference this account"
        )),
        AccountError::Database(e) => {
            error!(error = %e, "Database error in account operation");
            AppError::Database("An error occurred".to_string())
        }
    };
    error_response(&app_err)
}

/// Maps a journal repository error to a response.
pub fn entry_error(err: EntryError) -> Response {
    let app_err = match err {
        EntryError::Validation(inner @ JournalError::Unbalanced { .. }) => {
            AppError::UnbalancedEntry(inner.to_string())
        }
        EntryError::Validation(inner) => AppError::Validation(inner.to_string()),
        EntryError::AccountReferenceInvalid { line, account_id } => {
            AppError::AccountReferenceInvalid(format!(
                "Line {line} references unknown account {account_id}"
            ))
        }
        EntryError::NotFound(id) => AppError::NotFound(format!("Entry {id}")),
        EntryError::Database(e) => {
            error!(error = %e, "Database error in journal operation");
            AppError::Database("An error occurred".to_string())
        }
    };
    error_response(&app_err)
}

/// Maps a manual repository error to a response.
pub fn manual_error(err: ManualError) -> Response {
    let app_err = match err {
        ManualError::NotFound(id) => AppError::NotFound(format!("Manual {id}")),
        ManualError::AccountNotFound(id) => {
            AppError::AccountReferenceInvalid(format!("Unknown account {id}"))
        }
        ManualError::Database(e) => {
            error!(error = %e, "Database error in manual operation");
            AppError::Database("An error occurred".to_string())
        }
    };
    error_response(&app_err)
}

/// Maps a posting repository error to a response.
pub fn posting_error(err: PostingError) -> Response {
    let app_err = match err {
        PostingError::Database(e) => {
            error!(error = %e, "Database error in ledger query");
            AppError::Database("An error occurred".to_string())
        }
    };
    error_response(&app_err)
}
