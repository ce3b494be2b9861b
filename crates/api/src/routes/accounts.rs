//! Chart of accounts routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use crate::{AppState, responses};
use libros_db::AccountRepository;
use libros_db::entities::sea_orm_active_enums::AccountType;
use libros_db::repositories::{AccountWithParent, CreateAccountInput, UpdateAccountInput};

/// Creates the account routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/accounts", post(create_account))
        .route("/accounts", get(list_accounts))
        .route("/accounts/{id}", get(get_account))
        .route("/accounts/{id}", put(update_account))
        .route("/accounts/{id}", delete(delete_account))
}

/// Request body for creating or replacing an account.
#[derive(Debug, Deserialize)]
pub struct AccountRequest {
    /// Account code in 4-character segments.
    pub code: String,
    /// Account name.
    pub name: String,
    /// Account type.
    pub account_type: AccountType,
}

/// Response for an account, with the resolved parent label.
#[derive(Debug, Serialize)]
pub struct AccountResponse {
    /// Account ID.
    pub id: Uuid,
    /// Account code.
    pub code: String,
    /// Account name.
    pub name: String,
    /// Account type.
    pub account_type: AccountType,
    /// Hierarchy level, 1 for roots.
    pub level: i32,
    /// Parent account ID, if any.
    pub parent_id: Option<Uuid>,
    /// `"{code} - {name}"` of the parent, if any.
    pub parent_label: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<FixedOffset>,
}

impl From<AccountWithParent> for AccountResponse {
    fn from(row: AccountWithParent) -> Self {
        Self {
            id: row.account.id,
            code: row.account.code,
            name: row.account.name,
            account_type: row.account.account_type,
            level: row.account.level,
            parent_id: row.account.parent_id,
            parent_label: row.parent_label,
            created_at: row.account.created_at,
        }
    }
}

/// POST `/accounts` - Create an account; level and parent are resolved from
/// the code.
async fn create_account(
    State(state): State<AppState>,
    Json(payload): Json<AccountRequest>,
) -> impl IntoResponse {
    let repo = AccountRepository::new((*state.db).clone());

    match repo
        .create_account(CreateAccountInput {
            code: payload.code,
            name: payload.name,
            account_type: payload.account_type,
        })
        .await
    {
        Ok(row) => {
            info!(account_id = %row.account.id, code = %row.account.code, "Account created");
            (StatusCode::CREATED, Json(AccountResponse::from(row))).into_response()
        }
        Err(e) => responses::account_error(e),
    }
}

/// GET `/accounts` - List the full chart ordered by code.
async fn list_accounts(State(state): State<AppState>) -> impl IntoResponse {
    let repo = AccountRepository::new((*state.db).clone());

    match repo.list_accounts().await {
        Ok(rows) => {
            let accounts: Vec<AccountResponse> =
                rows.into_iter().map(AccountResponse::from).collect();
            (StatusCode::OK, Json(json!({ "accounts": accounts }))).into_response()
        }
        Err(e) => responses::account_error(e),
    }
}

/// GET `/accounts/{id}` - Fetch one account.
async fn get_account(State(state): State<AppState>, Path(id): Path<Uuid>) -> impl IntoResponse {
    let repo = AccountRepository::new((*state.db).clone());

    match repo.find_account(id).await {
        Ok(row) => (StatusCode::OK, Json(AccountResponse::from(row))).into_response(),
        Err(e) => responses::account_error(e),
    }
}

/// PUT `/accounts/{id}` - Replace code, name, and type; placement is
/// re-resolved.
async fn update_account(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<AccountRequest>,
) -> impl IntoResponse {
    let repo = AccountRepository::new((*state.db).clone());

    match repo
        .update_account(
            id,
            UpdateAccountInput {
                code: payload.code,
                name: payload.name,
                account_type: payload.account_type,
            },
        )
        .await
    {
        Ok(row) => {
            info!(account_id = %id, code = %row.account.code, "Account updated");
            (StatusCode::OK, Json(AccountResponse::from(row))).into_response()
        }
        Err(e) => responses::account_error(e),
    }
}

/// DELETE `/accounts/{id}` - Delete a childless account.
async fn delete_account(State(state): State<AppState>, Path(id): Path<Uuid>) -> impl IntoResponse {
    let repo = AccountRepository::new((*state.db).clone());

    match repo.delete_account(id).await {
        Ok(()) => {
            info!(account_id = %id, "Account deleted");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) => responses::account_error(e),
    }
}
