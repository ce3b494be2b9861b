//! Account manual routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
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
use libros_db::ManualRepository;
use libros_db::repositories::{CreateManualInput, ManualWithAccount, UpdateManualInput};

/// Creates the account manual routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/manuals", post(create_manual))
        .route("/manuals", get(list_manuals))
        .route("/manuals/{id}", get(get_manual))
        .route("/manuals/{id}", put(update_manual))
        .route("/manuals/{id}", delete(delete_manual))
}

/// Request body for creating a manual.
#[derive(Debug, Deserialize)]
pub struct CreateManualRequest {
    /// The account the manual documents.
    pub account_id: Uuid,
    /// What the account is used for.
    pub description: String,
    /// Optional example movements.
    pub examples: Option<String>,
}

/// Request body for updating a manual.
#[derive(Debug, Deserialize)]
pub struct UpdateManualRequest {
    /// Move the manual to another account, if set.
    pub account_id: Option<Uuid>,
    /// Replacement description.
    pub description: String,
    /// Replacement examples.
    pub examples: Option<String>,
}

/// Optional filter for the manual listing.
#[derive(Debug, Default, Deserialize)]
pub struct ManualListQuery {
    /// Restrict to one account.
    pub account_id: Option<Uuid>,
}

/// Response for an account manual.
#[derive(Debug, Serialize)]
pub struct ManualResponse {
    /// Manual ID.
    pub id: Uuid,
    /// The documented account.
    pub account_id: Uuid,
    /// `"{code} - {name}"` of the documented account.
    pub account_label: String,
    /// What the account is used for.
    pub description: String,
    /// Example movements, if any.
    pub examples: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<FixedOffset>,
}

impl From<ManualWithAccount> for ManualResponse {
    fn from(row: ManualWithAccount) -> Self {
        Self {
            id: row.manual.id,
            account_id: row.manual.account_id,
            account_label: row.account_label,
            description: row.manual.description,
            examples: row.manual.examples,
            created_at: row.manual.created_at,
        }
    }
}

/// POST `/manuals` - Attach a usage manual to an account.
async fn create_manual(
    State(state): State<AppState>,
    Json(payload): Json<CreateManualRequest>,
) -> impl IntoResponse {
    let repo = ManualRepository::new((*state.db).clone());

    match repo
        .create_manual(CreateManualInput {
            account_id: payload.account_id,
            description: payload.description,
            examples: payload.examples,
        })
        .await
    {
        Ok(row) => {
            info!(manual_id = %row.manual.id, "Account manual created");
            (StatusCode::CREATED, Json(ManualResponse::from(row))).into_response()
        }
        Err(e) => responses::manual_error(e),
    }
}

/// GET `/manuals?account_id` - List manuals, optionally for one account.
async fn list_manuals(
    State(state): State<AppState>,
    Query(query): Query<ManualListQuery>,
) -> impl IntoResponse {
    let repo = ManualRepository::new((*state.db).clone());

    let result = match query.account_id {
        Some(account_id) => repo.list_for_account(account_id).await,
        None => repo.list_manuals().await,
    };

    match result {
        Ok(rows) => {
            let manuals: Vec<ManualResponse> =
                rows.into_iter().map(ManualResponse::from).collect();
            (StatusCode::OK, Json(json!({ "manuals": manuals }))).into_response()
        }
        Err(e) => responses::manual_error(e),
    }
}

/// GET `/manuals/{id}` - Fetch one manual.
async fn get_manual(State(state): State<AppState>, Path(id): Path<Uuid>) -> impl IntoResponse {
    let repo = ManualRepository::new((*state.db).clone());

    match repo.find_manual(id).await {
        Ok(row) => (StatusCode::OK, Json(ManualResponse::from(row))).into_response(),
        Err(e) => responses::manual_error(e),
    }
}

/// PUT `/manuals/{id}` - Replace a manual's description and examples.
async fn update_manual(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateManualRequest>,
) -> impl IntoResponse {
    let repo = ManualRepository::new((*state.db).clone());

    match repo
        .update_manual(
            id,
            UpdateManualInput {
                account_id: payload.account_id,
                description: payload.description,
                examples: payload.examples,
            },
        )
        .await
    {
        Ok(row) => {
            info!(manual_id = %id, "Account manual updated");
            (StatusCode::OK, Json(ManualResponse::from(row))).into_response()
        }
        Err(e) => responses::manual_error(e),
    }
}

/// DELETE `/manuals/{id}` - Delete a manual.
async fn delete_manual(State(state): State<AppState>, Path(id): Path<Uuid>) -> impl IntoResponse {
    let repo = ManualRepository::new((*state.db).clone());

    match repo.delete_manual(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => responses::manual_error(e),
    }
}
