//! Journal entry (partida) routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::{DateTime, FixedOffset, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::{AppState, responses};
use libros_core::journal::{CreateEntryInput, DEFAULT_ENTRY_TYPE, EntryLineInput};
use libros_db::EntryRepository;
use libros_db::repositories::EntryWithLines;
use libros_shared::types::{ListParams, PageResponse};

/// Hard cap on the entry list page size.
const MAX_PAGE_SIZE: u64 = 500;

/// Creates the journal entry routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/entries", post(create_entry))
        .route("/entries", get(list_entries))
        .route("/entries/{id}", get(get_entry))
}

/// Request body for creating a journal entry.
#[derive(Debug, Deserialize)]
pub struct CreateEntryRequest {
    /// Entry date; defaults to today when absent.
    pub entry_date: Option<NaiveDate>,
    /// Entry description.
    pub description: String,
    /// Entry type tag; defaults to `DIARIO`.
    pub entry_type: Option<String>,
    /// The debit/credit lines.
    pub lines: Vec<EntryLineInput>,
}

/// Response for one entry line.
#[derive(Debug, Serialize)]
pub struct LineResponse {
    /// Line ID.
    pub id: Uuid,
    /// Account posted to.
    pub account_id: Uuid,
    /// Debit amount.
    pub debit: Decimal,
    /// Credit amount.
    pub credit: Decimal,
    /// Optional line description.
    pub description: Option<String>,
}

/// Response for a journal entry with its lines and totals.
#[derive(Debug, Serialize)]
pub struct EntryResponse {
    /// Entry ID.
    pub id: Uuid,
    /// Entry date.
    pub entry_date: NaiveDate,
    /// Entry description.
    pub description: String,
    /// Entry type tag.
    pub entry_type: String,
    /// Creation timestamp.
    pub created_at: DateTime<FixedOffset>,
    /// The entry lines.
    pub lines: Vec<LineResponse>,
    /// Sum of debits.
    pub total_debit: Decimal,
    /// Sum of credits.
    pub total_credit: Decimal,
}

impl From<EntryWithLines> for EntryResponse {
    fn from(row: EntryWithLines) -> Self {
        Self {
            id: row.entry.id,
            entry_date: row.entry.entry_date,
            description: row.entry.description,
            entry_type: row.entry.entry_type,
            created_at: row.entry.created_at,
            lines: row
                .lines
                .into_iter()
                .map(|line| LineResponse {
                    id: line.id,
                    account_id: line.account_id,
                    debit: line.debit,
                    credit: line.credit,
                    description: line.description,
                })
                .collect(),
            total_debit: row.totals.total_debit,
            total_credit: row.totals.total_credit,
        }
    }
}

/// POST `/entries` - Create a balanced journal entry atomically.
async fn create_entry(
    State(state): State<AppState>,
    Json(payload): Json<CreateEntryRequest>,
) -> impl IntoResponse {
    let repo = EntryRepository::new((*state.db).clone());

    let input = CreateEntryInput {
        entry_date: payload.entry_date,
        description: payload.description,
        entry_type: payload
            .entry_type
            .unwrap_or_else(|| DEFAULT_ENTRY_TYPE.to_string()),
        lines: payload.lines,
    };

    match repo.create_entry(input).await {
        Ok(row) => {
            info!(entry_id = %row.entry.id, "Journal entry created");
            (StatusCode::CREATED, Json(EntryResponse::from(row))).into_response()
        }
        Err(e) => responses::entry_error(e),
    }
}

/// GET `/entries?skip&limit` - List entries ordered by date, then id.
async fn list_entries(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> impl IntoResponse {
    let repo = EntryRepository::new((*state.db).clone());
    let params = params.clamped(MAX_PAGE_SIZE);

    match repo.list_entries(params).await {
        Ok((rows, total)) => {
            let entries: Vec<EntryResponse> = rows.into_iter().map(EntryResponse::from).collect();
            (
                StatusCode::OK,
                Json(PageResponse::new(entries, params, total)),
            )
                .into_response()
        }
        Err(e) => responses::entry_error(e),
    }
}

/// GET `/entries/{id}` - Fetch one entry with its lines.
async fn get_entry(State(state): State<AppState>, Path(id): Path<Uuid>) -> impl IntoResponse {
    let repo = EntryRepository::new((*state.db).clone());

    match repo.find_entry(id).await {
        Ok(row) => (StatusCode::OK, Json(EntryResponse::from(row))).into_response(),
        Err(e) => responses::entry_error(e),
    }
}
