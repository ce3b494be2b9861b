//! Ledger (mayorización) routes.
//!
//! Both views fetch flattened posting rows and hand them to the pure
//! aggregation in `libros_core::posting`.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use crate::{AppState, responses};
use libros_core::posting::{self, AccountMeta};
use libros_db::repositories::{AccountRepository, PostingFilter, PostingRepository};

/// Creates the ledger routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/ledger/summary", get(ledger_summary))
        .route("/ledger/accounts/{id}", get(account_ledger))
}

/// Query filters shared by the ledger views.
#[derive(Debug, Default, Deserialize)]
pub struct LedgerQuery {
    /// Inclusive lower bound on the entry date.
    pub from: Option<NaiveDate>,
    /// Inclusive upper bound on the entry date.
    pub to: Option<NaiveDate>,
    /// Restrict to one entry type tag.
    pub entry_type: Option<String>,
}

impl LedgerQuery {
    fn into_filter(self, account_id: Option<Uuid>) -> PostingFilter {
        PostingFilter {
            date_from: self.from,
            date_to: self.to,
            entry_type: self.entry_type,
            account_id,
        }
    }
}

/// GET `/ledger/summary?from&to&entry_type` - Per-account totals with
/// control totals.
async fn ledger_summary(
    State(state): State<AppState>,
    Query(query): Query<LedgerQuery>,
) -> impl IntoResponse {
    let repo = PostingRepository::new((*state.db).clone());

    match repo.fetch_rows(&query.into_filter(None)).await {
        Ok(rows) => {
            let summary = posting::summarize(&rows);
            (StatusCode::OK, Json(summary)).into_response()
        }
        Err(e) => responses::posting_error(e),
    }
}

/// GET `/ledger/accounts/{id}?from&to&entry_type` - Running-balance detail
/// for one account.
async fn account_ledger(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<LedgerQuery>,
) -> impl IntoResponse {
    let account_repo = AccountRepository::new((*state.db).clone());

    let account = match account_repo.find_account(id).await {
        Ok(row) => row.account,
        Err(e) => return responses::account_error(e),
    };

    let meta = AccountMeta {
        id: account.id,
        code: account.code,
        name: account.name,
        account_type: account.account_type.into(),
    };

    let posting_repo = PostingRepository::new((*state.db).clone());
    match posting_repo.fetch_rows(&query.into_filter(Some(id))).await {
        Ok(rows) => {
            let ledger = posting::account_ledger(&meta, &rows);
            (StatusCode::OK, Json(ledger)).into_response()
        }
        Err(e) => responses::posting_error(e),
    }
}
