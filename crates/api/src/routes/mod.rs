//! API route definitions.

use axum::Router;

use crate::AppState;

pub mod accounts;
pub mod entries;
pub mod health;
pub mod ledger;
pub mod manuals;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(accounts::routes())
        .merge(entries::routes())
        .merge(ledger::routes())
        .merge(manuals::routes())
}
