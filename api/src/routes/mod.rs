//! HTTP route entry point for `/api/...`.
//!
//! Routes are organized by domain, each protected via the appropriate access
//! control middleware:
//! - `/health` → Health check endpoint (public)
//! - `/auth` → Authentication endpoints (login, current user)
//! - `/notices` → Notice management, the published feed, and read receipts

use crate::routes::{auth::auth_routes, health::health_routes, notices::notice_routes};
use axum::Router;
use common::state::AppState;

pub mod auth;
pub mod health;
pub mod notices;

/// Builds the complete application router for all HTTP endpoints.
///
/// The returned router carries its state already applied, so `main` (and the
/// integration tests) can mount it under `/api` as-is.
pub fn routes(app_state: AppState) -> Router {
    Router::new()
        .nest("/health", health_routes())
        .nest("/auth", auth_routes())
        .nest("/notices", notice_routes(app_state.clone()))
        .with_state(app_state)
}
