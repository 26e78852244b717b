//! Notice deletion handler.

use crate::auth::guards::Empty;
use crate::response::ApiResponse;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use common::state::AppState;
use db::models::notice::Model as NoticeModel;

/// DELETE /api/notices/{notice_id}
///
/// Deletes a single notice by ID. Requires the `notice:del` authority.
///
/// # Behavior
/// - Deletion is **idempotent**: deleting a non-existent notice still returns
///   `200 OK` (the driver reports `rows_affected = 0`, which is not an error).
/// - Read receipts for the notice are removed by the cascading foreign key.
///
/// # Responses
/// - `200 OK` — Always returned on a successful DB call, even if the record
///   did not exist.
/// - `401 UNAUTHORIZED` — Missing/invalid token.
/// - `403 FORBIDDEN` — Authenticated but without `notice:del`.
/// - `500 INTERNAL SERVER ERROR` — Database error.
pub async fn delete_notice(
    State(app_state): State<AppState>,
    Path(notice_id): Path<i64>,
) -> impl IntoResponse {
    match NoticeModel::delete(app_state.db(), notice_id).await {
        Ok(()) => {
            tracing::info!(notice_id, "Notice deleted");
            (
                StatusCode::OK,
                Json(ApiResponse::success((), "Notice deleted successfully")),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, notice_id, "Failed to delete notice");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<Empty>::error("Failed to delete notice")),
            )
                .into_response()
        }
    }
}
