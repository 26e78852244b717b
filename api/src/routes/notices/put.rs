//! Edit notice handler.
//!
//! Published notices are immutable; a published notice must be deleted and
//! recreated rather than edited in place.

use crate::auth::guards::Empty;
use crate::{response::ApiResponse, routes::notices::common::NoticeRequest};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use common::format_validation_errors;
use common::state::AppState;
use db::models::notice::{Model as NoticeModel, NoticeStatus};
use validator::Validate;

/// PUT /api/notices/{notice_id}
///
/// Replaces the editable fields of a draft notice. Requires the `notice:add`
/// authority.
///
/// # Request Body
/// JSON matching `NoticeRequest`; omitted `status`/`audience` keep their
/// stored values.
///
/// # Responses
/// - `200 OK` — Returns the updated notice.
/// - `400 BAD REQUEST` — Validation failure.
/// - `404 NOT FOUND` — No notice with this ID.
/// - `409 CONFLICT` — The stored notice is already published.
/// - `500 INTERNAL SERVER ERROR` — Database error.
pub async fn edit_notice(
    State(app_state): State<AppState>,
    Path(notice_id): Path<i64>,
    Json(req): Json<NoticeRequest>,
) -> impl IntoResponse {
    if let Err(validation_errors) = req.validate() {
        let error_message = format_validation_errors(&validation_errors);
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<Empty>::error(error_message)),
        )
            .into_response();
    }

    let db = app_state.db();

    let existing = match NoticeModel::get_by_id(db, notice_id).await {
        Ok(Some(notice)) => notice,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<Empty>::error("Notice not found")),
            )
                .into_response();
        }
        Err(e) => {
            tracing::error!(error = %e, notice_id, "Failed to load notice for update");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<Empty>::error("Failed to update notice")),
            )
                .into_response();
        }
    };

    if existing.status == NoticeStatus::Published {
        return (
            StatusCode::CONFLICT,
            Json(ApiResponse::<Empty>::error(
                "Published notices cannot be edited",
            )),
        )
            .into_response();
    }

    let status = req.status.unwrap_or(existing.status);
    let audience = req.audience.unwrap_or(existing.audience);

    match NoticeModel::update(db, notice_id, &req.title, &req.content, status, audience).await {
        Ok(updated) => {
            tracing::info!(notice_id, "Notice updated");
            (
                StatusCode::OK,
                Json(ApiResponse::success(updated, "Notice updated successfully")),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, notice_id, "Failed to update notice");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<Empty>::error("Failed to update notice")),
            )
                .into_response()
        }
    }
}
