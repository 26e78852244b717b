//! Read receipt handler.
//!
//! Viewing a notice through this endpoint records that the current user has
//! read it and returns the notice together with everyone who has read it.

use crate::auth::AuthUser;
use crate::auth::guards::Empty;
use crate::response::ApiResponse;
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::{DateTime, Utc};
use common::state::AppState;
use db::models::notice::{Audience, Model as NoticeModel, NoticeStatus};
use db::models::notice_read::Model as NoticeReadModel;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Reader {
    pub id: i64,
    pub username: String,
    pub read_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Default)]
pub struct ReadNoticeResponse {
    pub notice: Option<NoticeModel>,
    pub readers: Vec<Reader>,
}

/// GET /api/notices/{notice_id}/read
///
/// Marks the notice as read by the current user and returns it together with
/// its readers, oldest receipt first. Marking is idempotent; re-reading keeps
/// the original receipt timestamp.
///
/// Draft notices, staff notices for non-admin callers, and unknown IDs are
/// indistinguishable: the response is a `200 OK` with an empty view
/// (`notice: null`, `readers: []`) and nothing is recorded.
///
/// # Responses
/// - `200 OK` — `{ notice, readers }`, or the empty view.
/// - `401 UNAUTHORIZED` — Missing/invalid token.
/// - `500 INTERNAL SERVER ERROR` — Database error.
pub async fn read_notice(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Path(notice_id): Path<i64>,
) -> impl IntoResponse {
    let db = app_state.db();

    let notice = match NoticeModel::get_by_id(db, notice_id).await {
        Ok(notice) => notice,
        Err(e) => {
            tracing::error!(error = %e, notice_id, "Failed to load notice");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<Empty>::error("Failed to retrieve notice")),
            )
                .into_response();
        }
    };

    let visible = notice.filter(|n| {
        n.status == NoticeStatus::Published && (n.audience == Audience::All || claims.admin)
    });

    let Some(notice) = visible else {
        return (
            StatusCode::OK,
            Json(ApiResponse::success(
                ReadNoticeResponse::default(),
                "Notice retrieved successfully",
            )),
        )
            .into_response();
    };

    if let Err(e) = NoticeReadModel::mark_read(db, notice.id, claims.sub).await {
        tracing::error!(error = %e, notice_id, user_id = claims.sub, "Failed to record read receipt");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<Empty>::error("Failed to record read receipt")),
        )
            .into_response();
    }

    match NoticeReadModel::readers(db, notice.id).await {
        Ok(receipts) => {
            let readers = receipts
                .into_iter()
                .map(|(receipt, user)| Reader {
                    id: user.id,
                    username: user.username,
                    read_at: receipt.read_at,
                })
                .collect();

            (
                StatusCode::OK,
                Json(ApiResponse::success(
                    ReadNoticeResponse {
                        notice: Some(notice),
                        readers,
                    },
                    "Notice retrieved successfully",
                )),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, notice_id, "Failed to list readers");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<Empty>::error("Failed to list readers")),
            )
                .into_response()
        }
    }
}
