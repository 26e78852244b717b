//! Notice retrieval handlers.
//!
//! Provides the paginated management listing over all notices and the
//! single-notice lookup with its author.

use crate::auth::guards::Empty;
use crate::response::ApiResponse;
use crate::routes::notices::common::MinimalUser;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use common::config::Config;
use common::state::AppState;
use db::filters::NoticeFilter;
use db::models::notice::{
    Entity as NoticeEntity, Model as NoticeModel, NoticeStatus,
};
use db::models::user::Entity as UserEntity;
use db::page::{PageError, PageRequest, PagedQuery};
use sea_orm::EntityTrait;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Deserialize)]
pub struct FilterReq {
    pub offset: Option<i64>,
    pub limit: Option<i64>,
    pub title: Option<String>,
    pub status: Option<String>,
    pub sort: Option<String>,
}

#[derive(Serialize)]
pub struct ShowNoticeResponse {
    pub notice: NoticeModel,
    pub author: MinimalUser,
}

/// GET /api/notices
///
/// Retrieves a paginated and optionally filtered list of notices. Requires
/// the `notice:query` authority. Drafts are included; this is the management
/// view, not the published feed.
///
/// # Query Parameters
///
/// - `offset`: (Optional) Number of rows to skip. Defaults to 0.
/// - `limit`: (Optional) Window size. Defaults to the configured page size
///   and is capped at the configured maximum.
/// - `title`: (Optional) Case-insensitive substring match on the title.
/// - `status`: (Optional) Filter by status. Accepts `draft` or `published`.
/// - `sort`: (Optional) Comma-separated list of fields to sort by.
///   Prefix with `-` for descending order (e.g., `-created_at`).
///   Allowed fields: `"created_at"`, `"updated_at"`, `"title"`, `"status"`.
///   Defaults to `-created_at` (newest first).
///
/// # Returns
///
/// - `200 OK`: `{ total, rows, offset, limit }` where `total` counts every
///   match and `rows` holds at most `limit` of them.
/// - `400 BAD REQUEST`: Invalid sort field, invalid status value, or an
///   invalid paging window (negative offset, non-positive limit).
/// - `500 INTERNAL SERVER ERROR`: Database query failed.
///
/// # Example Response
///
/// **200 OK**
/// ```json
/// {
///   "success": true,
///   "data": {
///     "total": 45,
///     "rows": [
///       {
///         "id": 1,
///         "user_id": 5,
///         "title": "Scheduled maintenance window",
///         "content": "The service will be down...",
///         "status": "published",
///         "audience": "all",
///         "created_at": "2026-08-16T12:00:00Z",
///         "updated_at": "2026-08-16T12:00:00Z"
///       }
///     ],
///     "offset": 0,
///     "limit": 20
///   },
///   "message": "Notices retrieved successfully"
/// }
/// ```
pub async fn get_notices(
    State(app_state): State<AppState>,
    Query(params): Query<FilterReq>,
) -> impl IntoResponse {
    let config = Config::get();

    if let Some(sort_field) = &params.sort {
        let valid_fields = ["created_at", "updated_at", "title", "status"];
        for field in sort_field.split(',') {
            let field = field.trim().trim_start_matches('-');
            if !valid_fields.contains(&field) {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ApiResponse::<Empty>::error("Invalid field used for sorting")),
                )
                    .into_response();
            }
        }
    }

    if let Some(status) = &params.status {
        if NoticeStatus::from_str(status).is_err() {
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::<Empty>::error("Invalid status value")),
            )
                .into_response();
        }
    }

    let offset = params.offset.unwrap_or(0);
    let limit = params
        .limit
        .unwrap_or(config.default_page_size as i64)
        .min(config.max_page_size as i64);

    let mut request = PageRequest::new(offset, limit);
    if let Some(title) = params.title {
        request = request.with_param("title", title);
    }
    if let Some(status) = params.status {
        request = request.with_param("status", status);
    }
    if let Some(sort) = params.sort {
        request = request.with_param("sort", sort);
    }

    let count_db = app_state.db_clone();
    let list_db = app_state.db_clone();

    let result = PagedQuery::new(
        move |params| async move {
            let filter = NoticeFilter::from_params(&params);
            NoticeModel::count_filtered(&count_db, &filter).await
        },
        move |params, offset, limit| async move {
            let filter = NoticeFilter::from_params(&params);
            NoticeModel::list_filtered(&list_db, &filter, offset, limit).await
        },
    )
    .run(&request)
    .await;

    match result {
        Ok(page) => (
            StatusCode::OK,
            Json(ApiResponse::success(page, "Notices retrieved successfully")),
        )
            .into_response(),
        Err(PageError::InvalidRequest(msg)) => (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<Empty>::error(msg)),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to retrieve notices");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<Empty>::error("Failed to retrieve notices")),
            )
                .into_response()
        }
    }
}

/// GET /api/notices/{notice_id}
///
/// Retrieves a single notice by ID, including the authoring user. Requires
/// the `notice:query` authority.
///
/// # Returns
///
/// - `200 OK` with `{ notice, author }` on success (author is `{ id, username }` only).
/// - `404 NOT FOUND` if the notice does not exist.
/// - `500 INTERNAL SERVER ERROR` on database errors.
pub async fn get_notice(
    State(app_state): State<AppState>,
    Path(notice_id): Path<i64>,
) -> impl IntoResponse {
    let db = app_state.db();

    let result = NoticeEntity::find_by_id(notice_id)
        .find_also_related(UserEntity)
        .one(db)
        .await;

    match result {
        Ok(Some((notice, Some(user)))) => {
            let author = MinimalUser {
                id: user.id,
                username: user.username,
            };
            (
                StatusCode::OK,
                Json(ApiResponse::success(
                    ShowNoticeResponse { notice, author },
                    "Notice retrieved successfully",
                )),
            )
                .into_response()
        }

        Ok(Some((_notice, None))) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<Empty>::error(
                "Related user not found for notice",
            )),
        )
            .into_response(),

        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<Empty>::error("Notice not found")),
        )
            .into_response(),

        Err(e) => {
            tracing::error!(error = %e, notice_id, "Failed to retrieve notice");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<Empty>::error("Failed to retrieve notice")),
            )
                .into_response()
        }
    }
}
