//! Published feed handlers.
//!
//! The feed is the notice list as seen by a signed-in user: published
//! notices only, audience-filtered, each row carrying the author and
//! whether the caller has already read it.

use crate::auth::AuthUser;
use crate::auth::guards::Empty;
use crate::response::ApiResponse;
use crate::routes::notices::common::MinimalUser;
use axum::{
    Extension, Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::{DateTime, Utc};
use common::config::Config;
use common::state::AppState;
use db::filters::FeedFilter;
use db::models::notice::{Audience, Model as NoticeModel};
use db::models::notice_read::Model as NoticeReadModel;
use db::models::user::{Column as UserColumn, Entity as UserEntity, Model as UserModel};
use db::page::{PageError, PageRequest, PagedQuery};
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Deserialize)]
pub struct FeedReq {
    pub offset: Option<i64>,
    pub limit: Option<i64>,
    pub title: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PublishedNotice {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub audience: Audience,
    pub author: MinimalUser,
    pub created_at: DateTime<Utc>,
    pub read: bool,
}

#[derive(Debug, Serialize, Default)]
pub struct UnreadCountResponse {
    pub count: u64,
}

/// GET /api/notices/published
///
/// Retrieves one page of the published feed for the current user, newest
/// first. Staff-audience notices only appear for admin callers.
///
/// # Query Parameters
/// - `offset`: (Optional) Number of rows to skip. Defaults to 0.
/// - `limit`: (Optional) Window size. Defaults to the configured page size
///   and is capped at the configured maximum.
/// - `title`: (Optional) Case-insensitive substring match on the title.
///
/// # Returns
/// - `200 OK`: `{ total, rows, offset, limit }`; each row is
///   `{ id, title, content, audience, author: { id, username }, created_at, read }`.
/// - `400 BAD REQUEST`: Invalid paging window.
/// - `500 INTERNAL SERVER ERROR`: Database query failed.
pub async fn get_published_notices(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Query(params): Query<FeedReq>,
) -> impl IntoResponse {
    let config = Config::get();

    let offset = params.offset.unwrap_or(0);
    let limit = params
        .limit
        .unwrap_or(config.default_page_size as i64)
        .min(config.max_page_size as i64);

    let mut request = PageRequest::new(offset, limit)
        .with_param("user_id", claims.sub)
        .with_param("staff", claims.admin);
    if let Some(title) = params.title {
        request = request.with_param("title", title);
    }

    let count_db = app_state.db_clone();
    let list_db = app_state.db_clone();

    let result = PagedQuery::new(
        move |params| async move {
            let filter = FeedFilter::from_params(&params);
            NoticeModel::count_visible(&count_db, &filter).await
        },
        move |params, offset, limit| async move {
            let filter = FeedFilter::from_params(&params);
            let notices = NoticeModel::list_visible(&list_db, &filter, offset, limit).await?;
            feed_rows(&list_db, filter.user_id, notices).await
        },
    )
    .run(&request)
    .await;

    match result {
        Ok(page) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                page,
                "Published notices retrieved successfully",
            )),
        )
            .into_response(),
        Err(PageError::InvalidRequest(msg)) => (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<Empty>::error(msg)),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to retrieve published notices");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<Empty>::error(
                    "Failed to retrieve published notices",
                )),
            )
                .into_response()
        }
    }
}

/// Decorates one window of notices with authors and the caller's read flags.
/// Authors are fetched in one batch; rows whose author has vanished are
/// dropped rather than failing the page.
async fn feed_rows(
    db: &DatabaseConnection,
    user_id: i64,
    notices: Vec<NoticeModel>,
) -> Result<Vec<PublishedNotice>, DbErr> {
    let ids: Vec<i64> = notices.iter().map(|n| n.id).collect();
    let read_ids: HashSet<i64> = NoticeReadModel::read_notice_ids(db, user_id, &ids)
        .await?
        .into_iter()
        .collect();

    let author_ids: Vec<i64> = notices.iter().map(|n| n.user_id).collect();
    let authors: HashMap<i64, UserModel> = UserEntity::find()
        .filter(UserColumn::Id.is_in(author_ids))
        .all(db)
        .await?
        .into_iter()
        .map(|u| (u.id, u))
        .collect();

    Ok(notices
        .into_iter()
        .filter_map(|n| {
            authors.get(&n.user_id).map(|author| PublishedNotice {
                id: n.id,
                title: n.title,
                content: n.content,
                audience: n.audience,
                author: MinimalUser {
                    id: author.id,
                    username: author.username.clone(),
                },
                created_at: n.created_at,
                read: read_ids.contains(&n.id),
            })
        })
        .collect())
}

/// GET /api/notices/unread-count
///
/// Returns how many published notices visible to the current user have no
/// read receipt by them yet.
///
/// # Responses
/// - `200 OK` — `{ count }`.
/// - `401 UNAUTHORIZED` — Missing/invalid token.
/// - `500 INTERNAL SERVER ERROR` — Database error.
pub async fn get_unread_count(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
) -> impl IntoResponse {
    match NoticeModel::count_unread(app_state.db(), claims.sub, claims.admin).await {
        Ok(count) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                UnreadCountResponse { count },
                "Unread count retrieved successfully",
            )),
        ),
        Err(e) => {
            tracing::error!(error = %e, user_id = claims.sub, "Failed to count unread notices");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<UnreadCountResponse>::error(
                    "Failed to count unread notices",
                )),
            )
        }
    }
}
