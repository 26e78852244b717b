use axum::{
    Router,
    middleware::{from_fn, from_fn_with_state},
};
use ::common::state::AppState;

pub mod common;
pub mod delete;
pub mod get;
pub mod post;
pub mod published;
pub mod put;
pub mod read;

use crate::auth::guards::{
    allow_authenticated, require_notice_add, require_notice_del, require_notice_query,
};
use axum::routing::{delete, get, post, put};
use delete::delete_notice;
use get::{get_notice, get_notices};
use post::create_notice;
use published::{get_published_notices, get_unread_count};
use put::edit_notice;
use read::read_notice;

/// Builds the `/notices` route group.
///
/// Management endpoints are guarded by the matching notice authority, while
/// the published feed, unread counter, and read receipts only require a valid
/// token. Admin users pass every authority guard.
pub fn notice_routes(app_state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(create_notice)
                .route_layer(from_fn_with_state(app_state.clone(), require_notice_add)),
        )
        .route(
            "/",
            get(get_notices)
                .route_layer(from_fn_with_state(app_state.clone(), require_notice_query)),
        )
        .route(
            "/published",
            get(get_published_notices).route_layer(from_fn(allow_authenticated)),
        )
        .route(
            "/unread-count",
            get(get_unread_count).route_layer(from_fn(allow_authenticated)),
        )
        .route(
            "/{notice_id}",
            get(get_notice)
                .route_layer(from_fn_with_state(app_state.clone(), require_notice_query)),
        )
        .route(
            "/{notice_id}",
            put(edit_notice)
                .route_layer(from_fn_with_state(app_state.clone(), require_notice_add)),
        )
        .route(
            "/{notice_id}",
            delete(delete_notice)
                .route_layer(from_fn_with_state(app_state.clone(), require_notice_del)),
        )
        .route(
            "/{notice_id}/read",
            get(read_notice).route_layer(from_fn(allow_authenticated)),
        )
}
