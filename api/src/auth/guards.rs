use crate::auth::claims::AuthUser;
use crate::response::ApiResponse;
use axum::{
    Json,
    body::Body,
    extract::{FromRequestParts, State},
    http::{Request, StatusCode},
    middleware::Next,
    response::Response,
};
use common::state::AppState;
use db::models::user_authority::{Authority, Model as AuthorityModel};
use sea_orm::DatabaseConnection;

#[derive(serde::Serialize, Default)]
pub struct Empty;

/// Helper to extract and validate the user from the request, then insert the
/// `AuthUser` back into the request extensions for handlers downstream.
async fn extract_and_insert_authuser(
    mut req: Request<Body>,
) -> Result<(Request<Body>, AuthUser), (StatusCode, Json<ApiResponse<Empty>>)> {
    let (mut parts, body) = req.into_parts();
    let user = AuthUser::from_request_parts(&mut parts, &())
        .await
        .map_err(|_| {
            (
                StatusCode::UNAUTHORIZED,
                Json(ApiResponse::error("Authentication required")),
            )
        })?;

    req = Request::from_parts(parts, body);
    req.extensions_mut().insert(user.clone());
    Ok((req, user))
}

/// Helper to check whether the user holds the given authority. A DB error is
/// logged and treated as "no" (fail-safe).
async fn user_has_authority(db: &DatabaseConnection, user_id: i64, authority: Authority) -> bool {
    match AuthorityModel::has(db, user_id, authority.clone()).await {
        Ok(found) => found,
        Err(e) => {
            tracing::warn!(
                error = %e,
                user_id,
                authority = %authority,
                "DB error while checking authority; denying access"
            );
            false
        }
    }
}

/// Basic guard to ensure the request is authenticated.
pub async fn allow_authenticated(
    req: Request<Body>,
    next: Next,
) -> Result<Response, (StatusCode, Json<ApiResponse<Empty>>)> {
    let (req, _user) = extract_and_insert_authuser(req).await?;

    Ok(next.run(req).await)
}

/// Shared base for the per-authority guards. Admin users bypass the lookup.
async fn require_authority(
    authority: Authority,
    state: AppState,
    req: Request<Body>,
    next: Next,
) -> Result<Response, (StatusCode, Json<ApiResponse<Empty>>)> {
    let (req, user) = extract_and_insert_authuser(req).await?;

    if user.0.admin {
        return Ok(next.run(req).await);
    }

    if !user_has_authority(state.db(), user.0.sub, authority).await {
        return Err((
            StatusCode::FORBIDDEN,
            Json(ApiResponse::error("Insufficient permissions")),
        ));
    }

    Ok(next.run(req).await)
}

pub async fn require_notice_add(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, (StatusCode, Json<ApiResponse<Empty>>)> {
    require_authority(Authority::NoticeAdd, state, req, next).await
}

pub async fn require_notice_query(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, (StatusCode, Json<ApiResponse<Empty>>)> {
    require_authority(Authority::NoticeQuery, state, req, next).await
}

pub async fn require_notice_del(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, (StatusCode, Json<ApiResponse<Empty>>)> {
    require_authority(Authority::NoticeDel, state, req, next).await
}
