use crate::auth::AuthUser;
use crate::response::ApiResponse;
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use common::state::AppState;
use db::models::user::Model as UserModel;
use db::models::user_authority::Model as AuthorityModel;
use serde::Serialize;

#[derive(Debug, Serialize, Default)]
pub struct MeResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub admin: bool,
    pub authorities: Vec<String>,
}

/// GET /auth/me
///
/// Returns the profile of the currently authenticated user together with the
/// authorities granted to them. Admins hold every authority implicitly, but
/// only explicit grants are listed here.
///
/// ### Responses
///
/// - `200 OK`
/// ```json
/// {
///   "success": true,
///   "data": {
///     "id": 1,
///     "username": "editor",
///     "email": "editor@example.com",
///     "admin": false,
///     "authorities": ["notice:add", "notice:query"]
///   },
///   "message": "User retrieved successfully"
/// }
/// ```
///
/// - `401 Unauthorized` (missing/invalid token)
/// - `404 Not Found` (token refers to a deleted user)
pub async fn get_me(
    State(app_state): State<AppState>,
    AuthUser(claims): AuthUser,
) -> impl IntoResponse {
    let db = app_state.db();

    let user = match UserModel::find_by_id(db, claims.sub).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<MeResponse>::error("User not found")),
            );
        }
        Err(e) => {
            tracing::error!(error = %e, user_id = claims.sub, "Failed to look up user");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<MeResponse>::error("Database error")),
            );
        }
    };

    match AuthorityModel::list_for_user(db, user.id).await {
        Ok(authorities) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                MeResponse {
                    id: user.id,
                    username: user.username,
                    email: user.email,
                    admin: user.admin,
                    authorities: authorities.iter().map(|a| a.to_string()).collect(),
                },
                "User retrieved successfully",
            )),
        ),
        Err(e) => {
            tracing::error!(error = %e, user_id = user.id, "Failed to list authorities");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<MeResponse>::error("Database error")),
            )
        }
    }
}
