use crate::auth::generate_jwt;
use crate::response::ApiResponse;
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use common::format_validation_errors;
use common::state::AppState;
use db::models::user::Model as UserModel;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Serialize, Default)]
pub struct UserView {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub admin: bool,
}

#[derive(Debug, Serialize, Default)]
pub struct LoginResponse {
    pub token: String,
    pub expires_at: String,
    pub user: UserView,
}

/// POST /auth/login
///
/// Authenticate a user and issue a JWT.
///
/// ### Request Body
/// ```json
/// {
///   "username": "editor",
///   "password": "strongpassword"
/// }
/// ```
///
/// ### Responses
///
/// - `200 OK`
/// ```json
/// {
///   "success": true,
///   "data": {
///     "token": "jwt_token_here",
///     "expires_at": "2026-08-21T11:00:00Z",
///     "user": { "id": 1, "username": "editor", "email": "editor@example.com", "admin": false }
///   },
///   "message": "Login successful"
/// }
/// ```
///
/// - `400 Bad Request` (validation failure)
/// ```json
/// {
///   "success": false,
///   "message": "Username is required"
/// }
/// ```
///
/// - `401 Unauthorized` (unknown username or wrong password)
/// ```json
/// {
///   "success": false,
///   "message": "Invalid username or password"
/// }
/// ```
pub async fn login(
    State(app_state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> impl IntoResponse {
    if let Err(validation_errors) = req.validate() {
        let error_message = format_validation_errors(&validation_errors);
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<LoginResponse>::error(error_message)),
        );
    }

    match UserModel::verify_credentials(app_state.db(), &req.username, &req.password).await {
        Ok(Some(user)) => {
            let (token, expires_at) = generate_jwt(user.id, user.admin);
            (
                StatusCode::OK,
                Json(ApiResponse::success(
                    LoginResponse {
                        token,
                        expires_at,
                        user: UserView {
                            id: user.id,
                            username: user.username,
                            email: user.email,
                            admin: user.admin,
                        },
                    },
                    "Login successful",
                )),
            )
        }
        Ok(None) => (
            StatusCode::UNAUTHORIZED,
            Json(ApiResponse::<LoginResponse>::error(
                "Invalid username or password",
            )),
        ),
        Err(e) => {
            tracing::error!(error = %e, "Failed to verify credentials");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<LoginResponse>::error("Database error")),
            )
        }
    }
}
