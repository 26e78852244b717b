use crate::{
    auth::AuthUser, auth::guards::Empty, response::ApiResponse,
    routes::notices::common::NoticeRequest,
};
use axum::{Extension, Json, extract::State, http::StatusCode, response::IntoResponse};
use common::format_validation_errors;
use common::state::AppState;
use db::models::notice::{Audience, Model as NoticeModel, NoticeStatus};
use validator::Validate;

/// POST /api/notices
///
/// Creates a notice authored by the current user. Requires the `notice:add`
/// authority. `status` defaults to `draft` and `audience` to `all`.
pub async fn create_notice(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
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

    let status = req.status.unwrap_or(NoticeStatus::Draft);
    let audience = req.audience.unwrap_or(Audience::All);

    match NoticeModel::create(
        app_state.db(),
        claims.sub,
        &req.title,
        &req.content,
        status,
        audience,
    )
    .await
    {
        Ok(notice) => {
            tracing::info!(notice_id = notice.id, user_id = claims.sub, "Notice created");
            (
                StatusCode::OK,
                Json(ApiResponse::success(notice, "Notice created successfully")),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to create notice");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<Empty>::error("Failed to create notice")),
            )
                .into_response()
        }
    }
}
