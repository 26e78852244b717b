//! Shared DTOs for the `/notices` route group.

use db::models::notice::{Audience, NoticeStatus};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Payload for creating or updating a notice.
///
/// On create, `status` defaults to `draft` and `audience` to `all`; on
/// update, omitted fields keep their stored values.
#[derive(Debug, Deserialize, Validate)]
pub struct NoticeRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"))]
    pub title: String,

    #[validate(length(
        min = 1,
        max = 10000,
        message = "Content must be between 1 and 10000 characters"
    ))]
    pub content: String,

    pub status: Option<NoticeStatus>,
    pub audience: Option<Audience>,
}

/// Thin author projection embedded in notice responses.
#[derive(Debug, Serialize)]
pub struct MinimalUser {
    pub id: i64,
    pub username: String,
}
