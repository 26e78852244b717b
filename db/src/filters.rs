//! Typed filters decoded from the opaque parameter map carried by a
//! page request. Each filter knows how to turn itself into a sea-orm
//! `Condition`, so the count and list sides of a paged query always
//! agree on what matches.

use crate::models::notice::{Audience, Column as NoticeColumn, NoticeStatus};
use crate::page::{PageParams, param_bool, param_i64, param_str};
use sea_orm::{ColumnTrait, Condition};
use std::str::FromStr;

/// Filter for the management listing over all notices.
#[derive(Debug, Clone, Default)]
pub struct NoticeFilter {
    /// Case-insensitive substring match on the title.
    pub title: Option<String>,
    pub status: Option<NoticeStatus>,
    /// Comma-separated sort spec, `-` prefix for descending.
    pub sort: Option<String>,
}

impl NoticeFilter {
    pub fn from_params(params: &PageParams) -> Self {
        Self {
            title: param_str(params, "title").map(str::to_owned),
            status: param_str(params, "status").and_then(|s| NoticeStatus::from_str(s).ok()),
            sort: param_str(params, "sort").map(str::to_owned),
        }
    }

    pub fn condition(&self) -> Condition {
        let mut condition = Condition::all();
        if let Some(ref title) = self.title {
            condition = condition.add(NoticeColumn::Title.contains(title));
        }
        if let Some(ref status) = self.status {
            condition = condition.add(NoticeColumn::Status.eq(status.clone()));
        }
        condition
    }
}

/// Filter for the published feed as seen by one user.
///
/// `user_id` does not narrow the rows here; it travels with the filter so
/// the list side can attach per-user read flags.
#[derive(Debug, Clone, Default)]
pub struct FeedFilter {
    pub user_id: i64,
    /// Staff (admin) callers also see notices aimed at staff.
    pub staff: bool,
    pub title: Option<String>,
}

impl FeedFilter {
    pub fn from_params(params: &PageParams) -> Self {
        Self {
            user_id: param_i64(params, "user_id").unwrap_or(0),
            staff: param_bool(params, "staff").unwrap_or(false),
            title: param_str(params, "title").map(str::to_owned),
        }
    }

    pub fn condition(&self) -> Condition {
        let mut condition = Condition::all().add(NoticeColumn::Status.eq(NoticeStatus::Published));
        if !self.staff {
            condition = condition.add(NoticeColumn::Audience.eq(Audience::All));
        }
        if let Some(ref title) = self.title {
            condition = condition.add(NoticeColumn::Title.contains(title));
        }
        condition
    }
}
