use crate::filters::{FeedFilter, NoticeFilter};
use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use sea_orm::{PaginatorTrait, QueryOrder, QuerySelect, Select};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Represents a notice in the `notices` table.
///
/// A notice belongs to the user who authored it and is only shown on the
/// published feed once its status is `published`.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "notices")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Author of the notice.
    pub user_id: i64,
    pub title: String,
    pub content: String,
    pub status: NoticeStatus,
    pub audience: Audience,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    Display,
    EnumString,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "notice_status")]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum NoticeStatus {
    #[sea_orm(string_value = "draft")]
    Draft,
    #[sea_orm(string_value = "published")]
    Published,
}

#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    Display,
    EnumString,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "notice_audience")]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Audience {
    /// Visible to every authenticated user.
    #[sea_orm(string_value = "all")]
    All,
    /// Restricted to admin users.
    #[sea_orm(string_value = "staff")]
    Staff,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    Author,

    #[sea_orm(has_many = "super::notice_read::Entity")]
    Reads,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl Related<super::notice_read::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reads.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create(
        db: &DbConn,
        user_id: i64,
        title: &str,
        content: &str,
        status: NoticeStatus,
        audience: Audience,
    ) -> Result<Model, DbErr> {
        let now = Utc::now();
        let notice = ActiveModel {
            user_id: Set(user_id),
            title: Set(title.to_owned()),
            content: Set(content.to_owned()),
            status: Set(status),
            audience: Set(audience),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        notice.insert(db).await
    }

    pub async fn get_by_id(db: &DbConn, id: i64) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id(id).one(db).await
    }

    /// Replaces the editable fields of a notice and bumps `updated_at`.
    pub async fn update(
        db: &DbConn,
        id: i64,
        title: &str,
        content: &str,
        status: NoticeStatus,
        audience: Audience,
    ) -> Result<Model, DbErr> {
        let notice = ActiveModel {
            id: Set(id),
            title: Set(title.to_owned()),
            content: Set(content.to_owned()),
            status: Set(status),
            audience: Set(audience),
            updated_at: Set(Utc::now()),
            ..Default::default()
        };
        notice.update(db).await
    }

    /// Deletes a notice by ID. Deleting a missing row is not an error.
    pub async fn delete(db: &DbConn, id: i64) -> Result<(), DbErr> {
        Entity::delete_by_id(id).exec(db).await?;
        Ok(())
    }

    /// Counts notices matching the management filter.
    pub async fn count_filtered(db: &DbConn, filter: &NoticeFilter) -> Result<u64, DbErr> {
        Entity::find().filter(filter.condition()).count(db).await
    }

    /// Fetches one window of notices matching the management filter.
    pub async fn list_filtered(
        db: &DbConn,
        filter: &NoticeFilter,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Model>, DbErr> {
        let query = Entity::find().filter(filter.condition());
        apply_sort(query, filter.sort.as_deref())
            .offset(offset)
            .limit(limit)
            .all(db)
            .await
    }

    /// Counts published notices visible to the requesting user.
    pub async fn count_visible(db: &DbConn, filter: &FeedFilter) -> Result<u64, DbErr> {
        Entity::find().filter(filter.condition()).count(db).await
    }

    /// Fetches one window of the published feed, newest first.
    pub async fn list_visible(
        db: &DbConn,
        filter: &FeedFilter,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(filter.condition())
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .offset(offset)
            .limit(limit)
            .all(db)
            .await
    }

    /// Counts visible notices the user has not marked as read yet.
    pub async fn count_unread(db: &DbConn, user_id: i64, staff: bool) -> Result<u64, DbErr> {
        let read_ids = super::notice_read::Model::read_ids_for_user(db, user_id).await?;

        let visible = FeedFilter {
            user_id,
            staff,
            title: None,
        };
        let mut query = Entity::find().filter(visible.condition());
        if !read_ids.is_empty() {
            query = query.filter(Column::Id.is_not_in(read_ids));
        }
        query.count(db).await
    }
}

/// Applies a comma-separated sort spec, `-` prefix meaning descending.
///
/// Unknown fields are skipped; handlers reject them before queries run.
/// Falls back to newest-first when nothing valid was requested.
fn apply_sort(mut query: Select<Entity>, sort: Option<&str>) -> Select<Entity> {
    let mut applied = false;

    if let Some(sort) = sort {
        for field in sort.split(',') {
            let field = field.trim();
            let (name, asc) = match field.strip_prefix('-') {
                Some(rest) => (rest, false),
                None => (field, true),
            };

            let column = match name {
                "created_at" => Column::CreatedAt,
                "updated_at" => Column::UpdatedAt,
                "title" => Column::Title,
                "status" => Column::Status,
                _ => continue,
            };

            query = if asc {
                query.order_by_asc(column)
            } else {
                query.order_by_desc(column)
            };
            applied = true;
        }
    }

    if !applied {
        query = query.order_by_desc(Column::CreatedAt);
    }
    query
}
