use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use sea_orm::QueryOrder;
use serde::Serialize;

/// A read receipt: the given user has seen the given notice.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "notice_reads")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub notice_id: i64,
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: i64,
    pub read_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::notice::Entity",
        from = "Column::NoticeId",
        to = "super::notice::Column::Id",
        on_delete = "Cascade"
    )]
    Notice,

    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::notice::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Notice.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Records that the user has read the notice. Marking twice keeps the
    /// original `read_at`.
    pub async fn mark_read(db: &DbConn, notice_id: i64, user_id: i64) -> Result<(), DbErr> {
        let existing = Entity::find_by_id((notice_id, user_id)).one(db).await?;
        if existing.is_none() {
            let receipt = ActiveModel {
                notice_id: Set(notice_id),
                user_id: Set(user_id),
                read_at: Set(Utc::now()),
            };
            receipt.insert(db).await?;
        }
        Ok(())
    }

    /// Lists read receipts for a notice together with the reading user,
    /// oldest first. Receipts whose user has vanished are skipped.
    pub async fn readers(
        db: &DbConn,
        notice_id: i64,
    ) -> Result<Vec<(Model, super::user::Model)>, DbErr> {
        Ok(Entity::find()
            .filter(Column::NoticeId.eq(notice_id))
            .find_also_related(super::user::Entity)
            .order_by_asc(Column::ReadAt)
            .all(db)
            .await?
            .into_iter()
            .filter_map(|(receipt, user)| user.map(|u| (receipt, u)))
            .collect())
    }

    /// Of the given notice IDs, returns those the user has already read.
    pub async fn read_notice_ids(
        db: &DbConn,
        user_id: i64,
        notice_ids: &[i64],
    ) -> Result<Vec<i64>, DbErr> {
        if notice_ids.is_empty() {
            return Ok(Vec::new());
        }
        Ok(Entity::find()
            .filter(Column::UserId.eq(user_id))
            .filter(Column::NoticeId.is_in(notice_ids.iter().copied()))
            .all(db)
            .await?
            .into_iter()
            .map(|receipt| receipt.notice_id)
            .collect())
    }

    /// Every notice ID the user has marked as read.
    pub async fn read_ids_for_user(db: &DbConn, user_id: i64) -> Result<Vec<i64>, DbErr> {
        Ok(Entity::find()
            .filter(Column::UserId.eq(user_id))
            .all(db)
            .await?
            .into_iter()
            .map(|receipt| receipt.notice_id)
            .collect())
    }
}
