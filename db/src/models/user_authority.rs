use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// A single authority granted to a user.
///
/// The pair (user, authority) is the primary key, so a grant is
/// naturally idempotent at the schema level.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "user_authorities")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: i64,
    #[sea_orm(primary_key, auto_increment = false)]
    pub authority: Authority,
}

/// Fine-grained permissions checked by the route guards.
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
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "authority_type")]
pub enum Authority {
    #[sea_orm(string_value = "notice:add")]
    #[strum(serialize = "notice:add")]
    #[serde(rename = "notice:add")]
    NoticeAdd,

    #[sea_orm(string_value = "notice:query")]
    #[strum(serialize = "notice:query")]
    #[serde(rename = "notice:query")]
    NoticeQuery,

    #[sea_orm(string_value = "notice:del")]
    #[strum(serialize = "notice:del")]
    #[serde(rename = "notice:del")]
    NoticeDel,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Grants an authority to a user. Granting twice is a no-op.
    pub async fn grant(db: &DbConn, user_id: i64, authority: Authority) -> Result<(), DbErr> {
        let existing = Entity::find()
            .filter(Column::UserId.eq(user_id))
            .filter(Column::Authority.eq(authority.clone()))
            .one(db)
            .await?;

        if existing.is_none() {
            let grant = ActiveModel {
                user_id: Set(user_id),
                authority: Set(authority),
            };
            grant.insert(db).await?;
        }

        Ok(())
    }

    /// Returns whether the user holds the given authority.
    pub async fn has(db: &DbConn, user_id: i64, authority: Authority) -> Result<bool, DbErr> {
        Ok(Entity::find()
            .filter(Column::UserId.eq(user_id))
            .filter(Column::Authority.eq(authority))
            .one(db)
            .await?
            .is_some())
    }

    pub async fn list_for_user(db: &DbConn, user_id: i64) -> Result<Vec<Authority>, DbErr> {
        Ok(Entity::find()
            .filter(Column::UserId.eq(user_id))
            .all(db)
            .await?
            .into_iter()
            .map(|grant| grant.authority)
            .collect())
    }
}
