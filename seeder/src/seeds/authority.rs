use crate::seed::Seeder;
use db::models::user;
use db::models::user_authority::{Authority, Model as AuthorityModel};
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter};

pub struct AuthoritySeeder;

#[async_trait::async_trait]
impl Seeder for AuthoritySeeder {
    async fn seed(&self, db: &DatabaseConnection) -> Result<(), DbErr> {
        // The editor gets the full notice set, the normal user read-only.
        if let Some(editor) = find_by_username(db, "editor").await? {
            AuthorityModel::grant(db, editor.id, Authority::NoticeAdd).await?;
            AuthorityModel::grant(db, editor.id, Authority::NoticeQuery).await?;
            AuthorityModel::grant(db, editor.id, Authority::NoticeDel).await?;
        }

        if let Some(user) = find_by_username(db, "user").await? {
            AuthorityModel::grant(db, user.id, Authority::NoticeQuery).await?;
        }

        Ok(())
    }
}

async fn find_by_username(
    db: &DatabaseConnection,
    username: &str,
) -> Result<Option<user::Model>, DbErr> {
    user::Entity::find()
        .filter(user::Column::Username.eq(username))
        .one(db)
        .await
}
