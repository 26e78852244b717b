use crate::seed::Seeder;
use db::models::notice::{self, NoticeStatus};
use db::models::notice_read::Model as NoticeReadModel;
use db::models::user;
use rand::rngs::{OsRng, StdRng};
use rand::{Rng, SeedableRng};
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter};

pub struct NoticeReadSeeder;

#[async_trait::async_trait]
impl Seeder for NoticeReadSeeder {
    async fn seed(&self, db: &DatabaseConnection) -> Result<(), DbErr> {
        let mut rng = StdRng::from_rng(OsRng).expect("rng");

        let users = user::Entity::find().all(db).await?;
        let published = notice::Entity::find()
            .filter(notice::Column::Status.eq(NoticeStatus::Published))
            .all(db)
            .await?;

        // Most users have caught up on most of the feed.
        for user in &users {
            for n in &published {
                if rng.gen_bool(0.6) {
                    NoticeReadModel::mark_read(db, n.id, user.id).await?;
                }
            }
        }

        Ok(())
    }
}
