use crate::seed::{Seeder, run_seeder};
use crate::seeds::{
    authority::AuthoritySeeder, notice::NoticeSeeder, notice_read::NoticeReadSeeder,
    user::UserSeeder,
};

mod seed;
mod seeds;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let db = db::connect().await;

    for (seeder, name) in [
        (Box::new(UserSeeder) as Box<dyn Seeder + Send + Sync>, "User"),
        (Box::new(AuthoritySeeder), "Authority"),
        (Box::new(NoticeSeeder), "Notice"),
        (Box::new(NoticeReadSeeder), "NoticeRead"),
    ] {
        run_seeder(&*seeder, name, &db).await;
    }
}
