use crate::seed::Seeder;
use chrono::{DateTime, Duration, Utc};
use db::models::notice::{ActiveModel as NoticeActiveModel, Audience, NoticeStatus};
use db::models::user;
use rand::rngs::{OsRng, StdRng};
use rand::{Rng, SeedableRng, seq::SliceRandom};
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, Set};

pub struct NoticeSeeder;

#[async_trait::async_trait]
impl Seeder for NoticeSeeder {
    async fn seed(&self, db: &DatabaseConnection) -> Result<(), DbErr> {
        let mut rng = StdRng::from_rng(OsRng).expect("rng");

        // Notices are authored by the editor and the admins.
        let authors: Vec<i64> = user::Entity::find()
            .all(db)
            .await?
            .into_iter()
            .filter(|u| u.admin || u.username == "editor")
            .map(|u| u.id)
            .collect();
        if authors.is_empty() {
            panic!("No authors found; run UserSeeder first");
        }

        let titles = [
            "Scheduled maintenance window",
            "New feature rollout",
            "Policy update",
            "Service degradation resolved",
            "Holiday office hours",
            "Security reminder",
            "Upcoming downtime",
            "Release notes",
            "Survey: tell us what you think",
            "Welcome aboard",
        ];

        for i in 0..40 {
            // Spread creation dates across the last ~6 months
            let created_at = Utc::now()
                - Duration::days(rng.gen_range(0..=180))
                - Duration::hours(rng.gen_range(0..=23))
                - Duration::minutes(rng.gen_range(0..=59));

            // Keep a few guaranteed published so the feed is never empty
            let status = if i < 5 || rng.gen_bool(0.75) {
                NoticeStatus::Published
            } else {
                NoticeStatus::Draft
            };
            let audience = if rng.gen_bool(0.2) {
                Audience::Staff
            } else {
                Audience::All
            };

            let title = titles.choose(&mut rng).unwrap().to_string();
            let content = build_markdown(&title, created_at, &mut rng);

            let notice = NoticeActiveModel {
                user_id: Set(*authors.choose(&mut rng).unwrap()),
                title: Set(title),
                content: Set(content),
                status: Set(status),
                audience: Set(audience),
                created_at: Set(created_at),
                updated_at: Set(created_at),
                ..Default::default()
            };
            notice.insert(db).await?;
        }

        Ok(())
    }
}

/// Build a Markdown body with a short intro, action items, and a footer.
fn build_markdown(title: &str, ts: DateTime<Utc>, rng: &mut StdRng) -> String {
    let when = ts.format("%Y-%m-%d %H:%M").to_string();

    let intros = [
        "## Summary\nPlease read this note carefully and plan accordingly. It consolidates recent questions and the recommended next steps.",
        "## Heads-up\nThis notice covers scheduling and important reminders. If you are short on time, skim the list below and revisit later.",
        "## Overview\nBelow you will find the latest information, including timelines and links, laid out so it is easy to follow.",
    ];

    let bullets_pool = [
        "Review the updated schedule and confirm it works for your team.",
        "Check the dashboard for live status during the window.",
        "Save your work before the window starts.",
        "Report anything unusual through the usual support channel.",
        "Forward this to anyone on your team who is off rotation.",
        "Mark the dates in your calendar now rather than later.",
        "Expect brief interruptions while services restart.",
    ];

    let links = [
        "[Status page](https://status.example.com)",
        "[Support portal](https://support.example.com)",
        "[Documentation](https://docs.example.com)",
    ];

    let intro = intros.choose(rng).unwrap().to_string();

    let bullets_count = rng.gen_range(3..=5);
    let bullets = bullets_pool
        .choose_multiple(rng, bullets_count)
        .map(|s| format!("- {}", s))
        .collect::<Vec<_>>()
        .join("\n");

    let maybe_links = if rng.gen_bool(0.7) {
        let n = rng.gen_range(1..=links.len());
        links
            .choose_multiple(rng, n)
            .map(|l| format!("- {}", l))
            .collect::<Vec<_>>()
            .join("\n")
    } else {
        "- (none)".to_string()
    };

    format!(
        r#"{intro}

### Action Items
{bullets}

### Useful Links
{maybe_links}

_Posted as "{title}" at {when}._"#
    )
}
