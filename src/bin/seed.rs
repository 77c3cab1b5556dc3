//! Drops and recreates the schema, then fills it with sample rows.

use blogly::config::{self, AppCfg};
use blogly::db::{self, SchemaAction};
use blogly::models::post::{NewPost, PostChanges};
use blogly::models::user::NewUser;
use blogly::services::posts::{PostService, PostServiceDb};
use blogly::services::users::{UserService, UserServiceDb};
use tracing::info;

const SAMPLE_POSTS: &[(usize, &str, &str)] = &[
    (0, "First Post!", "Oh, hai."),
    (0, "Yet Another Post", "Still here, still typing."),
    (1, "Gardening Notes", "The tomatoes are finally red."),
    (2, "Nap Report", "Slept on the keyboard for three hours."),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg = AppCfg::load()?;
    config::tracing::init();

    db::prepare_schema(&cfg.database_url, SchemaAction::Reset).await?;

    let pool = db::build_pool(&cfg)?;
    let users = UserServiceDb::new(pool.clone());
    let posts = PostServiceDb::new(pool);

    let mut created = Vec::new();
    for (first, last) in [("Whiskey", "Ginger"), ("Bowser", "John"), ("Spike", "Rana")] {
        created.push(users.create_user(&NewUser::new(first, last, None)).await?);
    }

    for &(owner, title, content) in SAMPLE_POSTS {
        let changes = PostChanges {
            title: title.to_owned(),
            content: content.to_owned(),
        };
        posts.create_post(&NewPost::new(created[owner].id, changes)).await?;
    }

    info!(users = created.len(), posts = SAMPLE_POSTS.len(), "Seeded database");
    Ok(())
}
