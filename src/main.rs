use tera::Tera;
use tracing::*;

use blogly::config::{self, AppCfg};
use blogly::db::{self, SchemaAction};
use blogly::routes::{self, AppState};
use blogly::services::posts::PostServiceDb;
use blogly::services::users::UserServiceDb;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg = AppCfg::load()?;

    // initialize tracing
    config::tracing::init();

    if cfg.run_migrations {
        db::prepare_schema(&cfg.database_url, SchemaAction::Migrate).await?;
    }

    let pool = db::build_pool(&cfg)?;
    let user_svc = UserServiceDb::new(pool.clone());
    let post_svc = PostServiceDb::new(pool);

    let tera = Tera::new(&cfg.templates)?;

    let app = routes::router(AppState::new(user_svc, post_svc, tera), &cfg.static_dir);

    let listener = tokio::net::TcpListener::bind(&cfg.listen_addr).await?;
    info!("starting listening at {}", cfg.listen_addr);
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
