pub mod tracing;

use figment::providers::{Env, Format, Json, Serialized};
use figment::Figment;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppCfg {
    pub database_url: String,
    pub listen_addr: String,
    pub pool_size: usize,
    /// Glob handed to tera.
    pub templates: String,
    pub static_dir: String,
    pub run_migrations: bool,
}

impl Default for AppCfg {
    fn default() -> Self {
        Self {
            database_url: "postgres://localhost/blogly".into(),
            listen_addr: "0.0.0.0:3000".into(),
            pool_size: 10,
            templates: concat!(env!("CARGO_MANIFEST_DIR"), "/templates/**/*").into(),
            static_dir: concat!(env!("CARGO_MANIFEST_DIR"), "/static").into(),
            run_migrations: true,
        }
    }
}

impl AppCfg {
    /// Defaults, then `appsettings.json`, then `APP_*` variables, then `DATABASE_URL`.
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(AppCfg::default()))
            .merge(Json::file("appsettings.json"))
            .merge(Env::prefixed("APP_"))
            .merge(Env::raw().only(&["DATABASE_URL"]))
    }

    pub fn load() -> Result<Self, figment::Error> {
        Self::figment().extract()
    }
}
