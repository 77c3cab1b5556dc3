mod extract;
pub mod posts;
pub mod users;

use std::sync::Arc;

use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Redirect};
use axum::routing::get;
use axum::Router;
use tera::Tera;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::error::{error_page, AppError};
use crate::middleware::logging::HttpLoggingExt;
use crate::services::posts::PostService;
use crate::services::users::UserService;

/// Storage context plus templates, cloned into every handler.
#[derive(Clone)]
pub struct AppState<U, P> {
    pub users: U,
    pub posts: P,
    pub tera: Arc<Tera>,
}

impl<U, P> AppState<U, P> {
    pub fn new(users: U, posts: P, tera: Tera) -> Self {
        Self {
            users,
            posts,
            tera: Arc::new(tera),
        }
    }

    pub(crate) fn render(&self, template: &str, ctx: &tera::Context) -> Result<Html<String>, AppError> {
        Ok(Html(self.tera.render(template, ctx)?))
    }
}

async fn home() -> Redirect {
    Redirect::to("/users")
}

async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, error_page(StatusCode::NOT_FOUND, "No such page."))
}

pub fn router<U: UserService, P: PostService>(state: AppState<U, P>, static_dir: &str) -> Router {
    Router::new()
        .route("/", get(home))
        .merge(users::router::<U, P>())
        .merge(posts::router::<U, P>())
        .nest_service(
            "/static",
            ServiceBuilder::new()
                .layer(SetResponseHeaderLayer::if_not_present(
                    header::CACHE_CONTROL,
                    header::HeaderValue::from_static("max-age=13420"),
                ))
                .layer(CompressionLayer::new())
                .service(ServeDir::new(static_dir)),
        )
        .fallback(not_found)
        .with_state(state)
        .with_http_logging()
}
