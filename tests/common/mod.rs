#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::async_trait;
use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use axum::Router;
use chrono::Utc;
use tera::Tera;
use tower::ServiceExt;

use blogly::config::AppCfg;
use blogly::models::post::{NewPost, Post, PostChanges};
use blogly::models::user::{NewUser, User};
use blogly::routes::{self, AppState};
use blogly::services::posts::PostService;
use blogly::services::users::UserService;
use blogly::services::{ServiceError, ServiceResult, Svc};

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    posts: Vec<Post>,
    next_user: i32,
    next_post: i32,
}

/// Both service traits over plain vectors, mirroring the Postgres schema's behaviour.
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl Svc for MemoryStore {}

impl MemoryStore {
    fn with<T>(&self, f: impl FnOnce(&mut Tables) -> T) -> T {
        let mut tables = self.tables.lock().unwrap();
        f(&mut tables)
    }

    pub fn post_count(&self) -> usize {
        self.with(|t| t.posts.len())
    }
}

#[async_trait]
impl UserService for MemoryStore {
    async fn list_users(&self) -> ServiceResult<Vec<User>> {
        let mut users = self.with(|t| t.users.clone());
        users.sort_by(|a, b| {
            (&a.last_name, &a.first_name, a.id).cmp(&(&b.last_name, &b.first_name, b.id))
        });
        Ok(users)
    }

    async fn get_user(&self, id: i32) -> ServiceResult<User> {
        self.with(|t| t.users.iter().find(|u| u.id == id).cloned())
            .ok_or_else(|| ServiceError::user_not_found(id))
    }

    async fn create_user(&self, user: &NewUser) -> ServiceResult<User> {
        Ok(self.with(|t| {
            t.next_user += 1;
            let user = User {
                id: t.next_user,
                first_name: user.first_name.clone(),
                last_name: user.last_name.clone(),
                image_url: user.image_url.clone(),
            };
            t.users.push(user.clone());
            user
        }))
    }

    async fn update_user(&self, id: i32, changes: &NewUser) -> ServiceResult<User> {
        self.with(|t| {
            let user = t.users.iter_mut().find(|u| u.id == id)?;
            user.first_name = changes.first_name.clone();
            user.last_name = changes.last_name.clone();
            user.image_url = changes.image_url.clone();
            Some(user.clone())
        })
        .ok_or_else(|| ServiceError::user_not_found(id))
    }

    async fn delete_user(&self, id: i32) -> ServiceResult<User> {
        self.with(|t| {
            let idx = t.users.iter().position(|u| u.id == id)?;
            t.posts.retain(|p| p.user_id != Some(id));
            Some(t.users.remove(idx))
        })
        .ok_or_else(|| ServiceError::user_not_found(id))
    }
}

#[async_trait]
impl PostService for MemoryStore {
    async fn posts_for_user(&self, user_id: i32) -> ServiceResult<Vec<Post>> {
        Ok(self.with(|t| {
            t.posts
                .iter()
                .rev()
                .filter(|p| p.user_id == Some(user_id))
                .cloned()
                .collect()
        }))
    }

    async fn get_post(&self, id: i32) -> ServiceResult<Post> {
        self.with(|t| t.posts.iter().find(|p| p.id == id).cloned())
            .ok_or_else(|| ServiceError::post_not_found(id))
    }

    async fn create_post(&self, post: &NewPost) -> ServiceResult<Post> {
        self.with(|t| {
            t.users.iter().find(|u| u.id == post.user_id)?;
            t.next_post += 1;
            let post = Post {
                id: t.next_post,
                title: post.title.clone(),
                content: post.content.clone(),
                created_at: Utc::now(),
                user_id: Some(post.user_id),
            };
            t.posts.push(post.clone());
            Some(post)
        })
        .ok_or_else(|| ServiceError::user_not_found(post.user_id))
    }

    async fn update_post(&self, id: i32, changes: &PostChanges) -> ServiceResult<Post> {
        self.with(|t| {
            let post = t.posts.iter_mut().find(|p| p.id == id)?;
            post.title = changes.title.clone();
            post.content = changes.content.clone();
            Some(post.clone())
        })
        .ok_or_else(|| ServiceError::post_not_found(id))
    }

    async fn delete_post(&self, id: i32) -> ServiceResult<Post> {
        self.with(|t| {
            let idx = t.posts.iter().position(|p| p.id == id)?;
            Some(t.posts.remove(idx))
        })
        .ok_or_else(|| ServiceError::post_not_found(id))
    }
}

pub struct TestApp {
    pub store: MemoryStore,
    router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        let cfg = AppCfg::default();
        let store = MemoryStore::default();
        let tera = Tera::new(&cfg.templates).expect("templates parse");
        let router = routes::router(
            AppState::new(store.clone(), store.clone(), tera),
            &cfg.static_dir,
        );
        Self { store, router }
    }

    pub async fn get(&self, uri: &str) -> Response<Body> {
        self.send(Request::get(uri).body(Body::empty()).unwrap()).await
    }

    pub async fn post_form(&self, uri: &str, form: &[(&str, &str)]) -> Response<Body> {
        let body = form
            .iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        let req = Request::post(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap();
        self.send(req).await
    }

    pub async fn send(&self, req: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(req).await.unwrap()
    }

    pub async fn create_user(&self, first: &str, last: &str) -> User {
        self.store
            .create_user(&NewUser::new(first, last, None))
            .await
            .unwrap()
    }

    pub async fn create_post(&self, user_id: i32, title: &str, content: &str) -> Post {
        let changes = PostChanges {
            title: title.into(),
            content: content.into(),
        };
        self.store
            .create_post(&NewPost::new(user_id, changes))
            .await
            .unwrap()
    }
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub fn location(response: &Response<Body>) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

pub fn assert_redirect(response: &Response<Body>, to: &str) {
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(response), to);
}
