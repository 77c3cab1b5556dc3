use axum::{
    extract::State,
    response::{Html, Redirect},
    routing::{get, post},
    Form, Router,
};

use crate::models::post::{NewPost, PostForm};
use crate::services::posts::PostService;
use crate::services::users::UserService;
use crate::AppError;

use super::extract::{PostId, UserId};
use super::AppState;

type St<U, P> = State<AppState<U, P>>;

async fn new_post_form<U: UserService, P: PostService>(
    State(state): St<U, P>,
    UserId(user_id): UserId,
) -> Result<Html<String>, AppError> {
    let user = state.users.get_user(user_id).await?;

    let mut ctx = tera::Context::new();
    ctx.insert("user", &user);
    state.render("posts/new.html", &ctx)
}

async fn create_post<U: UserService, P: PostService>(
    State(state): St<U, P>,
    UserId(user_id): UserId,
    Form(form): Form<PostForm>,
) -> Result<Redirect, AppError> {
    // 404 for a missing owner takes precedence over a bad form
    let user = state.users.get_user(user_id).await?;
    let post = NewPost::new(user.id, form.validate()?);
    state.posts.create_post(&post).await?;
    Ok(Redirect::to(&format!("/users/{}", user.id)))
}

async fn show_post<U: UserService, P: PostService>(
    State(state): St<U, P>,
    PostId(id): PostId,
) -> Result<Html<String>, AppError> {
    let post = state.posts.get_post(id).await?;

    let mut ctx = tera::Context::new();
    if let Some(owner) = post.user_id {
        ctx.insert("user", &state.users.get_user(owner).await?);
    }
    ctx.insert("post", &post);
    state.render("posts/show.html", &ctx)
}

async fn edit_post_form<U: UserService, P: PostService>(
    State(state): St<U, P>,
    PostId(id): PostId,
) -> Result<Html<String>, AppError> {
    let post = state.posts.get_post(id).await?;

    let mut ctx = tera::Context::new();
    ctx.insert("post", &post);
    state.render("posts/edit.html", &ctx)
}

async fn update_post<U: UserService, P: PostService>(
    State(state): St<U, P>,
    PostId(id): PostId,
    Form(form): Form<PostForm>,
) -> Result<Redirect, AppError> {
    state.posts.get_post(id).await?;
    let changes = form.validate()?;
    let post = state.posts.update_post(id, &changes).await?;
    Ok(Redirect::to(&format!("/posts/{}", post.id)))
}

async fn delete_post<U: UserService, P: PostService>(
    State(state): St<U, P>,
    PostId(id): PostId,
) -> Result<Redirect, AppError> {
    let post = state.posts.delete_post(id).await?;
    let back = match post.user_id {
        Some(owner) => format!("/users/{owner}"),
        None => "/users".to_owned(),
    };
    Ok(Redirect::to(&back))
}

pub fn router<U: UserService, P: PostService>() -> Router<AppState<U, P>> {
    Router::new()
        .route("/users/:id/posts/new", get(new_post_form::<U, P>).post(create_post::<U, P>))
        .route("/posts/:id", get(show_post::<U, P>))
        .route("/posts/:id/edit", get(edit_post_form::<U, P>).post(update_post::<U, P>))
        .route("/posts/:id/delete", post(delete_post::<U, P>))
}
