use axum::{
    extract::State,
    response::{Html, Redirect},
    routing::{get, post},
    Form, Router,
};

use crate::models::user::UserForm;
use crate::services::posts::PostService;
use crate::services::users::UserService;
use crate::AppError;

use super::extract::UserId;
use super::AppState;

type St<U, P> = State<AppState<U, P>>;

async fn list_users<U: UserService, P: PostService>(
    State(state): St<U, P>,
) -> Result<Html<String>, AppError> {
    let users = state.users.list_users().await?;

    let mut ctx = tera::Context::new();
    ctx.insert("users", &users);
    state.render("users/index.html", &ctx)
}

async fn new_user_form<U: UserService, P: PostService>(
    State(state): St<U, P>,
) -> Result<Html<String>, AppError> {
    state.render("users/new.html", &tera::Context::new())
}

async fn create_user<U: UserService, P: PostService>(
    State(state): St<U, P>,
    Form(form): Form<UserForm>,
) -> Result<Redirect, AppError> {
    let new_user = form.validate()?;
    state.users.create_user(&new_user).await?;
    Ok(Redirect::to("/users"))
}

async fn show_user<U: UserService, P: PostService>(
    State(state): St<U, P>,
    UserId(id): UserId,
) -> Result<Html<String>, AppError> {
    let user = state.users.get_user(id).await?;
    let posts = state.posts.posts_for_user(id).await?;

    let mut ctx = tera::Context::new();
    ctx.insert("user", &user);
    ctx.insert("posts", &posts);
    state.render("users/show.html", &ctx)
}

async fn edit_user_form<U: UserService, P: PostService>(
    State(state): St<U, P>,
    UserId(id): UserId,
) -> Result<Html<String>, AppError> {
    let user = state.users.get_user(id).await?;

    let mut ctx = tera::Context::new();
    ctx.insert("user", &user);
    state.render("users/edit.html", &ctx)
}

async fn update_user<U: UserService, P: PostService>(
    State(state): St<U, P>,
    UserId(id): UserId,
    Form(form): Form<UserForm>,
) -> Result<Redirect, AppError> {
    // a missing user is a 404 even when the form is also bad
    state.users.get_user(id).await?;
    let changes = form.validate()?;
    let user = state.users.update_user(id, &changes).await?;
    Ok(Redirect::to(&format!("/users/{}", user.id)))
}

async fn delete_user<U: UserService, P: PostService>(
    State(state): St<U, P>,
    UserId(id): UserId,
) -> Result<Redirect, AppError> {
    state.users.delete_user(id).await?;
    Ok(Redirect::to("/users"))
}

pub fn router<U: UserService, P: PostService>() -> Router<AppState<U, P>> {
    Router::new()
        .route("/users", get(list_users::<U, P>))
        .route("/users/new", get(new_user_form::<U, P>).post(create_user::<U, P>))
        .route("/users/:id", get(show_user::<U, P>))
        .route("/users/:id/edit", get(edit_user_form::<U, P>).post(update_user::<U, P>))
        .route("/users/:id/delete", post(delete_user::<U, P>))
}
