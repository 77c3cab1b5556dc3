use axum::async_trait;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel::query_builder::QueryFragment;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel_async::methods::LoadQuery;
use diesel_async::{AsyncPgConnection, RunQueryDsl};

use crate::models::post::*;
use crate::schema;

use super::{sql, Pool, ServiceError, ServiceResult, Svc};

/// Posts owned by `owner`, newest first.
fn posts_of(owner: i32) -> impl LoadQuery<'static, AsyncPgConnection, Post> + QueryFragment<Pg> + Send {
    use schema::posts::dsl::*;

    posts
        .filter(user_id.eq(owner))
        .order((created_at.desc(), id.desc()))
        .select(Post::as_select())
}

#[async_trait]
pub trait PostService: Svc {
    /// Newest first.
    async fn posts_for_user(&self, user_id: i32) -> ServiceResult<Vec<Post>>;
    async fn get_post(&self, id: i32) -> ServiceResult<Post>;
    /// Fails with `NotFound` when `user_id` does not exist.
    async fn create_post(&self, post: &NewPost) -> ServiceResult<Post>;
    async fn update_post(&self, id: i32, changes: &PostChanges) -> ServiceResult<Post>;
    /// Returns the removed row so callers can find its owner.
    async fn delete_post(&self, id: i32) -> ServiceResult<Post>;
}

#[derive(Clone)]
pub struct PostServiceDb {
    db: Pool,
}

impl Svc for PostServiceDb {}

#[async_trait]
impl PostService for PostServiceDb {
    #[tracing::instrument(skip(self))]
    async fn posts_for_user(&self, owner: i32) -> ServiceResult<Vec<Post>> {
        let query = posts_of(owner);
        tracing::debug!(sql = %sql(&query));

        let mut conn = self.db.get().await?;
        let ps: Vec<Post> = query.load(&mut conn).await?;
        Ok(ps)
    }

    #[tracing::instrument(skip(self))]
    async fn get_post(&self, post_id: i32) -> ServiceResult<Post> {
        use schema::posts::dsl::*;

        let query = posts.find(post_id).select(Post::as_select());
        tracing::debug!(sql = %sql(&query));

        let mut conn = self.db.get().await?;
        query
            .first(&mut conn)
            .await
            .optional()?
            .ok_or_else(|| ServiceError::post_not_found(post_id))
    }

    #[tracing::instrument(skip_all, fields(user_id = p.user_id))]
    async fn create_post(&self, p: &NewPost) -> ServiceResult<Post> {
        use schema::posts::dsl::*;

        let mut conn = self.db.get().await?;
        let post = diesel::insert_into(posts)
            .values(p)
            .returning(Post::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|e| match e {
                DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                    ServiceError::user_not_found(p.user_id)
                }
                e => e.into(),
            })?;

        tracing::info!(post_id = post.id, "created post");
        Ok(post)
    }

    #[tracing::instrument(skip(self, changes))]
    async fn update_post(&self, post_id: i32, changes: &PostChanges) -> ServiceResult<Post> {
        use schema::posts::dsl::*;

        let mut conn = self.db.get().await?;
        diesel::update(posts.find(post_id))
            .set(changes)
            .returning(Post::as_returning())
            .get_result(&mut conn)
            .await
            .optional()?
            .ok_or_else(|| ServiceError::post_not_found(post_id))
    }

    #[tracing::instrument(skip(self))]
    async fn delete_post(&self, post_id: i32) -> ServiceResult<Post> {
        use schema::posts::dsl::*;

        let mut conn = self.db.get().await?;
        let post = diesel::delete(posts.find(post_id))
            .returning(Post::as_returning())
            .get_result(&mut conn)
            .await
            .optional()?
            .ok_or_else(|| ServiceError::post_not_found(post_id))?;

        tracing::info!(post_id, "deleted post");
        Ok(post)
    }
}

impl PostServiceDb {
    pub fn new(db: Pool) -> Self {
        Self { db }
    }
}
