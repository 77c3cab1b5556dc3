use axum::async_trait;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel::query_builder::QueryFragment;
use diesel_async::methods::LoadQuery;
use diesel_async::{AsyncPgConnection, RunQueryDsl};

use crate::models::user::*;
use crate::schema;

use super::{sql, Pool, ServiceError, ServiceResult, Svc};

/// Every user, in listing order.
fn all_users() -> impl LoadQuery<'static, AsyncPgConnection, User> + QueryFragment<Pg> + Send {
    use schema::users::dsl::*;

    users
        .order((last_name, first_name, id))
        .select(User::as_select())
}

#[async_trait]
pub trait UserService: Svc {
    async fn list_users(&self) -> ServiceResult<Vec<User>>;
    async fn get_user(&self, id: i32) -> ServiceResult<User>;
    async fn create_user(&self, user: &NewUser) -> ServiceResult<User>;
    /// Overwrites every field of the user.
    async fn update_user(&self, id: i32, user: &NewUser) -> ServiceResult<User>;
    /// Removes the user along with any posts they own.
    async fn delete_user(&self, id: i32) -> ServiceResult<User>;
}

#[derive(Clone)]
pub struct UserServiceDb {
    db: Pool,
}

impl Svc for UserServiceDb {}

#[async_trait]
impl UserService for UserServiceDb {
    #[tracing::instrument(skip_all)]
    async fn list_users(&self) -> ServiceResult<Vec<User>> {
        let query = all_users();
        tracing::debug!(sql = %sql(&query));

        let mut conn = self.db.get().await?;
        let us: Vec<User> = query.load(&mut conn).await?;
        Ok(us)
    }

    #[tracing::instrument(skip(self))]
    async fn get_user(&self, user_id: i32) -> ServiceResult<User> {
        use schema::users::dsl::*;

        let query = users.find(user_id).select(User::as_select());
        tracing::debug!(sql = %sql(&query));

        let mut conn = self.db.get().await?;
        query
            .first(&mut conn)
            .await
            .optional()?
            .ok_or_else(|| ServiceError::user_not_found(user_id))
    }

    #[tracing::instrument(skip_all)]
    async fn create_user(&self, u: &NewUser) -> ServiceResult<User> {
        use schema::users::dsl::*;

        let mut conn = self.db.get().await?;

        let user = diesel::insert_into(users)
            .values(u)
            .returning(User::as_returning())
            .get_result(&mut conn)
            .await?;

        tracing::info!(user_id = user.id, "created user");
        Ok(user)
    }

    #[tracing::instrument(skip(self, u))]
    async fn update_user(&self, user_id: i32, u: &NewUser) -> ServiceResult<User> {
        use schema::users::dsl::*;

        let mut conn = self.db.get().await?;
        diesel::update(users.find(user_id))
            .set(u)
            .returning(User::as_returning())
            .get_result(&mut conn)
            .await
            .optional()?
            .ok_or_else(|| ServiceError::user_not_found(user_id))
    }

    #[tracing::instrument(skip(self))]
    async fn delete_user(&self, user_id: i32) -> ServiceResult<User> {
        use schema::users::dsl::*;

        let mut conn = self.db.get().await?;
        // posts go with it through the ON DELETE CASCADE foreign key
        let user = diesel::delete(users.find(user_id))
            .returning(User::as_returning())
            .get_result(&mut conn)
            .await
            .optional()?
            .ok_or_else(|| ServiceError::user_not_found(user_id))?;

        tracing::info!(user_id, "deleted user");
        Ok(user)
    }
}

impl UserServiceDb {
    pub fn new(db: Pool) -> Self {
        Self { db }
    }
}
