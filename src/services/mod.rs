pub mod posts;
pub mod users;

use std::fmt::Display;

use diesel::debug_query;
use diesel::pg::Pg;
use diesel::query_builder::QueryFragment;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel_async::pooled_connection::deadpool;
use diesel_async::AsyncPgConnection;
use thiserror::Error;

pub type Pool = deadpool::Pool<AsyncPgConnection>;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Marker for something that can be handed to the router as state.
pub trait Svc: Clone + Send + Sync + 'static {}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{resource} {id} not found")]
    NotFound { resource: &'static str, id: String },

    /// A check constraint rejected the row.
    #[error("rejected by the database: {0}")]
    Constraint(String),

    #[error("database pool error: {0}")]
    Pool(#[from] deadpool::PoolError),

    #[error("database error: {0}")]
    Query(DieselError),
}

impl ServiceError {
    /// `id` is whatever the caller was handed, parsed or not.
    pub fn user_not_found(id: impl Display) -> Self {
        Self::NotFound {
            resource: "user",
            id: id.to_string(),
        }
    }

    pub fn post_not_found(id: impl Display) -> Self {
        Self::NotFound {
            resource: "post",
            id: id.to_string(),
        }
    }
}

impl From<DieselError> for ServiceError {
    fn from(e: DieselError) -> Self {
        match e {
            DieselError::DatabaseError(DatabaseErrorKind::CheckViolation, info) => {
                Self::Constraint(info.message().to_owned())
            }
            e => Self::Query(e),
        }
    }
}

/// Rendered SQL with bind values, for statement-level debug logs.
pub(crate) fn sql<Q: QueryFragment<Pg>>(query: &Q) -> String {
    debug_query::<Pg, _>(query).to_string()
}
