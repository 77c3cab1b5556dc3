use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use super::validation::{required, ValidationError};

const TEXT_MIN: usize = 2;
const TITLE_MAX: usize = 100;

#[derive(Deserialize, Debug, Default)]
pub struct PostForm {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

impl PostForm {
    pub fn validate(self) -> Result<PostChanges, ValidationError> {
        Ok(PostChanges {
            title: required("title", self.title, TEXT_MIN, Some(TITLE_MAX))?,
            content: required("content", self.content, TEXT_MIN, None)?,
        })
    }
}

/// Title and content, the only user-editable columns of a post.
#[derive(Debug, Clone, PartialEq, Eq, AsChangeset)]
#[diesel(table_name = crate::schema::posts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PostChanges {
    pub title: String,
    pub content: String,
}

// `created_at` is left to the column default so every row gets its own insert time
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = crate::schema::posts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub user_id: i32,
}

impl NewPost {
    pub fn new(user_id: i32, changes: PostChanges) -> Self {
        Self {
            title: changes.title,
            content: changes.content,
            user_id,
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq, Queryable, Selectable, Identifiable)]
#[diesel(table_name = crate::schema::posts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Post {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub user_id: Option<i32>,
}
