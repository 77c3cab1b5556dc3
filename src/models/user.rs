use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use super::validation::{required, ValidationError};

pub const DEFAULT_IMAGE_URL: &str =
    "https://i.pinimg.com/550x/18/b9/ff/18b9ffb2a8a791d50213a9d595c4dd52.jpg";

const NAME_MIN: usize = 2;
const NAME_MAX: usize = 50;

// the input to the `create_user` and `edit_user` handlers
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct UserForm {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl UserForm {
    pub fn validate(self) -> Result<NewUser, ValidationError> {
        Ok(NewUser {
            first_name: required("first name", self.first_name, NAME_MIN, Some(NAME_MAX))?,
            last_name: required("last name", self.last_name, NAME_MIN, Some(NAME_MAX))?,
            image_url: image_url_or_default(self.image_url),
        })
    }
}

fn image_url_or_default(url: Option<String>) -> String {
    match url {
        Some(url) if !url.trim().is_empty() => url.trim().to_owned(),
        _ => DEFAULT_IMAGE_URL.to_owned(),
    }
}

// also used as the changeset on edit: every column is overwritten
#[derive(Debug, Clone, PartialEq, Eq, Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub image_url: String,
}

impl NewUser {
    pub fn new(first_name: &str, last_name: &str, image_url: Option<&str>) -> Self {
        Self {
            first_name: first_name.to_owned(),
            last_name: last_name.to_owned(),
            image_url: image_url_or_default(image_url.map(str::to_owned)),
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq, Queryable, Selectable, Identifiable)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub image_url: String,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
