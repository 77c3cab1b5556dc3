use std::fmt::Debug;
use std::fmt::Display;

use axum::response::Html;
use axum::{http::StatusCode, response::IntoResponse};

use crate::models::ValidationError;
use crate::services::ServiceError;

pub struct AppError {
    pub inner: anyhow::Error,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self.inner.downcast_ref::<ServiceError>() {
            Some(ServiceError::NotFound { .. }) => StatusCode::NOT_FOUND,
            Some(ServiceError::Constraint(_)) => StatusCode::BAD_REQUEST,
            Some(_) => StatusCode::INTERNAL_SERVER_ERROR,
            None if self.inner.is::<ValidationError>() => StatusCode::BAD_REQUEST,
            None => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub fn error_page(status: StatusCode, message: &str) -> Html<String> {
    let reason = status.canonical_reason().unwrap_or("Error");
    Html(format!(
        "<!DOCTYPE html>\n<html><head><title>{code} {reason}</title>\
         <link rel=\"stylesheet\" href=\"/static/blogly.css\"></head>\
         <body><main class=\"error\"><h1>{code} {reason}</h1><p>{message}</p>\
         <p><a href=\"/users\">Back to users</a></p></main></body></html>",
        code = status.as_u16(),
        message = tera::escape_html(message),
    ))
}

// Tell axum how to convert `AppError` into a response.
impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        let message = if status.is_server_error() {
            tracing::error!(error = ?self.inner, "request failed");
            "Something went wrong.".to_owned()
        } else {
            self.inner.to_string()
        };
        (status, error_page(status, &message)).into_response()
    }
}

impl Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.inner, f)
    }
}

impl Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(&self.inner, f)
    }
}

// This enables using `?` on functions that return `Result<_, anyhow::Error>` to turn them into
// `Result<_, AppError>`. That way you don't need to do that manually.
impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self { inner: err.into() }
    }
}
