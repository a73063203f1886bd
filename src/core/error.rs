use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Json,
};
use minijinja::context;
use thiserror::Error;

use crate::shared::constants::LOGIN_PATH;
use crate::shared::flash::Flash;
use crate::shared::types::{ErrorResponse, FieldErrors};
use crate::shared::validation::summary_message;
use crate::shared::views::{self, TemplateError};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {}", summary_message(.0))]
    Validation(FieldErrors),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Template error: {0}")]
    Template(#[from] TemplateError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::Database(ref e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new("Database error occurred"),
                )
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, ErrorResponse::new(msg)),
            AppError::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorResponse::with_errors(summary_message(&errors), errors),
            ),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ErrorResponse::new(msg)),
            AppError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new("Internal server error"),
                )
            }
            AppError::Template(ref e) => {
                tracing::error!("Template error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new("Internal server error"),
                )
            }
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, ErrorResponse::new(msg)),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, ErrorResponse::new(msg)),
        };

        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

/// Error type of the HTML handlers.
///
/// Authentication failures become a redirect to the login page, validation
/// failures a redirect back to the form with a flash, everything else an
/// HTML status page.
#[derive(Debug, Error)]
pub enum WebError {
    #[error("Authentication required")]
    Unauthenticated,

    #[error("Invalid input, redirecting to {back}")]
    Invalid { back: String, flash: Flash },

    #[error(transparent)]
    App(#[from] AppError),
}

impl From<TemplateError> for WebError {
    fn from(e: TemplateError) -> Self {
        WebError::App(AppError::Template(e))
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        match self {
            WebError::Unauthenticated => Redirect::to(LOGIN_PATH).into_response(),
            WebError::Invalid { back, flash } => flash.redirect(&back),
            WebError::App(AppError::Unauthorized(_)) => Redirect::to(LOGIN_PATH).into_response(),
            WebError::App(AppError::NotFound(msg)) => {
                status_page(StatusCode::NOT_FOUND, "Not Found", &msg)
            }
            WebError::App(AppError::Forbidden(msg)) => {
                status_page(StatusCode::FORBIDDEN, "Forbidden", &msg)
            }
            WebError::App(AppError::BadRequest(msg)) => {
                status_page(StatusCode::BAD_REQUEST, "Bad Request", &msg)
            }
            WebError::App(AppError::Validation(errors)) => status_page(
                StatusCode::UNPROCESSABLE_ENTITY,
                "Unprocessable Content",
                &summary_message(&errors),
            ),
            WebError::App(e) => {
                tracing::error!("Request failed: {}", e);
                status_page(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Server Error",
                    "Something went wrong on our side.",
                )
            }
        }
    }
}

/// Render `errors/status.html`, falling back to plain text
fn status_page(status: StatusCode, title: &str, message: &str) -> Response {
    match views::render(
        "errors/status.html",
        context! { status => status.as_u16(), title => title, message => message },
    ) {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => {
            tracing::error!("Failed to render status page: {}", e);
            (status, format!("{} {}", status.as_u16(), title)).into_response()
        }
    }
}
