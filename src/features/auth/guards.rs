//! Authorization guards for the HTML routes.
//!
//! The session middleware attaches an [`AuthenticatedUser`] to the request
//! when a valid session is presented; these extractors decide what to do when
//! it is missing or lacks the admin flag.
//!
//! - [`RequireUser`]: any signed-in user, otherwise redirect to the login page
//! - [`RequireAdmin`]: `is_admin == true`, otherwise 403 (or login redirect)
//! - [`MaybeUser`]: never rejects, for public pages that still show the user

use std::convert::Infallible;

use crate::core::error::{AppError, WebError};
use crate::features::auth::model::AuthenticatedUser;
use axum::{extract::FromRequestParts, http::request::Parts};

/// Guard for pages available to any signed-in user.
///
/// # Example
/// ```ignore
/// pub async fn handler(RequireUser(user): RequireUser) { ... }
/// ```
pub struct RequireUser(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for RequireUser
where
    S: Send + Sync,
{
    type Rejection = WebError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .map(RequireUser)
            .ok_or(WebError::Unauthenticated)
    }
}

/// Guard for catalog mutations.
///
/// # Example
/// ```ignore
/// pub async fn handler(RequireAdmin(user): RequireAdmin) { ... }
/// ```
pub struct RequireAdmin(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = WebError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .ok_or(WebError::Unauthenticated)?;

        if !user.is_admin {
            tracing::warn!(user_id = %user.id, uri = %parts.uri, "Non-admin denied");
            return Err(AppError::Forbidden("Admin access required".to_string()).into());
        }

        Ok(RequireAdmin(user.clone()))
    }
}

/// The signed-in user, if any
pub struct MaybeUser(pub Option<AuthenticatedUser>);

impl<S> FromRequestParts<S> for MaybeUser
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(MaybeUser(parts.extensions.get::<AuthenticatedUser>().cloned()))
    }
}
