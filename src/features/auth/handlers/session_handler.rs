use std::sync::Arc;

use axum::{
    extract::State,
    http::header,
    response::{AppendHeaders, Html, IntoResponse, Redirect, Response},
    Form,
};
use minijinja::context;
use serde::Deserialize;

use crate::core::error::WebError;
use crate::features::auth::guards::MaybeUser;
use crate::features::auth::services::AuthService;
use crate::shared::constants::LOGIN_PATH;
use crate::shared::flash::{Flash, IncomingFlash};
use crate::shared::views;

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub token: String,
}

/// Sign-in page, target of every unauthenticated redirect
pub async fn login_page(
    MaybeUser(user): MaybeUser,
    flash: IncomingFlash,
) -> Result<Response, WebError> {
    if user.is_some() {
        return Ok(Redirect::to("/products").into_response());
    }

    let flash = flash.into_inner();
    let html = views::render("auth/login.html", context! { status => flash.status })?;
    Ok((IncomingFlash::clear(), Html(html)).into_response())
}

/// Exchange a session token for the session cookie
pub async fn login(
    State(service): State<Arc<AuthService>>,
    Form(form): Form<LoginForm>,
) -> Response {
    let token = form.token.trim();

    match service.authenticate(token).await {
        Ok(user) => {
            tracing::info!(user_id = %user.id, "User signed in");
            (
                AppendHeaders([(header::SET_COOKIE, service.sessions().session_cookie(token))]),
                Redirect::to("/products"),
            )
                .into_response()
        }
        Err(e) => {
            tracing::warn!(error = %e, "Rejected sign-in");
            Flash::status("Invalid or expired session token.").redirect(LOGIN_PATH)
        }
    }
}

/// End the session and go back to the sign-in page
pub async fn logout(State(service): State<Arc<AuthService>>) -> impl IntoResponse {
    (
        AppendHeaders([(
            header::SET_COOKIE,
            service.sessions().clear_session_cookie(),
        )]),
        Redirect::to(LOGIN_PATH),
    )
}
