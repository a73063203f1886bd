//! One-shot data carried across a redirect in a cookie.
//!
//! A form action that fails validation redirects back to the form with the
//! error bag and the submitted input; a successful action redirects to the
//! listing with a status line. The page that renders the flash clears it.

use std::collections::BTreeMap;
use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
    response::{AppendHeaders, IntoResponse, Redirect, Response},
};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use serde::{Deserialize, Serialize};

use crate::shared::constants::FLASH_COOKIE;
use crate::shared::cookies::{clear_cookie, read_cookie, set_cookie};
use crate::shared::types::FieldErrors;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Flash {
    #[serde(default)]
    pub errors: FieldErrors,
    #[serde(default)]
    pub old: BTreeMap<String, String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl Flash {
    pub fn status(message: impl Into<String>) -> Self {
        Self {
            status: Some(message.into()),
            ..Default::default()
        }
    }

    pub fn invalid(errors: FieldErrors, old: BTreeMap<String, String>) -> Self {
        Self {
            errors,
            old,
            status: None,
        }
    }

    pub fn encode(&self) -> String {
        let json = serde_json::to_vec(self).unwrap_or_default();
        URL_SAFE_NO_PAD.encode(json)
    }

    pub fn decode(raw: &str) -> Option<Self> {
        let bytes = URL_SAFE_NO_PAD.decode(raw).ok()?;
        serde_json::from_slice(&bytes).ok()
    }

    /// Redirect to `to`, carrying this flash
    pub fn redirect(self, to: &str) -> Response {
        (
            AppendHeaders([(
                header::SET_COOKIE,
                set_cookie(FLASH_COOKIE, &self.encode(), None, false),
            )]),
            Redirect::to(to),
        )
            .into_response()
    }
}

/// Flash attached to the incoming request, if any.
///
/// Handlers that read it must send [`IncomingFlash::clear`] with the response.
#[derive(Debug, Clone, Default)]
pub struct IncomingFlash(pub Option<Flash>);

impl IncomingFlash {
    pub fn clear() -> AppendHeaders<[(header::HeaderName, header::HeaderValue); 1]> {
        AppendHeaders([(header::SET_COOKIE, clear_cookie(FLASH_COOKIE))])
    }

    pub fn into_inner(self) -> Flash {
        self.0.unwrap_or_default()
    }
}

impl<S> FromRequestParts<S> for IncomingFlash
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let flash = read_cookie(&parts.headers, FLASH_COOKIE)
            .filter(|raw| !raw.is_empty())
            .and_then(|raw| Flash::decode(&raw));
        Ok(IncomingFlash(flash))
    }
}
