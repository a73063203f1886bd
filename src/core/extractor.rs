use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;

use crate::core::error::AppError;

/// JSON body extractor for the catalog API.
///
/// Body rejections become a 400 `ErrorResponse` like every other API error,
/// instead of axum's plain-text rejection. Field-level problems are left to
/// the DTO's validation (422).
pub struct AppJson<T>(pub T);

impl<T, S> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        Json::<T>::from_request(req, state)
            .await
            .map(|Json(value)| AppJson(value))
            .map_err(body_error)
    }
}

fn body_error(rejection: JsonRejection) -> AppError {
    tracing::debug!(error = %rejection.body_text(), "Rejected API request body");

    let message = match rejection {
        JsonRejection::MissingJsonContentType(_) => {
            "Request body must be sent as application/json".to_string()
        }
        JsonRejection::JsonSyntaxError(err) => format!("Request body is not valid JSON: {}", err),
        JsonRejection::JsonDataError(err) => format!("Request body has the wrong shape: {}", err),
        _ => "Request body could not be read".to_string(),
    };

    AppError::BadRequest(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::header};
    use serde_json::Value;

    async fn extract(content_type: Option<&str>, body: &'static str) -> Result<Value, AppError> {
        let mut builder = Request::builder().method("POST").uri("/api/products");
        if let Some(content_type) = content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }
        let req = builder.body(Body::from(body)).unwrap();
        AppJson::<Value>::from_request(req, &()).await.map(|AppJson(v)| v)
    }

    #[tokio::test]
    async fn test_valid_body() {
        let value = extract(Some("application/json"), r#"{"name":"Product 1"}"#)
            .await
            .unwrap();
        assert_eq!(value["name"], "Product 1");
    }

    #[tokio::test]
    async fn test_missing_content_type_is_bad_request() {
        match extract(None, r#"{"name":"Product 1"}"#).await {
            Err(AppError::BadRequest(msg)) => assert!(msg.contains("application/json")),
            other => panic!("expected bad request, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn test_syntax_error_is_bad_request() {
        match extract(Some("application/json"), r#"{"name": "#).await {
            Err(AppError::BadRequest(msg)) => {
                assert!(msg.starts_with("Request body is not valid JSON"))
            }
            other => panic!("expected bad request, got {:?}", other.map(|_| ())),
        }
    }
}
