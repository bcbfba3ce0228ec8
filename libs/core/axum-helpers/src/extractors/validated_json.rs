//! JSON extractor with automatic validation using the validator crate.

use crate::envelope::error_response;
use axum::{
    extract::{FromRequest, Json, Request},
    http::StatusCode,
    response::Response,
};
use serde::de::DeserializeOwned;
use validator::Validate;

/// JSON extractor with automatic validation.
///
/// Malformed bodies and failed `Validate` checks are both rejected with a
/// `400` error [`Envelope`](crate::envelope::Envelope); the reason goes to
/// the log.
///
/// # Example
/// ```ignore
/// use axum_helpers::ValidatedJson;
/// use serde::Deserialize;
/// use validator::Validate;
///
/// #[derive(Deserialize, Validate)]
/// struct NewListing {
///     #[validate(length(min = 1))]
///     title: String,
/// }
///
/// async fn add(ValidatedJson(listing): ValidatedJson<NewListing>) -> String {
///     listing.title
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state).await.map_err(|e| {
            tracing::debug!(error = %e.body_text(), "Rejected request body");
            error_response(StatusCode::BAD_REQUEST)
        })?;

        data.validate().map_err(|e| {
            tracing::debug!(error = %e, "Request body failed validation");
            error_response(StatusCode::BAD_REQUEST)
        })?;

        Ok(ValidatedJson(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelope::Envelope;
    use axum::{Router, body::Body, http::Request as HttpRequest, routing::post};
    use http_body_util::BodyExt;
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Deserialize, Validate)]
    struct Payload {
        #[validate(length(min = 1))]
        name: String,
    }

    fn app() -> Router {
        Router::new().route(
            "/",
            post(|ValidatedJson(payload): ValidatedJson<Payload>| async move { payload.name }),
        )
    }

    async fn send(body: &str) -> axum::response::Response {
        app()
            .oneshot(
                HttpRequest::builder()
                    .method("POST")
                    .uri("/")
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_valid_body_passes() {
        let response = send(r#"{"name":"villa"}"#).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_invalid_body_returns_error_envelope() {
        let response = send(r#"{"name":""}"#).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let envelope: Envelope<serde_json::Value> = serde_json::from_slice(&bytes).unwrap();
        assert!(envelope.is_error);
        assert_eq!(envelope.code, 400);
        assert!(envelope.data.is_none());
    }

    #[tokio::test]
    async fn test_malformed_json_returns_error_envelope() {
        let response = send("{not json").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
