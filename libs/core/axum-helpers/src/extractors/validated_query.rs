//! Query string extractor with automatic validation.

use crate::envelope::error_response;
use axum::{
    extract::{FromRequestParts, Query},
    http::{StatusCode, request::Parts},
    response::Response,
};
use serde::de::DeserializeOwned;
use validator::Validate;

/// Query extractor that answers every rejection with a `400` error
/// [`Envelope`](crate::envelope::Envelope).
///
/// Covers unparsable query strings (duplicate keys, bad percent-encoding,
/// wrong types) as well as failed `Validate` checks.
pub struct ValidatedQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(data) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| {
                tracing::debug!(error = %e.body_text(), "Rejected query string");
                error_response(StatusCode::BAD_REQUEST)
            })?;

        data.validate().map_err(|e| {
            tracing::debug!(error = %e, "Query string failed validation");
            error_response(StatusCode::BAD_REQUEST)
        })?;

        Ok(ValidatedQuery(data))
    }
}
