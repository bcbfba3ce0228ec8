use crate::context::AuthenticatedEmail;
use axum::{extract::Request, middleware::Next, response::Response};

/// Header the API gateway uses to forward the authenticated caller.
pub const USER_EMAIL_HEADER: &str = "x-user-email";

/// Lifts [`USER_EMAIL_HEADER`] into an [`AuthenticatedEmail`] extension.
///
/// Token verification happens at the gateway; this layer only trusts what
/// the gateway forwarded. Blank or non-UTF-8 values are ignored, and an
/// extension inserted by an earlier layer is left untouched.
///
/// # Example
///
/// ```ignore
/// use axum::{Router, middleware};
/// use axum_helpers::middleware::identity_middleware;
///
/// let app = Router::new()
///     .nest("/user", users_router)
///     .layer(middleware::from_fn(identity_middleware));
/// ```
pub async fn identity_middleware(mut request: Request, next: Next) -> Response {
    if request.extensions().get::<AuthenticatedEmail>().is_none() {
        let email = request
            .headers()
            .get(USER_EMAIL_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string);

        if let Some(email) = email {
            tracing::debug!(%email, "Request carries authenticated email");
            request.extensions_mut().insert(AuthenticatedEmail(email));
        }
    }

    next.run(request).await
}
