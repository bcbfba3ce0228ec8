use axum::{Extension, Router, middleware};
use axum_helpers::{UploadDir, identity_middleware};
use domain_users::{InMemoryUserRepository, PgUserRepository, UserService, handlers};

/// Users router backed by Postgres when configured, in-memory otherwise.
///
/// Requests get the caller's email from `X-User-Email` and the configured
/// upload directory as typed extensions.
pub fn router(state: &crate::AppState) -> Router {
    let router = match &state.db {
        Some(db) => handlers::router(UserService::new(PgUserRepository::new(db.clone()))),
        None => handlers::router(UserService::new(InMemoryUserRepository::new())),
    };

    router
        .layer(middleware::from_fn(identity_middleware))
        .layer(Extension(UploadDir(state.config.uploads.dir.clone())))
}
