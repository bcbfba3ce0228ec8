use axum::{
    Router,
    extract::State,
    http::StatusCode,
    routing::get,
};
use axum_helpers::{Envelope, RequestContext, ValidatedJson, ValidatedQuery};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::{IntoParams, OpenApi};
use validator::Validate;

use crate::error::{UserError, UserResult};
use crate::models::{Role, UpdateUser, User, Users};
use crate::repository::UserRepository;
use crate::service::UserService;

const TAG: &str = "users";

/// OpenAPI documentation for the Users API
#[derive(OpenApi)]
#[openapi(
    paths(get_all, add, update, delete),
    components(schemas(User, UpdateUser, Role)),
    tags(
        (name = TAG, description = "User management endpoints")
    )
)]
pub struct ApiDoc;

/// Create the users router with all HTTP endpoints
pub fn router<R: UserRepository + 'static>(service: UserService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(get_all).post(add).put(update).delete(delete))
        .with_state(shared_service)
}

/// Query string accepted by [`delete`]
#[derive(Debug, Default, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DeleteQuery {
    /// Email of the user to remove
    pub email: Option<String>,
}

/// List all users
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    responses(
        (status = 200, description = "All users", body = Envelope<Vec<User>>),
        (status = 500, description = "Storage failure")
    )
)]
async fn get_all<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    ctx: RequestContext,
) -> UserResult<Envelope<Users>> {
    tracing::debug!(caller = ?ctx.email(), "Listing users");

    let users = service.find_all().await?;
    Ok(Envelope::ok(users, StatusCode::OK))
}

/// Register a user
///
/// The submitted `image` is stored relative to the upload directory.
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = User,
    responses(
        (status = 200, description = "User created", body = Envelope<User>),
        (status = 400, description = "Malformed or invalid body"),
        (status = 409, description = "Email already registered")
    )
)]
async fn add<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    ctx: RequestContext,
    ValidatedJson(user): ValidatedJson<User>,
) -> UserResult<Envelope<User>> {
    let user = user.with_image_in(ctx.upload_dir());

    let created = service.save(&user).await?;
    Ok(Envelope::ok(created, StatusCode::OK))
}

/// Update the authenticated user
#[utoipa::path(
    put,
    path = "",
    tag = TAG,
    request_body = UpdateUser,
    params(
        ("x-user-email" = String, Header, description = "Authenticated email forwarded by the gateway")
    ),
    responses(
        (status = 200, description = "User updated", body = Envelope<User>),
        (status = 400, description = "Malformed or invalid body"),
        (status = 401, description = "No authenticated email"),
        (status = 404, description = "User not found"),
        (status = 409, description = "New email already registered")
    )
)]
async fn update<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    ctx: RequestContext,
    ValidatedJson(input): ValidatedJson<UpdateUser>,
) -> UserResult<Envelope<User>> {
    let email = ctx.email().ok_or(UserError::Unauthorized)?;

    let mut user = service.find_by_email(email).await?;
    user.apply_update(input);
    let user = user.with_image_in(ctx.upload_dir());

    let updated = service.update_user(&user, email).await?;
    Ok(Envelope::ok(updated, StatusCode::OK))
}

/// Delete a user by email
#[utoipa::path(
    delete,
    path = "",
    tag = TAG,
    params(DeleteQuery),
    responses(
        (status = 204, description = "User deleted"),
        (status = 400, description = "Missing email or malformed query string"),
        (status = 404, description = "User not found")
    )
)]
async fn delete<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    ValidatedQuery(query): ValidatedQuery<DeleteQuery>,
) -> UserResult<StatusCode> {
    // Matched as given; only blank values are rejected
    let email = query
        .email
        .as_deref()
        .filter(|e| !e.trim().is_empty())
        .ok_or_else(|| UserError::Validation("email query parameter is required".to_string()))?;

    service.delete_user(email).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockUserRepository;
    use axum::{
        Extension,
        body::Body,
        http::{Method, Request},
        middleware,
    };
    use axum_helpers::{UploadDir, identity_middleware};
    use http_body_util::BodyExt;
    use mockall::{Sequence, predicate::eq};
    use serde::de::DeserializeOwned;
    use std::path::PathBuf;
    use tower::ServiceExt;

    fn app(repo: MockUserRepository) -> Router {
        router(UserService::new(repo))
            .layer(middleware::from_fn(identity_middleware))
            .layer(Extension(UploadDir(PathBuf::from("./uploads/"))))
    }

    fn request(method: Method, uri: &str, email: Option<&str>, body: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(email) = email {
            builder = builder.header("x-user-email", email);
        }
        match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn json_body<T: DeserializeOwned>(body: Body) -> T {
        let bytes = body.collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_get_all_returns_users() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_all().times(1).returning(|| {
            Ok(vec![
                User::new("admin", Role::Admin),
                User::new("user", Role::User),
            ])
        });

        let response = app(repo)
            .oneshot(request(Method::GET, "/", Some("admin"), None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let envelope: Envelope<Users> = json_body(response.into_body()).await;
        assert!(!envelope.is_error);
        assert_eq!(envelope.code, 200);
        assert_eq!(envelope.data.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_get_all_storage_failure() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_all()
            .returning(|| Err(UserError::Internal("connection reset".to_string())));

        let response = app(repo)
            .oneshot(request(Method::GET, "/", None, None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let envelope: Envelope<Users> = json_body(response.into_body()).await;
        assert!(envelope.is_error);
        assert_eq!(envelope.code, 500);
        assert!(envelope.data.is_none());
    }

    #[tokio::test]
    async fn test_add_saves_submitted_user() {
        let expected = User::new("user", Role::User);
        let mut repo = MockUserRepository::new();
        repo.expect_save()
            .with(eq(expected.clone()))
            .times(1)
            .returning(|u| Ok(u.clone()));

        let response = app(repo)
            .oneshot(request(
                Method::POST,
                "/",
                None,
                Some(r#"{"email":"user","role":"user"}"#),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let envelope: Envelope<User> = json_body(response.into_body()).await;
        assert!(!envelope.is_error);
        assert_eq!(envelope.data, Some(expected));
    }

    #[tokio::test]
    async fn test_add_roots_image_under_upload_dir() {
        let mut repo = MockUserRepository::new();
        repo.expect_save()
            .withf(|u| u.image.as_deref() == Some("./uploads/me.png"))
            .times(1)
            .returning(|u| Ok(u.clone()));

        let response = app(repo)
            .oneshot(request(
                Method::POST,
                "/",
                None,
                Some(r#"{"email":"user","role":"user","image":"me.png"}"#),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_add_duplicate_conflicts() {
        let mut repo = MockUserRepository::new();
        repo.expect_save()
            .returning(|u| Err(UserError::Conflict(u.email.clone())));

        let response = app(repo)
            .oneshot(request(
                Method::POST,
                "/",
                None,
                Some(r#"{"email":"admin","role":"admin"}"#),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CONFLICT);
        let envelope: Envelope<User> = json_body(response.into_body()).await;
        assert!(envelope.is_error);
        assert_eq!(envelope.code, 409);
    }

    #[tokio::test]
    async fn test_add_rejects_malformed_body() {
        let mut repo = MockUserRepository::new();
        repo.expect_save().never();

        let response = app(repo)
            .oneshot(request(Method::POST, "/", None, Some(r#"{"email":"#)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let envelope: Envelope<User> = json_body(response.into_body()).await;
        assert!(envelope.is_error);
        assert_eq!(envelope.code, 400);
    }

    #[tokio::test]
    async fn test_update_merges_into_current_record() {
        let mut seq = Sequence::new();
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .with(eq("admin"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(User::new("admin", Role::Admin)));
        repo.expect_update_user()
            .withf(|u, email| {
                email == "admin"
                    && u.email == "admin"
                    && u.role == Role::Admin
                    && u.address == "Jakarta"
                    && u.phone == "+62813"
            })
            .times(1)
            .in_sequence(&mut seq)
            .returning(|u, _| Ok(u.clone()));

        let response = app(repo)
            .oneshot(request(
                Method::PUT,
                "/",
                Some("admin"),
                Some(r#"{"address":"Jakarta","phone":"+62813"}"#),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let envelope: Envelope<User> = json_body(response.into_body()).await;
        assert!(!envelope.is_error);
        let user = envelope.data.unwrap();
        assert_eq!(user.address, "Jakarta");
        assert_eq!(user.phone, "+62813");
    }

    #[tokio::test]
    async fn test_update_requires_authenticated_email() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email().never();
        repo.expect_update_user().never();

        let response = app(repo)
            .oneshot(request(
                Method::PUT,
                "/",
                None,
                Some(r#"{"address":"Jakarta"}"#),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let envelope: Envelope<User> = json_body(response.into_body()).await;
        assert!(envelope.is_error);
        assert_eq!(envelope.code, 401);
    }

    #[tokio::test]
    async fn test_update_unknown_user() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .returning(|email| Err(UserError::NotFound(email.to_string())));
        repo.expect_update_user().never();

        let response = app(repo)
            .oneshot(request(Method::PUT, "/", Some("ghost"), Some("{}")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_returns_no_content() {
        let mut repo = MockUserRepository::new();
        repo.expect_delete_user()
            .with(eq("user"))
            .times(1)
            .returning(|email| Ok(User::new(email, Role::User)));

        let response = app(repo)
            .oneshot(request(Method::DELETE, "/?email=user", None, None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert!(bytes.is_empty());
    }

    #[tokio::test]
    async fn test_delete_requires_email_query() {
        let mut repo = MockUserRepository::new();
        repo.expect_delete_user().never();
        let app = app(repo);

        for uri in ["/", "/?email=", "/?email=%20"] {
            let response = app
                .clone()
                .oneshot(request(Method::DELETE, uri, None, None))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "uri {uri}");
        }
    }

    #[tokio::test]
    async fn test_delete_malformed_query_returns_error_envelope() {
        let mut repo = MockUserRepository::new();
        repo.expect_delete_user().never();

        let response = app(repo)
            .oneshot(request(Method::DELETE, "/?email=a&email=b", None, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let envelope: Envelope<serde_json::Value> = json_body(response.into_body()).await;
        assert!(envelope.is_error);
        assert_eq!(envelope.code, 400);
        assert!(envelope.data.is_none());
    }

    #[tokio::test]
    async fn test_delete_matches_email_exactly() {
        let mut repo = MockUserRepository::new();
        repo.expect_delete_user()
            .with(eq(" user "))
            .times(1)
            .returning(|email| Err(UserError::NotFound(email.to_string())));

        let response = app(repo)
            .oneshot(request(Method::DELETE, "/?email=%20user%20", None, None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_unknown_user() {
        let mut repo = MockUserRepository::new();
        repo.expect_delete_user()
            .returning(|email| Err(UserError::NotFound(email.to_string())));

        let response = app(repo)
            .oneshot(request(Method::DELETE, "/?email=ghost", None, None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let envelope: Envelope<User> = json_body(response.into_body()).await;
        assert_eq!(envelope.code, 404);
    }
}
