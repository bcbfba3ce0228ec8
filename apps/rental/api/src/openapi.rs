use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Rental API",
        version = "0.1.0",
        description = "User management for the rental listing service"
    ),
    servers(
        (url = "/api", description = "API base path")
    ),
    nest(
        (path = "/user", api = domain_users::ApiDoc)
    )
)]
pub struct ApiDoc;
