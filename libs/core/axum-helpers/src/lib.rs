//! # Axum Helpers
//!
//! Shared building blocks for the rental HTTP services.
//!
//! ## Modules
//!
//! - **[`envelope`]**: the `{data, isError, code}` response body
//! - **[`context`]**: typed request-scoped values and their extractor
//! - **[`middleware`]**: identity propagation and security headers
//! - **[`extractors`]**: validated JSON bodies and query strings
//! - **[`server`]**: router assembly, health endpoint, graceful shutdown

pub mod context;
pub mod envelope;
pub mod extractors;
pub mod middleware;
pub mod server;

pub use context::{AuthenticatedEmail, RequestContext, UploadDir};
pub use envelope::{Envelope, error_response};
pub use extractors::{ValidatedJson, ValidatedQuery};
pub use middleware::{identity_middleware, security_headers};
pub use server::{create_app, create_router, health_router, shutdown_signal};
