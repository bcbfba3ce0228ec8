//! Typed request-scoped values.
//!
//! Upstream middleware attaches [`AuthenticatedEmail`] and [`UploadDir`] as
//! request extensions; handlers receive them through the [`RequestContext`]
//! extractor instead of looking up untyped keys.

use axum::{extract::FromRequestParts, http::request::Parts};
use std::convert::Infallible;
use std::path::{Path, PathBuf};

/// Default upload directory when none was attached to the request.
pub const DEFAULT_UPLOAD_DIR: &str = "./uploads/";

/// Email of the caller, set by the identity middleware.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedEmail(pub String);

/// Directory user uploads are stored under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadDir(pub PathBuf);

/// Request-scoped values available to handlers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    pub email: Option<String>,
    pub upload_dir: Option<PathBuf>,
}

impl RequestContext {
    pub fn new(email: Option<String>, upload_dir: Option<PathBuf>) -> Self {
        Self { email, upload_dir }
    }

    /// Authenticated email, if any.
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Upload directory, falling back to [`DEFAULT_UPLOAD_DIR`].
    pub fn upload_dir(&self) -> &Path {
        self.upload_dir
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_UPLOAD_DIR))
    }
}

impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let email = parts
            .extensions
            .get::<AuthenticatedEmail>()
            .map(|e| e.0.clone());
        let upload_dir = parts.extensions.get::<UploadDir>().map(|d| d.0.clone());

        Ok(Self { email, upload_dir })
    }
}
