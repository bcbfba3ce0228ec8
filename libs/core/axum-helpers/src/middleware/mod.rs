//! Request middleware.
//!
//! - [`identity`]: lifts the gateway-provided caller email into a typed extension
//! - [`security`]: standard security response headers

pub mod identity;
pub mod security;

pub use identity::{USER_EMAIL_HEADER, identity_middleware};
pub use security::security_headers;
