//! Shared application state.

use sea_orm::DatabaseConnection;

/// State handed to the API route builders.
///
/// Cloning is cheap: the connection is a pool handle.
#[derive(Clone)]
pub struct AppState {
    /// Configuration loaded from environment variables
    pub config: crate::config::Config,
    /// PostgreSQL pool, absent when running on in-memory storage
    pub db: Option<DatabaseConnection>,
}
