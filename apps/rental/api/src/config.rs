use core_config::{
    AppInfo, FromEnv, app_info, database::DatabaseConfig, server::ServerConfig,
    uploads::UploadConfig,
};

pub use core_config::Environment;

/// Application configuration, composed from the shared config components
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub server: ServerConfig,
    /// `None` runs the service on in-memory storage
    pub database: Option<DatabaseConfig>,
    pub uploads: UploadConfig,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?; // HOST=0.0.0.0, PORT=8080 by default
        let database = DatabaseConfig::from_env_optional()?;
        let uploads = UploadConfig::from_env()?;

        Ok(Self {
            app: app_info!(),
            server,
            database,
            uploads,
            environment,
        })
    }
}
