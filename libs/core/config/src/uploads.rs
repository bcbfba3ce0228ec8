use crate::{ConfigError, FromEnv, env_or_default};
use std::path::PathBuf;

/// Where uploaded user images live.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadConfig {
    pub dir: PathBuf,
}

impl UploadConfig {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self::new("./uploads/")
    }
}

impl FromEnv for UploadConfig {
    /// `UPLOAD_DIR`, defaulting to `./uploads/`.
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self::new(env_or_default("UPLOAD_DIR", "./uploads/")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_config_default_dir() {
        temp_env::with_var_unset("UPLOAD_DIR", || {
            let config = UploadConfig::from_env().unwrap();
            assert_eq!(config, UploadConfig::default());
        });
    }

    #[test]
    fn test_upload_config_custom_dir() {
        temp_env::with_var("UPLOAD_DIR", Some("/var/lib/rental/uploads"), || {
            let config = UploadConfig::from_env().unwrap();
            assert_eq!(config.dir, PathBuf::from("/var/lib/rental/uploads"));
        });
    }
}
