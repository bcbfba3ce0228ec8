use serde::{Deserialize, Serialize};
use std::path::Path;
use utoipa::ToSchema;
use validator::Validate;

/// User roles
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            _ => Err(format!("Unknown role: {}", s)),
        }
    }
}

/// A registered user. `email` is the identity key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct User {
    #[validate(length(min = 1, max = 255))]
    pub email: String,
    #[validate(length(max = 100))]
    pub name: String,
    pub role: Role,
    #[validate(length(max = 255))]
    pub address: String,
    #[validate(length(max = 20))]
    pub phone: String,
    /// Path of the profile picture inside the upload directory
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Ordered list of users
pub type Users = Vec<User>;

/// Partial update; absent fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct UpdateUser {
    #[validate(length(min = 1, max = 255))]
    pub email: Option<String>,
    #[validate(length(max = 100))]
    pub name: Option<String>,
    pub role: Option<Role>,
    #[validate(length(max = 255))]
    pub address: Option<String>,
    #[validate(length(max = 20))]
    pub phone: Option<String>,
    pub image: Option<String>,
}

impl User {
    pub fn new(email: impl Into<String>, role: Role) -> Self {
        Self {
            email: email.into(),
            role,
            ..Default::default()
        }
    }

    /// Merge the provided fields of `update` into this user.
    pub fn apply_update(&mut self, update: UpdateUser) {
        if let Some(email) = update.email {
            self.email = email;
        }
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(role) = update.role {
            self.role = role;
        }
        if let Some(address) = update.address {
            self.address = address;
        }
        if let Some(phone) = update.phone {
            self.phone = phone;
        }
        if let Some(image) = update.image {
            self.image = Some(image);
        }
    }

    /// Re-root `image` under `upload_dir`.
    ///
    /// Only the file name of the submitted path is kept, so clients cannot
    /// point outside the upload directory. A blank image clears the field.
    pub fn with_image_in(mut self, upload_dir: &Path) -> Self {
        self.image = self
            .image
            .as_deref()
            .and_then(|image| Path::new(image.trim()).file_name())
            .map(|file_name| upload_dir.join(file_name).to_string_lossy().into_owned());
        self
    }
}
