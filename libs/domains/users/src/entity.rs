use crate::models::User;
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;

/// Sea-ORM Entity for the users table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub email: String,
    pub name: String,
    pub role: String,
    pub address: String,
    pub phone: String,
    pub image: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Table definition applied on startup when a database is configured.
pub const CREATE_TABLE_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    email       VARCHAR(255) PRIMARY KEY,
    name        VARCHAR(100) NOT NULL DEFAULT '',
    role        VARCHAR(16)  NOT NULL DEFAULT 'user',
    address     VARCHAR(255) NOT NULL DEFAULT '',
    phone       VARCHAR(20)  NOT NULL DEFAULT '',
    image       TEXT,
    created_at  TIMESTAMPTZ  NOT NULL DEFAULT NOW(),
    updated_at  TIMESTAMPTZ  NOT NULL DEFAULT NOW()
)
"#;

impl From<Model> for User {
    fn from(model: Model) -> Self {
        Self {
            email: model.email,
            name: model.name,
            // Unknown roles written outside the API degrade to the least privileged one
            role: model.role.parse().unwrap_or_default(),
            address: model.address,
            phone: model.phone,
            image: model.image,
        }
    }
}

impl From<&User> for ActiveModel {
    fn from(user: &User) -> Self {
        let now: DateTimeWithTimeZone = chrono::Utc::now().into();

        ActiveModel {
            email: Set(user.email.clone()),
            name: Set(user.name.clone()),
            role: Set(user.role.to_string()),
            address: Set(user.address.clone()),
            phone: Set(user.phone.clone()),
            image: Set(user.image.clone()),
            created_at: Set(now),
            updated_at: Set(now),
        }
    }
}
