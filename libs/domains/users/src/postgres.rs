use async_trait::async_trait;
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, SqlErr,
};

use crate::{
    entity,
    error::{UserError, UserResult},
    models::{User, Users},
    repository::UserRepository,
};

/// PostgreSQL implementation of UserRepository
pub struct PgUserRepository {
    db: DatabaseConnection,
}

impl PgUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Create the users table if it does not exist yet.
    pub async fn ensure_schema(&self) -> UserResult<()> {
        self.db.execute_unprepared(entity::CREATE_TABLE_SQL).await?;
        tracing::debug!("Users table ready");
        Ok(())
    }

    async fn exists(&self, email: &str) -> UserResult<bool> {
        let found = entity::Entity::find_by_id(email.to_string())
            .one(&self.db)
            .await?
            .is_some();
        Ok(found)
    }
}

/// Map a failed write, reporting unique-key violations on `email` as `Conflict`.
///
/// A concurrent insert can slip past the existence check.
fn write_error(err: DbErr, email: &str) -> UserError {
    let message = err.to_string();
    let unique_violation = matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
        || message.contains("duplicate key")
        || message.contains("unique constraint");

    if unique_violation {
        UserError::Conflict(email.to_string())
    } else {
        err.into()
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_email(&self, email: &str) -> UserResult<User> {
        entity::Entity::find_by_id(email.to_string())
            .one(&self.db)
            .await?
            .map(Into::into)
            .ok_or_else(|| UserError::NotFound(email.to_string()))
    }

    async fn find_all(&self) -> UserResult<Users> {
        let models = entity::Entity::find()
            .order_by_asc(entity::Column::CreatedAt)
            .order_by_asc(entity::Column::Email)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn save(&self, user: &User) -> UserResult<User> {
        if self.exists(&user.email).await? {
            return Err(UserError::Conflict(user.email.clone()));
        }

        let active_model: entity::ActiveModel = user.into();
        let model = active_model
            .insert(&self.db)
            .await
            .map_err(|e| write_error(e, &user.email))?;

        tracing::info!(email = %model.email, role = %model.role, "Created user");
        Ok(model.into())
    }

    async fn update_user(&self, user: &User, email: &str) -> UserResult<User> {
        if user.email != email && self.exists(&user.email).await? {
            return Err(UserError::Conflict(user.email.clone()));
        }

        // Column-wise update so the primary key itself can change
        let now: DateTimeWithTimeZone = chrono::Utc::now().into();
        let result = entity::Entity::update_many()
            .col_expr(entity::Column::Email, Expr::value(user.email.clone()))
            .col_expr(entity::Column::Name, Expr::value(user.name.clone()))
            .col_expr(entity::Column::Role, Expr::value(user.role.to_string()))
            .col_expr(entity::Column::Address, Expr::value(user.address.clone()))
            .col_expr(entity::Column::Phone, Expr::value(user.phone.clone()))
            .col_expr(entity::Column::Image, Expr::value(user.image.clone()))
            .col_expr(entity::Column::UpdatedAt, Expr::value(now))
            .filter(entity::Column::Email.eq(email))
            .exec(&self.db)
            .await
            .map_err(|e| write_error(e, &user.email))?;

        if result.rows_affected == 0 {
            return Err(UserError::NotFound(email.to_string()));
        }

        tracing::info!(email = %email, new_email = %user.email, "Updated user");
        Ok(user.clone())
    }

    async fn delete_user(&self, email: &str) -> UserResult<User> {
        let user = self.find_by_email(email).await?;

        let result = entity::Entity::delete_by_id(email.to_string())
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(UserError::NotFound(email.to_string()));
        }

        tracing::info!(email = %email, "Deleted user");
        Ok(user)
    }
}
