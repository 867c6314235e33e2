use crate::{
    abstract_trait::user::repository::UserCommandRepositoryTrait,
    domain::requests::user::{CreateUserRecord, UpdateUserRequest},
    model::User as UserModel,
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use tracing::{error, info};

#[derive(Clone)]
pub struct UserCommandRepository {
    db: ConnectionPool,
}

impl UserCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserCommandRepositoryTrait for UserCommandRepository {
    async fn create_user(&self, req: &CreateUserRecord) -> Result<UserModel, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let user = sqlx::query_as::<_, UserModel>(
            r#"
            INSERT INTO users (name, email, password, created_at, updated_at)
            VALUES ($1, $2, $3, current_timestamp, current_timestamp)
            RETURNING id, name, email, password, created_at, updated_at
            "#,
        )
        .bind(&req.name)
        .bind(&req.email)
        .bind(&req.password_hash)
        .fetch_one(&mut *conn)
        .await
        .map_err(|err| {
            error!("❌ Failed to create user: {:?}", err);
            RepositoryError::from(err)
        })?;

        info!("✅ Created user ID {}", user.id);
        Ok(user)
    }

    async fn update_user(&self, req: &UpdateUserRequest) -> Result<UserModel, RepositoryError> {
        let id = req
            .id
            .ok_or_else(|| RepositoryError::Custom("user id is required for update".into()))?;

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let user = sqlx::query_as::<_, UserModel>(
            r#"
            UPDATE users
            SET name       = COALESCE($2, name),
                email      = COALESCE($3, email),
                updated_at = current_timestamp
            WHERE id = $1
            RETURNING id, name, email, password, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(req.name.as_deref())
        .bind(req.email.as_deref())
        .fetch_one(&mut *conn)
        .await
        .map_err(|err| {
            error!("❌ Failed to update user ID {}: {:?}", id, err);
            RepositoryError::from(err)
        })?;

        info!("🔄 Updated user ID {}", user.id);
        Ok(user)
    }
}
