use crate::{
    abstract_trait::user::repository::UserQueryRepositoryTrait,
    domain::requests::user::FindAllUsers,
    model::{User as UserModel, UserRow},
    repository::search_pattern,
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, domain::responses::Pagination, errors::RepositoryError};
use tracing::{error, info};

#[derive(Clone)]
pub struct UserQueryRepository {
    db: ConnectionPool,
}

impl UserQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserQueryRepositoryTrait for UserQueryRepository {
    async fn find_all(&self, req: &FindAllUsers) -> Result<(Vec<UserModel>, i64), RepositoryError> {
        info!("🔍 Fetching all users with search: {:?}", req.search);

        let mut conn = self.db.acquire().await.map_err(|e| {
            error!("❌ Failed to acquire DB connection: {:?}", e);
            RepositoryError::from(e)
        })?;

        let limit = req.page_size as i64;
        let offset = Pagination::offset(req.page, req.page_size);

        let search_pattern = search_pattern(&req.search);

        let rows = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                id,
                name,
                email,
                password,
                created_at,
                updated_at,
                COUNT(*) OVER() AS total_count
            FROM users
            WHERE ($1::TEXT IS NULL
                   OR name ILIKE '%' || $1 || '%' ESCAPE '\'
                   OR email ILIKE '%' || $1 || '%' ESCAPE '\')
            ORDER BY created_at DESC, id DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(search_pattern.as_deref())
        .bind(limit)
        .bind(offset)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch users: {:?}", e);
            RepositoryError::from(e)
        })?;

        let total = match rows.first() {
            Some(row) => row.total_count,
            None if offset > 0 => sqlx::query_scalar::<_, i64>(
                r#"
                SELECT COUNT(*)
                FROM users
                WHERE ($1::TEXT IS NULL
                       OR name ILIKE '%' || $1 || '%' ESCAPE '\'
                       OR email ILIKE '%' || $1 || '%' ESCAPE '\')
                "#,
            )
            .bind(search_pattern.as_deref())
            .fetch_one(&mut *conn)
            .await
            .map_err(|e| {
                error!("❌ Failed to count users: {:?}", e);
                RepositoryError::from(e)
            })?,
            None => 0,
        };
        let users = rows.into_iter().map(|r| r.user).collect();

        Ok((users, total))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<UserModel>, RepositoryError> {
        info!("🆔 Fetching user by ID: {}", id);

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let result = sqlx::query_as::<_, UserModel>(
            r#"
            SELECT id, name, email, password, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(RepositoryError::from)?;

        Ok(result)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserModel>, RepositoryError> {
        info!("📧 Fetching user by email");

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let result = sqlx::query_as::<_, UserModel>(
            r#"
            SELECT id, name, email, password, created_at, updated_at
            FROM users
            WHERE LOWER(email) = LOWER($1)
            "#,
        )
        .bind(email)
        .fetch_optional(&mut *conn)
        .await
        .map_err(RepositoryError::from)?;

        Ok(result)
    }
}
