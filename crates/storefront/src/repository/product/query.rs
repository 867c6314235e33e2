use crate::{
    abstract_trait::product::repository::ProductQueryRepositoryTrait,
    repository::search_pattern,
    domain::requests::product::FindAllProducts,
    model::{Product as ProductModel, ProductRow},
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, domain::responses::Pagination, errors::RepositoryError};
use tracing::{error, info};

#[derive(Clone)]
pub struct ProductQueryRepository {
    db: ConnectionPool,
}

impl ProductQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductQueryRepositoryTrait for ProductQueryRepository {
    async fn find_all(
        &self,
        req: &FindAllProducts,
    ) -> Result<(Vec<ProductModel>, i64), RepositoryError> {
        info!("🔍 Fetching all products with search: {:?}", req.search);

        let mut conn = self.db.acquire().await.map_err(|e| {
            error!("❌ Failed to acquire DB connection: {:?}", e);
            RepositoryError::from(e)
        })?;

        let limit = req.page_size as i64;
        let offset = Pagination::offset(req.page, req.page_size);

        let search_pattern = search_pattern(&req.search);

        let rows = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT
                p.id,
                p.name,
                p.description,
                p.price,
                p.image,
                p.stock,
                p.created_at,
                p.updated_at,
                COUNT(*) OVER() AS total_count
            FROM products p
            WHERE ($1::TEXT IS NULL OR p.name ILIKE '%' || $1 || '%' ESCAPE '\')
            ORDER BY p.created_at DESC, p.id DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(search_pattern.as_deref())
        .bind(limit)
        .bind(offset)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch products: {:?}", e);
            RepositoryError::from(e)
        })?;

        // past the last page the window count has no row to ride on
        let total = match rows.first() {
            Some(row) => row.total_count,
            None if offset > 0 => sqlx::query_scalar::<_, i64>(
                r#"
                SELECT COUNT(*)
                FROM products p
                WHERE ($1::TEXT IS NULL OR p.name ILIKE '%' || $1 || '%' ESCAPE '\')
                "#,
            )
            .bind(search_pattern.as_deref())
            .fetch_one(&mut *conn)
            .await
            .map_err(|e| {
                error!("❌ Failed to count products: {:?}", e);
                RepositoryError::from(e)
            })?,
            None => 0,
        };
        let products = rows.into_iter().map(|r| r.product).collect();

        Ok((products, total))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<ProductModel>, RepositoryError> {
        info!("🆔 Fetching product by ID: {}", id);

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let result = sqlx::query_as::<_, ProductModel>(
            r#"
            SELECT id, name, description, price, image, stock, created_at, updated_at
            FROM products
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(RepositoryError::from)?;

        Ok(result)
    }
}
