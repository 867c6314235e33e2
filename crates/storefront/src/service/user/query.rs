use crate::{
    abstract_trait::user::{repository::DynUserQueryRepository, service::UserQueryServiceTrait},
    domain::{requests::user::FindAllUsers, response::user::UserResponse},
};
use async_trait::async_trait;
use prometheus_client::registry::Registry;
use shared::{
    domain::responses::{ApiResponse, ApiResponsePagination, Pagination},
    errors::ServiceError,
    utils::{Method, Metrics, TracingContext},
};
use tracing::info;

#[derive(Clone)]
pub struct UserQueryService {
    pub query: DynUserQueryRepository,
    pub metrics: Metrics,
}

impl UserQueryService {
    pub fn new(query: DynUserQueryRepository, registry: &mut Registry) -> Self {
        let metrics = Metrics::new();
        metrics.register(registry, "user_query_service", "user query service");

        Self { query, metrics }
    }
}

#[async_trait]
impl UserQueryServiceTrait for UserQueryService {
    async fn find_all(
        &self,
        req: &FindAllUsers,
    ) -> Result<ApiResponsePagination<Vec<UserResponse>>, ServiceError> {
        info!(
            "🔍 Finding all users | Page: {}, Size: {}, Search: '{}'",
            req.page, req.page_size, req.search
        );

        let (page, page_size) = Pagination::normalize(req.page, req.page_size);
        let normalized = FindAllUsers {
            page,
            page_size,
            search: req.search.clone(),
        };

        let tracing_ctx = TracingContext::start("user", "find_all", Method::Get);

        let (users, total) = match self.query.find_all(&normalized).await {
            Ok(res) => {
                tracing_ctx.complete_success(&self.metrics, "Users retrieved");
                res
            }
            Err(e) => {
                tracing_ctx.complete_error(&self.metrics, &format!("Failed to fetch users: {e}"));
                return Err(ServiceError::Repo(e));
            }
        };

        let data: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();

        Ok(ApiResponsePagination::success(
            "Users retrieved successfully",
            data,
            Pagination::new(page, page_size, total),
        ))
    }

    async fn find_by_id(&self, id: i32) -> Result<ApiResponse<UserResponse>, ServiceError> {
        info!("🆔 Finding user by ID: {id}");

        let tracing_ctx = TracingContext::start("user", "find_by_id", Method::Get);

        match self.query.find_by_id(id).await {
            Ok(Some(user)) => {
                tracing_ctx.complete_success(&self.metrics, "User retrieved");
                Ok(ApiResponse::success(
                    "User retrieved successfully",
                    UserResponse::from(user),
                ))
            }
            Ok(None) => {
                tracing_ctx.complete_error(&self.metrics, &format!("User {id} not found"));
                Err(ServiceError::NotFound("User".into()))
            }
            Err(e) => {
                tracing_ctx.complete_error(&self.metrics, &format!("Failed to fetch user {id}: {e}"));
                Err(ServiceError::Repo(e))
            }
        }
    }
}
