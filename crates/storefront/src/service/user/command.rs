use crate::{
    abstract_trait::user::{
        repository::{DynUserCommandRepository, DynUserQueryRepository},
        service::UserCommandServiceTrait,
    },
    domain::{
        requests::user::{CreateUserRecord, CreateUserRequest, UpdateUserRequest},
        response::user::UserResponse,
    },
};
use async_trait::async_trait;
use prometheus_client::registry::Registry;
use shared::{
    abstract_trait::DynHashing,
    domain::responses::ApiResponse,
    errors::{RepositoryError, ServiceError},
    utils::{Method, Metrics, TracingContext},
};
use tracing::info;

#[derive(Clone)]
pub struct UserCommandService {
    pub query: DynUserQueryRepository,
    pub command: DynUserCommandRepository,
    pub hashing: DynHashing,
    pub metrics: Metrics,
}

impl UserCommandService {
    pub fn new(
        query: DynUserQueryRepository,
        command: DynUserCommandRepository,
        hashing: DynHashing,
        registry: &mut Registry,
    ) -> Self {
        let metrics = Metrics::new();
        metrics.register(registry, "user_command_service", "user command service");

        Self {
            query,
            command,
            hashing,
            metrics,
        }
    }

    async fn ensure_email_free(&self, email: &str, owner: Option<i32>) -> Result<(), ServiceError> {
        match self.query.find_by_email(email).await? {
            Some(existing) if Some(existing.id) != owner => Err(ServiceError::Repo(
                RepositoryError::Conflict("Email already registered".into()),
            )),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl UserCommandServiceTrait for UserCommandService {
    async fn create_user(
        &self,
        req: &CreateUserRequest,
    ) -> Result<ApiResponse<UserResponse>, ServiceError> {
        info!("🆕 Registering user: {}", req.email);

        let tracing_ctx = TracingContext::start("user", "create_user", Method::Post);

        let result = async {
            self.ensure_email_free(&req.email, None).await?;

            let password_hash = self.hashing.hash_password(&req.password).await?;

            let record = CreateUserRecord {
                name: req.name.trim().to_string(),
                email: req.email.trim().to_string(),
                password_hash,
            };

            Ok::<_, ServiceError>(self.command.create_user(&record).await?)
        }
        .await;

        match result {
            Ok(user) => {
                tracing_ctx.complete_success(&self.metrics, &format!("User {} created", user.id));
                Ok(ApiResponse::success(
                    "User created successfully",
                    UserResponse::from(user),
                ))
            }
            Err(e) => {
                tracing_ctx.complete_error(&self.metrics, &format!("Failed to create user: {e}"));
                Err(e)
            }
        }
    }

    async fn update_user(
        &self,
        req: &UpdateUserRequest,
    ) -> Result<ApiResponse<UserResponse>, ServiceError> {
        let id = req
            .id
            .ok_or_else(|| ServiceError::Validation(vec!["id: User id is required".into()]))?;

        info!("🔄 Updating user ID: {id}");

        let tracing_ctx = TracingContext::start("user", "update_user", Method::Put);

        let result = async {
            if let Some(email) = req.email.as_deref() {
                self.ensure_email_free(email, Some(id)).await?;
            }

            self.command.update_user(req).await.map_err(|e| match e {
                RepositoryError::NotFound => ServiceError::NotFound("User".into()),
                other => ServiceError::Repo(other),
            })
        }
        .await;

        match result {
            Ok(user) => {
                tracing_ctx.complete_success(&self.metrics, &format!("User {id} updated"));
                Ok(ApiResponse::success(
                    "User updated successfully",
                    UserResponse::from(user),
                ))
            }
            Err(e) => {
                tracing_ctx.complete_error(&self.metrics, &format!("Failed to update user {id}: {e}"));
                Err(e)
            }
        }
    }
}
