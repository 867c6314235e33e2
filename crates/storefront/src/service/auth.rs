use crate::{
    abstract_trait::{auth::LoginServiceTrait, user::repository::DynUserQueryRepository},
    domain::{
        requests::user::LoginRequest,
        response::user::{LoginResponse, UserResponse},
    },
};
use async_trait::async_trait;
use prometheus_client::registry::Registry;
use shared::{
    abstract_trait::{DynHashing, DynJwtService},
    config::ACCESS_TOKEN,
    domain::responses::ApiResponse,
    errors::ServiceError,
    utils::{Method, Metrics, TracingContext},
};
use tracing::{info, warn};

#[derive(Clone)]
pub struct LoginService {
    pub query: DynUserQueryRepository,
    pub hashing: DynHashing,
    pub jwt: DynJwtService,
    pub metrics: Metrics,
}

impl LoginService {
    pub fn new(
        query: DynUserQueryRepository,
        hashing: DynHashing,
        jwt: DynJwtService,
        registry: &mut Registry,
    ) -> Self {
        let metrics = Metrics::new();
        metrics.register(registry, "login_service", "login service");

        Self {
            query,
            hashing,
            jwt,
            metrics,
        }
    }
}

#[async_trait]
impl LoginServiceTrait for LoginService {
    async fn login(&self, req: &LoginRequest) -> Result<ApiResponse<LoginResponse>, ServiceError> {
        info!("🔐 Login attempt: {}", req.email);

        let tracing_ctx = TracingContext::start("auth", "login", Method::Post);

        let result = async {
            let user = self
                .query
                .find_by_email(req.email.trim())
                .await?
                .ok_or_else(|| {
                    warn!("⚠️ Login for unknown email");
                    ServiceError::InvalidCredentials
                })?;

            self.hashing
                .compare_password(&user.password, &req.password)
                .await?;

            let access_token = self.jwt.generate_token(user.id as i64, ACCESS_TOKEN)?;

            Ok::<_, ServiceError>(LoginResponse {
                user: UserResponse::from(user),
                access_token,
                token_type: "Bearer".to_string(),
            })
        }
        .await;

        match result {
            Ok(login) => {
                tracing_ctx.complete_success(
                    &self.metrics,
                    &format!("User {} logged in", login.user.id),
                );
                Ok(ApiResponse::success("Login successful", login))
            }
            Err(e) => {
                tracing_ctx.complete_error(&self.metrics, &format!("Login failed: {e}"));
                Err(e)
            }
        }
    }
}
