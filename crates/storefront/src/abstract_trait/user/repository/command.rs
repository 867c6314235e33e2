use crate::{
    domain::requests::user::{CreateUserRecord, UpdateUserRequest},
    model::User as UserModel,
};
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::sync::Arc;

pub type DynUserCommandRepository = Arc<dyn UserCommandRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait UserCommandRepositoryTrait {
    async fn create_user(&self, req: &CreateUserRecord) -> Result<UserModel, RepositoryError>;
    /// Missing user → `RepositoryError::NotFound`.
    async fn update_user(&self, req: &UpdateUserRequest) -> Result<UserModel, RepositoryError>;
}
