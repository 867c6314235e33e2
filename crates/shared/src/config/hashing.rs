use crate::{abstract_trait::HashingTrait, errors::ServiceError};
use async_trait::async_trait;
use bcrypt::{DEFAULT_COST, hash, verify};

#[derive(Clone)]
pub struct Hashing {
    cost: u32,
}

impl Hashing {
    pub fn new() -> Self {
        Self { cost: DEFAULT_COST }
    }

    /// Cheap cost factor for tests.
    pub fn with_cost(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for Hashing {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HashingTrait for Hashing {
    async fn hash_password(&self, password: &str) -> Result<String, ServiceError> {
        let password = password.to_owned();
        let cost = self.cost;

        tokio::task::spawn_blocking(move || hash(password, cost))
            .await
            .map_err(|e| ServiceError::Internal(format!("hashing task failed: {e}")))?
            .map_err(ServiceError::Bcrypt)
    }

    async fn compare_password(
        &self,
        hashed_password: &str,
        password: &str,
    ) -> Result<(), ServiceError> {
        let password = password.to_owned();
        let hashed_password = hashed_password.to_owned();

        let is_valid = tokio::task::spawn_blocking(move || verify(password, &hashed_password))
            .await
            .map_err(|e| ServiceError::Internal(format!("verify task failed: {e}")))?
            .map_err(ServiceError::Bcrypt)?;

        if is_valid {
            Ok(())
        } else {
            Err(ServiceError::InvalidCredentials)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn hash_then_compare() {
        let hashing = Hashing::with_cost(4);
        let hashed = hashing.hash_password("secret-pass").await.unwrap();

        assert_ne!(hashed, "secret-pass");
        assert!(hashing.compare_password(&hashed, "secret-pass").await.is_ok());
        assert!(matches!(
            hashing.compare_password(&hashed, "wrong-pass").await,
            Err(ServiceError::InvalidCredentials)
        ));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn compare_does_not_block_the_runtime() {
        let hashing = Hashing::with_cost(10);
        let hashed = hashing.hash_password("secret-pass").await.unwrap();

        let ticker = tokio::spawn(async {
            let mut ticks = 0u32;
            for _ in 0..5 {
                tokio::time::sleep(std::time::Duration::from_millis(1)).await;
                ticks += 1;
            }
            ticks
        });

        hashing.compare_password(&hashed, "secret-pass").await.unwrap();

        assert!(ticker.is_finished());
        assert_eq!(ticker.await.unwrap(), 5);
    }
}
