use crate::{
    abstract_trait::product::{
        repository::DynProductCommandRepository, service::ProductCommandServiceTrait,
    },
    domain::{
        requests::{
            product::{CreateProductRecord, CreateProductRequest, ImageUpload},
            validation_messages,
        },
        response::product::ProductResponse,
    },
    storage::{UploadError, UploadStore},
};
use async_trait::async_trait;
use prometheus_client::registry::Registry;
use shared::{
    domain::responses::ApiResponse,
    errors::ServiceError,
    utils::{Method, Metrics, TracingContext},
};
use tracing::{info, warn};
use validator::Validate;

#[derive(Clone)]
pub struct ProductCommandService {
    pub command: DynProductCommandRepository,
    pub uploads: UploadStore,
    pub metrics: Metrics,
}

impl ProductCommandService {
    pub fn new(
        command: DynProductCommandRepository,
        uploads: UploadStore,
        registry: &mut Registry,
    ) -> Self {
        let metrics = Metrics::new();
        metrics.register(registry, "product_command_service", "product command service");

        Self {
            command,
            uploads,
            metrics,
        }
    }

    async fn store_image(&self, image: Option<ImageUpload>) -> Result<Option<String>, ServiceError> {
        let Some(image) = image else {
            return Ok(None);
        };

        match self.uploads.save(&image).await {
            Ok(path) => Ok(Some(path)),
            Err(UploadError::Io(e)) => Err(ServiceError::Storage(e)),
            Err(e) => {
                warn!("⚠️ Rejected product image: {e}");
                Err(ServiceError::Validation(vec![format!("image: {e}")]))
            }
        }
    }
}

#[async_trait]
impl ProductCommandServiceTrait for ProductCommandService {
    async fn create_product(
        &self,
        req: &CreateProductRequest,
        image: Option<ImageUpload>,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        info!("📦 Creating product: {}", req.name);

        let tracing_ctx = TracingContext::start("product", "create_product", Method::Post);

        let result = async {
            req.validate()
                .map_err(|e| ServiceError::Validation(validation_messages(&e)))?;

            let image = self.store_image(image).await?;

            let record = CreateProductRecord {
                name: req.name.trim().to_string(),
                description: req.description.clone(),
                price: req.price,
                stock: req.stock,
                image,
            };

            match self.command.create_product(&record).await {
                Ok(product) => Ok(product),
                Err(e) => {
                    if let Some(path) = &record.image {
                        self.uploads.remove(path).await;
                    }
                    Err(ServiceError::Repo(e))
                }
            }
        }
        .await;

        match result {
            Ok(product) => {
                tracing_ctx
                    .complete_success(&self.metrics, &format!("Product {} created", product.id));
                Ok(ApiResponse::success(
                    "Product created successfully",
                    ProductResponse::from(product),
                ))
            }
            Err(e) => {
                tracing_ctx.complete_error(&self.metrics, &format!("Failed to create product: {e}"));
                Err(e)
            }
        }
    }
}
