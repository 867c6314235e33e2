use crate::{
    config::Config,
    di::{DependenciesInject, DependenciesInjectDeps, Repositories},
    storage::UploadStore,
};
use prometheus_client::registry::Registry;
use shared::{
    abstract_trait::{DynHashing, DynJwtService},
    config::{ConnectionPool, Hashing, JwtConfig},
    utils::{SystemMetrics, run_metrics_collector},
};
use std::{fmt, path::PathBuf, sync::Arc};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub di_container: DependenciesInject,
    pub jwt_config: DynJwtService,
    pub upload_dir: PathBuf,
    pub registry: Arc<Mutex<Registry>>,
    pub system_metrics: Arc<SystemMetrics>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("di_container", &self.di_container)
            .field("upload_dir", &self.upload_dir)
            .finish()
    }
}

impl AppState {
    /// Postgres-backed state; also starts the process metrics collector.
    pub fn new(pool: ConnectionPool, config: &Config) -> Self {
        let deps = DependenciesInjectDeps {
            repositories: Repositories::postgres(pool),
            hashing: Arc::new(Hashing::new()) as DynHashing,
            jwt: Arc::new(JwtConfig::new(&config.jwt_secret)) as DynJwtService,
            uploads: UploadStore::new(config.upload_dir.clone()),
        };

        let state = Self::from_deps(deps);

        tokio::spawn(run_metrics_collector(state.system_metrics.clone()));

        state
    }

    pub fn from_deps(deps: DependenciesInjectDeps) -> Self {
        let mut registry = Registry::default();
        let system_metrics = Arc::new(SystemMetrics::new());

        let jwt_config = deps.jwt.clone();
        let upload_dir = deps.uploads.dir().to_path_buf();

        let di_container = DependenciesInject::new(deps, &mut registry);

        registry.register_metrics(&system_metrics);

        Self {
            di_container,
            jwt_config,
            upload_dir,
            registry: Arc::new(Mutex::new(registry)),
            system_metrics,
        }
    }
}

trait MetricsRegister {
    fn register_metrics(&mut self, metrics: &SystemMetrics);
}

impl MetricsRegister for Registry {
    fn register_metrics(&mut self, metrics: &SystemMetrics) {
        metrics.register(self);
    }
}
