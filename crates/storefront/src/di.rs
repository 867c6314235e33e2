use crate::{
    abstract_trait::{
        auth::DynLoginService,
        cart::{
            repository::{DynCartCommandRepository, DynCartQueryRepository},
            service::{DynCartCommandService, DynCartQueryService},
        },
        order::{
            repository::{DynOrderCommandRepository, DynOrderQueryRepository},
            service::{DynOrderCommandService, DynOrderQueryService},
        },
        product::{
            repository::{DynProductCommandRepository, DynProductQueryRepository},
            service::{DynProductCommandService, DynProductQueryService},
        },
        user::{
            repository::{DynUserCommandRepository, DynUserQueryRepository},
            service::{DynUserCommandService, DynUserQueryService},
        },
    },
    repository::{
        cart::{CartCommandRepository, CartQueryRepository},
        order::{OrderCommandRepository, OrderQueryRepository},
        product::{ProductCommandRepository, ProductQueryRepository},
        user::{UserCommandRepository, UserQueryRepository},
    },
    service::{
        auth::LoginService,
        cart::{CartCommandService, CartQueryService},
        order::{OrderCommandService, OrderQueryService},
        product::{ProductCommandService, ProductQueryService},
        user::{UserCommandService, UserQueryService},
    },
    storage::UploadStore,
};
use prometheus_client::registry::Registry;
use shared::{
    abstract_trait::{DynHashing, DynJwtService},
    config::ConnectionPool,
};
use std::{fmt, sync::Arc};

/// Every repository the services need, behind their traits.
#[derive(Clone)]
pub struct Repositories {
    pub user_query: DynUserQueryRepository,
    pub user_command: DynUserCommandRepository,
    pub product_query: DynProductQueryRepository,
    pub product_command: DynProductCommandRepository,
    pub order_query: DynOrderQueryRepository,
    pub order_command: DynOrderCommandRepository,
    pub cart_query: DynCartQueryRepository,
    pub cart_command: DynCartCommandRepository,
}

impl Repositories {
    pub fn postgres(pool: ConnectionPool) -> Self {
        Self {
            user_query: Arc::new(UserQueryRepository::new(pool.clone())),
            user_command: Arc::new(UserCommandRepository::new(pool.clone())),
            product_query: Arc::new(ProductQueryRepository::new(pool.clone())),
            product_command: Arc::new(ProductCommandRepository::new(pool.clone())),
            order_query: Arc::new(OrderQueryRepository::new(pool.clone())),
            order_command: Arc::new(OrderCommandRepository::new(pool.clone())),
            cart_query: Arc::new(CartQueryRepository::new(pool.clone())),
            cart_command: Arc::new(CartCommandRepository::new(pool)),
        }
    }
}

#[derive(Clone)]
pub struct DependenciesInjectDeps {
    pub repositories: Repositories,
    pub hashing: DynHashing,
    pub jwt: DynJwtService,
    pub uploads: UploadStore,
}

#[derive(Clone)]
pub struct DependenciesInject {
    pub user_query: DynUserQueryService,
    pub user_command: DynUserCommandService,
    pub login: DynLoginService,
    pub product_query: DynProductQueryService,
    pub product_command: DynProductCommandService,
    pub order_query: DynOrderQueryService,
    pub order_command: DynOrderCommandService,
    pub cart_query: DynCartQueryService,
    pub cart_command: DynCartCommandService,
}

impl fmt::Debug for DependenciesInject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DependenciesInject")
            .field("user_query", &"UserQueryService")
            .field("user_command", &"UserCommandService")
            .field("login", &"LoginService")
            .field("product_query", &"ProductQueryService")
            .field("product_command", &"ProductCommandService")
            .field("order_query", &"OrderQueryService")
            .field("order_command", &"OrderCommandService")
            .field("cart_query", &"CartQueryService")
            .field("cart_command", &"CartCommandService")
            .finish()
    }
}

impl DependenciesInject {
    pub fn new(deps: DependenciesInjectDeps, registry: &mut Registry) -> Self {
        let DependenciesInjectDeps {
            repositories: repos,
            hashing,
            jwt,
            uploads,
        } = deps;

        let user_query = Arc::new(UserQueryService::new(repos.user_query.clone(), registry))
            as DynUserQueryService;

        let user_command = Arc::new(UserCommandService::new(
            repos.user_query.clone(),
            repos.user_command.clone(),
            hashing.clone(),
            registry,
        )) as DynUserCommandService;

        let login = Arc::new(LoginService::new(
            repos.user_query.clone(),
            hashing,
            jwt,
            registry,
        )) as DynLoginService;

        let product_query = Arc::new(ProductQueryService::new(
            repos.product_query.clone(),
            registry,
        )) as DynProductQueryService;

        let product_command = Arc::new(ProductCommandService::new(
            repos.product_command.clone(),
            uploads,
            registry,
        )) as DynProductCommandService;

        let order_query = Arc::new(OrderQueryService::new(repos.order_query.clone(), registry))
            as DynOrderQueryService;

        let order_command = Arc::new(OrderCommandService::new(
            repos.order_command.clone(),
            repos.user_query.clone(),
            registry,
        )) as DynOrderCommandService;

        let cart_query = Arc::new(CartQueryService::new(repos.cart_query.clone(), registry))
            as DynCartQueryService;

        let cart_command = Arc::new(CartCommandService::new(
            repos.cart_command.clone(),
            repos.cart_query.clone(),
            repos.user_query.clone(),
            repos.product_query.clone(),
            registry,
        )) as DynCartCommandService;

        Self {
            user_query,
            user_command,
            login,
            product_query,
            product_command,
            order_query,
            order_command,
            cart_query,
            cart_command,
        }
    }
}
