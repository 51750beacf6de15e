use std::sync::Arc;

use sqlx::PgPool;

use crate::config::AppConfig;
use crate::database::{CategoryRepository, OrderRepository, ProductRepository, UserRepository};
use crate::storage::ImageStore;

/// Process-wide context: built once at startup, after the database pool is
/// connected and before the listener binds, then handed to handlers via
/// axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub pool: PgPool,
}

impl AppState {
    pub fn new(config: AppConfig, pool: PgPool) -> Self {
        Self {
            config: Arc::new(config),
            pool,
        }
    }

    pub fn products(&self) -> ProductRepository {
        ProductRepository::new(self.pool.clone())
    }

    pub fn categories(&self) -> CategoryRepository {
        CategoryRepository::new(self.pool.clone())
    }

    pub fn users(&self) -> UserRepository {
        UserRepository::new(self.pool.clone())
    }

    pub fn orders(&self) -> OrderRepository {
        OrderRepository::new(self.pool.clone())
    }

    pub fn image_store(&self) -> ImageStore {
        ImageStore::new(&self.config.uploads)
    }
}
