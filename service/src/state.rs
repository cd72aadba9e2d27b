// service/src/state.rs
use crate::config::AppConfig;
use crate::db::PgStore;
use crate::errors::Result;
use shopcart::{MemoryStore, ProductRepository, ShopcartRepository};
use std::sync::Arc;

/// Shared by every worker. Handlers reach storage only through these handles.
#[derive(Clone)]
pub struct AppState {
  pub shopcarts: Arc<dyn ShopcartRepository>,
  pub products: Arc<dyn ProductRepository>,
  pub config: Arc<AppConfig>,
}

impl AppState {
  /// Builds the state around a single backend that serves both repositories.
  pub fn new<S>(store: S, config: Arc<AppConfig>) -> Self
  where
    S: ShopcartRepository + ProductRepository + 'static,
  {
    let store = Arc::new(store);
    Self {
      shopcarts: store.clone(),
      products: store,
      config,
    }
  }

  /// Picks the backend from configuration: PostgreSQL when `DATABASE_URL` is set, memory otherwise.
  pub async fn from_config(config: Arc<AppConfig>) -> Result<Self> {
    match config.database_url.as_deref() {
      Some(database_url) => {
        let store = PgStore::connect(database_url).await?;
        if config.init_db {
          store.init_schema().await?;
        }
        Ok(Self::new(store, config))
      }
      None => {
        tracing::warn!("DATABASE_URL is not set; using the in-memory store. Data will not survive a restart.");
        Ok(Self::new(MemoryStore::new(), config))
      }
    }
  }
}
