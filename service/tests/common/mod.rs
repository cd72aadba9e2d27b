// tests/common/mod.rs
#![allow(dead_code)] // Not every test file uses every helper

use once_cell::sync::Lazy;
use serde_json::{json, Value};
use shopcart::MemoryStore;
use shopcart_service::config::{AppConfig, LogFormat};
use shopcart_service::AppState;
use std::sync::Arc;
use tracing::Level;

pub const BASE_URL: &str = "http://localhost:8080";

static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer()
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

pub fn test_config() -> Arc<AppConfig> {
  Arc::new(AppConfig {
    server_host: "127.0.0.1".to_string(),
    server_port: 8080,
    database_url: None,
    app_base_url: BASE_URL.to_string(),
    init_db: false,
    log_format: LogFormat::Text,
  })
}

pub fn memory_state() -> AppState {
  AppState::new(MemoryStore::new(), test_config())
}

pub fn product_json(name: &str, quantity: i32, price: f64, shopcart_id: i32) -> Value {
  json!({"name": name, "quantity": quantity, "price": price, "shopcart_id": shopcart_id})
}

pub fn cart_json(id: i32, products: Vec<Value>) -> Value {
  json!({"id": id, "products": products})
}

/// Builds the full application around `$state`, wired exactly like the server binary.
macro_rules! test_app {
  ($state:expr) => {
    actix_web::test::init_service(
      actix_web::App::new()
        .app_data(actix_web::web::Data::new($state))
        .wrap(actix_web::middleware::NormalizePath::trim())
        .configure(shopcart_service::web::configure_app_routes),
    )
    .await
  };
}
pub(crate) use test_app;
