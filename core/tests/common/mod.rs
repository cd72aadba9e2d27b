// tests/common/mod.rs
#![allow(dead_code)] // Not every test file uses every helper

use once_cell::sync::Lazy;
use shopcart::{MemoryStore, ProductDraft, ProductRepository, Shopcart, ShopcartDraft, ShopcartRepository};
use tracing::Level;

// --- Helper for Tracing Setup ---
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

// --- Fixture builders ---
pub fn product_draft(name: &str, quantity: i32, price: f64, shopcart_id: i32) -> ProductDraft {
  ProductDraft {
    id: None,
    name: name.to_string(),
    quantity,
    price,
    shopcart_id,
  }
}

pub fn cart_draft(id: i32, names: &[&str]) -> ShopcartDraft {
  ShopcartDraft {
    id,
    products: names.iter().map(|name| product_draft(name, 1, 1.0, id)).collect(),
  }
}

/// A store seeded with `carts`, each entry being (cart id, product names).
pub async fn seeded_store(carts: &[(i32, &[&str])]) -> MemoryStore {
  let store = MemoryStore::new();
  for (id, names) in carts {
    ShopcartRepository::create(&store, cart_draft(*id, names))
      .await
      .expect("seeding shopcart");
  }
  store
}

pub fn ids(carts: &[Shopcart]) -> Vec<i32> {
  carts.iter().map(|c| c.id).collect()
}

pub fn as_carts(store: &MemoryStore) -> &dyn ShopcartRepository {
  store
}

pub fn as_products(store: &MemoryStore) -> &dyn ProductRepository {
  store
}
