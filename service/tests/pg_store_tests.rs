// tests/pg_store_tests.rs
//! Run with `DATABASE_URL=postgres://... cargo test -p shopcart_service -- --ignored`.
mod common;

use common::setup_tracing;
use serial_test::serial;
use shopcart::{ProductDraft, ProductRepository, ShopcartDraft, ShopcartRepository, StoreError};
use shopcart_service::db::PgStore;

// Ids far away from anything a developer creates by hand.
const CART_A: i32 = 910_001;
const CART_B: i32 = 910_002;
const MISSING_CART: i32 = 910_999;

async fn pg_store() -> PgStore {
  setup_tracing();
  let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for PostgreSQL tests");
  let store = PgStore::connect(&url).await.expect("connect");
  store.init_schema().await.expect("schema");
  for id in [CART_A, CART_B, MISSING_CART] {
    ShopcartRepository::delete(&store, id).await.expect("cleanup");
  }
  store
}

fn draft(name: &str, shopcart_id: i32) -> ProductDraft {
  ProductDraft {
    id: None,
    name: name.to_string(),
    quantity: 1,
    price: 1.5,
    shopcart_id,
  }
}

fn cart(id: i32, names: &[&str]) -> ShopcartDraft {
  ShopcartDraft {
    id,
    products: names.iter().map(|name| draft(name, id)).collect(),
  }
}

#[actix_web::test]
#[serial]
#[ignore = "requires PostgreSQL at DATABASE_URL"]
async fn test_duplicate_cart_is_exists_error() {
  let store = pg_store().await;
  ShopcartRepository::create(&store, cart(CART_A, &["Milk"])).await.unwrap();

  let err = ShopcartRepository::create(&store, cart(CART_A, &["Wine"])).await.unwrap_err();
  assert!(matches!(err, StoreError::ShopcartExists { id: CART_A }));

  // The failed transaction left nothing behind.
  let kept = store.find_by_id(CART_A).await.unwrap().unwrap();
  assert_eq!(kept.products.len(), 1);
  assert_eq!(kept.products[0].name, "Milk");
}

#[actix_web::test]
#[serial]
#[ignore = "requires PostgreSQL at DATABASE_URL"]
async fn test_product_for_missing_cart_is_not_found() {
  let store = pg_store().await;
  let err = ProductRepository::create(&store, draft("Milk", MISSING_CART)).await.unwrap_err();
  assert!(matches!(err, StoreError::ShopcartNotFound { id: MISSING_CART }));
}

#[actix_web::test]
#[serial]
#[ignore = "requires PostgreSQL at DATABASE_URL"]
async fn test_update_replaces_only_this_carts_products() {
  let store = pg_store().await;
  let created = ShopcartRepository::create(&store, cart(CART_A, &["Milk", "Bread"])).await.unwrap();
  let other = ShopcartRepository::create(&store, cart(CART_B, &["Cheese"])).await.unwrap();

  let mut milk = ProductDraft::from(&created.products[0]);
  milk.quantity = 5;
  // Naming another cart's product inserts a copy instead of moving it.
  let stolen = ProductDraft::from(&other.products[0]);
  let updated = ShopcartRepository::update(
    &store,
    ShopcartDraft {
      id: CART_A,
      products: vec![milk, stolen, draft("Butter", CART_A)],
    },
  )
  .await
  .unwrap();

  let names: Vec<&str> = updated.products.iter().map(|p| p.name.as_str()).collect();
  assert_eq!(names, vec!["Milk", "Cheese", "Butter"]);
  assert_eq!(updated.products[0].id, created.products[0].id);
  assert_eq!(updated.products[0].quantity, 5);
  assert_ne!(updated.products[1].id, other.products[0].id);
  assert!(updated.products.iter().all(|p| p.shopcart_id == CART_A));

  assert_eq!(store.find_by_id(CART_B).await.unwrap(), Some(other));
  assert_eq!(store.find_by_id(CART_A).await.unwrap(), Some(updated));
}

#[actix_web::test]
#[serial]
#[ignore = "requires PostgreSQL at DATABASE_URL"]
async fn test_filter_and_cascading_delete() {
  let store = pg_store().await;
  let a = ShopcartRepository::create(&store, cart(CART_A, &["Milk", "Milk", "Bread"])).await.unwrap();
  ShopcartRepository::create(&store, cart(CART_B, &["Bread"])).await.unwrap();

  let milk: Vec<i32> = store
    .filter_by_product_name("Milk")
    .await
    .unwrap()
    .iter()
    .map(|c| c.id)
    .filter(|id| *id == CART_A || *id == CART_B)
    .collect();
  assert_eq!(milk, vec![CART_A]);

  ShopcartRepository::delete(&store, CART_A).await.unwrap();
  assert_eq!(store.find_by_id(CART_A).await.unwrap(), None);
  assert_eq!(store.find(a.products[0].id).await.unwrap(), None);
  assert_eq!(store.list_for_shopcart(CART_B).await.unwrap().len(), 1);
}
