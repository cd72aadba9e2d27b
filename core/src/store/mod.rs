// core/src/store/mod.rs

//! Data-access seams. Handlers only ever see these traits, so the backend
//! (PostgreSQL in production, `MemoryStore` in tests) can be swapped freely.

pub mod memory;

use crate::error::StoreResult;
use crate::model::{Product, ProductDraft, Shopcart, ShopcartDraft};
use async_trait::async_trait;

pub use memory::MemoryStore;

#[async_trait]
pub trait ShopcartRepository: Send + Sync {
  /// The cart with its products, or `None`. Absence is not an error.
  async fn find_by_id(&self, id: i32) -> StoreResult<Option<Shopcart>>;

  /// Every cart, ordered by id.
  async fn all(&self) -> StoreResult<Vec<Shopcart>>;

  /// Carts holding at least one product named exactly `name`. Each carries all of its products.
  async fn filter_by_product_name(&self, name: &str) -> StoreResult<Vec<Shopcart>>;

  /// Persists a new cart with the draft's id and inserts its products.
  /// Fails with `StoreError::ShopcartExists` if the id is taken.
  async fn create(&self, draft: ShopcartDraft) -> StoreResult<Shopcart>;

  /// Replaces the cart's product collection with the draft's.
  ///
  /// Draft products naming an existing product of this cart are updated in place,
  /// the rest are inserted, and products absent from the draft are deleted.
  async fn update(&self, draft: ShopcartDraft) -> StoreResult<Shopcart>;

  /// Removes the cart and its products. Unknown ids are a no-op.
  async fn delete(&self, id: i32) -> StoreResult<()>;
}

#[async_trait]
pub trait ProductRepository: Send + Sync {
  async fn find(&self, id: i32) -> StoreResult<Option<Product>>;

  async fn list_for_shopcart(&self, shopcart_id: i32) -> StoreResult<Vec<Product>>;

  /// Inserts with a store-assigned id; `draft.id` is ignored.
  /// Fails with `StoreError::ShopcartNotFound` if the owning cart does not exist.
  async fn create(&self, draft: ProductDraft) -> StoreResult<Product>;

  async fn update(&self, product: Product) -> StoreResult<Product>;

  /// Unknown ids are a no-op.
  async fn delete(&self, id: i32) -> StoreResult<()>;

  /// Deletes every product of a cart, returning how many were removed.
  async fn clear_shopcart(&self, shopcart_id: i32) -> StoreResult<u64>;
}
