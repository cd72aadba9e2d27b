// core/src/store/memory.rs

use crate::error::{StoreError, StoreResult};
use crate::model::{Product, ProductDraft, Shopcart, ShopcartDraft};
use crate::store::{ProductRepository, ShopcartRepository};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Default)]
struct Tables {
  shopcarts: BTreeSet<i32>,
  products: BTreeMap<i32, Product>,
  last_product_id: i32,
}

impl Tables {
  fn load(&self, id: i32) -> Shopcart {
    Shopcart {
      id,
      products: self
        .products
        .values()
        .filter(|p| p.shopcart_id == id)
        .cloned()
        .collect(),
    }
  }

  fn insert_product(&mut self, draft: ProductDraft) -> Product {
    self.last_product_id += 1;
    let product = draft.into_product(self.last_product_id);
    self.products.insert(product.id, product.clone());
    product
  }

  fn remove_products_of(&mut self, shopcart_id: i32) -> u64 {
    let before = self.products.len();
    self.products.retain(|_, p| p.shopcart_id != shopcart_id);
    (before - self.products.len()) as u64
  }
}

/// Process-local store backed by ordered maps.
///
/// Cloning shares the same tables. Lock guards are never held across an `.await`.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
  tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
  pub fn new() -> Self {
    Self::default()
  }
}

#[async_trait]
impl ShopcartRepository for MemoryStore {
  async fn find_by_id(&self, id: i32) -> StoreResult<Option<Shopcart>> {
    let tables = self.tables.read();
    Ok(tables.shopcarts.contains(&id).then(|| tables.load(id)))
  }

  async fn all(&self) -> StoreResult<Vec<Shopcart>> {
    let tables = self.tables.read();
    Ok(tables.shopcarts.iter().map(|id| tables.load(*id)).collect())
  }

  async fn filter_by_product_name(&self, name: &str) -> StoreResult<Vec<Shopcart>> {
    let tables = self.tables.read();
    let matching: BTreeSet<i32> = tables
      .products
      .values()
      .filter(|p| p.name == name)
      .map(|p| p.shopcart_id)
      .collect();
    debug!(product_name = %name, matches = matching.len(), "memory store: filter by product name");
    Ok(matching.into_iter().map(|id| tables.load(id)).collect())
  }

  async fn create(&self, draft: ShopcartDraft) -> StoreResult<Shopcart> {
    let mut tables = self.tables.write();
    if !tables.shopcarts.insert(draft.id) {
      return Err(StoreError::ShopcartExists { id: draft.id });
    }
    let id = draft.id;
    for product in draft.products {
      tables.insert_product(product.for_shopcart(id));
    }
    debug!(shopcart_id = id, "memory store: shopcart created");
    Ok(tables.load(id))
  }

  async fn update(&self, draft: ShopcartDraft) -> StoreResult<Shopcart> {
    let mut tables = self.tables.write();
    let id = draft.id;
    if !tables.shopcarts.contains(&id) {
      return Err(StoreError::ShopcartNotFound { id });
    }

    let owned: HashSet<i32> = tables
      .products
      .values()
      .filter(|p| p.shopcart_id == id)
      .map(|p| p.id)
      .collect();
    let mut kept = HashSet::new();
    let mut fresh = Vec::new();
    for product in draft.products {
      let product = product.for_shopcart(id);
      match product.id {
        Some(pid) if owned.contains(&pid) && kept.insert(pid) => {
          tables.products.insert(pid, product.into_product(pid));
        }
        _ => fresh.push(product),
      }
    }
    tables.products.retain(|pid, p| p.shopcart_id != id || kept.contains(pid));
    for product in fresh {
      tables.insert_product(product);
    }

    debug!(shopcart_id = id, kept = kept.len(), "memory store: shopcart replaced");
    Ok(tables.load(id))
  }

  async fn delete(&self, id: i32) -> StoreResult<()> {
    let mut tables = self.tables.write();
    if tables.shopcarts.remove(&id) {
      let removed = tables.remove_products_of(id);
      debug!(shopcart_id = id, products_removed = removed, "memory store: shopcart deleted");
    }
    Ok(())
  }
}

#[async_trait]
impl ProductRepository for MemoryStore {
  async fn find(&self, id: i32) -> StoreResult<Option<Product>> {
    Ok(self.tables.read().products.get(&id).cloned())
  }

  async fn list_for_shopcart(&self, shopcart_id: i32) -> StoreResult<Vec<Product>> {
    Ok(self.tables.read().load(shopcart_id).products)
  }

  async fn create(&self, draft: ProductDraft) -> StoreResult<Product> {
    let mut tables = self.tables.write();
    if !tables.shopcarts.contains(&draft.shopcart_id) {
      return Err(StoreError::ShopcartNotFound { id: draft.shopcart_id });
    }
    let product = tables.insert_product(draft);
    debug!(product_id = product.id, shopcart_id = product.shopcart_id, "memory store: product created");
    Ok(product)
  }

  async fn update(&self, product: Product) -> StoreResult<Product> {
    let mut tables = self.tables.write();
    if !tables.shopcarts.contains(&product.shopcart_id) {
      return Err(StoreError::ShopcartNotFound { id: product.shopcart_id });
    }
    match tables.products.get_mut(&product.id) {
      Some(slot) => {
        *slot = product.clone();
        Ok(product)
      }
      None => Err(StoreError::ProductNotFound { id: product.id }),
    }
  }

  async fn delete(&self, id: i32) -> StoreResult<()> {
    self.tables.write().products.remove(&id);
    Ok(())
  }

  async fn clear_shopcart(&self, shopcart_id: i32) -> StoreResult<u64> {
    let removed = self.tables.write().remove_products_of(shopcart_id);
    debug!(shopcart_id, products_removed = removed, "memory store: shopcart cleared");
    Ok(removed)
  }
}
