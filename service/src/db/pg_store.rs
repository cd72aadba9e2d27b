// service/src/db/pg_store.rs

use crate::errors::{AppError, Result as AppResult};
use async_trait::async_trait;
use shopcart::{
  Product, ProductDraft, ProductRepository, Shopcart, ShopcartDraft, ShopcartRepository, StoreError, StoreResult,
};
use sqlx::{FromRow, PgPool, Postgres};
use std::collections::{BTreeMap, HashSet};
use tracing::{debug, info, instrument};

/// Executed in order by `PgStore::init_schema`. Every statement is idempotent.
const SCHEMA: [&str; 3] = [
  "CREATE TABLE IF NOT EXISTS shopcart (id INTEGER PRIMARY KEY)",
  r#"
  CREATE TABLE IF NOT EXISTS product (
    id SERIAL PRIMARY KEY,
    name VARCHAR(260) NOT NULL,
    quantity INTEGER NOT NULL,
    price DOUBLE PRECISION NOT NULL,
    shopcart_id INTEGER NOT NULL REFERENCES shopcart(id) ON DELETE CASCADE
  )
  "#,
  "CREATE INDEX IF NOT EXISTS product_name_idx ON product (name)",
];

const PRODUCT_COLUMNS: &str = "id, name, quantity, price, shopcart_id";

#[derive(Debug, FromRow)]
struct ProductRow {
  id: i32,
  name: String,
  quantity: i32,
  price: f64,
  shopcart_id: i32,
}

impl From<ProductRow> for Product {
  fn from(row: ProductRow) -> Self {
    Product {
      id: row.id,
      name: row.name,
      quantity: row.quantity,
      price: row.price,
      shopcart_id: row.shopcart_id,
    }
  }
}

fn backend(err: sqlx::Error) -> StoreError {
  StoreError::from(anyhow::Error::new(err))
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
  matches!(err, sqlx::Error::Database(db_err) if db_err.is_unique_violation())
}

fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
  matches!(err, sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation())
}

async fn insert_product<'e, E>(executor: E, draft: &ProductDraft) -> Result<Product, sqlx::Error>
where
  E: sqlx::Executor<'e, Database = Postgres>,
{
  let row: ProductRow = sqlx::query_as(&format!(
    "INSERT INTO product (name, quantity, price, shopcart_id) VALUES ($1, $2, $3, $4) RETURNING {}",
    PRODUCT_COLUMNS
  ))
  .bind(&draft.name)
  .bind(draft.quantity)
  .bind(draft.price)
  .bind(draft.shopcart_id)
  .fetch_one(executor)
  .await?;
  Ok(row.into())
}

async fn products_of<'e, E>(executor: E, shopcart_id: i32) -> Result<Vec<Product>, sqlx::Error>
where
  E: sqlx::Executor<'e, Database = Postgres>,
{
  let rows: Vec<ProductRow> = sqlx::query_as(&format!(
    "SELECT {} FROM product WHERE shopcart_id = $1 ORDER BY id",
    PRODUCT_COLUMNS
  ))
  .bind(shopcart_id)
  .fetch_all(executor)
  .await?;
  Ok(rows.into_iter().map(Product::from).collect())
}

/// PostgreSQL-backed implementation of both repositories.
#[derive(Debug, Clone)]
pub struct PgStore {
  pool: PgPool,
}

impl PgStore {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }

  pub async fn connect(database_url: &str) -> AppResult<Self> {
    let pool = PgPool::connect(database_url).await?;
    info!("Successfully connected to the database.");
    Ok(Self::new(pool))
  }

  /// Creates the `shopcart` and `product` tables if they are missing.
  pub async fn init_schema(&self) -> AppResult<()> {
    for statement in SCHEMA {
      sqlx::query(statement)
        .execute(&self.pool)
        .await
        .map_err(AppError::Sqlx)?;
    }
    info!("Database schema initialized.");
    Ok(())
  }

  /// Loads the given carts (already ordered) with their products in one extra query.
  async fn assemble(&self, ids: Vec<i32>) -> StoreResult<Vec<Shopcart>> {
    if ids.is_empty() {
      return Ok(Vec::new());
    }
    let rows: Vec<ProductRow> = sqlx::query_as(&format!(
      "SELECT {} FROM product WHERE shopcart_id = ANY($1) ORDER BY id",
      PRODUCT_COLUMNS
    ))
    .bind(&ids)
    .fetch_all(&self.pool)
    .await
    .map_err(backend)?;

    let mut by_cart: BTreeMap<i32, Vec<Product>> = BTreeMap::new();
    for row in rows {
      by_cart.entry(row.shopcart_id).or_default().push(row.into());
    }
    Ok(
      ids
        .into_iter()
        .map(|id| Shopcart {
          id,
          products: by_cart.remove(&id).unwrap_or_default(),
        })
        .collect(),
    )
  }
}

#[async_trait]
impl ShopcartRepository for PgStore {
  async fn find_by_id(&self, id: i32) -> StoreResult<Option<Shopcart>> {
    let found: Option<i32> = sqlx::query_scalar("SELECT id FROM shopcart WHERE id = $1")
      .bind(id)
      .fetch_optional(&self.pool)
      .await
      .map_err(backend)?;
    match found {
      Some(id) => {
        let products = products_of(&self.pool, id).await.map_err(backend)?;
        Ok(Some(Shopcart { id, products }))
      }
      None => Ok(None),
    }
  }

  async fn all(&self) -> StoreResult<Vec<Shopcart>> {
    let ids: Vec<i32> = sqlx::query_scalar("SELECT id FROM shopcart ORDER BY id")
      .fetch_all(&self.pool)
      .await
      .map_err(backend)?;
    debug!(count = ids.len(), "pg store: listed shopcarts");
    self.assemble(ids).await
  }

  async fn filter_by_product_name(&self, name: &str) -> StoreResult<Vec<Shopcart>> {
    let ids: Vec<i32> =
      sqlx::query_scalar("SELECT DISTINCT shopcart_id FROM product WHERE name = $1 ORDER BY shopcart_id")
        .bind(name)
        .fetch_all(&self.pool)
        .await
        .map_err(backend)?;
    debug!(product_name = %name, count = ids.len(), "pg store: filtered shopcarts");
    self.assemble(ids).await
  }

  #[instrument(name = "pg_store::create_shopcart", skip(self, draft), fields(shopcart_id = draft.id), err(Display))]
  async fn create(&self, draft: ShopcartDraft) -> StoreResult<Shopcart> {
    let id = draft.id;
    let mut tx = self.pool.begin().await.map_err(backend)?;

    sqlx::query("INSERT INTO shopcart (id) VALUES ($1)")
      .bind(id)
      .execute(&mut *tx)
      .await
      .map_err(|e| {
        if is_unique_violation(&e) {
          StoreError::ShopcartExists { id }
        } else {
          backend(e)
        }
      })?;

    let mut products = Vec::with_capacity(draft.products.len());
    for product in draft.products {
      let product = product.for_shopcart(id);
      products.push(insert_product(&mut *tx, &product).await.map_err(backend)?);
    }

    tx.commit().await.map_err(backend)?;
    Ok(Shopcart { id, products })
  }

  #[instrument(name = "pg_store::update_shopcart", skip(self, draft), fields(shopcart_id = draft.id), err(Display))]
  async fn update(&self, draft: ShopcartDraft) -> StoreResult<Shopcart> {
    let id = draft.id;
    let mut tx = self.pool.begin().await.map_err(backend)?;

    let locked: Option<i32> = sqlx::query_scalar("SELECT id FROM shopcart WHERE id = $1 FOR UPDATE")
      .bind(id)
      .fetch_optional(&mut *tx)
      .await
      .map_err(backend)?;
    if locked.is_none() {
      return Err(StoreError::ShopcartNotFound { id });
    }

    let owned: HashSet<i32> = sqlx::query_scalar::<_, i32>("SELECT id FROM product WHERE shopcart_id = $1")
      .bind(id)
      .fetch_all(&mut *tx)
      .await
      .map_err(backend)?
      .into_iter()
      .collect();

    let mut kept: Vec<i32> = Vec::new();
    let mut fresh = Vec::new();
    for product in draft.products {
      let product = product.for_shopcart(id);
      match product.id {
        Some(pid) if owned.contains(&pid) && !kept.contains(&pid) => {
          sqlx::query("UPDATE product SET name = $2, quantity = $3, price = $4 WHERE id = $1")
            .bind(pid)
            .bind(&product.name)
            .bind(product.quantity)
            .bind(product.price)
            .execute(&mut *tx)
            .await
            .map_err(backend)?;
          kept.push(pid);
        }
        _ => fresh.push(product),
      }
    }

    let removed = sqlx::query("DELETE FROM product WHERE shopcart_id = $1 AND NOT (id = ANY($2))")
      .bind(id)
      .bind(&kept)
      .execute(&mut *tx)
      .await
      .map_err(backend)?
      .rows_affected();

    for product in &fresh {
      insert_product(&mut *tx, product).await.map_err(backend)?;
    }

    let products = products_of(&mut *tx, id).await.map_err(backend)?;
    tx.commit().await.map_err(backend)?;
    debug!(kept = kept.len(), inserted = fresh.len(), removed, "pg store: shopcart replaced");
    Ok(Shopcart { id, products })
  }

  async fn delete(&self, id: i32) -> StoreResult<()> {
    let result = sqlx::query("DELETE FROM shopcart WHERE id = $1")
      .bind(id)
      .execute(&self.pool)
      .await
      .map_err(backend)?;
    debug!(shopcart_id = id, deleted = result.rows_affected(), "pg store: shopcart delete");
    Ok(())
  }
}

#[async_trait]
impl ProductRepository for PgStore {
  async fn find(&self, id: i32) -> StoreResult<Option<Product>> {
    let row: Option<ProductRow> = sqlx::query_as(&format!("SELECT {} FROM product WHERE id = $1", PRODUCT_COLUMNS))
      .bind(id)
      .fetch_optional(&self.pool)
      .await
      .map_err(backend)?;
    Ok(row.map(Product::from))
  }

  async fn list_for_shopcart(&self, shopcart_id: i32) -> StoreResult<Vec<Product>> {
    products_of(&self.pool, shopcart_id).await.map_err(backend)
  }

  #[instrument(name = "pg_store::create_product", skip(self, draft), fields(shopcart_id = draft.shopcart_id), err(Display))]
  async fn create(&self, draft: ProductDraft) -> StoreResult<Product> {
    insert_product(&self.pool, &draft).await.map_err(|e| {
      if is_foreign_key_violation(&e) {
        StoreError::ShopcartNotFound { id: draft.shopcart_id }
      } else {
        backend(e)
      }
    })
  }

  #[instrument(name = "pg_store::update_product", skip(self, product), fields(product_id = product.id), err(Display))]
  async fn update(&self, product: Product) -> StoreResult<Product> {
    let row: Option<ProductRow> = sqlx::query_as(&format!(
      "UPDATE product SET name = $2, quantity = $3, price = $4, shopcart_id = $5 WHERE id = $1 RETURNING {}",
      PRODUCT_COLUMNS
    ))
    .bind(product.id)
    .bind(&product.name)
    .bind(product.quantity)
    .bind(product.price)
    .bind(product.shopcart_id)
    .fetch_optional(&self.pool)
    .await
    .map_err(|e| {
      if is_foreign_key_violation(&e) {
        StoreError::ShopcartNotFound { id: product.shopcart_id }
      } else {
        backend(e)
      }
    })?;
    row
      .map(Product::from)
      .ok_or(StoreError::ProductNotFound { id: product.id })
  }

  async fn delete(&self, id: i32) -> StoreResult<()> {
    sqlx::query("DELETE FROM product WHERE id = $1")
      .bind(id)
      .execute(&self.pool)
      .await
      .map_err(backend)?;
    Ok(())
  }

  async fn clear_shopcart(&self, shopcart_id: i32) -> StoreResult<u64> {
    let removed = sqlx::query("DELETE FROM product WHERE shopcart_id = $1")
      .bind(shopcart_id)
      .execute(&self.pool)
      .await
      .map_err(backend)?
      .rows_affected();
    debug!(shopcart_id, removed, "pg store: shopcart cleared");
    Ok(removed)
  }
}
