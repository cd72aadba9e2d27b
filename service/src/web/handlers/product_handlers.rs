// service/src/web/handlers/product_handlers.rs

use actix_web::{http::header, web, HttpResponse};
use serde_json::Value;
use tracing::{info, instrument, warn};

use super::shopcart_handlers::load_shopcart;
use crate::errors::AppError;
use crate::state::AppState;
use shopcart::{Product, ProductDraft, StoreError};

/// Looks a product up and insists it belongs to `shopcart_id`.
async fn load_owned_product(app_state: &AppState, shopcart_id: i32, product_id: i32) -> Result<Product, AppError> {
  match app_state.products.find(product_id).await? {
    Some(product) if product.shopcart_id == shopcart_id => Ok(product),
    _ => {
      warn!("Product {} not found in Shop Cart {}.", product_id, shopcart_id);
      Err(AppError::from(StoreError::ProductNotFound { id: product_id }))
    }
  }
}

fn product_location(app_state: &AppState, product: &Product) -> String {
  app_state
    .config
    .url_for(&format!("/shopcarts/{}/products/{}", product.shopcart_id, product.id))
}

#[instrument(name = "handler::list_products", skip(app_state, path), fields(shopcart_id = %path.as_ref()))]
pub async fn list_products_handler(
  app_state: web::Data<AppState>,
  path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
  let id = path.into_inner();
  info!("Request to list Products of Shop Cart [{}]", id);

  let shopcart = load_shopcart(&app_state, id).await?;
  info!("[{}] Products returned", shopcart.products.len());
  Ok(HttpResponse::Ok().json(shopcart.products))
}

#[instrument(name = "handler::add_product", skip(app_state, path, payload), fields(shopcart_id = %path.as_ref()))]
pub async fn add_product_handler(
  app_state: web::Data<AppState>,
  path: web::Path<i32>,
  payload: web::Json<Value>,
) -> Result<HttpResponse, AppError> {
  let id = path.into_inner();
  info!("Request to Create a Product in Shop Cart [{}]", id);

  load_shopcart(&app_state, id).await?;
  let draft = ProductDraft::decode(&payload)?.for_shopcart(id);
  let product = app_state.products.create(draft).await?;

  info!("Product [{}] '{}' added to Shop Cart [{}].", product.id, product.name, id);
  Ok(
    HttpResponse::Created()
      .insert_header((header::LOCATION, product_location(&app_state, &product)))
      .json(product),
  )
}

/// Flat-path variant: the owning cart comes from the body's `shopcart_id`.
#[instrument(name = "handler::create_product", skip(app_state, payload))]
pub async fn create_product_handler(
  app_state: web::Data<AppState>,
  payload: web::Json<Value>,
) -> Result<HttpResponse, AppError> {
  let draft = ProductDraft::decode(&payload)?;
  info!("Request to Create a Product in Shop Cart [{}]", draft.shopcart_id);

  let product = app_state.products.create(draft).await?;
  info!("Product [{}] created in Shop Cart [{}].", product.id, product.shopcart_id);
  Ok(
    HttpResponse::Created()
      .insert_header((header::LOCATION, product_location(&app_state, &product)))
      .json(product),
  )
}

#[instrument(name = "handler::get_product", skip(app_state, path), fields(shopcart_id = %path.as_ref().0, product_id = %path.as_ref().1))]
pub async fn get_product_handler(
  app_state: web::Data<AppState>,
  path: web::Path<(i32, i32)>,
) -> Result<HttpResponse, AppError> {
  let (id, product_id) = path.into_inner();
  info!(
    "Request to Retrieve a Product with id [{}] for Shop Cart with id [{}]",
    product_id, id
  );
  let product = load_owned_product(&app_state, id, product_id).await?;
  Ok(HttpResponse::Ok().json(product))
}

#[instrument(name = "handler::update_product", skip(app_state, path, payload), fields(shopcart_id = %path.as_ref().0, product_id = %path.as_ref().1))]
pub async fn update_product_handler(
  app_state: web::Data<AppState>,
  path: web::Path<(i32, i32)>,
  payload: web::Json<Value>,
) -> Result<HttpResponse, AppError> {
  let (id, product_id) = path.into_inner();
  info!(
    "Request to Update a Product with id [{}] for Shop Cart with id [{}]",
    product_id, id
  );

  let mut product = load_owned_product(&app_state, id, product_id).await?;
  let draft = ProductDraft::decode(&payload)?.for_shopcart(id);
  product.apply(draft);
  let updated = app_state.products.update(product).await?;

  Ok(HttpResponse::Ok().json(updated))
}

#[instrument(name = "handler::delete_product", skip(app_state, path), fields(shopcart_id = %path.as_ref().0, product_id = %path.as_ref().1))]
pub async fn delete_product_handler(
  app_state: web::Data<AppState>,
  path: web::Path<(i32, i32)>,
) -> Result<HttpResponse, AppError> {
  let (id, product_id) = path.into_inner();
  info!(
    "Request to Delete a Product with id [{}] for Shop Cart with id [{}]",
    product_id, id
  );

  match app_state.products.find(product_id).await? {
    Some(product) if product.shopcart_id == id => {
      app_state.products.delete(product_id).await?;
      info!("Product with id [{}] was deleted", product_id);
    }
    _ => info!("Product with id [{}] not in Shop Cart [{}]; nothing to delete", product_id, id),
  }
  Ok(HttpResponse::NoContent().finish())
}
