// service/src/web/handlers/shopcart_handlers.rs

use actix_web::{http::header, web, HttpResponse};
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, instrument, warn};

use crate::errors::AppError;
use crate::state::AppState;
use shopcart::{Shopcart, ShopcartDraft, StoreError};

// --- Request DTO ---
#[derive(Deserialize, Debug)]
pub struct ListShopcartsQuery {
  /// Only return carts holding a product with exactly this name.
  pub name: Option<String>,
}

pub(crate) fn shopcart_not_found(id: i32) -> AppError {
  AppError::from(StoreError::ShopcartNotFound { id })
}

pub(crate) async fn load_shopcart(app_state: &AppState, id: i32) -> Result<Shopcart, AppError> {
  match app_state.shopcarts.find_by_id(id).await? {
    Some(shopcart) => Ok(shopcart),
    None => {
      warn!("Shop Cart with id {} not found.", id);
      Err(shopcart_not_found(id))
    }
  }
}

#[instrument(name = "handler::list_shopcarts", skip(app_state, query), fields(product_name = ?query.name))]
pub async fn list_shopcarts_handler(
  app_state: web::Data<AppState>,
  query: web::Query<ListShopcartsQuery>,
) -> Result<HttpResponse, AppError> {
  let shopcarts = match query.name.as_deref().filter(|name| !name.is_empty()) {
    Some(name) => {
      info!("Request for Shop Carts containing product '{}'.", name);
      app_state.shopcarts.filter_by_product_name(name).await?
    }
    None => {
      info!("Request for Shop Cart list.");
      app_state.shopcarts.all().await?
    }
  };

  info!("Returning {} shop carts.", shopcarts.len());
  Ok(HttpResponse::Ok().json(shopcarts))
}

#[instrument(name = "handler::get_shopcart", skip(app_state, path), fields(shopcart_id = %path.as_ref()))]
pub async fn get_shopcart_handler(app_state: web::Data<AppState>, path: web::Path<i32>) -> Result<HttpResponse, AppError> {
  let id = path.into_inner();
  info!("Request to Retrieve a shop cart with id [{}]", id);
  let shopcart = load_shopcart(&app_state, id).await?;
  Ok(HttpResponse::Ok().json(shopcart))
}

#[instrument(name = "handler::create_shopcart", skip(app_state, path, payload), fields(shopcart_id = %path.as_ref()))]
pub async fn create_shopcart_handler(
  app_state: web::Data<AppState>,
  path: web::Path<i32>,
  payload: web::Json<Value>,
) -> Result<HttpResponse, AppError> {
  let id = path.into_inner();
  info!("Request to Create a Shop Cart with id [{}]", id);

  let draft = ShopcartDraft::decode(&payload)?.with_id(id);
  if app_state.shopcarts.find_by_id(id).await?.is_some() {
    warn!("Shop Cart {} already exists.", id);
    return Err(AppError::from(StoreError::ShopcartExists { id }));
  }

  // A concurrent create that wins the race still surfaces as 409 via StoreError::ShopcartExists.
  let created = app_state.shopcarts.create(draft).await?;
  let location = app_state.config.url_for(&format!("/shopcarts/{}", created.id));
  info!(
    "Shop Cart with id [{}] created with {} products.",
    created.id,
    created.products.len()
  );

  Ok(
    HttpResponse::Created()
      .insert_header((header::LOCATION, location))
      .json(created),
  )
}

#[instrument(name = "handler::update_shopcart", skip(app_state, path, payload), fields(shopcart_id = %path.as_ref()))]
pub async fn update_shopcart_handler(
  app_state: web::Data<AppState>,
  path: web::Path<i32>,
  payload: web::Json<Value>,
) -> Result<HttpResponse, AppError> {
  let id = path.into_inner();
  info!("Request to Update a Shop Cart with id [{}]", id);

  load_shopcart(&app_state, id).await?;
  let draft = ShopcartDraft::decode(&payload)?.with_id(id);
  let updated = app_state.shopcarts.update(draft).await?;

  info!("Shop Cart [{}] now holds {} products.", id, updated.products.len());
  Ok(HttpResponse::Ok().json(updated))
}

#[instrument(name = "handler::delete_shopcart", skip(app_state, path), fields(shopcart_id = %path.as_ref()))]
pub async fn delete_shopcart_handler(
  app_state: web::Data<AppState>,
  path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
  let id = path.into_inner();
  info!("Request to Delete a shopcart with id [{}]", id);
  app_state.shopcarts.delete(id).await?;
  Ok(HttpResponse::NoContent().finish())
}

#[instrument(name = "handler::clear_shopcart", skip(app_state, path), fields(shopcart_id = %path.as_ref()))]
pub async fn clear_shopcart_handler(
  app_state: web::Data<AppState>,
  path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
  let id = path.into_inner();
  info!("Request to Clear a Shop Cart with id [{}]", id);

  load_shopcart(&app_state, id).await?;
  let removed = app_state.products.clear_shopcart(id).await?;

  info!("Removed {} products from Shop Cart [{}].", removed, id);
  Ok(HttpResponse::Ok().json(Shopcart::new(id)))
}
