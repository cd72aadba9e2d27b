// service/src/web/routes.rs

use actix_web::{error, web, HttpRequest};

use crate::errors::AppError;
use crate::web::handlers::{index_handlers, product_handlers, shopcart_handlers};

// Extractor failures are rendered through AppError so every error body has the same shape.
fn json_error_handler(err: error::JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
  AppError::from(err).into()
}

fn path_error_handler(err: error::PathError, req: &HttpRequest) -> actix_web::Error {
  tracing::debug!(path = %req.path(), error = %err, "Unparsable path parameter");
  AppError::NotFound(format!("No resource found at '{}'.", req.path())).into()
}

fn query_error_handler(err: error::QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
  AppError::BadRequest(err.to_string()).into()
}

// This function will be called in `main.rs` (and by the HTTP tests) to configure services for the Actix App.
pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg
    .app_data(web::JsonConfig::default().error_handler(json_error_handler))
    .app_data(web::PathConfig::default().error_handler(path_error_handler))
    .app_data(web::QueryConfig::default().error_handler(query_error_handler))
    .route("/", web::get().to(index_handlers::index_handler))
    .route("/health", web::get().to(index_handlers::health_check_handler))
    // Shop Cart collection
    .service(web::resource("/shopcarts").route(web::get().to(shopcart_handlers::list_shopcarts_handler)))
    // Single Shop Cart
    .service(
      web::resource("/shopcarts/{id}")
        .route(web::get().to(shopcart_handlers::get_shopcart_handler))
        .route(web::post().to(shopcart_handlers::create_shopcart_handler))
        .route(web::put().to(shopcart_handlers::update_shopcart_handler))
        .route(web::delete().to(shopcart_handlers::delete_shopcart_handler)),
    )
    // Shop Cart actions
    .service(web::resource("/shopcarts/{id}/clear").route(web::put().to(shopcart_handlers::clear_shopcart_handler)))
    // Products of a Shop Cart
    .service(
      web::resource("/shopcarts/{id}/products")
        .route(web::get().to(product_handlers::list_products_handler))
        .route(web::post().to(product_handlers::add_product_handler)),
    )
    .service(
      web::resource("/shopcarts/{id}/products/{product_id}")
        .route(web::get().to(product_handlers::get_product_handler))
        .route(web::put().to(product_handlers::update_product_handler))
        .route(web::delete().to(product_handlers::delete_product_handler)),
    )
    // Flat product creation; the owning cart comes from the body
    .service(web::resource(["/product", "/products"]).route(web::post().to(product_handlers::create_product_handler)));
}
