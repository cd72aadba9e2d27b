// service/src/web/handlers/index_handlers.rs

use actix_web::{http::header::ContentType, HttpResponse};

const INDEX_HTML: &str = include_str!("../../../static/index.html");

/// Landing page at `/`.
pub async fn index_handler() -> HttpResponse {
  HttpResponse::Ok().content_type(ContentType::html()).body(INDEX_HTML)
}

// Liveness only; it does not touch the store.
pub async fn health_check_handler() -> HttpResponse {
  HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}
