// service/src/main.rs

use shopcart_service::config::{AppConfig, LogFormat};
use shopcart_service::state::AppState;
use shopcart_service::web::configure_app_routes;

use actix_web::{middleware, web as actix_data, App, HttpServer};
use std::io;
use std::sync::Arc;
use tracing_subscriber::fmt::format::FmtSpan; // For span events in tracing
use tracing_subscriber::EnvFilter;

fn init_tracing(format: LogFormat) {
  // RUST_LOG overrides the default level
  let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
  let builder = tracing_subscriber::fmt()
    .with_env_filter(env_filter)
    .with_span_events(FmtSpan::CLOSE); // Log when spans close, showing duration
  match format {
    LogFormat::Json => builder.json().init(),
    LogFormat::Text => builder.init(),
  }
}

#[actix_web::main]
async fn main() -> io::Result<()> {
  // Load application configuration
  let app_config = match AppConfig::from_env() {
    Ok(cfg) => Arc::new(cfg),
    Err(e) => {
      init_tracing(LogFormat::Text);
      tracing::error!(error = %e, "Failed to load application configuration.");
      return Err(io::Error::other(e));
    }
  };
  init_tracing(app_config.log_format);
  tracing::info!("Starting shopcart server...");

  let app_state = AppState::from_config(app_config.clone()).await.map_err(|e| {
    tracing::error!(error = %e, "Failed to initialize storage.");
    io::Error::other(e)
  })?;

  let server_address = app_config.server_address();
  tracing::info!("Attempting to bind server to {}...", server_address);

  HttpServer::new(move || {
    App::new()
      .app_data(actix_data::Data::new(app_state.clone())) // Share AppState with handlers
      .wrap(middleware::NormalizePath::trim())
      .wrap(tracing_actix_web::TracingLogger::default()) // Actix middleware for tracing requests
      .configure(configure_app_routes)
  })
  .bind(&server_address)?
  .run()
  .await
}
