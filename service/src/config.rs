// service/src/config.rs

use crate::errors::{AppError, Result};
use dotenvy::dotenv;
use std::env;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
  Text,
  Json,
}

impl FromStr for LogFormat {
  type Err = AppError;

  fn from_str(s: &str) -> Result<Self> {
    match s.trim().to_ascii_lowercase().as_str() {
      "text" | "pretty" => Ok(LogFormat::Text),
      "json" => Ok(LogFormat::Json),
      other => Err(AppError::Config(format!(
        "Invalid LOG_FORMAT '{}': expected 'text' or 'json'",
        other
      ))),
    }
  }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub server_host: String,
  pub server_port: u16,
  /// PostgreSQL connection string. `None` selects the in-memory store.
  pub database_url: Option<String>,
  /// Prefix for `Location` headers, without a trailing slash.
  pub app_base_url: String,
  /// Create tables at startup when running against PostgreSQL.
  pub init_db: bool,
  pub log_format: LogFormat,
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present

    let get_env = |var_name: &str| {
      env::var(var_name).map_err(|e| AppError::Config(format!("Missing environment variable '{}': {}", var_name, e)))
    };

    let server_host = get_env("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let server_port = get_env("SERVER_PORT")
      .unwrap_or_else(|_| "8080".to_string())
      .parse::<u16>()
      .map_err(|e| AppError::Config(format!("Invalid SERVER_PORT: {}", e)))?;
    let database_url = get_env("DATABASE_URL").ok().filter(|url| !url.trim().is_empty());
    let app_base_url = get_env("APP_BASE_URL")
      .unwrap_or_else(|_| format!("http://{}:{}", server_host, server_port))
      .trim_end_matches('/')
      .to_string();

    let init_db = get_env("INIT_DB")
      .unwrap_or_else(|_| "true".to_string())
      .parse::<bool>()
      .map_err(|e| AppError::Config(format!("Invalid INIT_DB value: {}", e)))?;
    let log_format = get_env("LOG_FORMAT")
      .unwrap_or_else(|_| "text".to_string())
      .parse::<LogFormat>()?;

    tracing::info!(
      store = if database_url.is_some() { "postgres" } else { "memory" },
      "Application configuration loaded successfully."
    );

    Ok(Self {
      server_host,
      server_port,
      database_url,
      app_base_url,
      init_db,
      log_format,
    })
  }

  /// Bind address in `host:port` form.
  pub fn server_address(&self) -> String {
    format!("{}:{}", self.server_host, self.server_port)
  }

  /// Absolute URL for a path such as `/shopcarts/1`.
  pub fn url_for(&self, path: &str) -> String {
    format!("{}{}", self.app_base_url, path)
  }
}
