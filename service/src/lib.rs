// service/src/lib.rs

//! HTTP façade of the shopcart service: configuration, PostgreSQL storage,
//! shared state and the actix-web routes. Domain types live in the `shopcart` crate.

pub mod config;
pub mod db;
pub mod errors;
pub mod state;
pub mod web;

pub use crate::errors::{AppError, Result};
pub use crate::state::AppState;
