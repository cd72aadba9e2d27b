// service/src/db/mod.rs

//! PostgreSQL persistence. The in-memory backend lives in the `shopcart` crate.

pub mod pg_store;

pub use pg_store::PgStore;
