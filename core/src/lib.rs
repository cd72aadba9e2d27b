// src/lib.rs

//! Shopcart: the domain layer of the shopcart service.
//!
//! This crate holds everything that does not depend on HTTP or on a concrete database:
//!  - `Shopcart` and `Product` data structs and their JSON mappings.
//!  - Typed payload decoding (`ShopcartDraft`, `ProductDraft`) that reports every
//!    offending field as a `ValidationError`.
//!  - The `ShopcartRepository` and `ProductRepository` traits.
//!  - `MemoryStore`, an in-process implementation of both traits.

pub mod error;
pub mod model;
pub mod store;

// --- Re-exports for the Public API ---

pub use crate::error::{FieldError, StoreError, StoreResult, ValidationError};
pub use crate::model::{Product, ProductDraft, Shopcart, ShopcartDraft, PRODUCT_NAME_MAX_LEN};
pub use crate::store::{MemoryStore, ProductRepository, ShopcartRepository};
