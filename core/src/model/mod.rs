// core/src/model/mod.rs

//! Plain data structs for the two entities, plus the typed payload decoders.

pub(crate) mod fields;
pub mod product;
pub mod shopcart;

pub use product::{Product, ProductDraft, PRODUCT_NAME_MAX_LEN};
pub use shopcart::{Shopcart, ShopcartDraft};
