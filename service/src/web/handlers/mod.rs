// service/src/web/handlers/mod.rs

// Declare handler modules
pub mod index_handlers;
pub mod product_handlers;
pub mod shopcart_handlers;
