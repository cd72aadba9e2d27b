// core/src/model/shopcart.rs

use crate::error::ValidationError;
use crate::model::fields;
use crate::model::product::{Product, ProductDraft};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// A customer's cart. `id` is chosen by the client when the cart is created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shopcart {
  pub id: i32,
  /// Ordered by product id. Every entry has `shopcart_id == self.id`.
  pub products: Vec<Product>,
}

impl Shopcart {
  pub fn new(id: i32) -> Self {
    Self {
      id,
      products: Vec::new(),
    }
  }

  /// Wire mapping: `{id, products: [...]}`.
  pub fn to_json(&self) -> Value {
    json!({
      "id": self.id,
      "products": self.products.iter().map(Product::to_json).collect::<Vec<_>>(),
    })
  }

  pub fn contains_product_named(&self, name: &str) -> bool {
    self.products.iter().any(|p| p.name == name)
  }
}

/// A decoded shopcart payload.
#[derive(Debug, Clone, PartialEq)]
pub struct ShopcartDraft {
  pub id: i32,
  pub products: Vec<ProductDraft>,
}

impl ShopcartDraft {
  /// Decodes and validates a shopcart mapping, including every nested product.
  pub fn decode(value: &Value) -> Result<Self, ValidationError> {
    let mut errors = Vec::new();
    let obj = match fields::as_object(value, "", &mut errors) {
      Some(obj) => obj,
      None => return Err(ValidationError { fields: errors }),
    };

    let id = fields::required_i32(obj, "", "id", &mut errors);
    let products = fields::required_array(obj, "", "products", &mut errors).map(|items| {
      items
        .iter()
        .enumerate()
        .filter_map(|(idx, item)| ProductDraft::decode_at(item, &format!("products[{}]", idx), &mut errors))
        .collect::<Vec<_>>()
    });

    match (id, products) {
      (Some(id), Some(products)) if errors.is_empty() => Ok(Self { id, products }),
      _ => Err(ValidationError { fields: errors }),
    }
  }

  /// Pins the draft and all of its products to `id`. The path id always wins over the body.
  pub fn with_id(mut self, id: i32) -> Self {
    self.id = id;
    self.products = self.products.into_iter().map(|p| p.for_shopcart(id)).collect();
    self
  }
}

impl From<&Shopcart> for ShopcartDraft {
  fn from(shopcart: &Shopcart) -> Self {
    Self {
      id: shopcart.id,
      products: shopcart.products.iter().map(ProductDraft::from).collect(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::error::FieldError;

  fn cart_with(products: Vec<Product>) -> Shopcart {
    Shopcart { id: 1, products }
  }

  fn product(id: i32, name: &str) -> Product {
    Product {
      id,
      name: name.to_string(),
      quantity: 1,
      price: 2.0,
      shopcart_id: 1,
    }
  }

  #[test]
  fn empty_cart_serializes_with_empty_products() {
    assert_eq!(Shopcart::new(1).to_json(), json!({"id": 1, "products": []}));
  }

  #[test]
  fn serde_and_to_json_agree() {
    let cart = cart_with(vec![product(1, "Milk"), product(2, "Bread")]);
    assert_eq!(serde_json::to_value(&cart).unwrap(), cart.to_json());
  }

  #[test]
  fn decode_reads_back_serialized_cart() {
    let cart = cart_with(vec![product(1, "Milk"), product(2, "Bread")]);
    let draft = ShopcartDraft::decode(&cart.to_json()).unwrap();
    assert_eq!(draft, ShopcartDraft::from(&cart));
  }

  #[test]
  fn decode_requires_id_and_products() {
    let err = ShopcartDraft::decode(&json!({})).unwrap_err();
    assert!(err.has_field("id"));
    assert!(err.has_field("products"));
  }

  #[test]
  fn decode_reports_nested_product_paths() {
    let err = ShopcartDraft::decode(&json!({
      "id": 1,
      "products": [
        {"name": "Milk", "quantity": 2, "price": 3.5, "shopcart_id": 1},
        {"name": "Bread", "quantity": 1, "shopcart_id": 1},
        "not a product"
      ]
    }))
    .unwrap_err();
    assert_eq!(
      err.fields,
      vec![
        FieldError::new("products[1].price", "is required"),
        FieldError::new("products[2]", "expected a JSON object"),
      ]
    );
  }

  #[test]
  fn decode_rejects_products_that_are_not_a_list() {
    let err = ShopcartDraft::decode(&json!({"id": 1, "products": {"name": "Milk"}})).unwrap_err();
    assert_eq!(err.fields, vec![FieldError::new("products", "expected a list")]);
  }

  #[test]
  fn with_id_rehomes_products() {
    let draft = ShopcartDraft::decode(&json!({
      "id": 99,
      "products": [{"name": "Milk", "quantity": 2, "price": 3.5, "shopcart_id": 42}]
    }))
    .unwrap()
    .with_id(5);
    assert_eq!(draft.id, 5);
    assert!(draft.products.iter().all(|p| p.shopcart_id == 5));
  }

  #[test]
  fn contains_product_named_is_exact() {
    let cart = cart_with(vec![product(1, "Milk")]);
    assert!(cart.contains_product_named("Milk"));
    assert!(!cart.contains_product_named("milk"));
    assert!(!cart.contains_product_named("Mil"));
  }
}
