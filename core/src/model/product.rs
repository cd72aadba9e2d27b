// core/src/model/product.rs

use crate::error::{FieldError, ValidationError};
use crate::model::fields;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Longest product name the store accepts (matches the `VARCHAR(260)` column).
pub const PRODUCT_NAME_MAX_LEN: usize = 260;

/// A persisted line item. Always owned by exactly one shopcart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
  pub id: i32,
  pub name: String,
  pub quantity: i32,
  pub price: f64,
  pub shopcart_id: i32,
}

impl Product {
  /// Wire mapping: `{id, name, quantity, price, shopcart_id}`.
  pub fn to_json(&self) -> Value {
    json!({
      "id": self.id,
      "name": self.name,
      "quantity": self.quantity,
      "price": self.price,
      "shopcart_id": self.shopcart_id,
    })
  }

  /// Overwrites the mutable fields from a decoded payload. `id` is left alone.
  pub fn apply(&mut self, draft: ProductDraft) {
    self.name = draft.name;
    self.quantity = draft.quantity;
    self.price = draft.price;
    self.shopcart_id = draft.shopcart_id;
  }
}

/// A decoded product payload that may not have been persisted yet.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
  /// Present when the payload names an existing product.
  pub id: Option<i32>,
  pub name: String,
  pub quantity: i32,
  pub price: f64,
  pub shopcart_id: i32,
}

impl ProductDraft {
  /// Decodes and validates a product mapping.
  pub fn decode(value: &Value) -> Result<Self, ValidationError> {
    let mut errors = Vec::new();
    match Self::decode_at(value, "", &mut errors) {
      Some(draft) if errors.is_empty() => Ok(draft),
      _ => Err(ValidationError { fields: errors }),
    }
  }

  pub(crate) fn decode_at(value: &Value, prefix: &str, errors: &mut Vec<FieldError>) -> Option<Self> {
    let obj = fields::as_object(value, prefix, errors)?;

    let id = fields::optional_i32(obj, prefix, "id", errors);
    let name = fields::required_str(obj, prefix, "name", errors).and_then(|name| {
      if name.trim().is_empty() {
        errors.push(FieldError::new(fields::path(prefix, "name"), "must not be empty"));
        None
      } else if name.chars().count() > PRODUCT_NAME_MAX_LEN {
        errors.push(FieldError::new(
          fields::path(prefix, "name"),
          format!("must be at most {} characters", PRODUCT_NAME_MAX_LEN),
        ));
        None
      } else {
        Some(name.to_string())
      }
    });
    let quantity = fields::required_i32(obj, prefix, "quantity", errors);
    let price = fields::required_f64(obj, prefix, "price", errors);
    let shopcart_id = fields::required_i32(obj, prefix, "shopcart_id", errors);

    Some(Self {
      id,
      name: name?,
      quantity: quantity?,
      price: price?,
      shopcart_id: shopcart_id?,
    })
  }

  /// Re-homes the draft under `shopcart_id`. The owning cart in the request path always wins.
  pub fn for_shopcart(mut self, shopcart_id: i32) -> Self {
    self.shopcart_id = shopcart_id;
    self
  }

  pub fn into_product(self, id: i32) -> Product {
    Product {
      id,
      name: self.name,
      quantity: self.quantity,
      price: self.price,
      shopcart_id: self.shopcart_id,
    }
  }
}

impl From<&Product> for ProductDraft {
  fn from(product: &Product) -> Self {
    Self {
      id: Some(product.id),
      name: product.name.clone(),
      quantity: product.quantity,
      price: product.price,
      shopcart_id: product.shopcart_id,
    }
  }
}
