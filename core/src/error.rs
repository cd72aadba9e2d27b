// core/src/error.rs
use anyhow::Error as AnyhowError;
use std::fmt;
use thiserror::Error;

/// One offending field found while decoding a payload.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct FieldError {
  /// Path of the field inside the payload, e.g. `products[1].price`.
  pub field: String,
  pub reason: String,
}

impl FieldError {
  pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
    Self {
      field: field.into(),
      reason: reason.into(),
    }
  }
}

impl fmt::Display for FieldError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}: {}", self.field, self.reason)
  }
}

/// A payload failed schema validation. Lists every offending field, not just the first.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct ValidationError {
  pub fields: Vec<FieldError>,
}

impl ValidationError {
  pub fn single(field: impl Into<String>, reason: impl Into<String>) -> Self {
    Self {
      fields: vec![FieldError::new(field, reason)],
    }
  }

  /// True if any collected error points at `field`.
  pub fn has_field(&self, field: &str) -> bool {
    self.fields.iter().any(|f| f.field == field)
  }
}

impl fmt::Display for ValidationError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Invalid payload")?;
    for (idx, field) in self.fields.iter().enumerate() {
      let sep = if idx == 0 { ": " } else { "; " };
      write!(f, "{}{}", sep, field)?;
    }
    Ok(())
  }
}

#[derive(Debug, Error)]
pub enum StoreError {
  #[error("Shopcart {id} already exists")]
  ShopcartExists { id: i32 },

  #[error("Shop Cart with id '{id}' was not found.")]
  ShopcartNotFound { id: i32 },

  #[error("Product with id '{id}' was not found.")]
  ProductNotFound { id: i32 },

  #[error("Storage backend failure: {source}")]
  Backend {
    #[source]
    source: AnyhowError,
  },
}

impl From<AnyhowError> for StoreError {
  fn from(err: AnyhowError) -> Self {
    // A StoreError that went through anyhow keeps its original meaning.
    match err.downcast::<StoreError>() {
      Ok(store_err) => store_err,
      Err(source) => StoreError::Backend { source },
    }
  }
}

pub type StoreResult<T, E = StoreError> = std::result::Result<T, E>;
