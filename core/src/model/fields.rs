// core/src/model/fields.rs

//! Typed field readers used by the payload decoders.
//! Each reader records a `FieldError` instead of failing fast, so a decoder
//! can report every problem with a payload in one response.

use crate::error::FieldError;
use serde_json::{Map, Value};

/// Joins a parent path and a key (`products[0]` + `name` -> `products[0].name`).
pub(crate) fn path(prefix: &str, key: &str) -> String {
  if prefix.is_empty() {
    key.to_string()
  } else {
    format!("{}.{}", prefix, key)
  }
}

pub(crate) fn as_object<'a>(
  value: &'a Value,
  at: &str,
  errors: &mut Vec<FieldError>,
) -> Option<&'a Map<String, Value>> {
  match value.as_object() {
    Some(obj) => Some(obj),
    None => {
      let at = if at.is_empty() { "$" } else { at };
      errors.push(FieldError::new(at, "expected a JSON object"));
      None
    }
  }
}

fn present<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
  obj.get(key).filter(|v| !v.is_null())
}

fn to_i32(value: &Value, field: String, errors: &mut Vec<FieldError>) -> Option<i32> {
  match value.as_i64() {
    Some(n) => match i32::try_from(n) {
      Ok(n) => Some(n),
      Err(_) => {
        errors.push(FieldError::new(field, "integer out of range"));
        None
      }
    },
    None => {
      errors.push(FieldError::new(field, "expected an integer"));
      None
    }
  }
}

pub(crate) fn required_i32(
  obj: &Map<String, Value>,
  prefix: &str,
  key: &str,
  errors: &mut Vec<FieldError>,
) -> Option<i32> {
  match present(obj, key) {
    Some(value) => to_i32(value, path(prefix, key), errors),
    None => {
      errors.push(FieldError::new(path(prefix, key), "is required"));
      None
    }
  }
}

/// Missing and `null` both read as `None`; a present value of the wrong type is still an error.
pub(crate) fn optional_i32(
  obj: &Map<String, Value>,
  prefix: &str,
  key: &str,
  errors: &mut Vec<FieldError>,
) -> Option<i32> {
  present(obj, key).and_then(|value| to_i32(value, path(prefix, key), errors))
}

pub(crate) fn required_f64(
  obj: &Map<String, Value>,
  prefix: &str,
  key: &str,
  errors: &mut Vec<FieldError>,
) -> Option<f64> {
  match present(obj, key) {
    Some(value) => match value.as_f64() {
      Some(n) => Some(n),
      None => {
        errors.push(FieldError::new(path(prefix, key), "expected a number"));
        None
      }
    },
    None => {
      errors.push(FieldError::new(path(prefix, key), "is required"));
      None
    }
  }
}

pub(crate) fn required_str<'a>(
  obj: &'a Map<String, Value>,
  prefix: &str,
  key: &str,
  errors: &mut Vec<FieldError>,
) -> Option<&'a str> {
  match present(obj, key) {
    Some(value) => match value.as_str() {
      Some(s) => Some(s),
      None => {
        errors.push(FieldError::new(path(prefix, key), "expected a string"));
        None
      }
    },
    None => {
      errors.push(FieldError::new(path(prefix, key), "is required"));
      None
    }
  }
}

pub(crate) fn required_array<'a>(
  obj: &'a Map<String, Value>,
  prefix: &str,
  key: &str,
  errors: &mut Vec<FieldError>,
) -> Option<&'a Vec<Value>> {
  match present(obj, key) {
    Some(value) => match value.as_array() {
      Some(items) => Some(items),
      None => {
        errors.push(FieldError::new(path(prefix, key), "expected a list"));
        None
      }
    },
    None => {
      errors.push(FieldError::new(path(prefix, key), "is required"));
      None
    }
  }
}
