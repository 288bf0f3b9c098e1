//! Values produced by factories and used as constructor defaults.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Type-erased object handed out by the container.
///
/// Two resolutions return the same object when `Arc::ptr_eq` holds.
pub type Object = Arc<dyn Any + Send + Sync>;

/// A value that may or may not be an object.
///
/// Factories return a `Value`; only [`Value::Object`] is accepted as a
/// service; any other variant fails resolution with
/// [`DiError::InvalidClosureReturn`](crate::DiError::InvalidClosureReturn).
/// Constructor parameter defaults in [`TypeCatalog`](crate::TypeCatalog) are
/// also expressed as values.
#[derive(Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Array(Vec<Value>),
    Object(Object),
}

impl Value {
    /// Wraps a concrete value into an object.
    pub fn object<T: Any + Send + Sync>(value: T) -> Self {
        Value::Object(Arc::new(value))
    }

    /// Short name of the variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    /// Returns the object, or `Err(self)` for any other variant.
    pub fn into_object(self) -> Result<Object, Value> {
        match self {
            Value::Object(object) => Ok(object),
            other => Err(other),
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(i) => Some(*i as f64),
            _ => None,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("Null"),
            Value::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Value::Int(i) => f.debug_tuple("Int").field(i).finish(),
            Value::Float(x) => f.debug_tuple("Float").field(x).finish(),
            Value::Str(s) => f.debug_tuple("Str").field(s).finish(),
            Value::Array(items) => f.debug_tuple("Array").field(items).finish(),
            Value::Object(_) => f.write_str("Object(..)"),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<Object> for Value {
    fn from(value: Object) -> Self {
        Value::Object(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_objects_convert() {
        assert!(Value::object(5u8).into_object().is_ok());
        let rejected = Value::Int(5).into_object().unwrap_err();
        assert_eq!(rejected.kind(), "int");
        assert_eq!(Value::Null.kind(), "null");
        assert_eq!(Value::from("x").as_str(), Some("x"));
    }
}
