#![forbid(unsafe_code)]

use crate::stype::Stype;
use std::fmt;
use std::sync::Arc;

/// A single loosely-typed cell value.
///
/// `Value` is both the raw-input currency of the source adapters and the
/// representation returned by [`Frame::to_values`](crate::Frame::to_values),
/// where missing slots come back as [`Value::None`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// The missing-value marker. Occupies a row slot but contributes no
    /// constraint to type inference.
    None,
    Bool(bool),
    Int(i64),
    Real(f64),
    Str(Arc<str>),
}

impl Value {
    pub fn is_missing(&self) -> bool {
        matches!(self, Value::None)
    }

    /// Storage type this value classifies as, or `None` for the missing
    /// marker.
    pub fn stype(&self) -> Option<Stype> {
        match self {
            Value::None => None,
            Value::Bool(_) => Some(Stype::Bool),
            Value::Int(_) => Some(Stype::Int),
            Value::Real(_) => Some(Stype::Real),
            Value::Str(_) => Some(Stype::Str),
        }
    }

    /// Runtime category label used in error messages.
    pub fn type_label(&self) -> &'static str {
        match self {
            Value::None => "missing",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Real(_) => "real",
            Value::Str(_) => "str",
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value.into())
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Real(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(Arc::from(value))
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(Arc::from(value.as_str()))
    }
}

impl From<Arc<str>> for Value {
    fn from(value: Arc<str>) -> Self {
        Value::Str(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::None, Into::into)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => Ok(()),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Real(r) => write!(f, "{r}"),
            Value::Str(s) => f.write_str(s),
        }
    }
}
