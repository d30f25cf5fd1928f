//! Scalar value model shared by every copy shape
//!
//! A slot holds at most one [`Value`]. Its declared type is a [`FieldType`],
//! which pairs a closed category tag ([`ValueKind`]) with a nullability flag.
//! The non-nullable form stands for a plain Rust scalar such as `i32`, the
//! nullable form for `Option<i32>`; both normalize to the same kind before
//! coercion.
//!
//! Copyright (c) 2025 Fieldcopy Team
//! Licensed under the Apache-2.0 license

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Textual form used when a date-time is rendered as a string
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Closed set of scalar categories a slot can declare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    I8,
    I16,
    I32,
    I64,
    F32,
    F64,
    Char,
    Bool,
    Text,
    DateTime,
    /// Untyped slot; every value satisfies it
    Any,
}

impl ValueKind {
    /// Whether a value of `self` can be stored in a slot of `target` unchanged
    pub fn satisfies(self, target: ValueKind) -> bool {
        self == target || target == ValueKind::Any
    }

    pub fn is_integer(self) -> bool {
        matches!(self, ValueKind::I8 | ValueKind::I16 | ValueKind::I32 | ValueKind::I64)
    }

    pub fn is_float(self) -> bool {
        matches!(self, ValueKind::F32 | ValueKind::F64)
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::I8 => write!(f, "i8"),
            ValueKind::I16 => write!(f, "i16"),
            ValueKind::I32 => write!(f, "i32"),
            ValueKind::I64 => write!(f, "i64"),
            ValueKind::F32 => write!(f, "f32"),
            ValueKind::F64 => write!(f, "f64"),
            ValueKind::Char => write!(f, "char"),
            ValueKind::Bool => write!(f, "bool"),
            ValueKind::Text => write!(f, "text"),
            ValueKind::DateTime => write!(f, "datetime"),
            ValueKind::Any => write!(f, "any"),
        }
    }
}

/// Declared type of a slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldType {
    pub kind: ValueKind,
    /// `true` for the optional (`Option<T>`) form of the scalar
    pub nullable: bool,
}

impl FieldType {
    /// Plain scalar form
    pub const fn required(kind: ValueKind) -> Self {
        Self { kind, nullable: false }
    }

    /// Optional form
    pub const fn nullable(kind: ValueKind) -> Self {
        Self { kind, nullable: true }
    }

    /// The untyped slot
    pub const fn any() -> Self {
        Self::nullable(ValueKind::Any)
    }

    /// Drop the plain/optional distinction; coercion only looks at the kind
    pub fn normalized(self) -> ValueKind {
        self.kind
    }
}

impl From<ValueKind> for FieldType {
    fn from(kind: ValueKind) -> Self {
        FieldType::nullable(kind)
    }
}

/// A runtime value read from or written to a slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Value {
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
    Char(char),
    Bool(bool),
    Text(String),
    DateTime(NaiveDateTime),
}

impl Value {
    /// Runtime category of this value
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::I8(_) => ValueKind::I8,
            Value::I16(_) => ValueKind::I16,
            Value::I32(_) => ValueKind::I32,
            Value::I64(_) => ValueKind::I64,
            Value::F32(_) => ValueKind::F32,
            Value::F64(_) => ValueKind::F64,
            Value::Char(_) => ValueKind::Char,
            Value::Bool(_) => ValueKind::Bool,
            Value::Text(_) => ValueKind::Text,
            Value::DateTime(_) => ValueKind::DateTime,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Convert to a JSON value; date-times become their textual form
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::Value as Json;
        match self {
            Value::I8(n) => Json::from(*n),
            Value::I16(n) => Json::from(*n),
            Value::I32(n) => Json::from(*n),
            Value::I64(n) => Json::from(*n),
            Value::F32(n) => Json::from(*n),
            Value::F64(n) => Json::from(*n),
            Value::Char(c) => Json::String(c.to_string()),
            Value::Bool(b) => Json::Bool(*b),
            Value::Text(s) => Json::String(s.clone()),
            Value::DateTime(_) => Json::String(self.to_string()),
        }
    }

    /// Convert a JSON scalar; `null` and nested structures yield `None`
    pub fn from_json(json: &serde_json::Value) -> Option<Value> {
        use serde_json::Value as Json;
        match json {
            Json::Bool(b) => Some(Value::Bool(*b)),
            Json::Number(n) => n
                .as_i64()
                .map(Value::I64)
                .or_else(|| n.as_f64().map(Value::F64)),
            Json::String(s) => Some(Value::Text(s.clone())),
            Json::Null | Json::Array(_) | Json::Object(_) => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::I8(n) => write!(f, "{}", n),
            Value::I16(n) => write!(f, "{}", n),
            Value::I32(n) => write!(f, "{}", n),
            Value::I64(n) => write!(f, "{}", n),
            Value::F32(n) => write!(f, "{}", n),
            Value::F64(n) => write!(f, "{}", n),
            Value::Char(c) => write!(f, "{}", c),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Text(s) => f.write_str(s),
            Value::DateTime(dt) => write!(f, "{}", dt.format(DATE_TIME_FORMAT)),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

macro_rules! value_from_scalar {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(v)
                }
            }
        )*
    };
}

value_from_scalar! {
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    f32 => F32,
    f64 => F64,
    char => Char,
    bool => Bool,
    NaiveDateTime => DateTime,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_satisfies_any() {
        assert!(ValueKind::I32.satisfies(ValueKind::Any));
        assert!(ValueKind::Text.satisfies(ValueKind::Text));
        assert!(!ValueKind::I32.satisfies(ValueKind::I64));
    }

    #[test]
    fn test_normalized_drops_nullability() {
        assert_eq!(FieldType::required(ValueKind::I32).normalized(), ValueKind::I32);
        assert_eq!(FieldType::nullable(ValueKind::I32).normalized(), ValueKind::I32);
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::I64(42).to_string(), "42");
        assert_eq!(Value::F64(1.75).to_string(), "1.75");
        assert_eq!(Value::Char('x').to_string(), "x");
        let dt = NaiveDate::from_ymd_opt(2000, 1, 1)
            .unwrap()
            .and_hms_opt(1, 2, 3)
            .unwrap();
        assert_eq!(Value::DateTime(dt).to_string(), "2000-01-01 01:02:03");
    }

    #[test]
    fn test_json_conversion() {
        assert_eq!(Value::from_json(&serde_json::json!(7)), Some(Value::I64(7)));
        assert_eq!(Value::from_json(&serde_json::json!(0.5)), Some(Value::F64(0.5)));
        assert_eq!(Value::from_json(&serde_json::json!(null)), None);
        assert_eq!(Value::Text("a".into()).to_json(), serde_json::json!("a"));
    }
}
