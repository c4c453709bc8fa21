//! Runtime values
//!
//! Arguments, return values and thrown errors all travel through a mock as
//! [`Value`]. The model is deliberately close to a dynamically typed
//! language: there is a single number domain (`Int` and `Float` compare
//! equal when they denote the same number), and objects keep their keys in
//! insertion order for display while comparing order-insensitively.

use core::fmt;

use crate::ConversionError;

/// Coarse classification of a [`Value`], used by kind predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Undefined,
    Null,
    Bool,
    Number,
    String,
    List,
    Object,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Undefined => "undefined",
            ValueKind::Null => "null",
            ValueKind::Bool => "bool",
            ValueKind::Number => "number",
            ValueKind::String => "string",
            ValueKind::List => "list",
            ValueKind::Object => "object",
        };
        f.write_str(name)
    }
}

/// A dynamically typed value passed to or produced by a mock.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Absence of a value. Object keys holding it may be ignored when comparing.
    #[default]
    Undefined,
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<Value>),
    /// Key/value pairs in insertion order.
    Object(Vec<(String, Value)>),
}

impl Value {
    /// Build an object from key/value pairs, keeping their order.
    pub fn object<K, V, I>(fields: I) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        Value::Object(
            fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Build a list from anything convertible into values.
    pub fn list<V, I>(items: I) -> Self
    where
        V: Into<Value>,
        I: IntoIterator<Item = V>,
    {
        Value::List(items.into_iter().map(Into::into).collect())
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Undefined => ValueKind::Undefined,
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Int(_) | Value::Float(_) => ValueKind::Number,
            Value::String(_) => ValueKind::String,
            Value::List(_) => ValueKind::List,
            Value::Object(_) => ValueKind::Object,
        }
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    /// Numeric view of the value, if it is a number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(n) => Some(*n as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Look up an object field by key. Returns `None` for non-objects.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Object(fields) => fields.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    /// Collapse integral floats into the integer domain so `1` and `1.0`
    /// share one identity. Non-integral floats, NaN and infinities stay floats.
    pub(crate) fn number_identity(&self) -> Option<NumberIdentity> {
        match self {
            Value::Int(n) => Some(NumberIdentity::Int(*n)),
            Value::Float(f) => {
                if f.is_nan() {
                    Some(NumberIdentity::NaN)
                } else if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64 {
                    Some(NumberIdentity::Int(*f as i64))
                } else {
                    Some(NumberIdentity::Float(f.to_bits()))
                }
            }
            _ => None,
        }
    }
}

/// Canonical identity of a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NumberIdentity {
    Int(i64),
    Float(u64),
    NaN,
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => f.write_str("undefined"),
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::String(s) => write!(f, "{s:?}"),
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Value::Object(fields) => {
                if fields.is_empty() {
                    return f.write_str("{}");
                }
                f.write_str("{ ")?;
                for (i, (k, v)) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                f.write_str(" }")
            }
        }
    }
}

// ============================================================================
// From implementations for primitives
// ============================================================================

impl From<()> for Value {
    fn from(_: ()) -> Self { Value::Undefined }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self { Value::Bool(v) }
}

impl From<i8> for Value {
    fn from(v: i8) -> Self { Value::Int(v.into()) }
}

impl From<i16> for Value {
    fn from(v: i16) -> Self { Value::Int(v.into()) }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self { Value::Int(v.into()) }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self { Value::Int(v) }
}

impl From<u8> for Value {
    fn from(v: u8) -> Self { Value::Int(v.into()) }
}

impl From<u16> for Value {
    fn from(v: u16) -> Self { Value::Int(v.into()) }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self { Value::Int(v.into()) }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self { Value::Float(v.into()) }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self { Value::Float(v) }
}

impl From<String> for Value {
    fn from(v: String) -> Self { Value::String(v) }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self { Value::String(v.to_string()) }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::List(v.into_iter().map(Into::into).collect())
    }
}

/// `None` maps to `Undefined`, so optional fields built from `Option`
/// compare equal to objects that omit the key.
impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(x) => x.into(),
            None => Value::Undefined,
        }
    }
}

// ============================================================================
// TryFrom implementations for primitives
// ============================================================================

impl TryFrom<Value> for bool {
    type Error = ConversionError;
    fn try_from(v: Value) -> Result<Self, Self::Error> {
        match v {
            Value::Bool(x) => Ok(x),
            other => Err(ConversionError::mismatch("bool", &other)),
        }
    }
}

impl TryFrom<Value> for i64 {
    type Error = ConversionError;
    fn try_from(v: Value) -> Result<Self, Self::Error> {
        match v.number_identity() {
            Some(NumberIdentity::Int(n)) => Ok(n),
            _ => Err(ConversionError::mismatch("integer", &v)),
        }
    }
}

impl TryFrom<Value> for i32 {
    type Error = ConversionError;
    fn try_from(v: Value) -> Result<Self, Self::Error> {
        let wide = i64::try_from(v)?;
        i32::try_from(wide).map_err(|_| ConversionError::OutOfRange(wide.to_string()))
    }
}

impl TryFrom<Value> for u32 {
    type Error = ConversionError;
    fn try_from(v: Value) -> Result<Self, Self::Error> {
        let wide = i64::try_from(v)?;
        u32::try_from(wide).map_err(|_| ConversionError::OutOfRange(wide.to_string()))
    }
}

impl TryFrom<Value> for f64 {
    type Error = ConversionError;
    fn try_from(v: Value) -> Result<Self, Self::Error> {
        v.as_f64().ok_or_else(|| ConversionError::mismatch("number", &v))
    }
}

impl TryFrom<Value> for String {
    type Error = ConversionError;
    fn try_from(v: Value) -> Result<Self, Self::Error> {
        match v {
            Value::String(x) => Ok(x),
            other => Err(ConversionError::mismatch("string", &other)),
        }
    }
}

impl<T: TryFrom<Value, Error = ConversionError>> TryFrom<Value> for Vec<T> {
    type Error = ConversionError;
    fn try_from(v: Value) -> Result<Self, Self::Error> {
        match v {
            Value::List(items) => items
                .into_iter()
                .enumerate()
                .map(|(i, item)| {
                    T::try_from(item).map_err(|e| ConversionError::IndexError(i, Box::new(e)))
                })
                .collect(),
            other => Err(ConversionError::mismatch("list", &other)),
        }
    }
}

// ============================================================================
// FromValue trait - avoids coherence issues with TryFrom for Option<T>
// ============================================================================

/// Trait for converting from a Value.
///
/// Exists because the blanket `impl<T, U> TryFrom<U> for T where U: Into<T>`
/// makes a direct `TryFrom<Value> for Option<T>` impossible.
pub trait FromValue: Sized {
    fn from_value(v: Value) -> Result<Self, ConversionError>;
}

impl<T: TryFrom<Value, Error = ConversionError>> FromValue for T {
    fn from_value(v: Value) -> Result<Self, ConversionError> {
        T::try_from(v)
    }
}

/// `Undefined` and `Null` both decode to `None`.
impl<T: FromValue> FromValue for Option<T> {
    fn from_value(v: Value) -> Result<Self, ConversionError> {
        match v {
            Value::Undefined | Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

// ============================================================================
// JSON interop
// ============================================================================

#[cfg(feature = "serde")]
mod json {
    use super::Value;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    impl Value {
        /// Convert from a `serde_json::Value`. Integers that fit `i64` stay
        /// integers; every other number becomes a float.
        pub fn from_json(json: serde_json::Value) -> Self {
            match json {
                serde_json::Value::Null => Value::Null,
                serde_json::Value::Bool(b) => Value::Bool(b),
                serde_json::Value::Number(n) => match n.as_i64() {
                    Some(i) => Value::Int(i),
                    None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
                },
                serde_json::Value::String(s) => Value::String(s),
                serde_json::Value::Array(items) => {
                    Value::List(items.into_iter().map(Value::from_json).collect())
                }
                serde_json::Value::Object(map) => Value::Object(
                    map.into_iter()
                        .map(|(k, v)| (k, Value::from_json(v)))
                        .collect(),
                ),
            }
        }

        /// Convert to a `serde_json::Value`. `Undefined` renders as `null`
        /// and undefined-valued object keys are omitted.
        pub fn to_json(&self) -> serde_json::Value {
            match self {
                Value::Undefined | Value::Null => serde_json::Value::Null,
                Value::Bool(b) => serde_json::Value::Bool(*b),
                Value::Int(n) => serde_json::Value::from(*n),
                Value::Float(f) => serde_json::Number::from_f64(*f)
                    .map(serde_json::Value::Number)
                    .unwrap_or(serde_json::Value::Null),
                Value::String(s) => serde_json::Value::String(s.clone()),
                Value::List(items) => {
                    serde_json::Value::Array(items.iter().map(Value::to_json).collect())
                }
                Value::Object(fields) => serde_json::Value::Object(
                    fields
                        .iter()
                        .filter(|(_, v)| !v.is_undefined())
                        .map(|(k, v)| (k.clone(), v.to_json()))
                        .collect(),
                ),
            }
        }
    }

    impl From<serde_json::Value> for Value {
        fn from(json: serde_json::Value) -> Self {
            Value::from_json(json)
        }
    }

    impl Serialize for Value {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            self.to_json().serialize(serializer)
        }
    }

    impl<'de> Deserialize<'de> for Value {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            serde_json::Value::deserialize(deserializer).map(Value::from_json)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_none_is_undefined() {
        let v: Value = Option::<i32>::None.into();
        assert!(v.is_undefined());
        let v: Value = Some(3).into();
        assert_eq!(v, Value::Int(3));
    }

    #[test]
    fn test_integral_float_shares_number_identity() {
        assert_eq!(Value::Float(2.0).number_identity(), Value::Int(2).number_identity());
        assert_ne!(Value::Float(2.5).number_identity(), Value::Int(2).number_identity());
        assert_eq!(Value::Float(f64::NAN).number_identity(), Some(NumberIdentity::NaN));
    }

    #[test]
    fn test_try_from_reports_mismatch() {
        let err = String::try_from(Value::Int(1)).unwrap_err();
        assert!(matches!(err, ConversionError::TypeMismatch { .. }));

        let items: Vec<i64> = Vec::try_from(Value::list([1, 2, 3])).expect("list of ints");
        assert_eq!(items, vec![1, 2, 3]);
    }

    #[test]
    fn test_option_from_value() {
        let none: Option<String> = FromValue::from_value(Value::Null).expect("null");
        assert_eq!(none, None);
        let some: Option<String> = FromValue::from_value(Value::from("x")).expect("string");
        assert_eq!(some.as_deref(), Some("x"));
    }

    #[test]
    fn test_display_renders_literals() {
        let v = Value::object([("name", Value::from("Victor")), ("age", Value::from(42))]);
        assert_eq!(v.to_string(), r#"{ name: "Victor", age: 42 }"#);
        assert_eq!(Value::list([1, 2]).to_string(), "[1, 2]");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_json_drops_undefined_keys() {
        let v = Value::object([("x", Value::Int(1)), ("y", Value::Undefined)]);
        assert_eq!(v.to_json(), serde_json::json!({ "x": 1 }));
        assert_eq!(Value::from(serde_json::json!([1, "a", null])), Value::List(vec![
            Value::Int(1),
            Value::from("a"),
            Value::Null,
        ]));
    }
}
