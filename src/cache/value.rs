//! Dynamic Value Module
//!
//! A loosely typed key/value type for stores that mix key shapes.
//!
//! Scalars (`Undefined`, `Null`, booleans, numbers, text) compare by value.
//! Composites compare by identity: two [`ObjectRef`]s are the same key only
//! when they point at the same allocation, regardless of contents.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

// == Object Reference ==
/// Shared handle to composite contents with identity semantics.
///
/// Cloning an `ObjectRef` yields the *same* object; building a new one from
/// equal contents yields a *different* object.
#[derive(Clone)]
pub struct ObjectRef(Arc<serde_json::Value>);

impl ObjectRef {
    /// Allocates a new object holding `contents`.
    pub fn new(contents: serde_json::Value) -> Self {
        Self(Arc::new(contents))
    }

    /// The composite's contents.
    pub fn contents(&self) -> &serde_json::Value {
        &self.0
    }

    /// True when both handles point at the same allocation.
    pub fn same_object(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for ObjectRef {
    fn eq(&self, other: &Self) -> bool {
        self.same_object(other)
    }
}

impl Eq for ObjectRef {}

impl Hash for ObjectRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::ptr::hash(Arc::as_ptr(&self.0), state);
    }
}

impl fmt::Debug for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectRef({:p}, {})", Arc::as_ptr(&self.0), self.0)
    }
}

// == Number ==
/// A numeric value that keeps its JSON form when it has one.
///
/// Numbers parsed from JSON are stored verbatim, so `1` stays `1` and large
/// integers keep every digit. Floats built in code may be non-finite.
///
/// Equality is SameValueZero: `NaN == NaN`, `0.0 == -0.0`, and an integral
/// float equals the integer with the same value (`1.0 == 1`).
#[derive(Debug, Clone)]
pub struct Number(Repr);

#[derive(Debug, Clone)]
enum Repr {
    Json(serde_json::Number),
    Float(f64),
}

/// Shared form used for both equality and hashing.
#[derive(PartialEq, Eq, Hash)]
enum Canonical {
    Int(i128),
    Float(u64),
}

/// Integral floats below this magnitude fit in an `i128`.
const INTEGRAL_LIMIT: f64 = 1e38;

impl Number {
    /// Nearest `f64`; exact for floats and for integers up to 2^53.
    pub fn as_f64(&self) -> f64 {
        match &self.0 {
            Repr::Json(n) => n.as_f64().unwrap_or(f64::NAN),
            Repr::Float(f) => *f,
        }
    }

    /// Converts to JSON, keeping JSON-sourced numbers unchanged.
    ///
    /// Non-finite floats have no JSON form and yield `None`.
    pub fn to_json(&self) -> Option<serde_json::Number> {
        match &self.0 {
            Repr::Json(n) => Some(n.clone()),
            Repr::Float(f) => serde_json::Number::from_f64(*f),
        }
    }

    fn canonical(&self) -> Canonical {
        if let Repr::Json(n) = &self.0 {
            if let Some(i) = n.as_i64() {
                return Canonical::Int(i128::from(i));
            }
            if let Some(u) = n.as_u64() {
                return Canonical::Int(i128::from(u));
            }
        }

        let f = self.as_f64();
        if f.is_nan() {
            Canonical::Float(f64::NAN.to_bits())
        } else if f.is_finite() && f.fract() == 0.0 && f.abs() < INTEGRAL_LIMIT {
            // -0.0 lands on Int(0) together with 0.0
            Canonical::Int(f as i128)
        } else {
            Canonical::Float(f.to_bits())
        }
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.canonical() == other.canonical()
    }
}

impl Eq for Number {}

impl Hash for Number {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical().hash(state);
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Repr::Json(n) => write!(f, "{n}"),
            Repr::Float(x) => write!(f, "{x}"),
        }
    }
}

impl From<serde_json::Number> for Number {
    fn from(n: serde_json::Number) -> Self {
        Number(Repr::Json(n))
    }
}

impl From<f64> for Number {
    fn from(f: f64) -> Self {
        Number(Repr::Float(f))
    }
}

// == Value ==
/// A dynamically typed key or value.
///
/// `Undefined` and `Null` are ordinary, storable values. A store lookup that
/// misses returns `None`, never `Some(&Value::Undefined)`.
#[derive(Debug, Clone)]
pub enum Value {
    Undefined,
    Null,
    Bool(bool),
    Number(Number),
    Text(String),
    Object(ObjectRef),
}

impl Value {
    /// Wraps composite contents in a freshly allocated object.
    pub fn object(contents: serde_json::Value) -> Self {
        Value::Object(ObjectRef::new(contents))
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    // == JSON Conversion ==
    /// Converts to JSON; `Undefined` has no JSON form and yields `None`.
    ///
    /// Non-finite numbers become `null`.
    pub fn to_json(&self) -> Option<serde_json::Value> {
        let json = match self {
            Value::Undefined => return None,
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Number(n) => n
                .to_json()
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::Text(s) => serde_json::Value::String(s.clone()),
            Value::Object(obj) => obj.contents().clone(),
        };
        Some(json)
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) => true,
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Value::Undefined | Value::Null => {}
            Value::Bool(b) => b.hash(state),
            Value::Number(n) => n.hash(state),
            Value::Text(s) => s.hash(state),
            Value::Object(obj) => obj.hash(state),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => f.write_str("undefined"),
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => write!(f, "{n}"),
            Value::Text(s) => f.write_str(s),
            Value::Object(obj) => write!(f, "{}", obj.contents()),
        }
    }
}

// == Conversions ==
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

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(Number::from(n))
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(serde_json::Number::from(n).into())
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Number(serde_json::Number::from(n).into())
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(serde_json::Number::from(n).into())
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Value::Number(serde_json::Number::from(n).into())
    }
}

impl From<ObjectRef> for Value {
    fn from(obj: ObjectRef) -> Self {
        Value::Object(obj)
    }
}

/// Arrays and objects become freshly allocated [`ObjectRef`]s, so converting
/// the same JSON twice produces two distinct keys.
impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n.into()),
            serde_json::Value::String(s) => Value::Text(s),
            composite @ (serde_json::Value::Array(_) | serde_json::Value::Object(_)) => {
                Value::object(composite)
            }
        }
    }
}
