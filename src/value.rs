//! The tagged-union value type the tree [`crate::delegate::TreeDelegate`]
//! builds, replacing the host-runtime reflection the original C
//! implementation relies on (see `DESIGN.md`).

use bigdecimal::BigDecimal;
use indexmap::IndexMap;

/// An object's keys, stored in insertion order via `indexmap::IndexMap`
/// (already a corpus dependency) so two objects with the same keys in a
/// different order still compare equal key-set-wise while callers who care
/// about order can still observe it.
pub type Object = IndexMap<String, Value>;

/// A parsed or to-be-serialized JSON value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    /// A number whose mantissa overflowed 64 bits while parsing.
    Big(BigDecimal),
    Str(String),
    Array(Vec<Value>),
    Object(Object),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
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

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_owned())
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::Array(v)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn accessors() {
        let v = Value::from("hi");
        assert_eq!(v.as_str(), Some("hi"));
        assert_eq!(Value::from(42i64).as_i64(), Some(42));
        assert!(Value::Null.is_null());
    }

    #[test]
    fn objects_compare_by_content_not_reference() {
        let mut a = Object::new();
        a.insert("x".to_string(), Value::Int(1));
        let mut b = Object::new();
        b.insert("x".to_string(), Value::Int(1));
        assert_eq!(Value::Object(a), Value::Object(b));
    }
}
