//! Interop with the `serde_json` crate, gated behind the `serde_json`
//! feature exactly as the teacher crate gates its own `serde_json` module.
//!
//! The teacher's version of this module re-implements a whole
//! `serde_json::Value` builder on top of its own event stream (see
//! `examples/michel-kraemer-actson-rs/src/serde_json/mod.rs`); this crate
//! already has a complete [`crate::value::Value`] tree and [`Serializer`],
//! so the useful interop surface is a conversion between the two value
//! types plus thin wrappers around [`crate::parse`]/[`crate::to_vec`] that
//! hand back a `serde_json::Value` directly.

use serde_json::{Number, Value as SerdeValue};

use crate::error::Error;
use crate::value::{Object, Value};

/// Parse `json` and convert the result straight into a `serde_json::Value`,
/// for callers migrating incrementally off `serde_json` or cross-checking
/// output against it.
pub fn parse_to_serde_value(json: &[u8]) -> Result<SerdeValue, Error> {
    Ok(SerdeValue::from(crate::parse(json)?))
}

/// Serialize a `serde_json::Value` using this crate's serializer under the
/// process-wide default [`crate::options::SerializerOptions`].
pub fn to_vec_from_serde_value(value: &SerdeValue) -> Result<Vec<u8>, Error> {
    crate::to_vec(&Value::from(value.clone()))
}

impl From<Value> for SerdeValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => SerdeValue::Null,
            Value::Bool(b) => SerdeValue::Bool(b),
            Value::Int(i) => SerdeValue::Number(Number::from(i)),
            Value::Float(f) => Number::from_f64(f).map(SerdeValue::Number).unwrap_or(SerdeValue::Null),
            // `serde_json::Number` has no arbitrary-precision decimal variant
            // without its own `arbitrary_precision` feature; render the
            // `BigDecimal`'s exact text and parse it back as a (lossy only
            // in the "becomes a float" sense) `serde_json::Number`.
            Value::Big(d) => d
                .to_string()
                .parse::<f64>()
                .ok()
                .and_then(Number::from_f64)
                .map(SerdeValue::Number)
                .unwrap_or(SerdeValue::Null),
            Value::Str(s) => SerdeValue::String(s),
            Value::Array(items) => SerdeValue::Array(items.into_iter().map(SerdeValue::from).collect()),
            Value::Object(object) => {
                SerdeValue::Object(object.into_iter().map(|(k, v)| (k, SerdeValue::from(v))).collect())
            }
        }
    }
}

impl From<SerdeValue> for Value {
    fn from(value: SerdeValue) -> Self {
        match value {
            SerdeValue::Null => Value::Null,
            SerdeValue::Bool(b) => Value::Bool(b),
            SerdeValue::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else {
                    Value::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            SerdeValue::String(s) => Value::Str(s),
            SerdeValue::Array(items) => Value::Array(items.into_iter().map(Value::from).collect()),
            SerdeValue::Object(map) => {
                let mut object = Object::new();
                for (k, v) in map {
                    object.insert(k, Value::from(v));
                }
                Value::Object(object)
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn round_trips_through_serde_value() {
        let json = br#"{"a":1,"b":[true,null,"x",2.5]}"#;
        let serde_value = parse_to_serde_value(json).unwrap();
        assert_eq!(
            serde_value,
            json!({"a": 1, "b": [true, null, "x", 2.5]})
        );
    }

    #[test]
    fn converts_serde_value_back_into_this_crates_value() {
        let serde_value = json!({"a": 1, "b": [true, null]});
        let value: Value = serde_value.into();
        assert_eq!(value.as_object().unwrap().get("a"), Some(&Value::Int(1)));
    }

    #[test]
    fn to_vec_from_serde_value_agrees_with_this_crates_serializer() {
        let serde_value = json!({"k": "v"});
        let bytes = to_vec_from_serde_value(&serde_value).unwrap();
        assert_eq!(bytes, br#"{"k":"v"}"#);
    }
}
