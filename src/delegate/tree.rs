use std::str::from_utf8;

use bigdecimal::BigDecimal;

use super::Delegate;
use crate::error::Error;
use crate::intern;
use crate::value::{Object, Value};

enum Frame {
    Array(Vec<Value>),
    /// An object under construction, plus the key waiting for its value (if
    /// any has been read since the last one was consumed).
    Object(Object, Option<String>),
}

/// Builds a [`Value`] tree out of the parser's event stream, the way `oj`'s
/// default (non-SAJ, non-streaming) mode builds a Ruby object graph.
///
/// Object keys are validated as UTF-8 (same as string values); when
/// `cache_keys` is enabled at construction, keys are additionally routed
/// through the process-wide [`intern::KEY_CACHE`] so repeated keys across
/// many sibling objects share one validated, hashed allocation instead of
/// paying for `from_utf8` and a fresh `String` every time.
pub struct TreeDelegate {
    stack: Vec<Frame>,
    root: Option<Value>,
    cache_keys: bool,
}

impl TreeDelegate {
    pub fn new() -> Self {
        TreeDelegate {
            stack: Vec::new(),
            root: None,
            cache_keys: false,
        }
    }

    pub fn with_cache_keys(cache_keys: bool) -> Self {
        TreeDelegate {
            stack: Vec::new(),
            root: None,
            cache_keys,
        }
    }

    /// Take the completed value tree. Only meaningful after the driving
    /// parser has reported [`crate::parser::ParseStatus::End`].
    pub fn into_value(mut self) -> Option<Value> {
        self.root.take()
    }

    fn decode_key(&self, bytes: &[u8]) -> Result<String, Error> {
        if self.cache_keys {
            let interned = intern::KEY_CACHE
                .intern(bytes)
                .map_err(|e| Error::unicode(0, e.to_string()))?;
            Ok(interned.to_string())
        } else {
            Ok(from_utf8(bytes).map_err(|e| Error::unicode(0, e.to_string()))?.to_owned())
        }
    }

    fn emit(&mut self, value: Value) -> Result<(), Error> {
        match self.stack.last_mut() {
            None => {
                self.root = Some(value);
            }
            Some(Frame::Array(items)) => items.push(value),
            Some(Frame::Object(_, pending_key)) => {
                let key = pending_key.take().ok_or_else(|| {
                    Error::syntax(0, "value emitted outside of a key/value pair")
                })?;
                let Some(Frame::Object(object, _)) = self.stack.last_mut() else {
                    unreachable!("just matched this variant");
                };
                object.insert(key, value);
            }
        }
        Ok(())
    }
}

impl Default for TreeDelegate {
    fn default() -> Self {
        Self::new()
    }
}

impl Delegate for TreeDelegate {
    fn start_object(&mut self) -> Result<(), Error> {
        self.stack.push(Frame::Object(Object::new(), None));
        Ok(())
    }

    fn end_object(&mut self) -> Result<(), Error> {
        match self.stack.pop() {
            Some(Frame::Object(object, None)) => self.emit(Value::Object(object)),
            _ => Err(Error::syntax(0, "unbalanced object close")),
        }
    }

    fn start_array(&mut self) -> Result<(), Error> {
        self.stack.push(Frame::Array(Vec::new()));
        Ok(())
    }

    fn end_array(&mut self) -> Result<(), Error> {
        match self.stack.pop() {
            Some(Frame::Array(items)) => self.emit(Value::Array(items)),
            _ => Err(Error::syntax(0, "unbalanced array close")),
        }
    }

    fn key(&mut self, key: &[u8]) -> Result<(), Error> {
        let decoded = self.decode_key(key)?;
        match self.stack.last_mut() {
            Some(Frame::Object(_, pending_key)) => {
                *pending_key = Some(decoded);
                Ok(())
            }
            _ => Err(Error::syntax(0, "key emitted outside of an object")),
        }
    }

    fn null_value(&mut self) -> Result<(), Error> {
        self.emit(Value::Null)
    }

    fn bool_value(&mut self, value: bool) -> Result<(), Error> {
        self.emit(Value::Bool(value))
    }

    fn int_value(&mut self, value: i64) -> Result<(), Error> {
        self.emit(Value::Int(value))
    }

    fn float_value(&mut self, value: f64) -> Result<(), Error> {
        self.emit(Value::Float(value))
    }

    fn big_value(&mut self, text: &str) -> Result<(), Error> {
        let decimal: BigDecimal = text
            .parse()
            .map_err(|_| Error::syntax(0, "malformed big number literal"))?;
        self.emit(Value::Big(decimal))
    }

    fn string_value(&mut self, value: &[u8]) -> Result<(), Error> {
        let s = from_utf8(value).map_err(|e| Error::unicode(0, e.to_string()))?.to_owned();
        self.emit(Value::Str(s))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::delegate::drive;
    use crate::feeder::SliceJsonFeeder;
    use crate::parser::JsonParser;

    fn parse_to_value(json: &[u8]) -> Value {
        let feeder = SliceJsonFeeder::new(json);
        let mut parser = JsonParser::new(feeder);
        let mut delegate = TreeDelegate::new();
        assert!(drive(&mut parser, &mut delegate).unwrap());
        delegate.into_value().unwrap()
    }

    #[test]
    fn builds_nested_tree() {
        let value = parse_to_value(br#"{"a":[1,2.5,null,true,"x"]}"#);
        let object = value.as_object().unwrap();
        let array = object.get("a").unwrap().as_array().unwrap();
        assert_eq!(array[0], Value::Int(1));
        assert_eq!(array[1], Value::Float(2.5));
        assert_eq!(array[2], Value::Null);
        assert_eq!(array[3], Value::Bool(true));
        assert_eq!(array[4], Value::Str("x".to_string()));
    }

    #[test]
    fn preserves_key_insertion_order() {
        let value = parse_to_value(br#"{"z":1,"a":2}"#);
        let object = value.as_object().unwrap();
        let keys: Vec<&str> = object.keys().map(|s| s.as_str()).collect();
        assert_eq!(keys, vec!["z", "a"]);
    }

    #[test]
    fn overflowing_number_becomes_bigdecimal() {
        let value = parse_to_value(b"99999999999999999999999999999999");
        match value {
            Value::Big(d) => assert_eq!(d.to_string(), "99999999999999999999999999999999"),
            other => panic!("expected Value::Big, got {other:?}"),
        }
    }

    #[test]
    fn cache_keys_still_produces_correct_strings() {
        let feeder = SliceJsonFeeder::new(br#"[{"k":1},{"k":2}]"#);
        let mut parser = JsonParser::new(feeder);
        let mut delegate = TreeDelegate::with_cache_keys(true);
        assert!(drive(&mut parser, &mut delegate).unwrap());
        let value = delegate.into_value().unwrap();
        let array = value.as_array().unwrap();
        assert_eq!(array[0].as_object().unwrap().get("k"), Some(&Value::Int(1)));
        assert_eq!(array[1].as_object().unwrap().get("k"), Some(&Value::Int(2)));
    }
}
