//! The serializer: walks a [`Value`] tree and writes JSON text.
//!
//! Grounded in `ext/oj/dump.c`'s dump loop (the mode dispatch, the
//! non-finite-float sentinel literals, the `%.1f`/`%.*e` number formatting
//! strategy already ported into [`crate::numeric`]) reimplemented against
//! this crate's owned [`Value`] tree and [`crate::sink::ByteSink`]
//! abstraction instead of a Ruby `VALUE` graph and a C string buffer.

use bigdecimal::BigDecimal;

use crate::buffer::OutputBuffer;
use crate::error::Error;
use crate::numeric;
use crate::options::{EscapeMode, Indent, Mode, NanPolicy, SerializerOptions};
use crate::scanner;
use crate::sink::{ByteSink, WriterSink};
use crate::value::Value;

/// `ext/oj/oj.h`'s `INF_VAL` sentinel: a huge but finite decimal literal
/// used to represent `Infinity` in dialects that can't emit the bare word.
const HUGE_INF: &[u8] = b"3.0e14159265358979323846";
/// `NINF_VAL`.
const HUGE_NINF: &[u8] = b"-3.0e14159265358979323846";
/// `NAN_VAL`.
const HUGE_NAN: &[u8] = b"3.3e14159265358979323846";

/// Serializes [`Value`] trees to JSON text under a fixed [`SerializerOptions`].
pub struct Serializer {
    options: SerializerOptions,
}

impl Serializer {
    pub fn new(options: SerializerOptions) -> Self {
        let mut options = options;
        // Rails' `to_json` always escapes script-unsafe sequences, even if
        // the caller never asked for XSS-safe escaping explicitly.
        if options.mode() == Mode::Rails && options.escape_mode() == EscapeMode::Json {
            options = crate::options::SerializerOptionsBuilder::default()
                .with_indent(options.indent().clone())
                .with_mode(options.mode())
                .with_escape_mode(EscapeMode::UnicodeXssSafe)
                .with_nan(options.nan())
                .with_float_precision(options.float_precision())
                .build();
        }
        Serializer { options }
    }

    pub fn to_vec(&self, value: &Value) -> Result<Vec<u8>, Error> {
        let mut buffer = OutputBuffer::new();
        self.write_value(value, 0, &mut buffer)?;
        Ok(buffer.into_vec())
    }

    pub fn to_writer<W: std::io::Write>(&self, value: &Value, writer: &mut W) -> Result<(), Error> {
        let mut sink = WriterSink::new(writer);
        self.write_value(value, 0, &mut sink)?;
        sink.into_result().map_err(Error::from)
    }

    fn write_indent(&self, depth: usize, sink: &mut impl ByteSink) {
        match self.options.indent() {
            Indent::Compact => {}
            Indent::Spaces(n) => {
                sink.write_bytes(b"\n");
                for _ in 0..depth * (*n as usize) {
                    sink.write_bytes(b" ");
                }
            }
            Indent::Literal(s) => {
                sink.write_bytes(b"\n");
                for _ in 0..depth {
                    sink.write_bytes(s.as_bytes());
                }
            }
        }
    }

    fn is_pretty(&self) -> bool {
        !matches!(self.options.indent(), Indent::Compact)
    }

    fn write_string(&self, s: &str, sink: &mut impl ByteSink) {
        sink.write_bytes(b"\"");
        let mode = self.options.escape_mode();
        let len = scanner::escaped_len(s, mode);
        let mut escaped = Vec::with_capacity(len);
        scanner::escape_into(s, mode, &mut escaped);
        sink.write_bytes(&escaped);
        sink.write_bytes(b"\"");
    }

    fn write_float(&self, value: f64, sink: &mut impl ByteSink) -> Result<(), Error> {
        if value.is_finite() {
            let mut out = Vec::new();
            numeric::format_float(value, self.options.float_precision(), &mut out);
            sink.write_bytes(&out);
            return Ok(());
        }

        let policy = match self.options.nan() {
            NanPolicy::Raise if self.options.mode() == Mode::Object => NanPolicy::Huge,
            NanPolicy::Raise if self.options.mode() == Mode::Null => NanPolicy::Null,
            other => other,
        };
        match policy {
            NanPolicy::Raise => {
                let message = "non-finite float with NaN policy Raise";
                return Err(if self.options.mode() == Mode::Strict {
                    Error::Type(message.into())
                } else {
                    Error::EncodingPolicy(message.into())
                });
            }
            NanPolicy::Word => {
                sink.write_bytes(if value.is_nan() {
                    b"NaN"
                } else if value > 0.0 {
                    b"Infinity"
                } else {
                    b"-Infinity"
                });
            }
            NanPolicy::Null => sink.write_bytes(b"null"),
            NanPolicy::Huge => {
                sink.write_bytes(if value.is_nan() {
                    HUGE_NAN
                } else if value > 0.0 {
                    HUGE_INF
                } else {
                    HUGE_NINF
                });
            }
        }
        Ok(())
    }

    fn write_big(&self, value: &BigDecimal, sink: &mut impl ByteSink) {
        sink.write_bytes(value.to_string().as_bytes());
    }

    fn write_value(&self, value: &Value, depth: usize, sink: &mut impl ByteSink) -> Result<(), Error> {
        match value {
            Value::Null => sink.write_bytes(b"null"),
            Value::Bool(true) => sink.write_bytes(b"true"),
            Value::Bool(false) => sink.write_bytes(b"false"),
            Value::Int(i) => {
                let mut out = Vec::new();
                numeric::format_int(*i, &mut out);
                sink.write_bytes(&out);
            }
            Value::Float(f) => self.write_float(*f, sink)?,
            Value::Big(d) => self.write_big(d, sink),
            Value::Str(s) => self.write_string(s, sink),
            Value::Array(items) => self.write_array(items, depth, sink)?,
            Value::Object(object) => self.write_object(object, depth, sink)?,
        }
        Ok(())
    }

    fn write_array(&self, items: &[Value], depth: usize, sink: &mut impl ByteSink) -> Result<(), Error> {
        sink.write_bytes(b"[");
        let mut first = true;
        for item in items {
            if !first {
                sink.write_bytes(b",");
            }
            first = false;
            self.write_indent(depth + 1, sink);
            self.write_value(item, depth + 1, sink)?;
        }
        if !items.is_empty() && self.is_pretty() {
            self.write_indent(depth, sink);
        }
        sink.write_bytes(b"]");
        Ok(())
    }

    fn write_object(
        &self,
        object: &crate::value::Object,
        depth: usize,
        sink: &mut impl ByteSink,
    ) -> Result<(), Error> {
        sink.write_bytes(b"{");
        let mut first = true;
        for (key, value) in object {
            if !first {
                sink.write_bytes(b",");
            }
            first = false;
            self.write_indent(depth + 1, sink);
            self.write_string(key, sink);
            sink.write_bytes(b":");
            if self.is_pretty() {
                sink.write_bytes(b" ");
            }
            self.write_value(value, depth + 1, sink)?;
        }
        if !object.is_empty() && self.is_pretty() {
            self.write_indent(depth, sink);
        }
        sink.write_bytes(b"}");
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::options::SerializerOptionsBuilder;
    use crate::value::Object;

    fn to_string(value: &Value, options: SerializerOptions) -> String {
        let bytes = Serializer::new(options).to_vec(value).unwrap();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn serializes_scalars() {
        let opts = SerializerOptions::default();
        assert_eq!(to_string(&Value::Null, opts.clone()), "null");
        assert_eq!(to_string(&Value::Bool(true), opts.clone()), "true");
        assert_eq!(to_string(&Value::Int(-5), opts.clone()), "-5");
        assert_eq!(to_string(&Value::Float(2.5), opts), "2.5");
    }

    #[test]
    fn serializes_nested_containers_compactly() {
        let mut object = Object::new();
        object.insert("a".to_string(), Value::Array(vec![Value::Int(1), Value::Int(2)]));
        let json = to_string(&Value::Object(object), SerializerOptions::default());
        assert_eq!(json, r#"{"a":[1,2]}"#);
    }

    #[test]
    fn pretty_prints_with_spaces_indent() {
        let mut object = Object::new();
        object.insert("a".to_string(), Value::Int(1));
        let opts = SerializerOptionsBuilder::default().with_indent(Indent::Spaces(2)).build();
        let json = to_string(&Value::Object(object), opts);
        assert_eq!(json, "{\n  \"a\": 1\n}");
    }

    #[test]
    fn escapes_strings() {
        let json = to_string(&Value::Str("a\"b".to_string()), SerializerOptions::default());
        assert_eq!(json, r#""a\"b""#);
    }

    #[test]
    fn nan_raises_by_default() {
        let result = Serializer::new(SerializerOptions::default()).to_vec(&Value::Float(f64::NAN));
        assert!(matches!(result, Err(Error::Type(_))));
    }

    #[test]
    fn null_mode_overrides_raise_to_emit_null() {
        let opts = SerializerOptionsBuilder::default().with_mode(Mode::Null).build();
        assert_eq!(to_string(&Value::Float(f64::NAN), opts.clone()), "null");
        assert_eq!(to_string(&Value::Float(f64::INFINITY), opts), "null");
    }

    #[test]
    fn non_strict_non_object_non_null_mode_raises_encoding_policy_error() {
        let opts = SerializerOptionsBuilder::default().with_mode(Mode::Rails).build();
        let result = Serializer::new(opts).to_vec(&Value::Float(f64::NAN));
        assert!(matches!(result, Err(Error::EncodingPolicy(_))));
    }

    #[test]
    fn nan_word_policy_emits_literal() {
        let opts = SerializerOptionsBuilder::default().with_nan(NanPolicy::Word).build();
        assert_eq!(to_string(&Value::Float(f64::NAN), opts.clone()), "NaN");
        assert_eq!(to_string(&Value::Float(f64::INFINITY), opts), "Infinity");
    }

    #[test]
    fn nan_huge_policy_emits_sentinel_literal() {
        let opts = SerializerOptionsBuilder::default().with_nan(NanPolicy::Huge).build();
        assert_eq!(
            to_string(&Value::Float(f64::INFINITY), opts.clone()),
            "3.0e14159265358979323846"
        );
        assert_eq!(to_string(&Value::Float(f64::NAN), opts), "3.3e14159265358979323846");
    }

    #[test]
    fn rails_mode_escapes_without_explicit_escape_mode() {
        let opts = SerializerOptionsBuilder::default().with_mode(Mode::Rails).build();
        let json = to_string(&Value::Str("</script>".to_string()), opts);
        assert_eq!(json, "\"\\u003c/script\\u003e\"");
    }

    #[test]
    fn empty_containers_have_no_interior_whitespace_even_when_pretty() {
        let opts = SerializerOptionsBuilder::default().with_indent(Indent::Spaces(2)).build();
        assert_eq!(to_string(&Value::Array(vec![]), opts.clone()), "[]");
        assert_eq!(to_string(&Value::Object(Object::new()), opts), "{}");
    }
}
