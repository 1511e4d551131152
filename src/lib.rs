//! A high-throughput, table-driven JSON parser and serializer.
//!
//! The parser ([`JsonParser`]) is a byte-at-a-time DFA, grounded the same
//! way the teacher crate's is: state transitions live in a flat lookup
//! table, and every byte of parser state is an ordinary struct field, so
//! parsing can pause at any chunk boundary fed in by a [`feeder::JsonFeeder`]
//! and resume later without re-reading anything already seen.
//!
//! On top of the flat [`event::Event`] stream the parser emits, a
//! [`delegate::Delegate`] folds events into whatever shape a caller wants --
//! a [`value::Value`] tree via [`delegate::TreeDelegate`], a callback stream
//! via [`delegate::SajDelegate`], or a pure well-formedness check via
//! [`delegate::ValidateDelegate`]. [`serialize::Serializer`] walks a
//! [`value::Value`] tree back into JSON text.
//!
//! # Parsing a whole buffer into a tree
//!
//! ```
//! use turbojson::value::Value;
//!
//! let value = turbojson::parse(br#"{"a":[1,2,3]}"#).unwrap();
//! assert_eq!(value.as_object().unwrap().get("a").unwrap().as_array().unwrap().len(), 3);
//! ```
//!
//! # Streaming input a chunk at a time
//!
//! ```
//! use turbojson::feeder::{JsonFeeder, PushJsonFeeder};
//! use turbojson::parser::{JsonParser, ParseStatus};
//!
//! let mut feeder = PushJsonFeeder::new();
//! let mut parser = JsonParser::new(feeder);
//!
//! for chunk in [&b"{\"a\":"[..], &b"1}"[..]] {
//!     parser.feeder_mut().push_bytes(chunk);
//!     loop {
//!         match parser.next_event().unwrap() {
//!             ParseStatus::Event(_) => {}
//!             ParseStatus::NeedMoreInput => break,
//!             ParseStatus::End => break,
//!         }
//!     }
//! }
//! parser.feeder_mut().done();
//! assert_eq!(parser.next_event().unwrap(), ParseStatus::End);
//! ```
//!
//! # Handling events yourself with a SAJ-style callback
//!
//! ```
//! use turbojson::delegate::{drive, SajDelegate, SajEvent};
//! use turbojson::feeder::SliceJsonFeeder;
//! use turbojson::parser::JsonParser;
//!
//! let mut parser = JsonParser::new(SliceJsonFeeder::new(br#"[1,2,3]"#));
//! let mut sum = 0i64;
//! let mut delegate = SajDelegate::new(|event| {
//!     if let SajEvent::Int(n) = event {
//!         sum += n;
//!     }
//!     Ok(())
//! });
//! drive(&mut parser, &mut delegate).unwrap();
//! assert_eq!(sum, 6);
//! ```
//!
//! # Serializing a value back to text
//!
//! ```
//! use turbojson::value::{Object, Value};
//!
//! let mut object = Object::new();
//! object.insert("ok".to_string(), Value::Bool(true));
//! let json = turbojson::to_vec(&Value::Object(object)).unwrap();
//! assert_eq!(json, br#"{"ok":true}"#);
//! ```

mod buffer;
mod intern;
mod numeric;
mod reset;
mod scanner;

pub mod delegate;
pub mod error;
pub mod event;
pub mod feeder;
pub mod options;
pub mod parser;
pub mod serialize;
pub mod sink;
pub mod value;

#[cfg(feature = "tokio")]
pub mod tokio;

#[cfg(feature = "serde_json")]
pub mod serde_json;

pub use delegate::Delegate;
pub use error::Error;
pub use event::Event;
pub use feeder::{JsonFeeder, SliceJsonFeeder};
pub use options::{ParserOptions, ParserOptionsBuilder, SerializerOptions, SerializerOptionsBuilder};
pub use parser::{JsonParser, ParseStatus};
pub use serialize::Serializer;
pub use value::Value;

use delegate::{drive, SajDelegate, SajEvent, TreeDelegate};

/// Parse a complete JSON text into a [`Value`] tree under the process-wide
/// default [`ParserOptions`].
///
/// For input that might not be complete yet, or that is too large to hold
/// in memory all at once, drive a [`JsonParser`] directly with a
/// [`delegate::Delegate`] of your choice instead.
pub fn parse(json: &[u8]) -> Result<Value, Error> {
    parse_with_options(json, options::default_parser_options())
}

/// Like [`parse`], but under caller-supplied [`ParserOptions`].
pub fn parse_with_options(json: &[u8], options: ParserOptions) -> Result<Value, Error> {
    let feeder = SliceJsonFeeder::new(json);
    let mut parser = JsonParser::new_with_options(feeder, options);
    let mut delegate = TreeDelegate::new();
    match drive(&mut parser, &mut delegate)? {
        true => delegate
            .into_value()
            .ok_or_else(|| Error::syntax(parser.parsed_bytes(), "empty input")),
        false => Err(Error::syntax(parser.parsed_bytes(), "unexpected end of input")),
    }
}

/// Parse a complete JSON text, forwarding every [`SajEvent`] to `callback`
/// instead of building a [`Value`] tree.
///
/// Returning an `Err` from `callback` stops parsing immediately and that
/// error is returned; see [`Error::Cancelled`] for the conventional way to
/// signal "stop, but not because anything was wrong".
pub fn parse_events<F>(json: &[u8], callback: F) -> Result<(), Error>
where
    F: FnMut(SajEvent<'_>) -> Result<(), Error>,
{
    let feeder = SliceJsonFeeder::new(json);
    let mut parser = JsonParser::new(feeder);
    let mut delegate = SajDelegate::new(callback);
    match drive(&mut parser, &mut delegate)? {
        true => Ok(()),
        false => Err(Error::syntax(parser.parsed_bytes(), "unexpected end of input")),
    }
}

/// Serialize `value` to a freshly allocated `Vec<u8>` under the process-wide
/// default [`SerializerOptions`].
pub fn to_vec(value: &Value) -> Result<Vec<u8>, Error> {
    to_vec_with_options(value, options::default_serializer_options())
}

/// Like [`to_vec`], but under caller-supplied [`SerializerOptions`].
pub fn to_vec_with_options(value: &Value, options: SerializerOptions) -> Result<Vec<u8>, Error> {
    Serializer::new(options).to_vec(value)
}

/// Serialize `value` directly to a `std::io::Write`, under the process-wide
/// default [`SerializerOptions`].
pub fn to_writer<W: std::io::Write>(value: &Value, writer: &mut W) -> Result<(), Error> {
    to_writer_with_options(value, options::default_serializer_options(), writer)
}

/// Like [`to_writer`], but under caller-supplied [`SerializerOptions`].
pub fn to_writer_with_options<W: std::io::Write>(
    value: &Value,
    options: SerializerOptions,
    writer: &mut W,
) -> Result<(), Error> {
    Serializer::new(options).to_writer(value, writer)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::value::Object;

    #[test]
    fn parse_roundtrips_through_to_vec() {
        let value = parse(br#"{"a":1,"b":[true,null,"x"]}"#).unwrap();
        let json = to_vec(&value).unwrap();
        let reparsed = parse(&json).unwrap();
        assert_eq!(value, reparsed);
    }

    #[test]
    fn parse_reports_unexpected_eof() {
        assert!(parse(br#"{"a":"#).is_err());
    }

    #[test]
    fn parse_events_sees_every_value() {
        let mut ints = Vec::new();
        parse_events(b"[1,2,3]", |event| {
            if let SajEvent::Int(n) = event {
                ints.push(n);
            }
            Ok(())
        })
        .unwrap();
        assert_eq!(ints, vec![1, 2, 3]);
    }

    #[test]
    fn to_vec_and_parse_agree_on_empty_containers() {
        let value = Value::Object(Object::new());
        assert_eq!(to_vec(&value).unwrap(), b"{}");
        assert_eq!(parse(b"{}").unwrap(), value);
    }
}
