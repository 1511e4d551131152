//! The delegate pattern: a [`JsonParser`](crate::JsonParser) emits a flat
//! [`Event`] stream, and a [`Delegate`] folds it into whatever shape the
//! caller actually wants.
//!
//! This mirrors `ext/oj/parse.h`'s `ParseInfo` function-pointer table in the
//! original C implementation -- `start_hash`, `end_hash`, `hash_key`,
//! `add_value`, and so on -- except as a Rust trait with default no-op
//! methods instead of a struct of optional function pointers.

mod debug;
mod saj;
mod tree;
mod validate;

pub use debug::DebugDelegate;
pub use saj::SajDelegate;
pub use tree::TreeDelegate;
pub use validate::ValidateDelegate;

use crate::error::Error;
use crate::event::Event;
use crate::feeder::JsonFeeder;
use crate::parser::{JsonParser, ParseStatus};

/// Receives the parser's event stream one event at a time.
///
/// Every method defaults to doing nothing and succeeding, so a delegate only
/// needs to override the events it cares about (as [`ValidateDelegate`]
/// demonstrates).
pub trait Delegate {
    fn start_object(&mut self) -> Result<(), Error> {
        Ok(())
    }
    fn end_object(&mut self) -> Result<(), Error> {
        Ok(())
    }
    fn start_array(&mut self) -> Result<(), Error> {
        Ok(())
    }
    fn end_array(&mut self) -> Result<(), Error> {
        Ok(())
    }
    fn key(&mut self, key: &[u8]) -> Result<(), Error> {
        let _ = key;
        Ok(())
    }
    fn null_value(&mut self) -> Result<(), Error> {
        Ok(())
    }
    fn bool_value(&mut self, value: bool) -> Result<(), Error> {
        let _ = value;
        Ok(())
    }
    fn int_value(&mut self, value: i64) -> Result<(), Error> {
        let _ = value;
        Ok(())
    }
    fn float_value(&mut self, value: f64) -> Result<(), Error> {
        let _ = value;
        Ok(())
    }
    fn big_value(&mut self, text: &str) -> Result<(), Error> {
        let _ = text;
        Ok(())
    }
    fn string_value(&mut self, value: &[u8]) -> Result<(), Error> {
        let _ = value;
        Ok(())
    }
}

fn dispatch<D: Delegate>(delegate: &mut D, event: Event) -> Result<(), Error> {
    match event {
        Event::OpenObject => delegate.start_object(),
        Event::CloseObject => delegate.end_object(),
        Event::OpenArray => delegate.start_array(),
        Event::CloseArray => delegate.end_array(),
        Event::Key(k) => delegate.key(&k),
        Event::Null => delegate.null_value(),
        Event::True => delegate.bool_value(true),
        Event::False => delegate.bool_value(false),
        Event::Int(v) => delegate.int_value(v),
        Event::Float(v) => delegate.float_value(v),
        Event::Big(text) => delegate.big_value(&text),
        Event::Str(s) => delegate.string_value(&s),
    }
}

/// Drive `parser` to completion (or until it runs out of input), forwarding
/// every event to `delegate`.
///
/// Returns `Ok(true)` once the JSON text is fully parsed, `Ok(false)` if the
/// feeder ran dry before that -- the caller should push more bytes and call
/// this again -- and `Err` on any parse error or if `delegate` returns one
/// (in which case the parser must not be driven any further; see
/// [`Error::Cancelled`] for delegates that want to stop early).
pub fn drive<T, D>(parser: &mut JsonParser<T>, delegate: &mut D) -> Result<bool, Error>
where
    T: JsonFeeder,
    D: Delegate,
{
    loop {
        match parser.next_event()? {
            ParseStatus::Event(event) => dispatch(delegate, event)?,
            ParseStatus::NeedMoreInput => return Ok(false),
            ParseStatus::End => return Ok(true),
        }
    }
}
