//! The streaming, table-driven JSON parser.
//!
//! This is the core the rest of the crate is built around: [`JsonParser`]
//! consumes bytes one at a time from a [`JsonFeeder`], walks the DFA in
//! [`tables`], and emits a flat [`Event`] stream a [`crate::delegate::Delegate`]
//! can fold into whatever shape it wants (a tree, a SAJ callback sequence, a
//! pass/fail validation result). All parser state lives in ordinary struct
//! fields, so parsing can pause at any byte boundary and resume later without
//! re-reading anything -- the same trick the teacher crate's `JsonParser`
//! uses to stay non-blocking.

mod tables;

use std::collections::VecDeque;
use std::str::from_utf8;

use crate::error::Error;
use crate::event::Event;
use crate::feeder::JsonFeeder;
use crate::numeric::{NumberAccumulator, NumericValue};
use crate::options::ParserOptions;

/// What [`JsonParser::next_event`] produced.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseStatus {
    /// One step of the event stream.
    Event(Event),
    /// The feeder has no more bytes right now but isn't done; call again
    /// after pushing more input.
    NeedMoreInput,
    /// The JSON text (or, in streaming mode, the stream of JSON texts) is
    /// complete.
    End,
}

/// Container kinds pushed on [`JsonParser`]'s mode stack. `Done` always sits
/// at the bottom and is what marks a complete top-level value.
const MODE_ARRAY: i8 = 0;
const MODE_DONE: i8 = 1;
const MODE_KEY: i8 = 2;
const MODE_OBJECT: i8 = 3;

/// A non-blocking, event-based JSON parser.
pub struct JsonParser<T> {
    feeder: T,

    stack: VecDeque<i8>,
    max_depth: usize,
    streaming: bool,

    state: i8,

    /// The raw bytes of the string or number token currently being
    /// accumulated.
    current_buffer: Vec<u8>,

    /// Runs alongside `current_buffer` for number tokens, detecting
    /// mantissa/exponent overflow digit-by-digit instead of only after the
    /// fact.
    num: NumberAccumulator,

    pending: VecDeque<Event>,

    parsed_bytes: usize,
    putback: Option<u8>,

    /// Set while waiting for a UTF-16 low surrogate to complete a
    /// `\uXXXX\uXXXX` pair; holds the high surrogate's code unit.
    high_surrogate: Option<u16>,
}

impl<T> JsonParser<T>
where
    T: JsonFeeder,
{
    pub fn new(feeder: T) -> Self {
        Self::new_with_options(feeder, ParserOptions::default())
    }

    pub fn new_with_options(feeder: T, options: ParserOptions) -> Self {
        JsonParser {
            feeder,
            stack: VecDeque::from([MODE_DONE]),
            max_depth: options.max_depth(),
            streaming: options.streaming(),
            state: tables::GO,
            current_buffer: Vec::new(),
            num: NumberAccumulator::new(),
            pending: VecDeque::new(),
            parsed_bytes: 0,
            putback: None,
            high_surrogate: None,
        }
    }

    pub fn feeder(&self) -> &T {
        &self.feeder
    }

    pub fn feeder_mut(&mut self) -> &mut T {
        &mut self.feeder
    }

    pub fn parsed_bytes(&self) -> usize {
        self.parsed_bytes
    }

    fn push_mode(&mut self, mode: i8) -> bool {
        if self.stack.len() >= self.max_depth {
            return false;
        }
        self.stack.push_back(mode);
        true
    }

    fn pop_mode(&mut self, mode: i8) -> bool {
        if self.stack.back() != Some(&mode) {
            return false;
        }
        self.stack.pop_back();
        true
    }

    fn top_mode(&self) -> i8 {
        *self.stack.back().expect("MODE_DONE is never popped off the bottom")
    }

    fn get_next_input(&mut self) -> Option<u8> {
        self.putback.take().or_else(|| self.feeder.next_input())
    }

    fn put_back(&mut self, b: u8) {
        debug_assert!(self.putback.is_none(), "only one byte can be put back");
        self.putback = Some(b);
        self.parsed_bytes -= 1;
    }

    /// Drive the parser forward until it has an [`Event`] to report, runs
    /// out of input, or is done.
    pub fn next_event(&mut self) -> Result<ParseStatus, Error> {
        while self.pending.is_empty() {
            if let Some(b) = self.get_next_input() {
                self.parsed_bytes += 1;
                if self.state == tables::ST && (32..=127).contains(&b) && b != b'\\' && b != b'"' {
                    // Fast path: an ordinary printable ASCII byte inside a
                    // string needs no table lookup at all.
                    self.current_buffer.push(b);
                } else {
                    self.step(b)?;
                }
            } else if self.feeder.is_done() {
                if self.state != tables::OK {
                    if let Some(event) = self.finish_value()? {
                        self.state = tables::OK;
                        self.pending.push_back(event);
                        break;
                    }
                }
                return if self.state == tables::OK && self.pop_mode(MODE_DONE) {
                    Ok(ParseStatus::End)
                } else {
                    Err(Error::syntax(self.parsed_bytes, "unexpected end of input"))
                };
            } else {
                return Ok(ParseStatus::NeedMoreInput);
            }
        }

        Ok(ParseStatus::Event(self.pending.pop_front().expect("just checked non-empty")))
    }

    /// Process one input byte, queuing zero, one, or two events.
    fn step(&mut self, b: u8) -> Result<(), Error> {
        let class = tables::classify(b);
        if class == tables::ERROR {
            return Err(Error::syntax(self.parsed_bytes, format!("illegal byte {b:#04x}")));
        }

        let mut next_state = tables::next(self.state, class);

        if next_state == tables::RC {
            if self.streaming && self.stack.len() == 1 && self.top_mode() == MODE_DONE {
                if self.state == tables::OK {
                    next_state = tables::next(tables::GO, class);
                } else {
                    next_state = tables::OK;
                    self.put_back(b);
                }
            } else {
                return Err(Error::syntax(self.parsed_bytes, "unexpected trailing data"));
            }
        }

        if next_state < 0 {
            return self.perform_action(next_state);
        }

        if (tables::ST..=tables::E3).contains(&next_state) {
            if self.state >= tables::ST {
                self.continue_token(next_state, b)?;
            } else {
                self.start_token(next_state, b);
            }
        } else if next_state == tables::OK {
            if let Some(event) = self.finish_value()? {
                self.pending.push_back(event);
            }
        }

        self.state = next_state;
        Ok(())
    }

    /// Begin accumulating a fresh string or number token.
    fn start_token(&mut self, next_state: i8, b: u8) {
        self.current_buffer.clear();
        self.num = NumberAccumulator::new();
        match next_state {
            tables::MI => {
                self.num.set_negative();
                self.current_buffer.push(b);
            }
            tables::ZE | tables::IN => {
                self.num.push_digit(b);
                self.current_buffer.push(b);
            }
            tables::ST => {} // opening quote is not part of the value
            _ => self.current_buffer.push(b),
        }
    }

    /// Continue a string (including escapes) or number token already in
    /// progress.
    fn continue_token(&mut self, next_state: i8, b: u8) -> Result<(), Error> {
        if self.state == tables::ES {
            self.resolve_short_escape(b);
            return Ok(());
        }
        if self.state == tables::U4 {
            return self.resolve_unicode_escape(b);
        }

        match next_state {
            tables::ZE | tables::IN => {
                self.num.push_digit(b);
            }
            tables::FR => {
                self.num.push_fraction_digit(b);
            }
            tables::E2 => {
                self.num.set_exponent_sign(b == b'-');
            }
            tables::E3 => {
                if !self.num.push_exponent_digit(b) {
                    return Err(Error::NumberRange { offset: self.parsed_bytes });
                }
            }
            _ => {}
        }
        self.current_buffer.push(b);
        Ok(())
    }

    /// Collapse a just-pushed `\X` pair in `current_buffer` into its single
    /// decoded byte (or leave it as-is ahead of a `\u` escape, handled by
    /// [`Self::resolve_unicode_escape`]).
    fn resolve_short_escape(&mut self, b: u8) {
        let decoded = match b {
            b'\\' => Some(0x5C),
            b'n' => Some(0x0A),
            b'r' => Some(0x0D),
            b't' => Some(0x09),
            b'b' => Some(0x08),
            b'f' => Some(0x0C),
            b'/' => Some(0x2F),
            b'"' => Some(0x22),
            _ => None,
        };
        match decoded {
            Some(byte) => {
                self.current_buffer.pop();
                self.current_buffer.push(byte);
            }
            None => self.current_buffer.push(b),
        }
    }

    /// Called once the fourth hex digit of a `\uXXXX` escape has been
    /// pushed onto `current_buffer`. Decodes the last four bytes as hex,
    /// handles surrogate pairs, and replaces the escape's text with the
    /// UTF-8 encoding of the resulting scalar value (or leaves a lone
    /// high surrogate buffered, waiting for its partner).
    fn resolve_unicode_escape(&mut self, b: u8) -> Result<(), Error> {
        self.current_buffer.push(b);
        if self.current_buffer.len() < 6 {
            return Err(Error::syntax(self.parsed_bytes, "truncated \\u escape"));
        }
        let hex = from_utf8(&self.current_buffer[self.current_buffer.len() - 4..])
            .map_err(|e| Error::unicode(self.parsed_bytes, e.to_string()))?;
        let unit = u32::from_str_radix(hex, 16)
            .map_err(|_| Error::syntax(self.parsed_bytes, "invalid \\u escape"))?;

        if (0xD800..=0xDBFF).contains(&unit) {
            if self.high_surrogate.is_some() {
                return Err(Error::unicode(self.parsed_bytes, "unpaired high surrogate"));
            }
            self.high_surrogate = Some(unit as u16);
        } else if (0xDC00..=0xDFFF).contains(&unit) {
            let Some(high) = self.high_surrogate.take() else {
                return Err(Error::unicode(self.parsed_bytes, "low surrogate without a high surrogate"));
            };
            let decoded: String = char::decode_utf16([high, unit as u16])
                .map(|r| r.unwrap_or(char::REPLACEMENT_CHARACTER))
                .collect();
            self.current_buffer.truncate(self.current_buffer.len() - 12);
            self.current_buffer.extend_from_slice(decoded.as_bytes());
        } else {
            let ch = char::from_u32(unit)
                .ok_or_else(|| Error::unicode(self.parsed_bytes, "code point out of range"))?;
            self.current_buffer.truncate(self.current_buffer.len() - 6);
            let mut buf = [0u8; 4];
            self.current_buffer.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
        }
        Ok(())
    }

    fn perform_action(&mut self, action: i8) -> Result<(), Error> {
        match action {
            -9 => {
                // empty object: "{}"
                if !self.pop_mode(MODE_KEY) {
                    return Err(Error::syntax(self.parsed_bytes, "unmatched '}'"));
                }
                self.state = tables::OK;
                self.pending.push_back(Event::CloseObject);
            }
            -8 => {
                if !self.pop_mode(MODE_OBJECT) {
                    return Err(Error::syntax(self.parsed_bytes, "unmatched '}'"));
                }
                if let Some(event) = self.finish_value()? {
                    self.pending.push_back(event);
                }
                self.pending.push_back(Event::CloseObject);
                self.state = tables::OK;
            }
            -7 => {
                if !self.pop_mode(MODE_ARRAY) {
                    return Err(Error::syntax(self.parsed_bytes, "unmatched ']'"));
                }
                if let Some(event) = self.finish_value()? {
                    self.pending.push_back(event);
                }
                self.pending.push_back(Event::CloseArray);
                self.state = tables::OK;
            }
            -6 => {
                if !self.push_mode(MODE_KEY) {
                    return Err(Error::Depth { offset: self.parsed_bytes });
                }
                self.state = tables::OB;
                self.pending.push_back(Event::OpenObject);
            }
            -5 => {
                if !self.push_mode(MODE_ARRAY) {
                    return Err(Error::Depth { offset: self.parsed_bytes });
                }
                self.state = tables::AR;
                self.pending.push_back(Event::OpenArray);
            }
            -4 => {
                // closing quote
                let bytes = std::mem::take(&mut self.current_buffer).into_boxed_slice();
                crate::scanner::validate_utf8(&bytes, self.parsed_bytes)?;
                if self.top_mode() == MODE_KEY {
                    self.state = tables::CO;
                    self.pending.push_back(Event::Key(bytes));
                } else {
                    self.state = tables::OK;
                    self.pending.push_back(Event::Str(bytes));
                }
            }
            -3 => match self.top_mode() {
                MODE_OBJECT => {
                    if !self.pop_mode(MODE_OBJECT) || !self.push_mode(MODE_KEY) {
                        return Err(Error::syntax(self.parsed_bytes, "unexpected ','"));
                    }
                    if let Some(event) = self.finish_value()? {
                        self.pending.push_back(event);
                    }
                    self.state = tables::KE;
                }
                MODE_ARRAY => {
                    if let Some(event) = self.finish_value()? {
                        self.pending.push_back(event);
                    }
                    self.state = tables::VA;
                }
                _ => return Err(Error::syntax(self.parsed_bytes, "unexpected ','")),
            },
            -2 => {
                if !self.pop_mode(MODE_KEY) || !self.push_mode(MODE_OBJECT) {
                    return Err(Error::syntax(self.parsed_bytes, "unexpected ':'"));
                }
                self.state = tables::VA;
            }
            _ => return Err(Error::syntax(self.parsed_bytes, "syntax error")),
        }
        Ok(())
    }

    /// Resolve the current state into the [`Event`] it represents, if any
    /// (string-closing and container-closing states produce their event
    /// directly from [`Self::perform_action`] instead).
    fn finish_value(&mut self) -> Result<Option<Event>, Error> {
        match self.state {
            tables::IN | tables::ZE | tables::FR | tables::E1 | tables::E2 | tables::E3 => {
                Ok(Some(self.finish_number()?))
            }
            tables::T3 => Ok(Some(Event::True)),
            tables::F4 => Ok(Some(Event::False)),
            tables::N3 => Ok(Some(Event::Null)),
            _ => Ok(None),
        }
    }

    fn finish_number(&mut self) -> Result<Event, Error> {
        self.num.force_overflow_if_int_min();
        match self.num.finish() {
            Some(NumericValue::Int(v)) => Ok(Event::Int(v)),
            Some(NumericValue::Float(f)) => Ok(Event::Float(f)),
            Some(NumericValue::Big) | None => {
                let text = from_utf8(&self.current_buffer)
                    .map_err(|e| Error::unicode(self.parsed_bytes, e.to_string()))?;
                Ok(Event::Big(text.into()))
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::feeder::SliceJsonFeeder;

    fn parse_all(json: &[u8]) -> Result<Vec<Event>, Error> {
        let feeder = SliceJsonFeeder::new(json);
        let mut parser = JsonParser::new(feeder);
        let mut events = Vec::new();
        loop {
            match parser.next_event()? {
                ParseStatus::Event(e) => events.push(e),
                ParseStatus::NeedMoreInput => panic!("fully-fed slice feeder asked for more input"),
                ParseStatus::End => break,
            }
        }
        Ok(events)
    }

    #[test]
    fn parses_scalars() {
        assert_eq!(parse_all(b"true").unwrap(), vec![Event::True]);
        assert_eq!(parse_all(b"false").unwrap(), vec![Event::False]);
        assert_eq!(parse_all(b"null").unwrap(), vec![Event::Null]);
        assert_eq!(parse_all(b"42").unwrap(), vec![Event::Int(42)]);
        assert_eq!(parse_all(b"-42").unwrap(), vec![Event::Int(-42)]);
        assert_eq!(parse_all(b"3.5").unwrap(), vec![Event::Float(3.5)]);
    }

    #[test]
    fn parses_string_with_escapes() {
        let events = parse_all(br#""a\nbA""#).unwrap();
        assert_eq!(events, vec![Event::Str(b"a\nbA".to_vec().into_boxed_slice())]);
    }

    #[test]
    fn parses_surrogate_pair() {
        let events = parse_all(br#""😀""#).unwrap();
        assert_eq!(events, vec![Event::Str("\u{1F600}".as_bytes().to_vec().into_boxed_slice())]);
    }

    #[test]
    fn rejects_lone_low_surrogate() {
        assert!(parse_all(br#""\udc00""#).is_err());
    }

    #[test]
    fn parses_nested_containers() {
        let events = parse_all(br#"{"a":[1,2,{"b":true}]}"#).unwrap();
        assert_eq!(
            events,
            vec![
                Event::OpenObject,
                Event::Key(b"a".to_vec().into_boxed_slice()),
                Event::OpenArray,
                Event::Int(1),
                Event::Int(2),
                Event::OpenObject,
                Event::Key(b"b".to_vec().into_boxed_slice()),
                Event::True,
                Event::CloseObject,
                Event::CloseArray,
                Event::CloseObject,
            ]
        );
    }

    #[test]
    fn detects_overflowing_mantissa_as_big() {
        let events = parse_all(b"99999999999999999999999999999999").unwrap();
        match &events[..] {
            [Event::Big(text)] => assert_eq!(text.as_ref(), "99999999999999999999999999999999"),
            other => panic!("expected a single Big event, got {other:?}"),
        }
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_all(b"{not json}").is_err());
        assert!(parse_all(b"").is_err());
    }

    #[test]
    fn depth_limit_is_enforced() {
        let feeder = SliceJsonFeeder::new(b"[[[[[1]]]]]");
        let options = crate::options::ParserOptionsBuilder::default().with_max_depth(3).build();
        let mut parser = JsonParser::new_with_options(feeder, options);
        let mut saw_depth_error = false;
        loop {
            match parser.next_event() {
                Ok(ParseStatus::Event(_)) => {}
                Ok(ParseStatus::NeedMoreInput) => panic!("unexpected"),
                Ok(ParseStatus::End) => break,
                Err(Error::Depth { .. }) => {
                    saw_depth_error = true;
                    break;
                }
                Err(e) => panic!("unexpected error: {e}"),
            }
        }
        assert!(saw_depth_error);
    }

    #[test]
    fn streaming_mode_parses_multiple_top_level_values() {
        let feeder = SliceJsonFeeder::new(b"1 2 3");
        let options = crate::options::ParserOptionsBuilder::default().with_streaming(true).build();
        let mut parser = JsonParser::new_with_options(feeder, options);
        let mut values = Vec::new();
        loop {
            match parser.next_event().unwrap() {
                ParseStatus::Event(Event::Int(i)) => values.push(i),
                ParseStatus::Event(other) => panic!("unexpected event {other:?}"),
                ParseStatus::NeedMoreInput => panic!("fully-fed slice feeder asked for more input"),
                ParseStatus::End => break,
            }
        }
        assert_eq!(values, vec![1, 2, 3]);
    }
}
