use super::Delegate;
use crate::error::Error;

/// One step of the simplified-API-for-JSON callback stream a [`SajDelegate`]
/// forwards to its handler. Essentially [`crate::event::Event`] again, but
/// with container-closing events reduced to a single tag and object keys
/// distinguished from string values the way SAJ handlers conventionally
/// expect.
#[derive(Debug, Clone, PartialEq)]
pub enum SajEvent<'a> {
    StartObject,
    EndObject,
    StartArray,
    EndArray,
    Key(&'a [u8]),
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Big(&'a str),
    String(&'a [u8]),
}

/// A delegate that forwards every event to a user-supplied `FnMut` callback,
/// the way `oj`'s SAJ handler forwards to Ruby method calls on a handler
/// object -- without ever materializing a value tree.
///
/// The callback returns `Result<(), Error>`; returning [`Error::Cancelled`]
/// (or any other error) stops parsing immediately with that error.
pub struct SajDelegate<F> {
    callback: F,
}

impl<F> SajDelegate<F>
where
    F: FnMut(SajEvent<'_>) -> Result<(), Error>,
{
    pub fn new(callback: F) -> Self {
        SajDelegate { callback }
    }
}

impl<F> Delegate for SajDelegate<F>
where
    F: FnMut(SajEvent<'_>) -> Result<(), Error>,
{
    fn start_object(&mut self) -> Result<(), Error> {
        (self.callback)(SajEvent::StartObject)
    }

    fn end_object(&mut self) -> Result<(), Error> {
        (self.callback)(SajEvent::EndObject)
    }

    fn start_array(&mut self) -> Result<(), Error> {
        (self.callback)(SajEvent::StartArray)
    }

    fn end_array(&mut self) -> Result<(), Error> {
        (self.callback)(SajEvent::EndArray)
    }

    fn key(&mut self, key: &[u8]) -> Result<(), Error> {
        (self.callback)(SajEvent::Key(key))
    }

    fn null_value(&mut self) -> Result<(), Error> {
        (self.callback)(SajEvent::Null)
    }

    fn bool_value(&mut self, value: bool) -> Result<(), Error> {
        (self.callback)(SajEvent::Bool(value))
    }

    fn int_value(&mut self, value: i64) -> Result<(), Error> {
        (self.callback)(SajEvent::Int(value))
    }

    fn float_value(&mut self, value: f64) -> Result<(), Error> {
        (self.callback)(SajEvent::Float(value))
    }

    fn big_value(&mut self, text: &str) -> Result<(), Error> {
        (self.callback)(SajEvent::Big(text))
    }

    fn string_value(&mut self, value: &[u8]) -> Result<(), Error> {
        (self.callback)(SajEvent::String(value))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::delegate::drive;
    use crate::feeder::SliceJsonFeeder;
    use crate::parser::JsonParser;

    #[test]
    fn forwards_every_event() {
        let feeder = SliceJsonFeeder::new(br#"{"a":1}"#);
        let mut parser = JsonParser::new(feeder);
        let mut seen = Vec::new();
        let mut delegate = SajDelegate::new(|event| {
            seen.push(format!("{event:?}"));
            Ok(())
        });
        assert!(drive(&mut parser, &mut delegate).unwrap());
        assert_eq!(
            seen,
            vec!["StartObject", "Key([97])", "Int(1)", "EndObject"]
        );
    }

    #[test]
    fn callback_can_cancel_parsing() {
        let feeder = SliceJsonFeeder::new(br#"[1,2,3]"#);
        let mut parser = JsonParser::new(feeder);
        let mut count = 0;
        let mut delegate = SajDelegate::new(|event| {
            if let SajEvent::Int(_) = event {
                count += 1;
                if count == 2 {
                    return Err(Error::Cancelled);
                }
            }
            Ok(())
        });
        assert!(matches!(drive(&mut parser, &mut delegate), Err(Error::Cancelled)));
        assert_eq!(count, 2);
    }

    #[test]
    fn rejects_invalid_utf8_before_it_reaches_the_callback() {
        let feeder = SliceJsonFeeder::new(b"[\"\xFF\xFE\"]");
        let mut parser = JsonParser::new(feeder);
        let mut delegate = SajDelegate::new(|_| Ok(()));
        assert!(matches!(drive(&mut parser, &mut delegate), Err(Error::Unicode { .. })));
    }
}
