/// One step of the ordered event stream a [`crate::JsonParser`] emits to a
/// [`crate::delegate::Delegate`].
///
/// Every `OpenObject`/`OpenArray` is matched by a `CloseObject`/`CloseArray`
/// of the same kind; inside an object, events alternate between a `Key` and
/// the value event it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    OpenObject,
    CloseObject,
    OpenArray,
    CloseArray,

    /// An object key. Always immediately followed by the value event for
    /// that key.
    Key(Box<[u8]>),

    Null,
    True,
    False,

    /// A number that fit the fast-path mantissa/exponent range as an
    /// integer.
    Int(i64),

    /// A number that needed a fractional or exponent part, decoded as an
    /// `f64`.
    Float(f64),

    /// A number whose mantissa overflowed 64 bits during parsing. Carries
    /// the exact textual form seen in the input.
    Big(Box<str>),

    Str(Box<[u8]>),
}

impl Event {
    /// `true` for the two container-opening events.
    pub fn is_open(&self) -> bool {
        matches!(self, Event::OpenObject | Event::OpenArray)
    }

    /// `true` for the two container-closing events.
    pub fn is_close(&self) -> bool {
        matches!(self, Event::CloseObject | Event::CloseArray)
    }

    /// `true` for anything that is a complete scalar or container-close,
    /// i.e. the things that can follow a `Key` to complete a key/value pair.
    pub fn is_value_like(&self) -> bool {
        !matches!(self, Event::Key(_))
    }
}
