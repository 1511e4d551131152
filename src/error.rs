use thiserror::Error;

/// Everything that can go wrong while parsing or serializing.
///
/// Once any of these is returned from a `parse*`/`to_*` entry point the
/// producing [`crate::JsonParser`] or serializer must not be used again.
#[derive(Error, Debug)]
pub enum Error {
    /// The input does not match the JSON grammar.
    #[error("syntax error at byte {offset}: {message}")]
    Syntax { offset: usize, message: String },

    /// Malformed UTF-8, a lone surrogate, or a bad `\u` escape.
    #[error("invalid unicode at byte {offset}: {message}")]
    Unicode { offset: usize, message: String },

    /// A number's exponent is beyond the range this implementation supports.
    #[error("number out of range at byte {offset}")]
    NumberRange { offset: usize },

    /// Container nesting exceeded the configured maximum depth.
    #[error("maximum nesting depth exceeded at byte {offset}")]
    Depth { offset: usize },

    /// A value's encoding was rejected by the active options (e.g. a
    /// non-finite float while `nan = Raise`, or a non-string key in strict
    /// mode).
    #[error("value rejected by encoding policy: {0}")]
    EncodingPolicy(String),

    /// The underlying byte sink or source failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The value is of a kind the active serializer mode refuses to emit.
    #[error("cannot serialize value of this type in the current mode: {0}")]
    Type(String),

    /// A [`crate::delegate::Delegate`] asked the parser to stop.
    #[error("parsing was cancelled by the delegate")]
    Cancelled,
}

impl Error {
    pub fn syntax(offset: usize, message: impl Into<String>) -> Self {
        Error::Syntax {
            offset,
            message: message.into(),
        }
    }

    pub fn unicode(offset: usize, message: impl Into<String>) -> Self {
        Error::Unicode {
            offset,
            message: message.into(),
        }
    }
}
