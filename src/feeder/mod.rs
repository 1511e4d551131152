//! Input sources for [`crate::JsonParser`], unchanged in shape from the
//! teacher crate: a small trait plus three concrete feeders (slice,
//! push-based, buffered reader).

mod bufreader;
mod push;
mod slice;

pub use bufreader::BufReaderJsonFeeder;
pub use push::{PushError, PushJsonFeeder};
pub use slice::SliceJsonFeeder;

/// A feeder can be used to provide more input data to the
/// [`JsonParser`](crate::JsonParser).
pub trait JsonFeeder {
    /// Determine if the feeder has input data that can be parsed.
    fn has_input(&self) -> bool;

    /// Check if the end of the JSON text has been reached.
    fn is_done(&self) -> bool;

    /// Decode and return the next byte to be parsed.
    fn next_input(&mut self) -> Option<u8>;
}
