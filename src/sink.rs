//! A minimal byte-sink abstraction so the serializer's recursive value walk
//! can target either an in-memory [`OutputBuffer`] or any `std::io::Write`
//! without being written twice.

use std::io::{self, Write};

use crate::buffer::OutputBuffer;

pub trait ByteSink {
    fn write_bytes(&mut self, bytes: &[u8]);
}

impl ByteSink for OutputBuffer {
    fn write_bytes(&mut self, bytes: &[u8]) {
        self.extend_from_slice(bytes);
    }
}

/// Adapts a `std::io::Write` into a [`ByteSink`].
///
/// The serializer's value walk has no fallible return path of its own (it
/// only ever pushes bytes), so I/O errors are latched here instead and
/// surfaced once at the end via [`Self::into_result`], rather than every
/// write call threading a `Result` through the whole recursive walk.
pub struct WriterSink<'a, W: Write> {
    writer: &'a mut W,
    error: Option<io::Error>,
}

impl<'a, W: Write> WriterSink<'a, W> {
    pub fn new(writer: &'a mut W) -> Self {
        WriterSink { writer, error: None }
    }

    pub fn into_result(self) -> Result<(), io::Error> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl<'a, W: Write> ByteSink for WriterSink<'a, W> {
    fn write_bytes(&mut self, bytes: &[u8]) {
        if self.error.is_none() {
            if let Err(e) = self.writer.write_all(bytes) {
                self.error = Some(e);
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn writer_sink_forwards_bytes() {
        let mut out = Vec::new();
        {
            let mut sink = WriterSink::new(&mut out);
            sink.write_bytes(b"hello");
            sink.into_result().unwrap();
        }
        assert_eq!(out, b"hello");
    }
}
