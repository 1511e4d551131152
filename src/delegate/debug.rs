use super::Delegate;
use crate::error::Error;

/// A delegate that emits a `tracing::trace!` span for every event instead of
/// building anything, for use while debugging a parser integration -- the
/// Rust-native analogue of the host runtime's verbose tracing mode.
#[derive(Debug, Default)]
pub struct DebugDelegate {
    count: usize,
}

impl DebugDelegate {
    pub fn new() -> Self {
        DebugDelegate::default()
    }

    /// The number of events observed so far.
    pub fn count(&self) -> usize {
        self.count
    }
}

impl Delegate for DebugDelegate {
    fn start_object(&mut self) -> Result<(), Error> {
        self.count += 1;
        tracing::trace!("start_object");
        Ok(())
    }

    fn end_object(&mut self) -> Result<(), Error> {
        self.count += 1;
        tracing::trace!("end_object");
        Ok(())
    }

    fn start_array(&mut self) -> Result<(), Error> {
        self.count += 1;
        tracing::trace!("start_array");
        Ok(())
    }

    fn end_array(&mut self) -> Result<(), Error> {
        self.count += 1;
        tracing::trace!("end_array");
        Ok(())
    }

    fn key(&mut self, key: &[u8]) -> Result<(), Error> {
        self.count += 1;
        tracing::trace!(key = %String::from_utf8_lossy(key), "key");
        Ok(())
    }

    fn null_value(&mut self) -> Result<(), Error> {
        self.count += 1;
        tracing::trace!("null");
        Ok(())
    }

    fn bool_value(&mut self, value: bool) -> Result<(), Error> {
        self.count += 1;
        tracing::trace!(value, "bool");
        Ok(())
    }

    fn int_value(&mut self, value: i64) -> Result<(), Error> {
        self.count += 1;
        tracing::trace!(value, "int");
        Ok(())
    }

    fn float_value(&mut self, value: f64) -> Result<(), Error> {
        self.count += 1;
        tracing::trace!(value, "float");
        Ok(())
    }

    fn big_value(&mut self, text: &str) -> Result<(), Error> {
        self.count += 1;
        tracing::trace!(text, "big");
        Ok(())
    }

    fn string_value(&mut self, value: &[u8]) -> Result<(), Error> {
        self.count += 1;
        tracing::trace!(value = %String::from_utf8_lossy(value), "string");
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::delegate::drive;
    use crate::feeder::SliceJsonFeeder;
    use crate::parser::JsonParser;

    #[test]
    fn counts_every_event() {
        let feeder = SliceJsonFeeder::new(br#"{"a":1}"#);
        let mut parser = JsonParser::new(feeder);
        let mut delegate = DebugDelegate::new();
        assert!(drive(&mut parser, &mut delegate).unwrap());
        assert_eq!(delegate.count(), 4); // start_object, key, int, end_object
    }
}
