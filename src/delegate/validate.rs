use super::Delegate;

/// A delegate that does nothing: every event is accepted and discarded.
///
/// Driving a parser with this delegate to completion is exactly a
/// well-formedness check -- the caller learns only whether the input was
/// valid JSON, via [`super::drive`]'s `Result`, without paying for building
/// any kind of value tree.
#[derive(Debug, Default)]
pub struct ValidateDelegate;

impl ValidateDelegate {
    pub fn new() -> Self {
        ValidateDelegate
    }
}

impl Delegate for ValidateDelegate {}

#[cfg(test)]
mod test {
    use super::*;
    use crate::delegate::drive;
    use crate::feeder::SliceJsonFeeder;
    use crate::parser::JsonParser;

    fn is_valid(json: &[u8]) -> bool {
        let feeder = SliceJsonFeeder::new(json);
        let mut parser = JsonParser::new(feeder);
        let mut delegate = ValidateDelegate::new();
        matches!(drive(&mut parser, &mut delegate), Ok(true))
    }

    #[test]
    fn accepts_well_formed_json() {
        assert!(is_valid(br#"{"a":[1,2.5,true,false,null,"x"]}"#));
    }

    #[test]
    fn rejects_malformed_json() {
        let feeder = SliceJsonFeeder::new(b"{not json}");
        let mut parser = JsonParser::new(feeder);
        let mut delegate = ValidateDelegate::new();
        assert!(drive(&mut parser, &mut delegate).is_err());
    }

    #[test]
    fn rejects_invalid_utf8_inside_a_string() {
        assert!(!is_valid(b"[\"\xFF\xFE\"]"));
    }
}
