//! Parser and serializer options.
//!
//! Follows the teacher crate's builder pattern
//! (`JsonParserOptionsBuilder`), extended with serializer-side dialect and
//! escaping knobs, plus a process-wide default instance backed by
//! `lazy_static`, the way the rest of the corpus stores process-wide state.

use std::sync::Mutex;

use lazy_static::lazy_static;

/// The default maximum container nesting depth.
pub const DEFAULT_MAX_DEPTH: usize = 1024;

/// Indentation policy for the serializer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Indent {
    /// No whitespace at all.
    Compact,
    /// A newline followed by `n` spaces per nesting level.
    Spaces(u8),
    /// A newline followed by this literal string repeated once per nesting
    /// level.
    Literal(String),
}

impl Default for Indent {
    fn default() -> Self {
        Indent::Compact
    }
}

/// Serializer dialect. The only value this implementation ever has to dump
/// that strict JSON has no native representation for is a non-finite float,
/// so that is the one axis every mode besides `Rails` differs on; see
/// `DESIGN.md` for how each is grounded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// A non-finite float under `NanPolicy::Raise` reports `Error::Type`.
    Strict,
    /// A non-finite float under `NanPolicy::Raise` is silently serialized
    /// as `null` instead of erroring.
    Null,
    /// A non-finite float under `NanPolicy::Raise` is serialized as a
    /// sentinel huge-exponent finite number instead of erroring.
    Object,
    /// Escapes additionally for safe embedding inside an HTML `<script>`
    /// tag, as Rails' `to_json` does.
    Rails,
}

impl Default for Mode {
    fn default() -> Self {
        Mode::Strict
    }
}

/// Which lookup table the escape/validation scanner loads.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EscapeMode {
    /// Plain RFC 8259 escaping.
    Json,
    /// Also escapes `/` as `\/`.
    SlashEscaped,
    /// Escapes every byte with the high bit set as `\uXXXX`.
    Ascii,
    /// Additionally escapes `<`, `>`, `&` as `<` etc.
    XssSafe,
    /// `XssSafe` plus escaping of U+2028/U+2029 (JS line/paragraph
    /// separators).
    UnicodeXssSafe,
    /// Leaves literal newlines alone instead of escaping them as `\n`.
    NewlinePreserving,
}

impl Default for EscapeMode {
    fn default() -> Self {
        EscapeMode::Json
    }
}

/// Policy for fractional literals that would lose precision if decoded
/// straight into an `f64`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BigDecimalLoad {
    /// Always decode into a `BigDecimal`.
    BigDecimal,
    /// Always decode into an `f64`, accepting the precision loss.
    Float,
    /// Decode into an `f64` unless doing so is not exactly representable,
    /// in which case fall back to `BigDecimal`.
    Auto,
}

impl Default for BigDecimalLoad {
    fn default() -> Self {
        BigDecimalLoad::Auto
    }
}

/// Policy for non-finite floats (`NaN`, `Infinity`, `-Infinity`) on output.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NanPolicy {
    /// Return an `EncodingPolicy` error.
    Raise,
    /// Emit the literal word (`NaN`, `Infinity`, `-Infinity`) -- not valid
    /// JSON, but widely accepted.
    Word,
    /// Emit `null`.
    Null,
    /// Emit a sentinel huge-exponent finite number instead.
    Huge,
}

impl Default for NanPolicy {
    fn default() -> Self {
        NanPolicy::Raise
    }
}

/// Options controlling [`crate::JsonParser`].
#[derive(Clone, Debug, PartialEq)]
pub struct ParserOptions {
    pub(crate) max_depth: usize,
    pub(crate) streaming: bool,
    pub(crate) cache_keys: bool,
    pub(crate) cache_strings_threshold: usize,
    pub(crate) bigdecimal_load: BigDecimalLoad,
    pub(crate) allow_nan: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        ParserOptions {
            max_depth: DEFAULT_MAX_DEPTH,
            streaming: false,
            cache_keys: false,
            cache_strings_threshold: 0,
            bigdecimal_load: BigDecimalLoad::default(),
            allow_nan: false,
        }
    }
}

impl ParserOptions {
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn streaming(&self) -> bool {
        self.streaming
    }

    pub fn cache_keys(&self) -> bool {
        self.cache_keys
    }

    pub fn cache_strings_threshold(&self) -> usize {
        self.cache_strings_threshold
    }

    pub fn bigdecimal_load(&self) -> BigDecimalLoad {
        self.bigdecimal_load
    }

    pub fn allow_nan(&self) -> bool {
        self.allow_nan
    }
}

/// Builder for [`ParserOptions`], following the teacher's
/// `JsonParserOptionsBuilder` shape.
#[derive(Default, Clone, Debug, PartialEq)]
pub struct ParserOptionsBuilder {
    options: ParserOptions,
}

impl ParserOptionsBuilder {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.options.max_depth = max_depth;
        self
    }

    /// Enable streaming mode: more than one top-level JSON value may appear
    /// back-to-back in the same input, as long as they are self-delineating
    /// or separated by whitespace.
    pub fn with_streaming(mut self, streaming: bool) -> Self {
        self.options.streaming = streaming;
        self
    }

    pub fn with_cache_keys(mut self, cache_keys: bool) -> Self {
        self.options.cache_keys = cache_keys;
        self
    }

    pub fn with_cache_strings_threshold(mut self, threshold: usize) -> Self {
        self.options.cache_strings_threshold = threshold;
        self
    }

    pub fn with_bigdecimal_load(mut self, policy: BigDecimalLoad) -> Self {
        self.options.bigdecimal_load = policy;
        self
    }

    pub fn with_allow_nan(mut self, allow: bool) -> Self {
        self.options.allow_nan = allow;
        self
    }

    pub fn build(self) -> ParserOptions {
        self.options
    }
}

/// Options controlling the serializer.
#[derive(Clone, Debug, PartialEq)]
pub struct SerializerOptions {
    pub(crate) indent: Indent,
    pub(crate) mode: Mode,
    pub(crate) escape_mode: EscapeMode,
    pub(crate) nan: NanPolicy,
    pub(crate) float_precision: u8,
}

impl Default for SerializerOptions {
    fn default() -> Self {
        SerializerOptions {
            indent: Indent::default(),
            mode: Mode::default(),
            escape_mode: EscapeMode::default(),
            nan: NanPolicy::default(),
            float_precision: 16,
        }
    }
}

impl SerializerOptions {
    pub fn indent(&self) -> &Indent {
        &self.indent
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn escape_mode(&self) -> EscapeMode {
        self.escape_mode
    }

    pub fn nan(&self) -> NanPolicy {
        self.nan
    }

    pub fn float_precision(&self) -> u8 {
        self.float_precision
    }
}

/// Builder for [`SerializerOptions`].
#[derive(Default, Clone, Debug, PartialEq)]
pub struct SerializerOptionsBuilder {
    options: SerializerOptions,
}

impl SerializerOptionsBuilder {
    pub fn with_indent(mut self, indent: Indent) -> Self {
        self.options.indent = indent;
        self
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.options.mode = mode;
        self
    }

    pub fn with_escape_mode(mut self, escape_mode: EscapeMode) -> Self {
        self.options.escape_mode = escape_mode;
        self
    }

    pub fn with_nan(mut self, nan: NanPolicy) -> Self {
        self.options.nan = nan;
        self
    }

    pub fn with_float_precision(mut self, precision: u8) -> Self {
        self.options.float_precision = precision;
        self
    }

    pub fn build(self) -> SerializerOptions {
        self.options
    }
}

lazy_static! {
    static ref DEFAULT_PARSER_OPTIONS: Mutex<ParserOptions> = Mutex::new(ParserOptions::default());
    static ref DEFAULT_SERIALIZER_OPTIONS: Mutex<SerializerOptions> =
        Mutex::new(SerializerOptions::default());
}

/// Read the process-wide default parser options.
pub fn default_parser_options() -> ParserOptions {
    DEFAULT_PARSER_OPTIONS.lock().unwrap().clone()
}

/// Replace the process-wide default parser options. Affects only callers
/// that subsequently call [`default_parser_options`]; in-flight parsers are
/// unaffected.
pub fn set_default_parser_options(options: ParserOptions) {
    *DEFAULT_PARSER_OPTIONS.lock().unwrap() = options;
}

/// Read the process-wide default serializer options.
pub fn default_serializer_options() -> SerializerOptions {
    DEFAULT_SERIALIZER_OPTIONS.lock().unwrap().clone()
}

/// Replace the process-wide default serializer options.
pub fn set_default_serializer_options(options: SerializerOptions) {
    *DEFAULT_SERIALIZER_OPTIONS.lock().unwrap() = options;
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn builder_defaults_match_plain_default() {
        assert_eq!(ParserOptionsBuilder::default().build(), ParserOptions::default());
        assert_eq!(
            SerializerOptionsBuilder::default().build(),
            SerializerOptions::default()
        );
    }

    #[test]
    fn global_defaults_round_trip() {
        let custom = ParserOptionsBuilder::default().with_max_depth(16).build();
        set_default_parser_options(custom.clone());
        assert_eq!(default_parser_options(), custom);
        // restore so other tests aren't affected
        set_default_parser_options(ParserOptions::default());
    }
}
