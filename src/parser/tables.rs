//! The state/character-class transition table the parser dispatches on.
//!
//! Ported from the teacher crate's DFA (itself a Rust rendition of the
//! classic single-table JSON scanner): characters are mapped into a small
//! set of classes first, which keeps the 2-D transition table small enough
//! to stay cache-resident, and every state's behavior for every class is a
//! single table lookup rather than a chain of `match` arms. Per-role states
//! like "expecting a value" or "just read a comma" are different *rows* of
//! this one table, not different code paths.

pub const ERROR: i8 = -1;

// Character classes. Kept deliberately small (31 classes) so the
// transition table fits in a handful of cache lines.
pub const C_SPACE: i8 = 0;
pub const C_WHITE: i8 = 1;
pub const C_LCURB: i8 = 2;
pub const C_RCURB: i8 = 3;
pub const C_LSQRB: i8 = 4;
pub const C_RSQRB: i8 = 5;
pub const C_COLON: i8 = 6;
pub const C_COMMA: i8 = 7;
pub const C_QUOTE: i8 = 8;
pub const C_BACKS: i8 = 9;
pub const C_SLASH: i8 = 10;
pub const C_PLUS: i8 = 11;
pub const C_MINUS: i8 = 12;
pub const C_POINT: i8 = 13;
pub const C_ZERO: i8 = 14;
pub const C_DIGIT: i8 = 15;
pub const C_LOW_A: i8 = 16;
pub const C_LOW_B: i8 = 17;
pub const C_LOW_C: i8 = 18;
pub const C_LOW_D: i8 = 19;
pub const C_LOW_E: i8 = 20;
pub const C_LOW_F: i8 = 21;
pub const C_LOW_L: i8 = 22;
pub const C_LOW_N: i8 = 23;
pub const C_LOW_R: i8 = 24;
pub const C_LOW_S: i8 = 25;
pub const C_LOW_T: i8 = 26;
pub const C_LOW_U: i8 = 27;
pub const C_ABCDF: i8 = 28;
pub const C_E: i8 = 29;
pub const C_ETC: i8 = 30;

pub const NUM_CLASSES: usize = 32; // 31 real classes, padded to a power of two

/// Maps the 128 ASCII bytes to character classes. Everything above 0x7F,
/// and non-whitespace control bytes, are errors (`ERROR`) except where
/// noted; callers map all non-ASCII bytes to `C_ETC` before indexing.
#[rustfmt::skip]
pub const ASCII_CLASS: [i8; 128] = [
    ERROR,   ERROR,   ERROR,   ERROR,   ERROR,   ERROR,   ERROR,   ERROR,
    ERROR,   C_WHITE, C_WHITE, ERROR,   ERROR,   C_WHITE, ERROR,   ERROR,
    ERROR,   ERROR,   ERROR,   ERROR,   ERROR,   ERROR,   ERROR,   ERROR,
    ERROR,   ERROR,   ERROR,   ERROR,   ERROR,   ERROR,   ERROR,   ERROR,

    C_SPACE, C_ETC,   C_QUOTE, C_ETC,   C_ETC,   C_ETC,   C_ETC,   C_ETC,
    C_ETC,   C_ETC,   C_ETC,   C_PLUS,  C_COMMA, C_MINUS, C_POINT, C_SLASH,
    C_ZERO,  C_DIGIT, C_DIGIT, C_DIGIT, C_DIGIT, C_DIGIT, C_DIGIT, C_DIGIT,
    C_DIGIT, C_DIGIT, C_COLON, C_ETC,   C_ETC,   C_ETC,   C_ETC,   C_ETC,

    C_ETC,   C_ABCDF, C_ABCDF, C_ABCDF, C_ABCDF, C_E,     C_ABCDF, C_ETC,
    C_ETC,   C_ETC,   C_ETC,   C_ETC,   C_ETC,   C_ETC,   C_ETC,   C_ETC,
    C_ETC,   C_ETC,   C_ETC,   C_ETC,   C_ETC,   C_ETC,   C_ETC,   C_ETC,
    C_ETC,   C_ETC,   C_ETC,   C_LSQRB, C_BACKS, C_RSQRB, C_ETC,   C_ETC,

    C_ETC,   C_LOW_A, C_LOW_B, C_LOW_C, C_LOW_D, C_LOW_E, C_LOW_F, C_ETC,
    C_ETC,   C_ETC,   C_ETC,   C_ETC,   C_LOW_L, C_ETC,   C_LOW_N, C_ETC,
    C_ETC,   C_ETC,   C_LOW_R, C_LOW_S, C_LOW_T, C_LOW_U, C_ETC,   C_ETC,
    C_ETC,   C_ETC,   C_ETC,   C_LCURB, C_ETC,   C_RCURB, C_ETC,   C_ETC,
];

// States.
pub const GO: i8 = 0; // start
pub const OK: i8 = 1; // a value has just completed
pub const OB: i8 = 2; // inside {} expecting first key or }
pub const KE: i8 = 3; // expecting a key
pub const CO: i8 = 4; // just read a key, expecting :
pub const VA: i8 = 5; // expecting a value
pub const AR: i8 = 6; // inside [] expecting a value or ]
pub const ST: i8 = 7; // inside a string
pub const ES: i8 = 8; // just read a backslash in a string
pub const U1: i8 = 9; // first hex digit of \u
pub const U2: i8 = 10;
pub const U3: i8 = 11;
pub const U4: i8 = 12; // fourth hex digit of \u
pub const MI: i8 = 13; // just read a minus sign
pub const ZE: i8 = 14; // mantissa is exactly "0"
pub const IN: i8 = 15; // inside an integer mantissa
pub const F0: i8 = 16; // just read the decimal point
pub const FR: i8 = 17; // inside the fraction
pub const E1: i8 = 18; // just read e/E
pub const E2: i8 = 19; // just read the exponent's sign
pub const E3: i8 = 20; // inside the exponent digits
pub const T1: i8 = 21;
pub const T2: i8 = 22;
pub const T3: i8 = 23; // "true" complete
pub const F1: i8 = 24;
pub const F2: i8 = 25;
pub const F3: i8 = 26;
pub const F4: i8 = 27; // "false" complete
pub const N1: i8 = 28;
pub const N2: i8 = 29;
pub const N3: i8 = 30; // "null" complete
/// Recover into a new top-level value if streaming mode allows it;
/// otherwise this is a syntax error. See `JsonParser::parse_one`.
pub const RC: i8 = 99;

const __: i8 = ERROR;

/// `table[state * NUM_CLASSES + class]` yields either a non-negative next
/// state or a negative action code (see `parser::Action`).
#[rustfmt::skip]
pub const STATE_TRANSITION_TABLE: [i8; (N3 as usize + 1) * NUM_CLASSES] = [
/*             space |  {  }  [  ]  :  ,  "  \  /  +  -  .  0  |  a  b  c  d  e  f  l  n  r  s  t  u  |  E  | pad */
/*GO*/  GO,GO,-6,__,-5,__,__,__,ST,__,__,__,MI,__,ZE,IN,__,__,__,__,__,F1,__,N1,__,__,T1,__,__,__,__,__,
/*OK*/  OK,OK,RC,-8,RC,-7,__,-3,RC,__,__,__,RC,__,RC,RC,__,__,__,__,__,RC,__,RC,__,__,RC,__,__,__,__,__,
/*OB*/  OB,OB,__,-9,__,__,__,__,ST,__,__,__,__,__,__,__,__,__,__,__,__,__,__,__,__,__,__,__,__,__,__,__,
/*KE*/  KE,KE,__,__,__,__,__,__,ST,__,__,__,__,__,__,__,__,__,__,__,__,__,__,__,__,__,__,__,__,__,__,__,
/*CO*/  CO,CO,__,__,__,__,-2,__,__,__,__,__,__,__,__,__,__,__,__,__,__,__,__,__,__,__,__,__,__,__,__,__,
/*VA*/  VA,VA,-6,__,-5,__,__,__,ST,__,__,__,MI,__,ZE,IN,__,__,__,__,__,F1,__,N1,__,__,T1,__,__,__,__,__,
/*AR*/  AR,AR,-6,__,-5,-7,__,__,ST,__,__,__,MI,__,ZE,IN,__,__,__,__,__,F1,__,N1,__,__,T1,__,__,__,__,__,
/*ST*/  ST,__,ST,ST,ST,ST,ST,ST,-4,ES,ST,ST,ST,ST,ST,ST,ST,ST,ST,ST,ST,ST,ST,ST,ST,ST,ST,ST,ST,ST,ST,__,
/*ES*/  __,__,__,__,__,__,__,__,ST,ST,ST,__,__,__,__,__,__,ST,__,__,__,ST,__,ST,ST,__,ST,U1,__,__,__,__,
/*U1*/  __,__,__,__,__,__,__,__,__,__,__,__,__,__,U2,U2,U2,U2,U2,U2,U2,U2,__,__,__,__,__,__,U2,U2,__,__,
/*U2*/  __,__,__,__,__,__,__,__,__,__,__,__,__,__,U3,U3,U3,U3,U3,U3,U3,U3,__,__,__,__,__,__,U3,U3,__,__,
/*U3*/  __,__,__,__,__,__,__,__,__,__,__,__,__,__,U4,U4,U4,U4,U4,U4,U4,U4,__,__,__,__,__,__,U4,U4,__,__,
/*U4*/  __,__,__,__,__,__,__,__,__,__,__,__,__,__,ST,ST,ST,ST,ST,ST,ST,ST,__,__,__,__,__,__,ST,ST,__,__,
/*MI*/  __,__,__,__,__,__,__,__,__,__,__,__,__,__,ZE,IN,__,__,__,__,__,__,__,__,__,__,__,__,__,__,__,__,
/*ZE*/  OK,OK,RC,-8,RC,-7,__,-3,RC,__,__,__,__,F0,__,__,__,__,__,__,E1,RC,__,RC,__,__,RC,__,__,E1,__,__,
/*IN*/  OK,OK,RC,-8,RC,-7,__,-3,RC,__,__,__,__,F0,IN,IN,__,__,__,__,E1,RC,__,RC,__,__,RC,__,__,E1,__,__,
/*F0*/  __,__,__,__,__,__,__,__,__,__,__,__,__,__,FR,FR,__,__,__,__,__,__,__,__,__,__,__,__,__,__,__,__,
/*FR*/  OK,OK,RC,-8,RC,-7,__,-3,RC,__,__,__,__,__,FR,FR,__,__,__,__,E1,RC,__,RC,__,__,RC,__,__,E1,__,__,
/*E1*/  __,__,__,__,__,__,__,__,__,__,__,E2,E2,__,E3,E3,__,__,__,__,__,__,__,__,__,__,__,__,__,__,__,__,
/*E2*/  __,__,__,__,__,__,__,__,__,__,__,__,__,__,E3,E3,__,__,__,__,__,__,__,__,__,__,__,__,__,__,__,__,
/*E3*/  OK,OK,RC,-8,RC,-7,__,-3,RC,__,__,__,__,__,E3,E3,__,__,__,__,__,RC,__,RC,__,__,RC,__,__,__,__,__,
/*T1*/  __,__,__,__,__,__,__,__,__,__,__,__,__,__,__,__,__,__,__,__,__,__,__,__,T2,__,__,__,__,__,__,__,
/*T2*/  __,__,__,__,__,__,__,__,__,__,__,__,__,__,__,__,__,__,__,__,__,__,__,__,__,__,__,T3,__,__,__,__,
/*T3*/  __,__,__,__,__,__,__,__,__,__,__,__,__,__,__,__,__,__,__,__,OK,__,__,__,__,__,__,__,__,__,__,__,
/*F1*/  __,__,__,__,__,__,__,__,__,__,__,__,__,__,__,__,F2,__,__,__,__,__,__,__,__,__,__,__,__,__,__,__,
/*F2*/  __,__,__,__,__,__,__,__,__,__,__,__,__,__,__,__,__,__,__,__,__,__,F3,__,__,__,__,__,__,__,__,__,
/*F3*/  __,__,__,__,__,__,__,__,__,__,__,__,__,__,__,__,__,__,__,__,__,__,__,__,__,F4,__,__,__,__,__,__,
/*F4*/  __,__,__,__,__,__,__,__,__,__,__,__,__,__,__,__,__,__,__,__,OK,__,__,__,__,__,__,__,__,__,__,__,
/*N1*/  __,__,__,__,__,__,__,__,__,__,__,__,__,__,__,__,__,__,__,__,__,__,__,__,__,__,__,N2,__,__,__,__,
/*N2*/  __,__,__,__,__,__,__,__,__,__,__,__,__,__,__,__,__,__,__,__,__,__,N3,__,__,__,__,__,__,__,__,__,
/*N3*/  __,__,__,__,__,__,__,__,__,__,__,__,__,__,__,__,__,__,__,__,__,__,OK,__,__,__,__,__,__,__,__,__,
];

pub fn classify(byte: u8) -> i8 {
    if byte >= 128 {
        C_ETC
    } else {
        ASCII_CLASS[byte as usize]
    }
}

pub fn next(state: i8, class: i8) -> i8 {
    STATE_TRANSITION_TABLE[(state as usize) * NUM_CLASSES + class as usize]
}

/// `true` for any state in which a completed number's value can be read
/// off (i.e. the number sub-DFA's terminal states).
pub fn is_number_state(state: i8) -> bool {
    matches!(state, ZE | IN | FR | E3)
}
