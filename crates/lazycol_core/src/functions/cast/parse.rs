//! Parsing related utilities for casting from a string to other types.
use std::marker::PhantomData;
use std::str::FromStr;

use chrono::NaiveDate;

use crate::arrays::scalar::temporal::date_to_days;

/// Logic for parsing a string into some type.
pub trait Parser {
    /// The type we'll be producing.
    type Type;

    /// Parse a string into `Type`, returning None if the parse cannot be done.
    fn parse(&mut self, s: &str) -> Option<Self::Type>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoolParser;

impl Parser for BoolParser {
    type Type = bool;
    fn parse(&mut self, s: &str) -> Option<Self::Type> {
        match s {
            "t" | "true" | "TRUE" | "True" | "T" => Some(true),
            "f" | "false" | "FALSE" | "False" | "F" => Some(false),
            _ => None,
        }
    }
}

/// Parser that uses the stdlib `FromStr` trait.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FromStrParser<T: FromStr> {
    _type: PhantomData<T>,
}

impl<T: FromStr> FromStrParser<T> {
    pub const fn new() -> Self {
        FromStrParser { _type: PhantomData }
    }
}

impl<T: FromStr> Parser for FromStrParser<T> {
    type Type = T;
    fn parse(&mut self, s: &str) -> Option<Self::Type> {
        T::from_str(s).ok()
    }
}

pub type Int128Parser = FromStrParser<i128>;
pub type Float32Parser = FromStrParser<f32>;
pub type Float64Parser = FromStrParser<f64>;

/// Parse a string date into a number of days since epoch.
///
/// Example formats:
///
/// '1992-10-11'
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateParser;

impl Parser for DateParser {
    type Type = i32;
    fn parse(&mut self, s: &str) -> Option<Self::Type> {
        let date = NaiveDate::from_str(s).ok()?;
        Some(date_to_days(date))
    }
}

/// Parse an integer in some radix into an i32.
///
/// An optional leading sign is accepted. Values that overflow an i32 fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RadixParser {
    radix: u32,
}

impl RadixParser {
    /// Create a new parser. Radix must be in 2..=36.
    pub const fn new(radix: u32) -> Self {
        RadixParser { radix }
    }
}

impl Parser for RadixParser {
    type Type = i32;
    fn parse(&mut self, s: &str) -> Option<Self::Type> {
        i32::from_str_radix(s, self.radix).ok()
    }
}

/// Parse a decimal string into an integer scaled by `scale`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecimalParser {
    precision: u32,
    scale: u32,
}

impl DecimalParser {
    pub fn new(precision: u32, scale: u32) -> Self {
        DecimalParser { precision, scale }
    }
}

impl Parser for DecimalParser {
    type Type = i128;
    fn parse(&mut self, s: &str) -> Option<Self::Type> {
        let bs = s.as_bytes();
        let (neg, bs) = match bs.first() {
            Some(b'-') => (true, &bs[1..]),
            Some(b'+') => (false, &bs[1..]),
            _ => (false, bs),
        };

        let mut val: i128 = 0;
        let mut digits: u32 = 0; // Total number of digits.
        let mut decimals: u32 = 0; // Digits to right of decimal point.
        let mut seen_digit = false;

        let mut iter = bs.iter();

        // Leading digits.
        for b in iter.by_ref() {
            match b {
                b'0'..=b'9' => {
                    seen_digit = true;
                    // Leading zero.
                    if digits == 0 && *b == b'0' {
                        continue;
                    }
                    digits += 1;
                    val = val.checked_mul(10)?.checked_add((b - b'0') as i128)?;
                }
                b'.' => break,
                _ => return None,
            }
        }

        // Digits after decimal.
        for b in iter {
            match b {
                b'0'..=b'9' => {
                    seen_digit = true;
                    if decimals == self.scale {
                        continue;
                    }
                    decimals += 1;
                    digits += 1;
                    val = val.checked_mul(10)?.checked_add((b - b'0') as i128)?;
                }
                _ => return None,
            }
        }

        if !seen_digit || digits > self.precision {
            return None;
        }

        if decimals < self.scale {
            val = val.checked_mul(10_i128.checked_pow(self.scale - decimals)?)?;
        }

        if neg {
            val = -val;
        }

        Some(val)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_bool() {
        assert_eq!(Some(true), BoolParser.parse("true"));
        assert_eq!(Some(false), BoolParser.parse("F"));
        assert_eq!(None, BoolParser.parse("yes"));
    }

    #[test]
    fn parse_date() {
        assert_eq!(8319, DateParser.parse("1992-10-11").unwrap());
        assert_eq!(-1, DateParser.parse("1969-12-31").unwrap());
        assert_eq!(None, DateParser.parse("1969-13-31"));
    }

    #[test]
    fn parse_radix() {
        let test_cases = [
            (("110", 2), Some(6)),
            (("-110", 2), Some(-6)),
            (("ff", 16), Some(255)),
            (("FF", 16), Some(255)),
            (("z", 36), Some(35)),
            (("invalid", 2), None),
            (("2", 2), None),
            (("", 10), None),
            (("11111111111111111111111111111111", 2), None),
        ];

        for case in test_cases {
            let out = RadixParser::new(case.0.1).parse(case.0.0);
            assert_eq!(case.1, out, "case: {case:?}");
        }
    }

    #[test]
    fn parse_decimal() {
        // Can parse
        assert_eq!(123, DecimalParser::new(5, 1).parse("12.3").unwrap());
        assert_eq!(12, DecimalParser::new(5, 0).parse("12.3").unwrap());
        assert_eq!(1230, DecimalParser::new(5, 1).parse("123").unwrap());
        assert_eq!(-1230, DecimalParser::new(5, 1).parse("-123").unwrap());
        assert_eq!(1230, DecimalParser::new(5, 2).parse("12.3").unwrap());
        assert_eq!(123, DecimalParser::new(3, 1).parse("12.3").unwrap());

        // Can't parse
        assert_eq!(None, DecimalParser::new(5, 1).parse("1four2.3"));
        assert_eq!(None, DecimalParser::new(5, 1).parse("12.3a"));
        assert_eq!(None, DecimalParser::new(3, 1).parse("123.4"));
        assert_eq!(None, DecimalParser::new(3, 1).parse("-"));
    }
}
