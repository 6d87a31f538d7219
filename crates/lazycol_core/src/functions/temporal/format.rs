//! Compiled format strings for parsing dates, times and datetimes.
//!
//! Supported directives:
//!
//! | directive | matches |
//! |---|---|
//! | `%Y` | 4 digit year |
//! | `%y` | 2 digit year, 00-68 is 20xx, 69-99 is 19xx |
//! | `%m` | month, 1 or 2 digits |
//! | `%b` | English month abbreviation, any case |
//! | `%d` | day, 1 or 2 digits |
//! | `%H` | hour 0-23, 1 or 2 digits |
//! | `%M` | minute, 1 or 2 digits |
//! | `%S` | second, 1 or 2 digits |
//! | `%f` | 1 to 9 fractional digits, no dot |
//! | `%.f` | optional dot followed by 1 to 9 fractional digits |
//! | `%.3f` `%.6f` `%.9f` | dot followed by exactly 3, 6, or 9 digits |
//! | `%z` | `Z`, `+hh`, `+hhmm` or `+hh:mm` (or `-`) |
//! | `%F` `%T` `%D` `%R` | `%Y-%m-%d`, `%H:%M:%S`, `%m/%d/%y`, `%H:%M` |
//! | `%%` | a literal `%` |
//!
//! Fractions are right padded to nanoseconds, so ".5" is 500ms.
//!
//! Directives are expanded with chrono's strftime reader and most are matched
//! by chrono's parser one item at a time. Years and bare fractions are read
//! here since their widths and the `%y` century differ from chrono's.
use std::fmt;
use std::iter;

use chrono::format::{
    Fixed, Item, Numeric, Parsed as FieldSet, StrftimeItems, parse_and_remainder,
};
use chrono::{FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use lazycol_error::{LcError, Result};

use crate::arrays::datatype::TimeUnit;

/// Accepted directives and the chrono strftime spec each expands to.
const DIRECTIVES: &[(&str, &str)] = &[
    ("%Y", "%Y"),
    ("%y", "%y"),
    ("%m", "%m"),
    ("%b", "%b"),
    ("%d", "%d"),
    ("%H", "%H"),
    ("%M", "%M"),
    ("%S", "%S"),
    ("%f", "%f"),
    ("%.f", "%.f"),
    ("%.3f", "%.3f"),
    ("%.6f", "%.6f"),
    ("%.9f", "%.9f"),
    // Permissive offset, accepts `Z` and a missing minute part.
    ("%z", "%#z"),
    ("%F", "%F"),
    ("%T", "%T"),
    ("%D", "%D"),
    ("%R", "%R"),
    ("%%", "%%"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
enum FormatItem {
    /// Text outside of directives, matched exactly.
    Literal(String),
    /// Matched by chrono's parser.
    Chrono(Item<'static>),
    Year4,
    Year2,
    /// Fraction with no leading dot.
    Fraction,
    /// Dot followed by exactly this many digits.
    DotFractionExact(usize, Item<'static>),
}

impl FormatItem {
    fn from_chrono(item: Item<'static>) -> Self {
        match item {
            Item::Numeric(Numeric::Year, _) => FormatItem::Year4,
            Item::Numeric(Numeric::YearMod100, _) => FormatItem::Year2,
            Item::Numeric(Numeric::Nanosecond, _) => FormatItem::Fraction,
            Item::Fixed(Fixed::Nanosecond3) => FormatItem::DotFractionExact(3, item),
            Item::Fixed(Fixed::Nanosecond6) => FormatItem::DotFractionExact(6, item),
            Item::Fixed(Fixed::Nanosecond9) => FormatItem::DotFractionExact(9, item),
            item => FormatItem::Chrono(item),
        }
    }
}

/// Components pulled out of a string by a format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Parsed {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub day: Option<u32>,
    pub hour: Option<u32>,
    pub minute: Option<u32>,
    pub second: Option<u32>,
    pub nanosecond: Option<u32>,
    /// Offset from UTC in seconds.
    pub offset: Option<i32>,
}

impl Parsed {
    /// Offsets of a day or more are rejected.
    fn from_fields(fields: &FieldSet) -> Option<Self> {
        let offset = match fields.offset() {
            Some(secs) => Some(FixedOffset::east_opt(secs)?.local_minus_utc()),
            None => None,
        };
        let hour = match (fields.hour_div_12(), fields.hour_mod_12()) {
            (Some(div), Some(rem)) => Some(div * 12 + rem),
            _ => None,
        };

        Some(Parsed {
            year: fields.year(),
            month: fields.month(),
            day: fields.day(),
            hour,
            minute: fields.minute(),
            second: fields.second(),
            nanosecond: fields.nanosecond(),
            offset,
        })
    }

    pub fn to_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year?, self.month.unwrap_or(1), self.day.unwrap_or(1))
    }

    pub fn to_time(&self) -> Option<NaiveTime> {
        NaiveTime::from_hms_nano_opt(
            self.hour?,
            self.minute.unwrap_or(0),
            self.second.unwrap_or(0),
            self.nanosecond.unwrap_or(0),
        )
    }

    /// Datetime with any parsed offset applied, i.e. in UTC.
    ///
    /// A missing time of day is midnight.
    pub fn to_utc_datetime(&self) -> Option<NaiveDateTime> {
        let date = self.to_date()?;
        let time = match self.hour {
            Some(_) => self.to_time()?,
            None => NaiveTime::from_hms_opt(0, 0, 0)?,
        };
        let local = date.and_time(time);
        match self.offset {
            Some(offset) => local.checked_sub_signed(chrono::Duration::seconds(offset as i64)),
            None => Some(local),
        }
    }
}

/// A compiled format string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemporalFormat {
    source: String,
    items: Vec<FormatItem>,
}

impl TemporalFormat {
    /// Compile a format string, erroring on unsupported directives.
    pub fn compile(format: &str) -> Result<Self> {
        let mut items = Vec::new();
        let mut literal = String::new();
        let mut rest = format;

        while let Some(pos) = rest.find('%') {
            literal.push_str(&rest[..pos]);
            let directive = directive_at(&rest[pos..]);
            let spec = DIRECTIVES
                .iter()
                .find(|(name, _)| *name == directive)
                .map(|(_, spec)| *spec)
                .ok_or_else(|| bad_directive(format, directive))?;

            if !literal.is_empty() {
                items.push(FormatItem::Literal(std::mem::take(&mut literal)));
            }
            for item in StrftimeItems::new(spec) {
                if item == Item::Error {
                    return Err(bad_directive(format, directive));
                }
                items.push(FormatItem::from_chrono(item));
            }
            rest = &rest[pos + directive.len()..];
        }

        literal.push_str(rest);
        if !literal.is_empty() {
            items.push(FormatItem::Literal(literal));
        }

        Ok(TemporalFormat {
            source: format.to_string(),
            items,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn has_date(&self) -> bool {
        self.items
            .iter()
            .any(|i| matches!(i, FormatItem::Year4 | FormatItem::Year2))
    }

    pub fn has_time(&self) -> bool {
        self.items
            .iter()
            .any(|i| matches!(i, FormatItem::Chrono(Item::Numeric(Numeric::Hour, _))))
    }

    pub fn has_offset(&self) -> bool {
        // `%z` is the only directive expanding to an internal chrono item.
        self.items.iter().any(|i| match i {
            FormatItem::Chrono(Item::Fixed(fixed)) => matches!(fixed, Fixed::Internal(_)),
            _ => false,
        })
    }

    /// Time unit implied by an exact width fraction directive.
    pub fn implied_time_unit(&self) -> Option<TimeUnit> {
        self.items.iter().find_map(|item| match item {
            FormatItem::DotFractionExact(3, _) => Some(TimeUnit::Milliseconds),
            FormatItem::DotFractionExact(6, _) => Some(TimeUnit::Microseconds),
            FormatItem::DotFractionExact(9, _) => Some(TimeUnit::Nanoseconds),
            _ => None,
        })
    }

    /// Parse a string.
    ///
    /// When `exact` is true the format must match the entire string,
    /// otherwise the first match found anywhere in the string is used.
    pub fn parse(&self, s: &str, exact: bool) -> Option<Parsed> {
        if exact {
            return match self.parse_prefix(s)? {
                (parsed, "") => Some(parsed),
                _ => None,
            };
        }

        s.char_indices()
            .find_map(|(idx, _)| self.parse_prefix(&s[idx..]).map(|(p, _)| p))
    }

    /// Match the format against the start of `s`, returning the unmatched
    /// remainder.
    fn parse_prefix<'s>(&self, s: &'s str) -> Option<(Parsed, &'s str)> {
        let mut fields = FieldSet::new();
        let mut rest = s;

        for item in &self.items {
            rest = match item {
                FormatItem::Literal(lit) => rest.strip_prefix(lit.as_str())?,
                FormatItem::Chrono(item) => {
                    parse_and_remainder(&mut fields, rest, iter::once(item)).ok()?
                }
                FormatItem::Year4 => {
                    let (v, rest) = digits(rest, 4, 4)?;
                    fields.set_year(v as i64).ok()?;
                    rest
                }
                FormatItem::Year2 => {
                    let (v, rest) = digits(rest, 2, 2)?;
                    let year = if v <= 68 { 2000 + v } else { 1900 + v };
                    fields.set_year(year as i64).ok()?;
                    rest
                }
                FormatItem::Fraction => {
                    let (v, after) = digits(rest, 1, 9)?;
                    let len = rest.len() - after.len();
                    fields
                        .set_nanosecond(v as i64 * 10_i64.pow(9 - len as u32))
                        .ok()?;
                    after
                }
                FormatItem::DotFractionExact(_, item) => {
                    // chrono treats the dot as optional here.
                    if !rest.starts_with('.') {
                        return None;
                    }
                    parse_and_remainder(&mut fields, rest, iter::once(item)).ok()?
                }
            };
        }

        Some((Parsed::from_fields(&fields)?, rest))
    }
}

impl fmt::Display for TemporalFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source)
    }
}

/// The directive at the start of `s`, which begins with '%'. A `%.`
/// directive runs up to the 'f' at most two characters later.
fn directive_at(s: &str) -> &str {
    let body = &s[1..];
    let len = match body.chars().next() {
        None => 0,
        Some('.') => body.find('f').filter(|&idx| idx <= 2).map_or(1, |idx| idx + 1),
        Some(c) => c.len_utf8(),
    };
    &s[..1 + len]
}

fn bad_directive(format: &str, directive: &str) -> LcError {
    LcError::argument(format!("Unsupported format directive '{directive}'"))
        .with_field("argument", "format")
        .with_field("value", format)
}

/// Read between `min` and `max` ascii digits, greedily.
fn digits(s: &str, min: usize, max: usize) -> Option<(u32, &str)> {
    let len = s
        .bytes()
        .take(max)
        .take_while(|b| b.is_ascii_digit())
        .count();
    if len < min {
        return None;
    }
    let v = s.as_bytes()[..len]
        .iter()
        .fold(0u32, |acc, b| acc * 10 + (b - b'0') as u32);
    Some((v, &s[len..]))
}
