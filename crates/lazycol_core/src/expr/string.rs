use lazycol_error::{LcError, Result};

use super::{Expr, ExprInput, StrptimeOptions, lit_or_col};
use crate::arrays::datatype::{DataType, TimeUnit};
use crate::functions::encoding::BinaryEncoding;
use crate::functions::string::json_path::JsonPath;
use crate::functions::string::parse_int::validate_radix;
use crate::functions::string::replace::ReplaceCount;
use crate::functions::string::split::validate_split;
use crate::functions::string::strip::StripSide;
use crate::functions::string::{StringFunction, validate_regex};
use crate::functions::temporal::{TemporalKind, time_zone_offset};

/// Target of a `parse` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemporalTarget {
    Date,
    Datetime {
        time_unit: Option<TimeUnit>,
        time_zone: Option<String>,
    },
    Time,
}

impl TryFrom<&DataType> for TemporalTarget {
    type Error = LcError;

    fn try_from(datatype: &DataType) -> Result<Self> {
        match datatype {
            DataType::Date => Ok(TemporalTarget::Date),
            DataType::Datetime(None) => Ok(TemporalTarget::Datetime {
                time_unit: None,
                time_zone: None,
            }),
            DataType::Datetime(Some(meta)) => Ok(TemporalTarget::Datetime {
                time_unit: Some(meta.unit),
                time_zone: meta.time_zone.clone(),
            }),
            DataType::Time => Ok(TemporalTarget::Time),
            other => Err(LcError::argument(format!(
                "dtype should be of type {{Date, Datetime, Time}}, got {other}"
            ))
            .with_field("argument", "dtype")
            .with_field("value", other)),
        }
    }
}

/// Exactly one character, used for strip masks and fill characters.
fn single_char(argument: &'static str, s: &str) -> Result<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(LcError::argument(format!(
            "{argument} must be a single character, got {s:?}"
        ))
        .with_field("argument", argument)
        .with_field("value", s)),
    }
}

/// Validate a pattern if it's known now. Patterns coming from expressions
/// are checked at evaluation.
fn validate_pattern_input(pattern: &ExprInput) -> Result<()> {
    match pattern.as_str() {
        Some(pattern) => validate_regex(pattern),
        None => Ok(()),
    }
}

/// String operations on an expression.
#[derive(Debug, Clone, Copy)]
pub struct StringNameSpace<'a> {
    expr: &'a Expr,
}

impl<'a> StringNameSpace<'a> {
    pub(crate) fn new(expr: &'a Expr) -> Self {
        StringNameSpace { expr }
    }

    fn unary(&self, function: StringFunction) -> Result<Expr> {
        self.expr.apply(function, [])
    }

    /// Parse into dates.
    pub fn to_date(&self, options: StrptimeOptions) -> Result<Expr> {
        options.validate(TemporalKind::Date)?;
        self.unary(StringFunction::ToDate { options })
    }

    /// Parse into datetimes.
    ///
    /// Without a time unit the unit is taken from the format, falling back
    /// to the evaluation default.
    pub fn to_datetime(
        &self,
        options: StrptimeOptions,
        time_unit: Option<TimeUnit>,
        time_zone: Option<&str>,
    ) -> Result<Expr> {
        options.validate(TemporalKind::Datetime)?;
        if let Some(time_zone) = time_zone {
            time_zone_offset(time_zone)?;
        }
        self.unary(StringFunction::ToDatetime {
            options,
            time_unit,
            time_zone: time_zone.map(|tz| tz.to_string()),
        })
    }

    /// Parse into times of day.
    pub fn to_time(&self, options: StrptimeOptions) -> Result<Expr> {
        options.validate(TemporalKind::Time)?;
        self.unary(StringFunction::ToTime { options })
    }

    /// Parse into the given temporal type.
    pub fn parse(&self, datatype: &DataType, options: StrptimeOptions) -> Result<Expr> {
        match TemporalTarget::try_from(datatype)? {
            TemporalTarget::Date => self.to_date(options),
            TemporalTarget::Datetime {
                time_unit,
                time_zone,
            } => self.to_datetime(options, time_unit, time_zone.as_deref()),
            TemporalTarget::Time => self.to_time(options),
        }
    }

    /// Length in bytes.
    pub fn lengths(&self) -> Result<Expr> {
        self.unary(StringFunction::Lengths)
    }

    /// Length in characters.
    pub fn n_chars(&self) -> Result<Expr> {
        self.unary(StringFunction::NChars)
    }

    pub fn to_uppercase(&self) -> Result<Expr> {
        self.unary(StringFunction::ToUppercase)
    }

    pub fn to_lowercase(&self) -> Result<Expr> {
        self.unary(StringFunction::ToLowercase)
    }

    fn strip_side(&self, side: StripSide, mask: Option<&str>) -> Result<Expr> {
        let mask = mask.map(|m| single_char("mask", m)).transpose()?;
        self.unary(StringFunction::Strip { side, mask })
    }

    /// Strip both ends, removing `mask` or whitespace if there's no mask.
    pub fn strip(&self, mask: Option<&str>) -> Result<Expr> {
        self.strip_side(StripSide::Both, mask)
    }

    pub fn lstrip(&self, mask: Option<&str>) -> Result<Expr> {
        self.strip_side(StripSide::Start, mask)
    }

    pub fn rstrip(&self, mask: Option<&str>) -> Result<Expr> {
        self.strip_side(StripSide::End, mask)
    }

    /// Pad with leading zeros, keeping any sign first.
    pub fn zfill(&self, width: usize) -> Result<Expr> {
        self.unary(StringFunction::ZFill { width })
    }

    /// Left justify, padding on the right with `fill`.
    pub fn ljust(&self, width: usize, fill: &str) -> Result<Expr> {
        let fill = single_char("fillchar", fill)?;
        self.unary(StringFunction::LJust { width, fill })
    }

    /// Right justify, padding on the left with `fill`.
    pub fn rjust(&self, width: usize, fill: &str) -> Result<Expr> {
        let fill = single_char("fillchar", fill)?;
        self.unary(StringFunction::RJust { width, fill })
    }

    /// Check for a regex (or literal) match.
    pub fn contains(
        &self,
        pattern: impl Into<ExprInput>,
        literal: bool,
        strict: bool,
    ) -> Result<Expr> {
        let pattern = pattern.into();
        if !literal && strict {
            validate_pattern_input(&pattern)?;
        }
        self.expr.apply(
            StringFunction::Contains { literal, strict },
            [lit_or_col(pattern, true)],
        )
    }

    pub fn starts_with(&self, prefix: impl Into<ExprInput>) -> Result<Expr> {
        self.expr
            .apply(StringFunction::StartsWith, [lit_or_col(prefix, true)])
    }

    pub fn ends_with(&self, suffix: impl Into<ExprInput>) -> Result<Expr> {
        self.expr
            .apply(StringFunction::EndsWith, [lit_or_col(suffix, true)])
    }

    /// Parse JSON strings into `datatype`, inferring the type when not
    /// given.
    pub fn json_extract(&self, datatype: Option<DataType>) -> Result<Expr> {
        if let Some(datatype) = &datatype {
            if !datatype.is_fully_parameterized() {
                return Err(LcError::argument(format!(
                    "json_extract dtype must be fully parameterized, got {datatype}"
                ))
                .with_field("argument", "dtype")
                .with_field("value", datatype));
            }
        }
        self.unary(StringFunction::JsonExtract { datatype })
    }

    /// First match of a JSONPath, as a string.
    pub fn json_path_match(&self, json_path: &str) -> Result<Expr> {
        let path = JsonPath::parse(json_path)?;
        self.unary(StringFunction::JsonPathMatch { path })
    }

    /// Decode "hex" or "base64" text into binary.
    pub fn decode(&self, encoding: &str, strict: bool) -> Result<Expr> {
        let encoding: BinaryEncoding = encoding.parse()?;
        self.unary(StringFunction::Decode { encoding, strict })
    }

    /// Encode the bytes of each string as "hex" or "base64".
    pub fn encode(&self, encoding: &str) -> Result<Expr> {
        let encoding: BinaryEncoding = encoding.parse()?;
        self.unary(StringFunction::Encode { encoding })
    }

    /// Extract a capture group from the first match.
    pub fn extract(&self, pattern: &str, group_index: usize) -> Result<Expr> {
        validate_regex(pattern)?;
        self.unary(StringFunction::Extract {
            pattern: pattern.to_string(),
            group_index,
        })
    }

    pub fn extract_all(&self, pattern: impl Into<ExprInput>) -> Result<Expr> {
        let pattern = pattern.into();
        validate_pattern_input(&pattern)?;
        self.expr
            .apply(StringFunction::ExtractAll, [lit_or_col(pattern, true)])
    }

    pub fn count_match(&self, pattern: &str) -> Result<Expr> {
        validate_regex(pattern)?;
        self.unary(StringFunction::CountMatch {
            pattern: pattern.to_string(),
        })
    }

    pub fn split(&self, by: &str, inclusive: bool) -> Result<Expr> {
        validate_split(by, None)?;
        self.unary(StringFunction::Split {
            by: by.to_string(),
            inclusive,
        })
    }

    /// Split into a struct of exactly `n + 1` fields.
    pub fn split_exact(&self, by: &str, n: usize, inclusive: bool) -> Result<Expr> {
        validate_split(by, Some(n.saturating_add(1)))?;
        self.unary(StringFunction::SplitExact {
            by: by.to_string(),
            n,
            inclusive,
        })
    }

    /// Split into a struct of at most `n` fields, the last holding the rest
    /// of the string.
    pub fn splitn(&self, by: &str, n: usize) -> Result<Expr> {
        validate_split(by, Some(n))?;
        self.unary(StringFunction::SplitN {
            by: by.to_string(),
            n,
        })
    }

    /// Replace the first `n` matches.
    pub fn replace(
        &self,
        pattern: impl Into<ExprInput>,
        value: impl Into<ExprInput>,
        literal: bool,
        n: usize,
    ) -> Result<Expr> {
        self.replace_inner(pattern.into(), value.into(), ReplaceCount::First(n), literal)
    }

    pub fn replace_all(
        &self,
        pattern: impl Into<ExprInput>,
        value: impl Into<ExprInput>,
        literal: bool,
    ) -> Result<Expr> {
        self.replace_inner(pattern.into(), value.into(), ReplaceCount::All, literal)
    }

    fn replace_inner(
        &self,
        pattern: ExprInput,
        value: ExprInput,
        count: ReplaceCount,
        literal: bool,
    ) -> Result<Expr> {
        if !literal {
            validate_pattern_input(&pattern)?;
        }
        self.expr.apply(
            StringFunction::Replace { count, literal },
            [lit_or_col(pattern, true), lit_or_col(value, true)],
        )
    }

    /// Character based substring.
    pub fn slice(&self, offset: i64, length: Option<u64>) -> Result<Expr> {
        self.unary(StringFunction::Slice { offset, length })
    }

    /// One row per character.
    pub fn explode(&self) -> Result<Expr> {
        self.unary(StringFunction::Explode)
    }

    pub fn parse_int(&self, radix: u32, strict: bool) -> Result<Expr> {
        validate_radix(radix)?;
        self.unary(StringFunction::ParseInt { radix, strict })
    }

    /// Join all values into a single string.
    pub fn concat(&self, delimiter: &str) -> Result<Expr> {
        self.unary(StringFunction::Concat {
            delimiter: delimiter.to_string(),
        })
    }
}
