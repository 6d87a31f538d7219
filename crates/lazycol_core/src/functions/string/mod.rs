//! String functions.
//!
//! Each file holds the kernel for one function (or a small family of
//! related ones). `StringFunction` ties them together for the expression
//! graph.
pub mod case;
pub mod codec;
pub mod concat;
pub mod explode;
pub mod extract;
pub mod json;
pub mod json_path;
pub mod length;
pub mod pad;
pub mod parse_int;
pub mod replace;
pub mod search;
pub mod slice;
pub mod split;
pub mod strip;
pub mod to_temporal;

use json_path::JsonPath;
use lazycol_error::{LcError, Result};
use regex::Regex;
use replace::ReplaceCount;
use strip::StripSide;
use to_temporal::StrptimeOptions;

use super::input_at;
use crate::arrays::column::Column;
use crate::arrays::datatype::{DataType, TimeUnit};
use crate::engine::context::EvalContext;
use crate::functions::encoding::BinaryEncoding;
use crate::functions::temporal::TemporalKind;

/// Check a regex compiles, for patterns known when building an expression.
pub fn validate_regex(pattern: &str) -> Result<()> {
    Regex::new(pattern).map_err(|e| {
        LcError::argument(format!("Invalid regex pattern '{pattern}'"))
            .with_field("argument", "pattern")
            .with_field("value", pattern)
            .with_source(e)
    })?;
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StringFunction {
    ToDate {
        options: StrptimeOptions,
    },
    ToDatetime {
        options: StrptimeOptions,
        time_unit: Option<TimeUnit>,
        time_zone: Option<String>,
    },
    ToTime {
        options: StrptimeOptions,
    },
    Lengths,
    NChars,
    ToUppercase,
    ToLowercase,
    Strip {
        side: StripSide,
        mask: Option<char>,
    },
    ZFill {
        width: usize,
    },
    LJust {
        width: usize,
        fill: char,
    },
    RJust {
        width: usize,
        fill: char,
    },
    /// Inputs: subject, pattern.
    Contains {
        literal: bool,
        strict: bool,
    },
    /// Inputs: subject, prefix.
    StartsWith,
    /// Inputs: subject, suffix.
    EndsWith,
    JsonExtract {
        datatype: Option<DataType>,
    },
    JsonPathMatch {
        path: JsonPath,
    },
    Decode {
        encoding: BinaryEncoding,
        strict: bool,
    },
    Encode {
        encoding: BinaryEncoding,
    },
    Extract {
        pattern: String,
        group_index: usize,
    },
    /// Inputs: subject, pattern.
    ExtractAll,
    CountMatch {
        pattern: String,
    },
    Split {
        by: String,
        inclusive: bool,
    },
    SplitExact {
        by: String,
        n: usize,
        inclusive: bool,
    },
    SplitN {
        by: String,
        n: usize,
    },
    /// Inputs: subject, pattern, value.
    Replace {
        count: ReplaceCount,
        literal: bool,
    },
    Slice {
        offset: i64,
        length: Option<u64>,
    },
    Explode,
    ParseInt {
        radix: u32,
        strict: bool,
    },
    Concat {
        delimiter: String,
    },
}

impl StringFunction {
    pub fn name(&self) -> &'static str {
        match self {
            Self::ToDate { .. } => "to_date",
            Self::ToDatetime { .. } => "to_datetime",
            Self::ToTime { .. } => "to_time",
            Self::Lengths => "lengths",
            Self::NChars => "n_chars",
            Self::ToUppercase => "to_uppercase",
            Self::ToLowercase => "to_lowercase",
            Self::Strip { side, .. } => side.function_name(),
            Self::ZFill { .. } => "zfill",
            Self::LJust { .. } => "ljust",
            Self::RJust { .. } => "rjust",
            Self::Contains { .. } => "contains",
            Self::StartsWith => "starts_with",
            Self::EndsWith => "ends_with",
            Self::JsonExtract { .. } => "json_extract",
            Self::JsonPathMatch { .. } => "json_path_match",
            Self::Decode { .. } => "decode",
            Self::Encode { .. } => "encode",
            Self::Extract { .. } => "extract",
            Self::ExtractAll => "extract_all",
            Self::CountMatch { .. } => "count_match",
            Self::Split { .. } => "split",
            Self::SplitExact { .. } => "split_exact",
            Self::SplitN { .. } => "splitn",
            Self::Replace {
                count: ReplaceCount::All,
                ..
            } => "replace_all",
            Self::Replace { .. } => "replace",
            Self::Slice { .. } => "slice",
            Self::Explode => "explode",
            Self::ParseInt { .. } => "parse_int",
            Self::Concat { .. } => "concat",
        }
    }

    pub fn num_inputs(&self) -> usize {
        match self {
            Self::Contains { .. } | Self::StartsWith | Self::EndsWith | Self::ExtractAll => 2,
            Self::Replace { .. } => 3,
            _ => 1,
        }
    }

    /// Non-expression arguments, rendered for display.
    pub fn params(&self) -> Vec<String> {
        match self {
            Self::ToDate { options } | Self::ToTime { options } => vec![options.to_string()],
            Self::ToDatetime {
                options,
                time_unit,
                time_zone,
            } => vec![
                options.to_string(),
                match time_unit {
                    Some(unit) => format!("time_unit={:?}", unit.as_str()),
                    None => "time_unit=None".to_string(),
                },
                format!("time_zone={time_zone:?}"),
            ],
            Self::Lengths
            | Self::NChars
            | Self::ToUppercase
            | Self::ToLowercase
            | Self::StartsWith
            | Self::EndsWith
            | Self::ExtractAll
            | Self::Explode => Vec::new(),
            Self::Strip { mask, .. } => mask
                .iter()
                .map(|c| format!("{:?}", c.to_string()))
                .collect(),
            Self::ZFill { width } => vec![width.to_string()],
            Self::LJust { width, fill } | Self::RJust { width, fill } => {
                vec![width.to_string(), format!("{:?}", fill.to_string())]
            }
            Self::Contains { literal, strict } => {
                vec![format!("literal={literal}"), format!("strict={strict}")]
            }
            Self::JsonExtract { datatype } => match datatype {
                Some(datatype) => vec![datatype.to_string()],
                None => Vec::new(),
            },
            Self::JsonPathMatch { path } => vec![format!("{:?}", path.as_str())],
            Self::Decode { encoding, strict } => {
                vec![format!("{:?}", encoding.as_str()), format!("strict={strict}")]
            }
            Self::Encode { encoding } => vec![format!("{:?}", encoding.as_str())],
            Self::Extract {
                pattern,
                group_index,
            } => vec![format!("{pattern:?}"), group_index.to_string()],
            Self::CountMatch { pattern } => vec![format!("{pattern:?}")],
            Self::Split { by, inclusive } => {
                vec![format!("{by:?}"), format!("inclusive={inclusive}")]
            }
            Self::SplitExact { by, n, inclusive } => vec![
                format!("{by:?}"),
                n.to_string(),
                format!("inclusive={inclusive}"),
            ],
            Self::SplitN { by, n } => vec![format!("{by:?}"), n.to_string()],
            Self::Replace { count, literal } => match count {
                ReplaceCount::First(n) => vec![format!("literal={literal}"), format!("n={n}")],
                ReplaceCount::All => vec![format!("literal={literal}")],
            },
            Self::Slice { offset, length } => vec![
                offset.to_string(),
                match length {
                    Some(length) => length.to_string(),
                    None => "None".to_string(),
                },
            ],
            Self::ParseInt { radix, strict } => {
                vec![radix.to_string(), format!("strict={strict}")]
            }
            Self::Concat { delimiter } => vec![format!("{delimiter:?}")],
        }
    }

    pub fn evaluate(&self, ctx: &mut EvalContext, inputs: &[Column]) -> Result<Column> {
        let input = input_at(inputs, 0)?;
        let out = |datatype: DataType, values| Column::new(input.name(), datatype, values);

        Ok(match self {
            Self::ToDate { options } => {
                to_temporal::eval_to_temporal(ctx, input, TemporalKind::Date, options, None, None)?
            }
            Self::ToDatetime {
                options,
                time_unit,
                time_zone,
            } => to_temporal::eval_to_temporal(
                ctx,
                input,
                TemporalKind::Datetime,
                options,
                *time_unit,
                time_zone.as_deref(),
            )?,
            Self::ToTime { options } => {
                to_temporal::eval_to_temporal(ctx, input, TemporalKind::Time, options, None, None)?
            }
            Self::Lengths => out(DataType::UInt32, length::eval_lengths(input)?),
            Self::NChars => out(DataType::UInt32, length::eval_n_chars(input)?),
            Self::ToUppercase => out(DataType::Utf8, case::eval_to_uppercase(input)?),
            Self::ToLowercase => out(DataType::Utf8, case::eval_to_lowercase(input)?),
            Self::Strip { side, mask } => out(DataType::Utf8, strip::eval_strip(input, *side, *mask)?),
            Self::ZFill { width } => out(DataType::Utf8, pad::eval_zfill(input, *width)?),
            Self::LJust { width, fill } => out(DataType::Utf8, pad::eval_ljust(input, *width, *fill)?),
            Self::RJust { width, fill } => out(DataType::Utf8, pad::eval_rjust(input, *width, *fill)?),
            Self::Contains { literal, strict } => {
                let pattern = input_at(inputs, 1)?;
                out(
                    DataType::Boolean,
                    search::eval_contains(ctx, input, pattern, *literal, *strict)?,
                )
            }
            Self::StartsWith => out(
                DataType::Boolean,
                search::eval_starts_with(input, input_at(inputs, 1)?)?,
            ),
            Self::EndsWith => out(
                DataType::Boolean,
                search::eval_ends_with(input, input_at(inputs, 1)?)?,
            ),
            Self::JsonExtract { datatype } => json::eval_json_extract(ctx, input, datatype.as_ref())?,
            Self::JsonPathMatch { path } => {
                out(DataType::Utf8, json_path::eval_json_path_match(input, path)?)
            }
            Self::Decode { encoding, strict } => {
                out(DataType::Binary, codec::eval_decode(input, *encoding, *strict)?)
            }
            Self::Encode { encoding } => out(DataType::Utf8, codec::eval_encode(input, *encoding)?),
            Self::Extract {
                pattern,
                group_index,
            } => out(
                DataType::Utf8,
                extract::eval_extract(ctx, input, pattern, *group_index)?,
            ),
            Self::ExtractAll => out(
                DataType::list(DataType::Utf8),
                extract::eval_extract_all(ctx, input, input_at(inputs, 1)?)?,
            ),
            Self::CountMatch { pattern } => {
                out(DataType::UInt32, extract::eval_count_match(ctx, input, pattern)?)
            }
            Self::Split { by, inclusive } => out(
                DataType::list(DataType::Utf8),
                split::eval_split(input, by, *inclusive)?,
            ),
            Self::SplitExact { by, n, inclusive } => out(
                split::split_struct_type(n.saturating_add(1)),
                split::eval_split_exact(input, by, *n, *inclusive)?,
            ),
            Self::SplitN { by, n } => out(split::split_struct_type(*n), split::eval_splitn(input, by, *n)?),
            Self::Replace { count, literal } => out(
                DataType::Utf8,
                replace::eval_replace(
                    ctx,
                    input,
                    input_at(inputs, 1)?,
                    input_at(inputs, 2)?,
                    *count,
                    *literal,
                )?,
            ),
            Self::Slice { offset, length } => {
                out(DataType::Utf8, slice::eval_slice(input, *offset, *length)?)
            }
            Self::Explode => out(DataType::Utf8, explode::eval_explode(input)?),
            Self::ParseInt { radix, strict } => {
                out(DataType::Int32, parse_int::eval_parse_int(input, *radix, *strict)?)
            }
            Self::Concat { delimiter } => {
                out(DataType::Utf8, vec![concat::eval_concat(input, delimiter)])
            }
        })
    }
}
