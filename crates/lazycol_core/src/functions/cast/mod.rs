pub mod parse;

use lazycol_error::{LcError, Result};
use parse::{BoolParser, DateParser, DecimalParser, Float32Parser, Float64Parser, Int128Parser, Parser};

use crate::arrays::column::Column;
use crate::arrays::datatype::{DataType, TimeUnit};
use crate::arrays::scalar::{DatetimeScalar, DecimalScalar, ScalarValue};
use crate::functions::executor::ErrorState;

const SECONDS_PER_DAY: i64 = 86_400;

/// Cast every value in a column to `to`.
///
/// Values that can't be cast error when `strict`, otherwise they become null.
pub fn cast_column(column: &Column, to: &DataType, strict: bool) -> Result<Column> {
    let mut error_state = ErrorState::new(strict);

    let values = column
        .values()
        .iter()
        .map(|value| match cast_scalar(value, to) {
            Some(v) => v,
            None => {
                error_state.set_error(|| {
                    LcError::compute(format!("Failed to cast value '{value}' to {to}"))
                        .with_field("value", value)
                        .with_field("datatype", to)
                });
                ScalarValue::Null
            }
        })
        .collect();

    error_state.into_result()?;

    Ok(Column::new(column.name(), to.clone(), values))
}

/// Cast a single value, None if the cast isn't possible.
pub fn cast_scalar(value: &ScalarValue, to: &DataType) -> Option<ScalarValue> {
    if value.is_null() {
        return Some(ScalarValue::Null);
    }

    if value.datatype() == *to {
        return Some(value.clone());
    }

    match (value, to) {
        (ScalarValue::Binary(b), DataType::Utf8) => {
            String::from_utf8(b.clone()).ok().map(ScalarValue::Utf8)
        }
        (v, DataType::Utf8) => Some(ScalarValue::Utf8(v.to_string())),
        (ScalarValue::Utf8(s), DataType::Categorical) => Some(ScalarValue::Categorical(s.clone())),
        (ScalarValue::Utf8(s), DataType::Binary) => Some(ScalarValue::Binary(s.as_bytes().to_vec())),
        (ScalarValue::Utf8(s), to) => cast_utf8(s, to),
        (ScalarValue::Boolean(b), to) if to.is_integer() => int_to_scalar(*b as i128, to),
        (ScalarValue::Boolean(b), to) if to.is_float() => float_to_scalar(*b as u8 as f64, to),
        (v, DataType::Boolean) => match as_i128(v) {
            Some(i) => Some(ScalarValue::Boolean(i != 0)),
            None => as_f64(v).map(|f| ScalarValue::Boolean(f != 0.0)),
        },
        (v, to) if to.is_integer() => match as_i128(v) {
            Some(i) => int_to_scalar(i, to),
            None => {
                let f = as_f64(v)?;
                if !f.is_finite() {
                    return None;
                }
                int_to_scalar(f.trunc() as i128, to)
            }
        },
        (v, to) if to.is_float() => {
            let f = as_i128(v).map(|i| i as f64).or_else(|| as_f64(v))?;
            float_to_scalar(f, to)
        }
        (ScalarValue::Date(days), DataType::Datetime(Some(meta))) => {
            let value = (*days as i64)
                .checked_mul(SECONDS_PER_DAY)?
                .checked_mul(meta.unit.units_per_second())?;
            Some(ScalarValue::Datetime(DatetimeScalar {
                unit: meta.unit,
                time_zone: meta.time_zone.clone(),
                value,
            }))
        }
        (ScalarValue::Datetime(dt), DataType::Date) => {
            let per_day = SECONDS_PER_DAY * dt.unit.units_per_second();
            i32::try_from(dt.value.div_euclid(per_day)).ok().map(ScalarValue::Date)
        }
        (ScalarValue::Datetime(dt), DataType::Datetime(Some(meta))) => {
            let value = convert_time_unit(dt.value, dt.unit, meta.unit)?;
            Some(ScalarValue::Datetime(DatetimeScalar {
                unit: meta.unit,
                time_zone: meta.time_zone.clone(),
                value,
            }))
        }
        (ScalarValue::List(values), DataType::List(Some(meta))) => {
            let values = values
                .iter()
                .map(|v| cast_scalar(v, &meta.datatype))
                .collect::<Option<Vec<_>>>()?;
            Some(ScalarValue::List(values))
        }
        // Arrays are held as lists of exactly `width` elements.
        (ScalarValue::List(values), DataType::Array(Some(meta))) if values.len() == meta.width => {
            let values = values
                .iter()
                .map(|v| cast_scalar(v, &meta.datatype))
                .collect::<Option<Vec<_>>>()?;
            Some(ScalarValue::List(values))
        }
        _ => None,
    }
}

fn cast_utf8(s: &str, to: &DataType) -> Option<ScalarValue> {
    match to {
        DataType::Boolean => BoolParser.parse(s).map(ScalarValue::Boolean),
        DataType::Float32 => Float32Parser::new().parse(s).map(ScalarValue::Float32),
        DataType::Float64 => Float64Parser::new().parse(s).map(ScalarValue::Float64),
        DataType::Date => DateParser.parse(s).map(ScalarValue::Date),
        DataType::Decimal(Some(meta)) => {
            let precision = meta.precision.unwrap_or(38);
            let value = DecimalParser::new(precision, meta.scale).parse(s)?;
            Some(ScalarValue::Decimal(DecimalScalar {
                precision,
                scale: meta.scale,
                value,
            }))
        }
        to if to.is_integer() => int_to_scalar(Int128Parser::new().parse(s)?, to),
        _ => None,
    }
}

fn as_i128(value: &ScalarValue) -> Option<i128> {
    Some(match value {
        ScalarValue::Int8(v) => *v as i128,
        ScalarValue::Int16(v) => *v as i128,
        ScalarValue::Int32(v) => *v as i128,
        ScalarValue::Int64(v) => *v as i128,
        ScalarValue::UInt8(v) => *v as i128,
        ScalarValue::UInt16(v) => *v as i128,
        ScalarValue::UInt32(v) => *v as i128,
        ScalarValue::UInt64(v) => *v as i128,
        ScalarValue::Boolean(v) => *v as i128,
        _ => return None,
    })
}

fn as_f64(value: &ScalarValue) -> Option<f64> {
    match value {
        ScalarValue::Float32(v) => Some(*v as f64),
        ScalarValue::Float64(v) => Some(*v),
        ScalarValue::Decimal(d) => Some(d.value as f64 / 10_f64.powi(d.scale as i32)),
        _ => None,
    }
}

/// Create an integer scalar of the given type, None if out of range.
pub fn int_to_scalar(v: i128, to: &DataType) -> Option<ScalarValue> {
    Some(match to {
        DataType::Int8 => ScalarValue::Int8(i8::try_from(v).ok()?),
        DataType::Int16 => ScalarValue::Int16(i16::try_from(v).ok()?),
        DataType::Int32 => ScalarValue::Int32(i32::try_from(v).ok()?),
        DataType::Int64 => ScalarValue::Int64(i64::try_from(v).ok()?),
        DataType::UInt8 => ScalarValue::UInt8(u8::try_from(v).ok()?),
        DataType::UInt16 => ScalarValue::UInt16(u16::try_from(v).ok()?),
        DataType::UInt32 => ScalarValue::UInt32(u32::try_from(v).ok()?),
        DataType::UInt64 => ScalarValue::UInt64(u64::try_from(v).ok()?),
        _ => return None,
    })
}

pub fn float_to_scalar(v: f64, to: &DataType) -> Option<ScalarValue> {
    match to {
        DataType::Float32 => Some(ScalarValue::Float32(v as f32)),
        DataType::Float64 => Some(ScalarValue::Float64(v)),
        _ => None,
    }
}

fn convert_time_unit(value: i64, from: TimeUnit, to: TimeUnit) -> Option<i64> {
    let (from, to) = (from.units_per_second(), to.units_per_second());
    if to >= from {
        value.checked_mul(to / from)
    } else {
        Some(value.div_euclid(from / to))
    }
}
