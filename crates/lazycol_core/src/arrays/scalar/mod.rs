pub mod temporal;

use std::fmt;

use lazycol_error::{LcError, Result};

use crate::arrays::datatype::{DataType, DecimalTypeMeta, Field, StructTypeMeta, TimeUnit};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DecimalScalar {
    pub precision: u32,
    pub scale: u32,
    pub value: i128,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DatetimeScalar {
    pub unit: TimeUnit,
    pub time_zone: Option<String>,
    /// Count of `unit` since epoch, UTC.
    pub value: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DurationScalar {
    pub unit: TimeUnit,
    pub value: i64,
}

/// A single value.
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarValue {
    Null,
    Boolean(bool),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    UInt8(u8),
    UInt16(u16),
    UInt32(u32),
    UInt64(u64),
    Float32(f32),
    Float64(f64),
    Decimal(DecimalScalar),
    Utf8(String),
    Binary(Vec<u8>),
    Categorical(String),
    /// Days since epoch.
    Date(i32),
    /// Nanoseconds since midnight.
    Time(i64),
    Datetime(DatetimeScalar),
    Duration(DurationScalar),
    List(Vec<ScalarValue>),
    Struct(Vec<(String, ScalarValue)>),
}

impl ScalarValue {
    pub const fn is_null(&self) -> bool {
        matches!(self, ScalarValue::Null)
    }

    /// Data type of this scalar.
    ///
    /// Lists take the type of their first non-null element, or `Unknown` if
    /// there isn't one.
    pub fn datatype(&self) -> DataType {
        match self {
            Self::Null => DataType::Null,
            Self::Boolean(_) => DataType::Boolean,
            Self::Int8(_) => DataType::Int8,
            Self::Int16(_) => DataType::Int16,
            Self::Int32(_) => DataType::Int32,
            Self::Int64(_) => DataType::Int64,
            Self::UInt8(_) => DataType::UInt8,
            Self::UInt16(_) => DataType::UInt16,
            Self::UInt32(_) => DataType::UInt32,
            Self::UInt64(_) => DataType::UInt64,
            Self::Float32(_) => DataType::Float32,
            Self::Float64(_) => DataType::Float64,
            Self::Decimal(d) => DataType::Decimal(Some(DecimalTypeMeta {
                precision: Some(d.precision),
                scale: d.scale,
            })),
            Self::Utf8(_) => DataType::Utf8,
            Self::Binary(_) => DataType::Binary,
            Self::Categorical(_) => DataType::Categorical,
            Self::Date(_) => DataType::Date,
            Self::Time(_) => DataType::Time,
            Self::Datetime(d) => DataType::datetime(d.unit, d.time_zone.clone()),
            Self::Duration(d) => DataType::duration(d.unit),
            Self::List(values) => DataType::list(
                values
                    .iter()
                    .find(|v| !v.is_null())
                    .map(|v| v.datatype())
                    .unwrap_or(DataType::Unknown),
            ),
            Self::Struct(fields) => DataType::Struct(Some(StructTypeMeta {
                fields: fields
                    .iter()
                    .map(|(name, v)| Field::new(name.clone(), v.datatype()))
                    .collect(),
            })),
        }
    }

    pub fn try_as_str(&self) -> Result<&str> {
        match self {
            Self::Utf8(s) | Self::Categorical(s) => Ok(s),
            other => Err(LcError::new(format!("Not a string: {other}"))),
        }
    }

    pub fn try_as_bytes(&self) -> Result<&[u8]> {
        match self {
            Self::Binary(b) => Ok(b),
            Self::Utf8(s) => Ok(s.as_bytes()),
            other => Err(LcError::new(format!("Not a byte string: {other}"))),
        }
    }

    pub fn try_as_bool(&self) -> Result<bool> {
        match self {
            Self::Boolean(b) => Ok(*b),
            other => Err(LcError::new(format!("Not a bool: {other}"))),
        }
    }

    /// Get any integer scalar as an i64.
    pub fn try_as_i64(&self) -> Result<i64> {
        let v = match self {
            Self::Int8(v) => *v as i64,
            Self::Int16(v) => *v as i64,
            Self::Int32(v) => *v as i64,
            Self::Int64(v) => *v,
            Self::UInt8(v) => *v as i64,
            Self::UInt16(v) => *v as i64,
            Self::UInt32(v) => *v as i64,
            Self::UInt64(v) => {
                i64::try_from(*v).map_err(|_| LcError::new("UInt64 out of range for i64"))?
            }
            other => return Err(LcError::new(format!("Not an integer: {other}"))),
        };
        Ok(v)
    }

    pub fn try_as_list(&self) -> Result<&[ScalarValue]> {
        match self {
            Self::List(values) => Ok(values),
            other => Err(LcError::new(format!("Not a list: {other}"))),
        }
    }

    pub fn try_as_struct(&self) -> Result<&[(String, ScalarValue)]> {
        match self {
            Self::Struct(fields) => Ok(fields),
            other => Err(LcError::new(format!("Not a struct: {other}"))),
        }
    }

    /// Format a value nested inside a list or struct. Strings are quoted.
    fn fmt_nested(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Utf8(s) | Self::Categorical(s) => write!(f, "{s:?}"),
            other => write!(f, "{other}"),
        }
    }
}

/// Integral floats keep a trailing ".0".
fn fmt_float<F: fmt::Display>(f: &mut fmt::Formatter<'_>, v: F, integral: bool) -> fmt::Result {
    if integral {
        write!(f, "{v:.1}")
    } else {
        write!(f, "{v}")
    }
}

impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Boolean(v) => write!(f, "{v}"),
            Self::Int8(v) => write!(f, "{v}"),
            Self::Int16(v) => write!(f, "{v}"),
            Self::Int32(v) => write!(f, "{v}"),
            Self::Int64(v) => write!(f, "{v}"),
            Self::UInt8(v) => write!(f, "{v}"),
            Self::UInt16(v) => write!(f, "{v}"),
            Self::UInt32(v) => write!(f, "{v}"),
            Self::UInt64(v) => write!(f, "{v}"),
            Self::Float32(v) => fmt_float(f, v, v.is_finite() && v.fract() == 0.0 && v.abs() < 1e7),
            Self::Float64(v) => fmt_float(f, v, v.is_finite() && v.fract() == 0.0 && v.abs() < 1e16),
            Self::Decimal(d) => {
                if d.scale == 0 {
                    return write!(f, "{}", d.value);
                }
                let pow = 10_i128.pow(d.scale);
                let sign = if d.value < 0 { "-" } else { "" };
                let abs = d.value.unsigned_abs();
                write!(
                    f,
                    "{sign}{}.{:0width$}",
                    abs / pow as u128,
                    abs % pow as u128,
                    width = d.scale as usize
                )
            }
            Self::Utf8(v) | Self::Categorical(v) => write!(f, "{v}"),
            Self::Binary(v) => write!(f, "{}", String::from_utf8_lossy(v)),
            Self::Date(days) => match temporal::days_to_date(*days) {
                Some(date) => write!(f, "{}", date.format("%Y-%m-%d")),
                None => write!(f, "{days}"),
            },
            Self::Time(nanos) => match temporal::nanos_to_time(*nanos) {
                Some(time) => write!(f, "{}", time.format("%H:%M:%S%.f")),
                None => write!(f, "{nanos}"),
            },
            Self::Datetime(d) => {
                match temporal::value_to_datetime(d.value, d.unit) {
                    Some(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S%.f"))?,
                    None => write!(f, "{}", d.value)?,
                }
                match &d.time_zone {
                    Some(tz) => write!(f, " {tz}"),
                    None => Ok(()),
                }
            }
            Self::Duration(d) => write!(f, "{}{}", d.value, d.unit),
            Self::List(values) => {
                write!(f, "[")?;
                for (idx, v) in values.iter().enumerate() {
                    if idx > 0 {
                        write!(f, ", ")?;
                    }
                    v.fmt_nested(f)?;
                }
                write!(f, "]")
            }
            Self::Struct(fields) => {
                write!(f, "{{")?;
                for (idx, (_, v)) in fields.iter().enumerate() {
                    if idx > 0 {
                        write!(f, ",")?;
                    }
                    v.fmt_nested(f)?;
                }
                write!(f, "}}")
            }
        }
    }
}

macro_rules! impl_from_primitive {
    ($prim:ty, $variant:ident) => {
        impl From<$prim> for ScalarValue {
            fn from(value: $prim) -> Self {
                ScalarValue::$variant(value)
            }
        }
    };
}

impl_from_primitive!(bool, Boolean);
impl_from_primitive!(i8, Int8);
impl_from_primitive!(i16, Int16);
impl_from_primitive!(i32, Int32);
impl_from_primitive!(i64, Int64);
impl_from_primitive!(u8, UInt8);
impl_from_primitive!(u16, UInt16);
impl_from_primitive!(u32, UInt32);
impl_from_primitive!(u64, UInt64);
impl_from_primitive!(f32, Float32);
impl_from_primitive!(f64, Float64);
impl_from_primitive!(String, Utf8);
impl_from_primitive!(Vec<u8>, Binary);

impl From<&str> for ScalarValue {
    fn from(value: &str) -> Self {
        ScalarValue::Utf8(value.to_string())
    }
}

impl From<&[u8]> for ScalarValue {
    fn from(value: &[u8]) -> Self {
        ScalarValue::Binary(value.to_vec())
    }
}

impl<T: Into<ScalarValue>> From<Option<T>> for ScalarValue {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => v.into(),
            None => ScalarValue::Null,
        }
    }
}
