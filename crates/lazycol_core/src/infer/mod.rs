//! Data type inference for untyped input values.
mod supertype;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use indexmap::{IndexMap, IndexSet};
use lazycol_error::{LcError, Result};
pub use supertype::supertype;
use tracing::debug;

use crate::arrays::datatype::{DataType, Field, StructTypeMeta, TimeUnit};
use crate::arrays::scalar::temporal::{datetime_to_value, time_to_nanos};
use crate::arrays::scalar::{DatetimeScalar, ScalarValue};

/// An untyped value handed to us by a caller.
#[derive(Debug, Clone, PartialEq)]
pub enum InputValue {
    Null,
    Boolean(bool),
    Int(i64),
    Float(f64),
    /// Fixed point decimal, `value * 10^-scale`.
    Decimal {
        value: i128,
        scale: u32,
    },
    Str(String),
    Bytes(Vec<u8>),
    Date(NaiveDate),
    Time(NaiveTime),
    Datetime(NaiveDateTime),
    DatetimeTz(DateTime<FixedOffset>),
    Map(IndexMap<String, InputValue>),
    Seq(Vec<InputValue>),
}

static NULL_INPUT: InputValue = InputValue::Null;

/// Infer the data type for a single value.
///
/// Sequences with irreconcilable element types error.
pub fn dtype_for(value: &InputValue) -> Result<DataType> {
    Ok(match value {
        InputValue::Null => DataType::Null,
        InputValue::Boolean(_) => DataType::Boolean,
        InputValue::Int(_) => DataType::Int64,
        InputValue::Float(_) | InputValue::Decimal { .. } => DataType::Float64,
        InputValue::Str(_) => DataType::Utf8,
        InputValue::Bytes(_) => DataType::Binary,
        InputValue::Date(_) | InputValue::Datetime(_) | InputValue::DatetimeTz(_) => {
            DataType::datetime(TimeUnit::Nanoseconds, None)
        }
        InputValue::Time(_) => DataType::Time,
        InputValue::Map(map) => DataType::Struct(Some(StructTypeMeta {
            fields: map
                .iter()
                .map(|(name, value)| Ok(Field::new(name.clone(), dtype_for(value)?)))
                .collect::<Result<Vec<_>>>()?,
        })),
        InputValue::Seq(values) => {
            let mut inner = DataType::Unknown;
            for value in values {
                let value_type = dtype_for(value)?;
                inner = supertype(&inner, &value_type).ok_or_else(|| {
                    LcError::schema_inference("Cannot reconcile element types in sequence")
                        .with_field("left", &inner)
                        .with_field("right", &value_type)
                })?;
            }
            if inner.is_null() {
                inner = DataType::Unknown;
            }
            DataType::list(inner)
        }
    })
}

/// Infer the data type of a column by widening across all of its values.
///
/// An empty or all-null column is `Null`.
pub fn infer_column<'a>(
    name: &str,
    values: impl IntoIterator<Item = &'a InputValue>,
) -> Result<DataType> {
    let mut datatype = DataType::Null;

    for value in values {
        let value_type = dtype_for(value).map_err(|e| e.with_field("column", name))?;
        let widened = supertype(&datatype, &value_type).ok_or_else(|| {
            LcError::schema_inference(format!("Cannot reconcile types in column '{name}'"))
                .with_field("column", name)
                .with_field("left", &datatype)
                .with_field("right", &value_type)
        })?;

        if !datatype.is_null() && widened != datatype {
            debug!(column = name, from = %datatype, to = %widened, "widened column type");
        }
        datatype = widened;
    }

    Ok(datatype)
}

/// Infer a schema from string keyed rows.
///
/// Columns are ordered by first appearance. A key missing from a row is
/// treated as null for that row.
pub fn infer_schema(rows: &[IndexMap<String, InputValue>]) -> Result<Vec<Field>> {
    let names: IndexSet<&str> = rows
        .iter()
        .flat_map(|row| row.keys().map(|k| k.as_str()))
        .collect();

    names
        .into_iter()
        .map(|name| {
            let values = rows.iter().map(|row| row.get(name).unwrap_or(&NULL_INPUT));
            Ok(Field::new(name, infer_column(name, values)?))
        })
        .collect()
}

/// Convert a value into a scalar of an already inferred type.
pub(crate) fn to_scalar(value: &InputValue, datatype: &DataType) -> Result<ScalarValue> {
    let mismatch = || {
        LcError::new("Input value doesn't match inferred type")
            .with_field("datatype", datatype)
            .with_field("value", format!("{value:?}"))
    };

    Ok(match (value, datatype) {
        (InputValue::Null, _) => ScalarValue::Null,
        (InputValue::Boolean(v), DataType::Boolean) => ScalarValue::Boolean(*v),
        (InputValue::Int(v), DataType::Int64) => ScalarValue::Int64(*v),
        (InputValue::Int(v), DataType::Float64) => ScalarValue::Float64(*v as f64),
        (InputValue::Float(v), DataType::Float64) => ScalarValue::Float64(*v),
        (InputValue::Decimal { value, scale }, DataType::Float64) => {
            ScalarValue::Float64(*value as f64 / 10_f64.powi(*scale as i32))
        }
        (InputValue::Str(v), DataType::Utf8) => ScalarValue::Utf8(v.clone()),
        (InputValue::Bytes(v), DataType::Binary) => ScalarValue::Binary(v.clone()),
        (InputValue::Time(v), DataType::Time) => ScalarValue::Time(time_to_nanos(*v)),
        (InputValue::Date(v), DataType::Datetime(Some(meta))) => {
            let datetime = v.and_hms_opt(0, 0, 0).ok_or_else(mismatch)?;
            datetime_scalar(datetime, meta.unit)?
        }
        (InputValue::Datetime(v), DataType::Datetime(Some(meta))) => datetime_scalar(*v, meta.unit)?,
        (InputValue::DatetimeTz(v), DataType::Datetime(Some(meta))) => {
            datetime_scalar(v.naive_utc(), meta.unit)?
        }
        (InputValue::Map(map), DataType::Struct(Some(meta))) => ScalarValue::Struct(
            meta.fields
                .iter()
                .map(|field| {
                    let value = map.get(&field.name).unwrap_or(&NULL_INPUT);
                    Ok((field.name.clone(), to_scalar(value, &field.datatype)?))
                })
                .collect::<Result<Vec<_>>>()?,
        ),
        (InputValue::Seq(values), DataType::List(Some(meta))) => ScalarValue::List(
            values
                .iter()
                .map(|v| to_scalar(v, &meta.datatype))
                .collect::<Result<Vec<_>>>()?,
        ),
        _ => return Err(mismatch()),
    })
}

fn datetime_scalar(datetime: NaiveDateTime, unit: TimeUnit) -> Result<ScalarValue> {
    let value = datetime_to_value(datetime, unit).ok_or_else(|| {
        LcError::schema_inference("Datetime out of range for time unit")
            .with_field("value", datetime)
            .with_field("time_unit", unit)
    })?;
    Ok(ScalarValue::Datetime(DatetimeScalar {
        unit,
        time_zone: None,
        value,
    }))
}

impl From<bool> for InputValue {
    fn from(value: bool) -> Self {
        InputValue::Boolean(value)
    }
}

impl From<i64> for InputValue {
    fn from(value: i64) -> Self {
        InputValue::Int(value)
    }
}

impl From<i32> for InputValue {
    fn from(value: i32) -> Self {
        InputValue::Int(value as i64)
    }
}

impl From<f64> for InputValue {
    fn from(value: f64) -> Self {
        InputValue::Float(value)
    }
}

impl From<&str> for InputValue {
    fn from(value: &str) -> Self {
        InputValue::Str(value.to_string())
    }
}

impl From<String> for InputValue {
    fn from(value: String) -> Self {
        InputValue::Str(value)
    }
}

impl From<Vec<u8>> for InputValue {
    fn from(value: Vec<u8>) -> Self {
        InputValue::Bytes(value)
    }
}

impl From<NaiveDate> for InputValue {
    fn from(value: NaiveDate) -> Self {
        InputValue::Date(value)
    }
}

impl From<NaiveTime> for InputValue {
    fn from(value: NaiveTime) -> Self {
        InputValue::Time(value)
    }
}

impl From<NaiveDateTime> for InputValue {
    fn from(value: NaiveDateTime) -> Self {
        InputValue::Datetime(value)
    }
}

impl From<DateTime<FixedOffset>> for InputValue {
    fn from(value: DateTime<FixedOffset>) -> Self {
        InputValue::DatetimeTz(value)
    }
}

impl From<DateTime<Utc>> for InputValue {
    fn from(value: DateTime<Utc>) -> Self {
        InputValue::DatetimeTz(value.fixed_offset())
    }
}

impl From<Vec<InputValue>> for InputValue {
    fn from(value: Vec<InputValue>) -> Self {
        InputValue::Seq(value)
    }
}

impl From<IndexMap<String, InputValue>> for InputValue {
    fn from(value: IndexMap<String, InputValue>) -> Self {
        InputValue::Map(value)
    }
}

impl<T: Into<InputValue>> From<Option<T>> for InputValue {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => v.into(),
            None => InputValue::Null,
        }
    }
}

impl From<serde_json::Value> for InputValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => InputValue::Null,
            Value::Bool(b) => InputValue::Boolean(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => InputValue::Int(i),
                None => InputValue::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => InputValue::Str(s),
            Value::Array(values) => {
                InputValue::Seq(values.into_iter().map(InputValue::from).collect())
            }
            Value::Object(map) => InputValue::Map(
                map.into_iter()
                    .map(|(k, v)| (k, InputValue::from(v)))
                    .collect(),
            ),
        }
    }
}
