//! Functions on date, time and datetime values.
use std::fmt::Write as _;

use chrono::format::{Item, StrftimeItems};
use chrono::{Datelike, FixedOffset, NaiveDate, NaiveTime, TimeZone, Timelike};
use lazycol_error::{LcError, Result};

use super::input_at;
use crate::arrays::column::Column;
use crate::arrays::datatype::DataType;
use crate::arrays::scalar::ScalarValue;
use crate::arrays::scalar::temporal::{days_to_date, nanos_to_time, value_to_datetime};
use crate::engine::context::EvalContext;
use crate::functions::executor::{ErrorState, PhysicalTemporal, UnaryExecutor};
use crate::functions::temporal::time_zone_offset;

/// A component read out of a temporal value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatetimePart {
    Year,
    Month,
    Day,
    /// Monday is 1.
    Weekday,
    OrdinalDay,
    Hour,
    Minute,
    Second,
    Nanosecond,
}

impl DatetimePart {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Year => "year",
            Self::Month => "month",
            Self::Day => "day",
            Self::Weekday => "weekday",
            Self::OrdinalDay => "ordinal_day",
            Self::Hour => "hour",
            Self::Minute => "minute",
            Self::Second => "second",
            Self::Nanosecond => "nanosecond",
        }
    }

    const fn is_time_part(&self) -> bool {
        matches!(
            self,
            Self::Hour | Self::Minute | Self::Second | Self::Nanosecond
        )
    }

    fn datatype(&self) -> DataType {
        match self {
            Self::Year | Self::Nanosecond => DataType::Int32,
            Self::OrdinalDay => DataType::Int16,
            _ => DataType::Int8,
        }
    }

    fn extract(&self, date: Option<NaiveDate>, time: Option<NaiveTime>) -> Option<ScalarValue> {
        Some(match self {
            Self::Year => ScalarValue::Int32(date?.year()),
            Self::Month => ScalarValue::Int8(date?.month() as i8),
            Self::Day => ScalarValue::Int8(date?.day() as i8),
            Self::Weekday => ScalarValue::Int8(date?.weekday().number_from_monday() as i8),
            Self::OrdinalDay => ScalarValue::Int16(date?.ordinal() as i16),
            Self::Hour => ScalarValue::Int8(time?.hour() as i8),
            Self::Minute => ScalarValue::Int8(time?.minute() as i8),
            Self::Second => ScalarValue::Int8(time?.second() as i8),
            Self::Nanosecond => ScalarValue::Int32(time?.nanosecond() as i32),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatetimeFunction {
    Part(DatetimePart),
    /// Render values as text with a chrono strftime format.
    Strftime { format: String },
}

/// Check a strftime format only uses directives chrono can render.
pub fn validate_strftime(format: &str) -> Result<()> {
    // The permissive offset (`%#z`) is parse only, chrono panics rendering it.
    let parse_only = StrftimeItems::new("%#z").next();
    let unusable = StrftimeItems::new(format)
        .any(|item| item == Item::Error || Some(&item) == parse_only.as_ref());
    if unusable {
        return Err(LcError::argument(format!("Invalid format string '{format}'"))
            .with_field("argument", "format")
            .with_field("value", format));
    }
    Ok(())
}

/// Zone datetimes in `input` are shown in, None for naive datetimes.
fn column_zone(input: &Column) -> Result<Option<FixedOffset>> {
    let time_zone = match input.datatype() {
        DataType::Datetime(Some(meta)) => meta.time_zone.as_deref(),
        _ => None,
    };
    match time_zone {
        Some(time_zone) => {
            let offset = time_zone_offset(time_zone)?;
            let zone = FixedOffset::east_opt(offset).ok_or_else(|| {
                LcError::new("Time zone offset out of range").with_field("time_zone", time_zone)
            })?;
            Ok(Some(zone))
        }
        None => Ok(None),
    }
}

/// Local date and time of day held by a temporal value.
fn split(
    value: &ScalarValue,
    zone: Option<FixedOffset>,
) -> Option<(Option<NaiveDate>, Option<NaiveTime>)> {
    match value {
        ScalarValue::Date(days) => Some((Some(days_to_date(*days)?), None)),
        ScalarValue::Time(nanos) => Some((None, Some(nanos_to_time(*nanos)?))),
        ScalarValue::Datetime(dt) => {
            let utc = value_to_datetime(dt.value, dt.unit)?;
            let local = match zone {
                Some(zone) => zone.from_utc_datetime(&utc).naive_local(),
                None => utc,
            };
            Some((Some(local.date()), Some(local.time())))
        }
        _ => None,
    }
}

/// Render a temporal value. None if the value is out of range or the
/// format needs something the value doesn't have, e.g. `%z` on a naive
/// datetime.
fn render(value: &ScalarValue, zone: Option<FixedOffset>, items: &[Item<'_>]) -> Option<String> {
    let mut out = String::new();
    let written = match value {
        ScalarValue::Date(days) => {
            write!(out, "{}", days_to_date(*days)?.format_with_items(items.iter()))
        }
        ScalarValue::Time(nanos) => {
            write!(out, "{}", nanos_to_time(*nanos)?.format_with_items(items.iter()))
        }
        ScalarValue::Datetime(dt) => {
            let utc = value_to_datetime(dt.value, dt.unit)?;
            match zone {
                Some(zone) => write!(
                    out,
                    "{}",
                    zone.from_utc_datetime(&utc).format_with_items(items.iter())
                ),
                None => write!(out, "{}", utc.format_with_items(items.iter())),
            }
        }
        _ => return None,
    };
    written.ok().map(|_| out)
}

impl DatetimeFunction {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Part(part) => part.name(),
            Self::Strftime { .. } => "strftime",
        }
    }

    pub fn num_inputs(&self) -> usize {
        1
    }

    pub fn params(&self) -> Vec<String> {
        match self {
            Self::Part(_) => Vec::new(),
            Self::Strftime { format } => vec![format!("{format:?}")],
        }
    }

    pub fn evaluate(&self, _ctx: &mut EvalContext, inputs: &[Column]) -> Result<Column> {
        let input = input_at(inputs, 0)?;
        let zone = column_zone(input)?;

        match self {
            Self::Part(part) => {
                let supported = match input.datatype() {
                    DataType::Date => !part.is_time_part(),
                    DataType::Time => part.is_time_part(),
                    _ => true,
                };
                if !supported {
                    return Err(LcError::compute(format!(
                        "Cannot read {} from {} values",
                        part.name(),
                        input.datatype()
                    ))
                    .with_field("column", input.name()));
                }

                let values = UnaryExecutor::execute::<PhysicalTemporal, _>(input, |value, buf| {
                    match split(value, zone).and_then(|(date, time)| part.extract(date, time)) {
                        Some(v) => buf.put(v),
                        None => buf.put_null(),
                    }
                })?;

                Ok(Column::new(input.name(), part.datatype(), values))
            }
            Self::Strftime { format } => {
                validate_strftime(format)?;
                let items: Vec<Item<'_>> = StrftimeItems::new(format).collect();
                let mut error_state = ErrorState::new(true);

                let values = UnaryExecutor::execute::<PhysicalTemporal, _>(input, |value, buf| {
                    match render(value, zone, &items) {
                        Some(s) => buf.put(s),
                        None => error_state.set_error(|| {
                            LcError::compute(format!("Cannot format {value} with '{format}'"))
                                .with_field("column", input.name())
                                .with_field("value", value)
                        }),
                    }
                })?;
                error_state.into_result()?;

                Ok(Column::new(input.name(), DataType::Utf8, values))
            }
        }
    }
}
