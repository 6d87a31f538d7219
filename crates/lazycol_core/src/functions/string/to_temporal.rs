use std::fmt;

use hashbrown::HashMap;
use lazycol_error::{LcError, Result};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::arrays::column::Column;
use crate::arrays::datatype::{DataType, TimeUnit};
use crate::arrays::scalar::temporal::{date_to_days, datetime_to_value, time_to_nanos};
use crate::arrays::scalar::{DatetimeScalar, ScalarValue};
use crate::engine::context::EvalContext;
use crate::functions::executor::{ErrorState, PhysicalUtf8, UnaryExecutor};
use crate::functions::temporal::format::TemporalFormat;
use crate::functions::temporal::{TemporalKind, compile_format, infer_format, time_zone_offset};

/// Options controlling how strings are parsed into temporal values.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StrptimeOptions {
    /// Format string. Inferred from the data when not given.
    pub format: Option<String>,
    /// Error on values that fail to parse instead of producing null.
    pub strict: bool,
    /// Require the format to match the whole string.
    pub exact: bool,
    /// Memoize parses of repeated values.
    pub cache: bool,
}

impl Default for StrptimeOptions {
    fn default() -> Self {
        StrptimeOptions {
            format: None,
            strict: true,
            exact: true,
            cache: true,
        }
    }
}

impl StrptimeOptions {
    pub fn with_format(format: impl Into<String>) -> Self {
        StrptimeOptions {
            format: Some(format.into()),
            ..Default::default()
        }
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn exact(mut self, exact: bool) -> Self {
        self.exact = exact;
        self
    }

    pub fn cache(mut self, cache: bool) -> Self {
        self.cache = cache;
        self
    }

    /// Check the format (if any) is usable for `kind`.
    pub fn validate(&self, kind: TemporalKind) -> Result<()> {
        if let Some(format) = &self.format {
            compile_format(kind, format)?;
        }
        Ok(())
    }
}

impl fmt::Display for StrptimeOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.format {
            Some(format) => write!(f, "format={format:?}")?,
            None => write!(f, "format=None")?,
        }
        write!(
            f,
            ", strict={}, exact={}, cache={}",
            self.strict, self.exact, self.cache
        )
    }
}

/// Parse a Utf8 column into dates, datetimes or times.
///
/// The output column's type is only known once the format is resolved, so
/// this returns a full column rather than just values.
pub fn eval_to_temporal(
    ctx: &EvalContext,
    input: &Column,
    kind: TemporalKind,
    options: &StrptimeOptions,
    time_unit: Option<TimeUnit>,
    time_zone: Option<&str>,
) -> Result<Column> {
    let zone_offset = time_zone.map(time_zone_offset).transpose()?;

    let format = match &options.format {
        Some(format) => Some(compile_format(kind, format)?),
        None => {
            let sample = input
                .values()
                .iter()
                .find_map(|v| v.try_as_str().ok());
            match sample {
                Some(sample) => {
                    let inferred = infer_format(kind, sample);
                    if inferred.is_none() && options.strict {
                        return Err(LcError::compute(
                            "Could not infer a format from the first non-null value",
                        )
                        .with_field("column", input.name())
                        .with_field("value", sample));
                    }
                    inferred
                }
                None => None,
            }
        }
    };

    let unit = time_unit
        .or_else(|| format.as_ref().and_then(|f| f.implied_time_unit()))
        .unwrap_or(ctx.config().default_time_unit);
    let out_zone = match time_zone {
        Some(tz) => Some(tz.to_string()),
        None if format.as_ref().is_some_and(|f| f.has_offset()) => Some("UTC".to_string()),
        None => None,
    };

    let datatype = match kind {
        TemporalKind::Date => DataType::Date,
        TemporalKind::Time => DataType::Time,
        TemporalKind::Datetime => DataType::datetime(unit, out_zone.clone()),
    };

    let format = match format {
        Some(format) => format,
        None => {
            // Nothing parseable to infer from, every row is null.
            let values = vec![ScalarValue::Null; input.len()];
            return Ok(Column::new(input.name(), datatype, values));
        }
    };
    trace!(column = input.name(), format = format.as_str(), ?kind, "parsing temporal values");

    let parser = TemporalParser {
        format: &format,
        kind,
        exact: options.exact,
        zone_offset,
        unit,
        out_zone: &out_zone,
    };

    let use_cache = options.cache && ctx.config().enable_parse_cache;
    let mut cache: HashMap<String, Option<ScalarValue>> = HashMap::new();
    let mut error_state = ErrorState::new(options.strict);

    let values = UnaryExecutor::execute::<PhysicalUtf8, _>(input, |s, buf| {
        let parsed = if use_cache {
            match cache.get(s) {
                Some(parsed) => parsed.clone(),
                None => {
                    let parsed = parser.parse(s);
                    cache.insert(s.to_string(), parsed.clone());
                    parsed
                }
            }
        } else {
            parser.parse(s)
        };

        match parsed {
            Some(v) => buf.put(v),
            None => error_state.set_error(|| {
                LcError::compute(format!(
                    "Failed to parse '{s}' with format '{}'",
                    format.as_str()
                ))
                .with_field("value", s)
                .with_field("format", format.as_str())
            }),
        }
    })?;

    error_state.into_result()?;

    Ok(Column::new(input.name(), datatype, values))
}

#[derive(Debug)]
struct TemporalParser<'a> {
    format: &'a TemporalFormat,
    kind: TemporalKind,
    exact: bool,
    /// Zone applied to values that don't carry their own offset.
    zone_offset: Option<i32>,
    unit: TimeUnit,
    out_zone: &'a Option<String>,
}

impl TemporalParser<'_> {
    fn parse(&self, s: &str) -> Option<ScalarValue> {
        let mut parsed = self.format.parse(s, self.exact)?;

        match self.kind {
            TemporalKind::Date => parsed.to_date().map(|d| ScalarValue::Date(date_to_days(d))),
            TemporalKind::Time => parsed.to_time().map(|t| ScalarValue::Time(time_to_nanos(t))),
            TemporalKind::Datetime => {
                if parsed.offset.is_none() {
                    parsed.offset = self.zone_offset;
                }
                let datetime = parsed.to_utc_datetime()?;
                Some(ScalarValue::Datetime(DatetimeScalar {
                    unit: self.unit,
                    time_zone: self.out_zone.clone(),
                    value: datetime_to_value(datetime, self.unit)?,
                }))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::eval::EvalConfig;

    fn datetime(unit: TimeUnit, tz: Option<&str>, value: i64) -> ScalarValue {
        ScalarValue::Datetime(DatetimeScalar {
            unit,
            time_zone: tz.map(|tz| tz.to_string()),
            value,
        })
    }

    #[test]
    fn to_date_with_format() {
        let config = EvalConfig::default();
        let ctx = EvalContext::new(&config);
        let input = Column::from_strs("d", [Some("02/01/1970"), None, Some("2024")]);

        let options = StrptimeOptions::with_format("%d/%m/%Y").strict(false);
        let out = eval_to_temporal(&ctx, &input, TemporalKind::Date, &options, None, None).unwrap();

        assert_eq!(&DataType::Date, out.datatype());
        assert_eq!(
            &[ScalarValue::Date(1), ScalarValue::Null, ScalarValue::Null],
            out.values()
        );

        let options = StrptimeOptions::with_format("%d/%m/%Y");
        let err = eval_to_temporal(&ctx, &input, TemporalKind::Date, &options, None, None).unwrap_err();
        assert!(err.is_compute());
        assert_eq!(Some("2024"), err.field("value"));
    }

    #[test]
    fn to_date_not_exact() {
        let config = EvalConfig::default();
        let ctx = EvalContext::new(&config);
        let input = Column::from_strs("d", [Some("born 1970-01-03 somewhere")]);

        let options = StrptimeOptions::with_format("%Y-%m-%d").exact(false);
        let out = eval_to_temporal(&ctx, &input, TemporalKind::Date, &options, None, None).unwrap();
        assert_eq!(&[ScalarValue::Date(2)], out.values());
    }

    #[test]
    fn to_datetime_inferred_format_default_unit() {
        let config = EvalConfig::default();
        let ctx = EvalContext::new(&config);
        let input = Column::from_strs("dt", [Some("1970-01-01 00:00:01"), Some("1970-01-01 00:00:01")]);

        let out = eval_to_temporal(
            &ctx,
            &input,
            TemporalKind::Datetime,
            &StrptimeOptions::default(),
            None,
            None,
        )
        .unwrap();

        assert_eq!(&DataType::datetime(TimeUnit::Microseconds, None), out.datatype());
        assert_eq!(datetime(TimeUnit::Microseconds, None, 1_000_000), out.values()[0]);
    }

    #[test]
    fn to_datetime_unit_from_format() {
        let config = EvalConfig::default();
        let ctx = EvalContext::new(&config);
        let input = Column::from_strs("dt", [Some("1970-01-01 00:00:01.250")]);

        let options = StrptimeOptions::with_format("%Y-%m-%d %H:%M:%S%.3f");
        let out = eval_to_temporal(&ctx, &input, TemporalKind::Datetime, &options, None, None).unwrap();
        assert_eq!(datetime(TimeUnit::Milliseconds, None, 1_250), out.values()[0]);

        let out = eval_to_temporal(
            &ctx,
            &input,
            TemporalKind::Datetime,
            &options,
            Some(TimeUnit::Nanoseconds),
            None,
        )
        .unwrap();
        assert_eq!(datetime(TimeUnit::Nanoseconds, None, 1_250_000_000), out.values()[0]);
    }

    #[test]
    fn to_datetime_offset_converts_to_utc() {
        let config = EvalConfig::default();
        let ctx = EvalContext::new(&config);
        let input = Column::from_strs("dt", [Some("1970-01-01T01:00:00+01:00")]);

        let out = eval_to_temporal(
            &ctx,
            &input,
            TemporalKind::Datetime,
            &StrptimeOptions::default(),
            Some(TimeUnit::Milliseconds),
            None,
        )
        .unwrap();

        assert_eq!(
            &DataType::datetime(TimeUnit::Milliseconds, Some("UTC".to_string())),
            out.datatype()
        );
        assert_eq!(datetime(TimeUnit::Milliseconds, Some("UTC"), 0), out.values()[0]);
    }

    #[test]
    fn to_datetime_requested_zone() {
        let config = EvalConfig::default();
        let ctx = EvalContext::new(&config);
        let input = Column::from_strs("dt", [Some("1970-01-01 02:00:00")]);

        let out = eval_to_temporal(
            &ctx,
            &input,
            TemporalKind::Datetime,
            &StrptimeOptions::default(),
            Some(TimeUnit::Milliseconds),
            Some("+02:00"),
        )
        .unwrap();
        assert_eq!(datetime(TimeUnit::Milliseconds, Some("+02:00"), 0), out.values()[0]);

        let err = eval_to_temporal(
            &ctx,
            &input,
            TemporalKind::Datetime,
            &StrptimeOptions::default(),
            None,
            Some("Mars/Olympus"),
        )
        .unwrap_err();
        assert!(err.is_argument());
    }

    #[test]
    fn to_time_values() {
        let config = EvalConfig::default();
        let ctx = EvalContext::new(&config);
        let input = Column::from_strs("t", [Some("00:00:01.5"), Some("25:00:00")]);

        let options = StrptimeOptions::default().strict(false);
        let out = eval_to_temporal(&ctx, &input, TemporalKind::Time, &options, None, None).unwrap();
        assert_eq!(&DataType::Time, out.datatype());
        assert_eq!(
            &[ScalarValue::Time(1_500_000_000), ScalarValue::Null],
            out.values()
        );
    }

    #[test]
    fn uninferrable_format() {
        let config = EvalConfig::default();
        let ctx = EvalContext::new(&config);
        let input = Column::from_strs("d", [Some("yesterday"), Some("2024-01-01")]);

        let err = eval_to_temporal(
            &ctx,
            &input,
            TemporalKind::Date,
            &StrptimeOptions::default(),
            None,
            None,
        )
        .unwrap_err();
        assert!(err.is_compute());

        let options = StrptimeOptions::default().strict(false);
        let out = eval_to_temporal(&ctx, &input, TemporalKind::Date, &options, None, None).unwrap();
        assert_eq!(&[ScalarValue::Null, ScalarValue::Null], out.values());
    }

    #[test]
    fn cache_does_not_change_results() {
        let input = Column::from_strs("d", [Some("2024-01-01"), Some("2024-01-01"), Some("bad")]);
        let options = StrptimeOptions::default().strict(false);

        let mut outputs = Vec::new();
        for enable in [true, false] {
            let config = EvalConfig {
                enable_parse_cache: enable,
                ..Default::default()
            };
            let ctx = EvalContext::new(&config);
            outputs.push(
                eval_to_temporal(&ctx, &input, TemporalKind::Date, &options, None, None).unwrap(),
            );
        }
        assert_eq!(outputs[0], outputs[1]);
    }
}
