pub mod format;

use format::TemporalFormat;
use lazycol_error::{LcError, Result};

/// What a temporal parse produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemporalKind {
    Date,
    Datetime,
    Time,
}

impl TemporalKind {
    /// Formats tried, in order, when no format is given.
    pub const fn candidate_formats(&self) -> &'static [&'static str] {
        match self {
            Self::Date => &["%Y-%m-%d", "%Y/%m/%d", "%d-%m-%Y", "%d/%m/%Y", "%Y%m%d", "%d %b %Y"],
            Self::Datetime => &[
                "%Y-%m-%dT%H:%M:%S%.f%z",
                "%Y-%m-%dT%H:%M:%S%.f",
                "%Y-%m-%d %H:%M:%S%.f%z",
                "%Y-%m-%d %H:%M:%S%.f",
                "%Y-%m-%dT%H:%M",
                "%Y-%m-%d %H:%M",
                "%Y/%m/%d %H:%M:%S%.f",
                "%d/%m/%Y %H:%M:%S%.f",
                "%Y-%m-%d",
                "%Y%m%d",
            ],
            Self::Time => &["%H:%M:%S%.f", "%H:%M"],
        }
    }
}

/// Compile a user supplied format, checking it has the directives needed
/// for `kind`.
pub fn compile_format(kind: TemporalKind, format: &str) -> Result<TemporalFormat> {
    let compiled = TemporalFormat::compile(format)?;

    let missing = match kind {
        TemporalKind::Date | TemporalKind::Datetime if !compiled.has_date() => Some("a year"),
        TemporalKind::Time if !compiled.has_time() => Some("an hour"),
        _ => None,
    };

    if let Some(missing) = missing {
        return Err(
            LcError::argument(format!("Format must contain {missing} directive"))
                .with_field("argument", "format")
                .with_field("value", format),
        );
    }

    Ok(compiled)
}

/// Pick the first candidate format that parses `sample` exactly.
pub fn infer_format(kind: TemporalKind, sample: &str) -> Option<TemporalFormat> {
    kind.candidate_formats().iter().find_map(|candidate| {
        let format = TemporalFormat::compile(candidate).ok()?;
        let parsed = format.parse(sample, true)?;
        let valid = match kind {
            TemporalKind::Date => parsed.to_date().is_some(),
            TemporalKind::Datetime => parsed.to_utc_datetime().is_some(),
            TemporalKind::Time => parsed.to_time().is_some(),
        };
        valid.then_some(format)
    })
}

/// Validate a time zone, returning its offset from UTC in seconds.
///
/// Only "UTC" and fixed offsets of the form "+hh:mm" / "-hh:mm" are
/// supported.
pub fn time_zone_offset(time_zone: &str) -> Result<i32> {
    let invalid = || {
        LcError::argument(format!(
            "Unsupported time zone '{time_zone}', expected 'UTC' or a fixed offset like '+01:00'"
        ))
        .with_field("argument", "time_zone")
        .with_field("value", time_zone)
    };

    if time_zone == "UTC" {
        return Ok(0);
    }

    let bytes = time_zone.as_bytes();
    if bytes.len() != 6 || bytes[3] != b':' {
        return Err(invalid());
    }
    let sign = match bytes[0] {
        b'+' => 1,
        b'-' => -1,
        _ => return Err(invalid()),
    };
    let hours: i32 = time_zone[1..3].parse().map_err(|_| invalid())?;
    let minutes: i32 = time_zone[4..6].parse().map_err(|_| invalid())?;
    if !(0..=23).contains(&hours) || !(0..=59).contains(&minutes) {
        return Err(invalid());
    }

    Ok(sign * (hours * 3600 + minutes * 60))
}

#[cfg(test)]
mod tests {
    use lazycol_error::ErrorKind;

    use super::*;

    #[test]
    fn infer_formats() {
        let cases = [
            ((TemporalKind::Date, "2024-01-05"), Some("%Y-%m-%d")),
            ((TemporalKind::Date, "05/01/2024"), Some("%d/%m/%Y")),
            ((TemporalKind::Date, "05 Jan 2024"), Some("%d %b %Y")),
            ((TemporalKind::Datetime, "2024-01-05T10:00:00Z"), Some("%Y-%m-%dT%H:%M:%S%.f%z")),
            ((TemporalKind::Datetime, "2024-01-05 10:00:00.123"), Some("%Y-%m-%d %H:%M:%S%.f")),
            ((TemporalKind::Datetime, "2024-01-05"), Some("%Y-%m-%d")),
            ((TemporalKind::Time, "10:00"), Some("%H:%M")),
            ((TemporalKind::Time, "10:00:01.5"), Some("%H:%M:%S%.f")),
            ((TemporalKind::Date, "not a date"), None),
        ];

        for case in cases {
            let out = infer_format(case.0.0, case.0.1);
            assert_eq!(case.1, out.as_ref().map(|f| f.as_str()), "case: {case:?}");
        }
    }

    #[test]
    fn compile_requires_directives() {
        let err = compile_format(TemporalKind::Date, "%H:%M").unwrap_err();
        assert_eq!(ErrorKind::Argument, err.kind());

        let err = compile_format(TemporalKind::Time, "%Y").unwrap_err();
        assert_eq!(ErrorKind::Argument, err.kind());

        compile_format(TemporalKind::Datetime, "%F %T").unwrap();
    }

    #[test]
    fn time_zones() {
        assert_eq!(0, time_zone_offset("UTC").unwrap());
        assert_eq!(3600, time_zone_offset("+01:00").unwrap());
        assert_eq!(-(5 * 3600 + 30 * 60), time_zone_offset("-05:30").unwrap());

        for tz in ["Europe/Amsterdam", "+1:00", "+01:60", "01:00", "utc"] {
            let err = time_zone_offset(tz).unwrap_err();
            assert_eq!(ErrorKind::Argument, err.kind(), "tz: {tz}");
        }
    }
}
