use lazycol_error::Result;

use super::Expr;
use crate::functions::datetime::{DatetimeFunction, DatetimePart, validate_strftime};

/// Operations on date, time and datetime expressions.
///
/// Parts of zoned datetimes are read in the column's time zone.
#[derive(Debug, Clone, Copy)]
pub struct DateTimeNameSpace<'a> {
    expr: &'a Expr,
}

impl<'a> DateTimeNameSpace<'a> {
    pub(crate) fn new(expr: &'a Expr) -> Self {
        DateTimeNameSpace { expr }
    }

    fn part(&self, part: DatetimePart) -> Result<Expr> {
        self.expr.apply(DatetimeFunction::Part(part), [])
    }

    pub fn year(&self) -> Result<Expr> {
        self.part(DatetimePart::Year)
    }

    pub fn month(&self) -> Result<Expr> {
        self.part(DatetimePart::Month)
    }

    pub fn day(&self) -> Result<Expr> {
        self.part(DatetimePart::Day)
    }

    /// ISO weekday, Monday is 1 and Sunday is 7.
    pub fn weekday(&self) -> Result<Expr> {
        self.part(DatetimePart::Weekday)
    }

    /// Day of the year, starting at 1.
    pub fn ordinal_day(&self) -> Result<Expr> {
        self.part(DatetimePart::OrdinalDay)
    }

    pub fn hour(&self) -> Result<Expr> {
        self.part(DatetimePart::Hour)
    }

    pub fn minute(&self) -> Result<Expr> {
        self.part(DatetimePart::Minute)
    }

    pub fn second(&self) -> Result<Expr> {
        self.part(DatetimePart::Second)
    }

    pub fn nanosecond(&self) -> Result<Expr> {
        self.part(DatetimePart::Nanosecond)
    }

    /// Render as text using a strftime format.
    pub fn strftime(&self, format: &str) -> Result<Expr> {
        validate_strftime(format)?;
        self.expr.apply(
            DatetimeFunction::Strftime {
                format: format.to_string(),
            },
            [],
        )
    }

    pub fn to_string(&self, format: &str) -> Result<Expr> {
        self.strftime(format)
    }
}
