//! Date repeats: the field-by-field difference between two dates.
//!
//! A repeat that has to travel through a dialect without a native interval
//! type is encoded as a tagged composite string, `P{y}Y{m}M{d}D{h}h{n}n{s}s`,
//! e.g. `P1Y-2M0D0h30n0s`. Each field is preceded by the previous field's tag,
//! which lets a dialect without interval support pull a single field back out
//! with nothing more than substring search.

use crate::expression::{ExpressionError, ExpressionResult};
use crate::value::literal::DataType;
use chrono::{Datelike, Duration, Months, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Leading marker of the tagged composite form
pub const REPEAT_PREFIX: &str = "P";

/// One field of a date (or of a date repeat)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DatePart {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
    SubSecond,
    DayOfWeek,
}

impl DatePart {
    /// Fields carried by a date repeat, most significant first
    pub const REPEAT_FIELDS: [DatePart; 6] = [
        DatePart::Year,
        DatePart::Month,
        DatePart::Day,
        DatePart::Hour,
        DatePart::Minute,
        DatePart::Second,
    ];

    pub fn sql_name(&self) -> &'static str {
        match self {
            DatePart::Year => "YEAR",
            DatePart::Month => "MONTH",
            DatePart::Day => "DAY",
            DatePart::Hour => "HOUR",
            DatePart::Minute => "MINUTE",
            DatePart::Second => "SECOND",
            DatePart::SubSecond => "MICROSECONDS",
            DatePart::DayOfWeek => "DOW",
        }
    }

    /// Tag that terminates this field in the composite form.
    ///
    /// Only the six repeat fields have tags.
    pub fn repeat_tag(&self) -> Option<&'static str> {
        match self {
            DatePart::Year => Some("Y"),
            DatePart::Month => Some("M"),
            DatePart::Day => Some("D"),
            DatePart::Hour => Some("h"),
            DatePart::Minute => Some("n"),
            DatePart::Second => Some("s"),
            DatePart::SubSecond | DatePart::DayOfWeek => None,
        }
    }

    /// Tag that immediately precedes this field in the composite form
    pub fn preceding_tag(&self) -> Option<&'static str> {
        match self {
            DatePart::Year => Some(REPEAT_PREFIX),
            DatePart::Month => DatePart::Year.repeat_tag(),
            DatePart::Day => DatePart::Month.repeat_tag(),
            DatePart::Hour => DatePart::Day.repeat_tag(),
            DatePart::Minute => DatePart::Hour.repeat_tag(),
            DatePart::Second => DatePart::Minute.repeat_tag(),
            DatePart::SubSecond | DatePart::DayOfWeek => None,
        }
    }

    /// Type produced when this field is extracted from a date
    pub fn result_type(&self) -> DataType {
        match self {
            DatePart::SubSecond => DataType::Number,
            _ => DataType::Integer,
        }
    }
}

/// Units accepted by date arithmetic and date differences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DateUnit {
    Second,
    Minute,
    Hour,
    Day,
    Month,
    Year,
}

impl DateUnit {
    pub fn sql_name(&self) -> &'static str {
        match self {
            DateUnit::Second => "SECOND",
            DateUnit::Minute => "MINUTE",
            DateUnit::Hour => "HOUR",
            DateUnit::Day => "DAY",
            DateUnit::Month => "MONTH",
            DateUnit::Year => "YEAR",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRepeat {
    pub years: i64,
    pub months: i64,
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl DateRepeat {
    pub fn new(years: i64, months: i64, days: i64, hours: i64, minutes: i64, seconds: i64) -> Self {
        Self {
            years,
            months,
            days,
            hours,
            minutes,
            seconds,
        }
    }

    pub fn zero() -> Self {
        Self::default()
    }

    /// Field-wise difference `to - from`.
    ///
    /// Fields are not normalised: 2024-01-31 to 2024-02-01 is one month and
    /// minus thirty days.
    pub fn between(from: &NaiveDateTime, to: &NaiveDateTime) -> Self {
        Self {
            years: (to.year() - from.year()) as i64,
            months: to.month() as i64 - from.month() as i64,
            days: to.day() as i64 - from.day() as i64,
            hours: to.hour() as i64 - from.hour() as i64,
            minutes: to.minute() as i64 - from.minute() as i64,
            seconds: to.second() as i64 - from.second() as i64,
        }
    }

    pub fn field(&self, part: DatePart) -> Option<i64> {
        match part {
            DatePart::Year => Some(self.years),
            DatePart::Month => Some(self.months),
            DatePart::Day => Some(self.days),
            DatePart::Hour => Some(self.hours),
            DatePart::Minute => Some(self.minutes),
            DatePart::Second => Some(self.seconds),
            DatePart::SubSecond | DatePart::DayOfWeek => None,
        }
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::zero()
    }

    pub fn negated(&self) -> Self {
        Self {
            years: -self.years,
            months: -self.months,
            days: -self.days,
            hours: -self.hours,
            minutes: -self.minutes,
            seconds: -self.seconds,
        }
    }

    /// Apply the repeat to a date, most significant field first.
    ///
    /// Returns `None` when the result falls outside the representable range.
    pub fn add_to(&self, date: &NaiveDateTime) -> Option<NaiveDateTime> {
        let mut result = add_months(date, self.years.checked_mul(12)?)?;
        result = add_months(&result, self.months)?;
        result = result.checked_add_signed(Duration::try_days(self.days)?)?;
        result = result.checked_add_signed(Duration::try_hours(self.hours)?)?;
        result = result.checked_add_signed(Duration::try_minutes(self.minutes)?)?;
        result.checked_add_signed(Duration::try_seconds(self.seconds)?)
    }
}

/// Calendar month arithmetic; the day clamps to the end of a shorter month.
pub fn add_months(date: &NaiveDateTime, months: i64) -> Option<NaiveDateTime> {
    let magnitude = u32::try_from(months.unsigned_abs()).ok()?;
    if months >= 0 {
        date.checked_add_months(Months::new(magnitude))
    } else {
        date.checked_sub_months(Months::new(magnitude))
    }
}

impl fmt::Display for DateRepeat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}Y{}M{}D{}h{}n{}s",
            REPEAT_PREFIX, self.years, self.months, self.days, self.hours, self.minutes, self.seconds
        )
    }
}

impl FromStr for DateRepeat {
    type Err = ExpressionError;

    fn from_str(s: &str) -> ExpressionResult<Self> {
        let invalid = || ExpressionError::InvalidDateRepeat {
            text: s.to_string(),
        };

        let mut rest = s.strip_prefix(REPEAT_PREFIX).ok_or_else(invalid)?;
        let mut fields = [0i64; 6];
        for (slot, part) in fields.iter_mut().zip(DatePart::REPEAT_FIELDS.iter()) {
            let tag = part.repeat_tag().ok_or_else(invalid)?;
            let (number, tail) = rest.split_once(tag).ok_or_else(invalid)?;
            *slot = number.trim().parse().map_err(|_| invalid())?;
            rest = tail;
        }
        if !rest.is_empty() {
            return Err(invalid());
        }

        let [years, months, days, hours, minutes, seconds] = fields;
        Ok(Self::new(years, months, days, hours, minutes, seconds))
    }
}
