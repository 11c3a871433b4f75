//! Date and timestamp expressions.
//!
//! Dates carry a time of day. Field extraction yields integers (fractional
//! seconds yield a number), arithmetic shifts by a signed count of a
//! [`DateUnit`], and differences count whole units from `self` to the
//! other date.

use crate::expression::typed::{binary, operation, typed_expression, unary};
use crate::expression::{
    BooleanExpression, DateRepeatExpression, EqualComparable, Expr, IntegerExpression,
    NumberExpression, NumericExpression, Op, RangeComparable, SqlExpression,
};
use crate::value::date_repeat::{DatePart, DateUnit};
use crate::value::{ColumnRef, Value};
use chrono::{FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};

typed_expression!(
    /// A date-and-time valued expression
    DateExpression
);

impl EqualComparable for DateExpression {}

impl RangeComparable for DateExpression {}

impl DateExpression {
    pub fn value(value: NaiveDateTime) -> Self {
        Self::from_expr(Expr::literal(value))
    }

    pub fn column(column: ColumnRef) -> Self {
        Self::from_expr(Expr::column(column))
    }

    /// Today at midnight, as seen by the engine
    pub fn current_date() -> Self {
        operation(Op::CurrentDate, vec![])
    }

    pub fn current_timestamp() -> Self {
        operation(Op::CurrentTimestamp, vec![])
    }

    fn part(&self, part: DatePart) -> IntegerExpression {
        unary(Op::DatePart(part), self)
    }

    pub fn year(&self) -> IntegerExpression {
        self.part(DatePart::Year)
    }

    /// 1 to 12
    pub fn month(&self) -> IntegerExpression {
        self.part(DatePart::Month)
    }

    /// Day of the month
    pub fn day(&self) -> IntegerExpression {
        self.part(DatePart::Day)
    }

    pub fn hour(&self) -> IntegerExpression {
        self.part(DatePart::Hour)
    }

    pub fn minute(&self) -> IntegerExpression {
        self.part(DatePart::Minute)
    }

    /// Whole seconds
    pub fn second(&self) -> IntegerExpression {
        self.part(DatePart::Second)
    }

    /// Fraction of the current second, in `[0, 1)`
    pub fn sub_second(&self) -> NumberExpression {
        unary(Op::DatePart(DatePart::SubSecond), self)
    }

    /// 1 (Sunday) to 7 (Saturday)
    pub fn day_of_week(&self) -> IntegerExpression {
        self.part(DatePart::DayOfWeek)
    }

    fn add(&self, unit: DateUnit, amount: IntegerExpression) -> Self {
        binary(Op::DateAdd(unit), self, &amount)
    }

    pub fn add_seconds(&self, seconds: impl Into<IntegerExpression>) -> Self {
        self.add(DateUnit::Second, seconds.into())
    }

    pub fn add_minutes(&self, minutes: impl Into<IntegerExpression>) -> Self {
        self.add(DateUnit::Minute, minutes.into())
    }

    pub fn add_hours(&self, hours: impl Into<IntegerExpression>) -> Self {
        self.add(DateUnit::Hour, hours.into())
    }

    pub fn add_days(&self, days: impl Into<IntegerExpression>) -> Self {
        self.add(DateUnit::Day, days.into())
    }

    pub fn add_weeks(&self, weeks: impl Into<IntegerExpression>) -> Self {
        self.add(DateUnit::Day, weeks.into().times(7))
    }

    /// Month arithmetic clamps to the end of shorter months
    pub fn add_months(&self, months: impl Into<IntegerExpression>) -> Self {
        self.add(DateUnit::Month, months.into())
    }

    pub fn add_years(&self, years: impl Into<IntegerExpression>) -> Self {
        self.add(DateUnit::Year, years.into())
    }

    /// Elapsed time counted in whole `per_unit` blocks, truncated toward zero
    fn whole_units(elapsed: NumberExpression, per_unit: f64) -> NumberExpression {
        elapsed.divided_by(per_unit).trunc()
    }

    /// Whole seconds from `self` to `other`; negative when `other` is earlier
    pub fn seconds_from(&self, other: impl Into<DateExpression>) -> NumberExpression {
        binary(Op::SecondsBetween, self, &other.into())
    }

    pub fn minutes_from(&self, other: impl Into<DateExpression>) -> NumberExpression {
        Self::whole_units(self.seconds_from(other), 60.0)
    }

    pub fn hours_from(&self, other: impl Into<DateExpression>) -> NumberExpression {
        Self::whole_units(self.seconds_from(other), 3_600.0)
    }

    pub fn days_from(&self, other: impl Into<DateExpression>) -> NumberExpression {
        Self::whole_units(self.seconds_from(other), 86_400.0)
    }

    /// Whole days divided by seven, so fractional
    pub fn weeks_from(&self, other: impl Into<DateExpression>) -> NumberExpression {
        self.days_from(other).divided_by(7.0)
    }

    /// Calendar months between the two dates, ignoring the day of the month
    pub fn months_from(&self, other: impl Into<DateExpression>) -> NumberExpression {
        binary(Op::MonthsBetween, self, &other.into())
    }

    pub fn years_from(&self, other: impl Into<DateExpression>) -> NumberExpression {
        self.months_from(other).divided_by(12.0).trunc()
    }

    /// First day of the month, keeping the time of day
    pub fn first_of_month(&self) -> Self {
        unary(Op::FirstOfMonth, self)
    }

    /// Last day of the month, keeping the time of day
    pub fn end_of_month(&self) -> Self {
        unary(Op::EndOfMonth, self)
    }

    /// Convert to `zone`.
    ///
    /// `offset` is the zone's raw offset from UTC. Dialects without time zone
    /// support shift the timestamp by it instead.
    pub fn at_time_zone(&self, zone: impl Into<String>, offset: FixedOffset) -> Self {
        let op = Op::AtTimeZone {
            zone: zone.into(),
            offset_minutes: offset.local_minus_utc() / 60,
        };
        unary(op, self)
    }

    /// True when either end of the first period lies within the second
    /// period, bounds included. The second period may be given in either
    /// order.
    pub fn overlaps(
        first_start: impl Into<DateExpression>,
        first_end: impl Into<DateExpression>,
        second_start: impl Into<DateExpression>,
        second_end: impl Into<DateExpression>,
    ) -> BooleanExpression {
        let (second_start, second_end) = (second_start.into(), second_end.into());
        let lower = Self::least_of(vec![second_start.clone(), second_end.clone()]);
        let upper = Self::greatest_of(vec![second_start, second_end]);
        first_start
            .into()
            .is_between_inclusive(lower.clone(), upper.clone())
            .or(first_end.into().is_between_inclusive(lower, upper))
    }

    /// Field-by-field difference from `self` to `other`
    pub fn date_repeat_to(&self, other: impl Into<DateExpression>) -> DateRepeatExpression {
        binary(Op::DateRepeatBetween, self, &other.into())
    }

    pub fn plus_repeat(&self, repeat: impl Into<DateRepeatExpression>) -> Self {
        binary(Op::DatePlusRepeat, self, &repeat.into())
    }

    pub fn minus_repeat(&self, repeat: impl Into<DateRepeatExpression>) -> Self {
        binary(Op::DateMinusRepeat, self, &repeat.into())
    }
}

impl From<NaiveDateTime> for DateExpression {
    fn from(value: NaiveDateTime) -> Self {
        DateExpression::value(value)
    }
}

/// A bare date means midnight
impl From<NaiveDate> for DateExpression {
    fn from(value: NaiveDate) -> Self {
        DateExpression::value(value.and_time(NaiveTime::MIN))
    }
}

impl From<Option<NaiveDateTime>> for DateExpression {
    fn from(value: Option<NaiveDateTime>) -> Self {
        DateExpression::from_expr(Expr::literal(Value::from(value)))
    }
}
