//! Date repeat expressions: intervals measured field by field.

use crate::expression::typed::{typed_expression, unary};
use crate::expression::{EqualComparable, Expr, IntegerExpression, Op, SqlExpression};
use crate::value::date_repeat::DatePart;
use crate::value::{ColumnRef, DateRepeat, Value};

typed_expression!(
    /// Difference between two dates, kept as separate year, month, day, hour,
    /// minute and second counts
    DateRepeatExpression
);

impl EqualComparable for DateRepeatExpression {}

impl DateRepeatExpression {
    pub fn value(value: DateRepeat) -> Self {
        Self::from_expr(Expr::literal(value))
    }

    pub fn column(column: ColumnRef) -> Self {
        Self::from_expr(Expr::column(column))
    }

    fn part(&self, part: DatePart) -> IntegerExpression {
        unary(Op::RepeatPart(part), self)
    }

    pub fn years(&self) -> IntegerExpression {
        self.part(DatePart::Year)
    }

    pub fn months(&self) -> IntegerExpression {
        self.part(DatePart::Month)
    }

    pub fn days(&self) -> IntegerExpression {
        self.part(DatePart::Day)
    }

    pub fn hours(&self) -> IntegerExpression {
        self.part(DatePart::Hour)
    }

    pub fn minutes(&self) -> IntegerExpression {
        self.part(DatePart::Minute)
    }

    pub fn seconds(&self) -> IntegerExpression {
        self.part(DatePart::Second)
    }
}

impl From<DateRepeat> for DateRepeatExpression {
    fn from(value: DateRepeat) -> Self {
        DateRepeatExpression::value(value)
    }
}

impl From<Option<DateRepeat>> for DateRepeatExpression {
    fn from(value: Option<DateRepeat>) -> Self {
        DateRepeatExpression::from_expr(Expr::literal(Value::from(value)))
    }
}
