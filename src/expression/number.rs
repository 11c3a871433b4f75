//! Floating-point number expressions.

use crate::expression::typed::{binary, operation, typed_expression, unary};
use crate::expression::{
    EqualComparable, Expr, IntegerExpression, NumericExpression, Op, RangeComparable,
    SqlExpression,
};
use crate::value::{ColumnRef, Value};

typed_expression!(
    /// A numeric expression with floating-point semantics
    NumberExpression
);

impl EqualComparable for NumberExpression {}

impl RangeComparable for NumberExpression {}

impl NumericExpression for NumberExpression {}

impl NumberExpression {
    pub fn value(value: f64) -> Self {
        Self::from_expr(Expr::literal(value))
    }

    pub fn column(column: ColumnRef) -> Self {
        Self::from_expr(Expr::column(column))
    }

    pub fn pi() -> Self {
        operation(Op::Pi, vec![])
    }

    /// A fresh value in `[0, 1)` per evaluation; never purely functional
    pub fn random() -> Self {
        operation(Op::Random, vec![])
    }

    /// Nearest whole number
    pub fn round(&self) -> Self {
        unary(Op::Round, self)
    }

    /// Round to `places` decimal places
    pub fn round_to(&self, places: impl Into<IntegerExpression>) -> Self {
        binary(Op::RoundTo, self, &places.into())
    }

    /// Ceiling
    pub fn round_up(&self) -> Self {
        unary(Op::RoundUp, self)
    }

    /// Floor
    pub fn round_down(&self) -> Self {
        unary(Op::RoundDown, self)
    }

    /// Drop the fractional part, rounding toward zero
    pub fn trunc(&self) -> Self {
        unary(Op::Truncate, self)
    }

    pub fn divided_by(&self, divisor: impl Into<Self>) -> Self {
        binary(Op::Divide, self, &divisor.into())
    }

    pub fn to_integer(&self) -> IntegerExpression {
        unary(Op::ToInteger, self)
    }
}

impl From<f64> for NumberExpression {
    fn from(value: f64) -> Self {
        NumberExpression::value(value)
    }
}

impl From<i64> for NumberExpression {
    fn from(value: i64) -> Self {
        NumberExpression::value(value as f64)
    }
}

impl From<i32> for NumberExpression {
    fn from(value: i32) -> Self {
        NumberExpression::value(value as f64)
    }
}

impl From<Option<f64>> for NumberExpression {
    fn from(value: Option<f64>) -> Self {
        NumberExpression::from_expr(Expr::literal(Value::from(value)))
    }
}

/// Integers are numbers; the tree is reused as is
impl From<IntegerExpression> for NumberExpression {
    fn from(value: IntegerExpression) -> Self {
        NumberExpression::from_expr(value.into_expr())
    }
}

impl<T: Into<NumberExpression>> std::ops::Add<T> for NumberExpression {
    type Output = NumberExpression;

    fn add(self, rhs: T) -> Self::Output {
        self.plus(rhs)
    }
}

impl<T: Into<NumberExpression>> std::ops::Sub<T> for NumberExpression {
    type Output = NumberExpression;

    fn sub(self, rhs: T) -> Self::Output {
        self.minus(rhs)
    }
}

impl<T: Into<NumberExpression>> std::ops::Mul<T> for NumberExpression {
    type Output = NumberExpression;

    fn mul(self, rhs: T) -> Self::Output {
        self.times(rhs)
    }
}

impl<T: Into<NumberExpression>> std::ops::Div<T> for NumberExpression {
    type Output = NumberExpression;

    fn div(self, rhs: T) -> Self::Output {
        self.divided_by(rhs)
    }
}

impl<T: Into<NumberExpression>> std::ops::Rem<T> for NumberExpression {
    type Output = NumberExpression;

    fn rem(self, rhs: T) -> Self::Output {
        self.modulus(rhs)
    }
}

impl std::ops::Neg for NumberExpression {
    type Output = NumberExpression;

    fn neg(self) -> Self::Output {
        self.negate()
    }
}
