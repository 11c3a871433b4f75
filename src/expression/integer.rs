//! Whole-number expressions.

use crate::expression::typed::{binary, operation, typed_expression, unary};
use crate::expression::{
    EqualComparable, Expr, NumberExpression, NumericExpression, Op, RangeComparable,
    SqlExpression,
};
use crate::value::{ColumnRef, Value};

typed_expression!(
    /// A numeric expression restricted to whole numbers
    IntegerExpression
);

impl EqualComparable for IntegerExpression {}

impl RangeComparable for IntegerExpression {}

impl NumericExpression for IntegerExpression {}

impl IntegerExpression {
    pub fn value(value: i64) -> Self {
        Self::from_expr(Expr::literal(value))
    }

    pub fn column(column: ColumnRef) -> Self {
        Self::from_expr(Expr::column(column))
    }

    /// `COUNT(*)`
    pub fn count_all() -> Self {
        operation(Op::CountAll, vec![])
    }

    /// Floating division.
    ///
    /// The dividend is widened with `+ 0.0` first, since engines truncate
    /// integer division: `7 / 2` is 3.5 here, not 3.
    pub fn divided_by(&self, divisor: impl Into<IntegerExpression>) -> NumberExpression {
        let widened: NumberExpression = binary(Op::Plus, self, &NumberExpression::value(0.0));
        binary(Op::Divide, &widened, &divisor.into())
    }

    pub fn to_number(&self) -> NumberExpression {
        unary(Op::ToNumber, self)
    }
}

impl From<i64> for IntegerExpression {
    fn from(value: i64) -> Self {
        IntegerExpression::value(value)
    }
}

impl From<i32> for IntegerExpression {
    fn from(value: i32) -> Self {
        IntegerExpression::value(value as i64)
    }
}

impl From<Option<i64>> for IntegerExpression {
    fn from(value: Option<i64>) -> Self {
        IntegerExpression::from_expr(Expr::literal(Value::from(value)))
    }
}

impl<T: Into<IntegerExpression>> std::ops::Add<T> for IntegerExpression {
    type Output = IntegerExpression;

    fn add(self, rhs: T) -> Self::Output {
        self.plus(rhs)
    }
}

impl<T: Into<IntegerExpression>> std::ops::Sub<T> for IntegerExpression {
    type Output = IntegerExpression;

    fn sub(self, rhs: T) -> Self::Output {
        self.minus(rhs)
    }
}

impl<T: Into<IntegerExpression>> std::ops::Mul<T> for IntegerExpression {
    type Output = IntegerExpression;

    fn mul(self, rhs: T) -> Self::Output {
        self.times(rhs)
    }
}

impl<T: Into<IntegerExpression>> std::ops::Div<T> for IntegerExpression {
    type Output = NumberExpression;

    fn div(self, rhs: T) -> Self::Output {
        self.divided_by(rhs)
    }
}

impl<T: Into<IntegerExpression>> std::ops::Rem<T> for IntegerExpression {
    type Output = IntegerExpression;

    fn rem(self, rhs: T) -> Self::Output {
        self.modulus(rhs)
    }
}

impl std::ops::Neg for IntegerExpression {
    type Output = IntegerExpression;

    fn neg(self) -> Self::Output {
        self.negate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::DialectProfile;
    use crate::expression::Row;
    use crate::value::TableRef;

    #[test]
    fn test_division_does_not_truncate() {
        let dialect = DialectProfile::ansi();
        let quotient = IntegerExpression::value(7) / 2;
        assert_eq!(quotient.to_sql(&dialect), "((7 + 0.0) / 2)");
        assert_eq!(
            quotient.evaluate(&dialect, &Row::new()).unwrap(),
            Value::Number(3.5)
        );
    }

    #[test]
    fn test_count_all() {
        let count = IntegerExpression::count_all();
        assert_eq!(count.to_sql(&DialectProfile::ansi()), "COUNT(*)");
        assert!(count.is_aggregator());
        assert!(!count.includes_null());
    }

    #[test]
    fn test_sign_fallback_keeps_null() {
        let bare = DialectProfile::minimal("bare");
        let sign = IntegerExpression::from(None::<i64>).sign();
        assert_eq!(sign.evaluate(&bare, &Row::new()).unwrap(), Value::Null);
        assert_eq!(
            IntegerExpression::value(-9)
                .sign()
                .evaluate(&bare, &Row::new())
                .unwrap(),
            Value::Integer(-1)
        );
    }

    #[test]
    fn test_arithmetic() {
        let dialect = DialectProfile::ansi();
        let x = IntegerExpression::column(TableRef::new("t").column("x"));
        let row = Row::new().with(TableRef::new("t").column("x"), 6);
        let expr = (x.clone() + 4) * 3 - x.abs();
        assert_eq!(expr.to_sql(&dialect), "(((t.x + 4) * 3) - ABS(t.x))");
        assert_eq!(expr.evaluate(&dialect, &row).unwrap(), Value::Integer(24));
        assert_eq!(
            x.to_number().evaluate(&dialect, &row).unwrap(),
            Value::Number(6.0)
        );
    }

    #[test]
    fn test_null_literal_includes_null() {
        let missing = IntegerExpression::from(None::<i64>);
        assert!(missing.includes_null());
        assert!(missing.plus(1).includes_null());
        assert!(!IntegerExpression::column(TableRef::new("t").column("x")).includes_null());
    }
}
