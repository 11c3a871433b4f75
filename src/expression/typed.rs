//! Typed views over the untyped expression tree.
//!
//! Each algebra (boolean, number, integer, date, string, point) is a thin
//! newtype around [`Expr`]. The newtype decides which operators are offered
//! and what type they produce; the tree underneath stays uniform so the core
//! can render, copy and analyse any of them the same way.

use crate::dialect::Dialect;
use crate::expression::eval::{evaluate_expression, Row};
use crate::expression::{BooleanExpression, Expr, ExpressionResult, IntegerExpression, Op};
use crate::value::{TableRef, Value};
use std::collections::BTreeSet;
use std::fmt;

/// Declare a typed newtype over [`Expr`] and its [`SqlExpression`] impl
macro_rules! typed_expression {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
        #[serde(transparent)]
        pub struct $name(crate::expression::Expr);

        impl crate::expression::SqlExpression for $name {
            fn from_expr(expr: crate::expression::Expr) -> Self {
                $name(expr)
            }

            fn as_expr(&self) -> &crate::expression::Expr {
                &self.0
            }

            fn into_expr(self) -> crate::expression::Expr {
                self.0
            }
        }

        impl From<$name> for crate::expression::Expr {
            fn from(typed: $name) -> Self {
                typed.0
            }
        }
    };
}

pub(crate) use typed_expression;

/// Build `op(operands...)` and view it as `T`
pub(crate) fn operation<T: SqlExpression>(op: Op, operands: Vec<Expr>) -> T {
    T::from_expr(Expr::operation(op, operands))
}

pub(crate) fn unary<T: SqlExpression>(op: Op, operand: &impl SqlExpression) -> T {
    operation(op, vec![operand.as_expr().clone()])
}

pub(crate) fn binary<T: SqlExpression>(
    op: Op,
    left: &impl SqlExpression,
    right: &impl SqlExpression,
) -> T {
    operation(op, vec![left.as_expr().clone(), right.as_expr().clone()])
}

/// Contract shared by every typed expression
pub trait SqlExpression: Clone + fmt::Debug + Sized {
    fn from_expr(expr: Expr) -> Self;

    fn as_expr(&self) -> &Expr;

    fn into_expr(self) -> Expr;

    /// The absent literal, typed as `Self`
    fn null_value() -> Self {
        Self::from_expr(Expr::null())
    }

    /// Structurally independent duplicate
    fn copy(&self) -> Self {
        Self::from_expr(self.as_expr().copy())
    }

    fn to_sql(&self, dialect: &dyn Dialect) -> String {
        self.as_expr().to_sql(dialect)
    }

    fn try_to_sql(&self, dialect: &dyn Dialect) -> ExpressionResult<String> {
        self.as_expr().try_to_sql(dialect)
    }

    fn includes_null(&self) -> bool {
        self.as_expr().includes_null()
    }

    fn is_aggregator(&self) -> bool {
        self.as_expr().is_aggregator()
    }

    fn is_purely_functional(&self) -> bool {
        self.as_expr().is_purely_functional()
    }

    fn tables_involved(&self) -> BTreeSet<TableRef> {
        self.as_expr().tables_involved()
    }

    fn is_null(&self) -> BooleanExpression {
        unary(Op::IsNull, self)
    }

    fn is_not_null(&self) -> BooleanExpression {
        unary(Op::IsNotNull, self)
    }

    /// `COALESCE(self, alternative)`
    fn if_null(&self, alternative: impl Into<Self>) -> Self {
        binary(Op::Coalesce, self, &alternative.into())
    }

    /// Number of rows where this expression is not NULL
    fn count(&self) -> IntegerExpression {
        unary(Op::Count, self)
    }

    /// Value of this expression for `row`, as `dialect` would compute it
    fn evaluate(&self, dialect: &dyn Dialect, row: &Row) -> ExpressionResult<Value> {
        evaluate_expression(self.as_expr(), dialect, row)
    }
}

/// Equality with explicit NULL handling.
///
/// `x = NULL` is never true in SQL and some engines reject it outright, so
/// when either side may be NULL the comparison becomes an `IS NULL` test on
/// the other side.
pub trait EqualComparable: SqlExpression {
    fn is(&self, other: impl Into<Self>) -> BooleanExpression {
        let other = other.into();
        if other.includes_null() {
            self.is_null()
        } else if self.includes_null() {
            other.is_null()
        } else {
            binary(Op::Equals, self, &other)
        }
    }

    fn is_not(&self, other: impl Into<Self>) -> BooleanExpression {
        let other = other.into();
        if other.includes_null() {
            self.is_not_null()
        } else if self.includes_null() {
            other.is_not_null()
        } else {
            binary(Op::NotEquals, self, &other)
        }
    }

    /// `self IN (...)`; an empty list matches nothing. NULL elements never
    /// match inside `IN`, so they become a separate `IS NULL` branch.
    fn is_in<I, V>(&self, values: I) -> BooleanExpression
    where
        I: IntoIterator<Item = V>,
        V: Into<Self>,
    {
        let values: Vec<Self> = values.into_iter().map(Into::into).collect();
        let (nulls, values): (Vec<Self>, Vec<Self>) =
            values.into_iter().partition(|v| v.includes_null());
        let mut branches = Vec::new();
        if !values.is_empty() {
            let mut operands = vec![self.as_expr().clone()];
            operands.extend(values.into_iter().map(SqlExpression::into_expr));
            branches.push(operation(Op::In, operands));
        }
        if !nulls.is_empty() {
            branches.push(self.is_null());
        }
        BooleanExpression::any_of(branches)
    }

    fn is_not_in<I, V>(&self, values: I) -> BooleanExpression
    where
        I: IntoIterator<Item = V>,
        V: Into<Self>,
    {
        self.is_in(values).not()
    }
}

/// Ordering comparisons and the aggregates that depend on ordering
pub trait RangeComparable: EqualComparable {
    fn is_less_than(&self, other: impl Into<Self>) -> BooleanExpression {
        binary(Op::LessThan, self, &other.into())
    }

    fn is_less_than_or_equal(&self, other: impl Into<Self>) -> BooleanExpression {
        binary(Op::LessThanOrEqual, self, &other.into())
    }

    fn is_greater_than(&self, other: impl Into<Self>) -> BooleanExpression {
        binary(Op::GreaterThan, self, &other.into())
    }

    fn is_greater_than_or_equal(&self, other: impl Into<Self>) -> BooleanExpression {
        binary(Op::GreaterThanOrEqual, self, &other.into())
    }

    /// `lower < self AND self <= upper`.
    ///
    /// Note the bounds: the lower bound is exclusive and the upper bound
    /// inclusive. Use [`is_between_inclusive`](Self::is_between_inclusive) or
    /// [`is_between_exclusive`](Self::is_between_exclusive) for symmetric
    /// ranges.
    fn is_between(&self, lower: impl Into<Self>, upper: impl Into<Self>) -> BooleanExpression {
        self.is_greater_than(lower)
            .and(self.is_less_than_or_equal(upper))
    }

    fn is_between_inclusive(
        &self,
        lower: impl Into<Self>,
        upper: impl Into<Self>,
    ) -> BooleanExpression {
        self.is_greater_than_or_equal(lower)
            .and(self.is_less_than_or_equal(upper))
    }

    fn is_between_exclusive(
        &self,
        lower: impl Into<Self>,
        upper: impl Into<Self>,
    ) -> BooleanExpression {
        self.is_greater_than(lower).and(self.is_less_than(upper))
    }

    /// Largest of `values`; NULL for an empty list
    fn greatest_of(values: Vec<Self>) -> Self {
        if values.is_empty() {
            return Self::null_value();
        }
        operation(Op::Greatest, values.into_iter().map(Self::into_expr).collect())
    }

    /// Smallest of `values`; NULL for an empty list
    fn least_of(values: Vec<Self>) -> Self {
        if values.is_empty() {
            return Self::null_value();
        }
        operation(Op::Least, values.into_iter().map(Self::into_expr).collect())
    }

    fn min(&self) -> Self {
        unary(Op::Min, self)
    }

    fn max(&self) -> Self {
        unary(Op::Max, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::DialectProfile;
    use crate::expression::{NumberExpression, NumericExpression};

    fn price() -> NumberExpression {
        NumberExpression::column(TableRef::new("car").column("price"))
    }

    #[test]
    fn test_is_uses_is_null_for_null_operands() {
        let dialect = DialectProfile::ansi();
        assert_eq!(price().is(10.0).to_sql(&dialect), "(car.price = 10.0)");
        assert_eq!(
            price().is(NumberExpression::null_value()).to_sql(&dialect),
            "(car.price IS NULL)"
        );
        assert_eq!(
            NumberExpression::null_value().is(price()).to_sql(&dialect),
            "(car.price IS NULL)"
        );
        assert_eq!(
            price().is_not(NumberExpression::null_value()).to_sql(&dialect),
            "(car.price IS NOT NULL)"
        );
        assert!(!price().is(NumberExpression::null_value()).includes_null());
    }

    #[test]
    fn test_is_in() {
        let dialect = DialectProfile::ansi();
        assert_eq!(
            price().is_in([1.0, 2.0]).to_sql(&dialect),
            "(car.price IN (1.0, 2.0))"
        );
        assert_eq!(
            price().is_in(Vec::<f64>::new()).to_sql(&dialect),
            "FALSE"
        );
        assert_eq!(
            price().is_not_in([1.0]).to_sql(&dialect),
            "(NOT (car.price IN (1.0)))"
        );
    }

    #[test]
    fn test_comparisons_do_not_include_null() {
        let comparison = NumberExpression::null_value().is_less_than(price());
        assert!(!comparison.includes_null());
        assert!(NumberExpression::null_value().includes_null());
    }

    #[test]
    fn test_greatest_and_least() {
        let dialect = DialectProfile::ansi();
        let greatest = NumberExpression::greatest_of(vec![price(), 5.0.into()]);
        assert_eq!(greatest.to_sql(&dialect), "GREATEST(car.price, 5.0)");
        assert!(NumberExpression::least_of(vec![]).includes_null());
    }

    #[test]
    fn test_aggregates_poison_ancestors() {
        let total = price().max().plus(1.0);
        assert!(total.is_aggregator());
        assert!(!total.is_purely_functional());
        assert!(price().count().is_aggregator());
    }

    #[test]
    fn test_copy_is_independent() {
        let original = price().plus(1.0);
        let copy = original.copy();
        let changed = copy
            .as_expr()
            .with_operand(1, Expr::literal(2.0))
            .map(NumberExpression::from_expr)
            .ok();
        assert_eq!(original, copy);
        assert_ne!(Some(original), changed);
    }
}
