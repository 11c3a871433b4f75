//! Keyset ("seek") comparisons.
//!
//! Paginating on several columns needs a lexicographic row-value comparison,
//! `(a, b) < (5, 10)`, which many engines cannot express. The comparison is
//! unrolled instead:
//!
//! ```text
//! a < 5 OR (a = 5 AND b <= 10)
//! ```
//!
//! The final pair is compared inclusively so the boundary row itself is kept.
//!
//! A NULL seek value has no position in the order: its strict branch is
//! dropped and its equality becomes `IS NULL`, so only rows whose column is
//! NULL can continue to the next pair.

use crate::expression::{
    BooleanExpression, Expr, ExpressionError, ExpressionResult, Op, RangeComparable,
    SqlExpression,
};

/// One column of a seek comparison and the value to seek past
#[derive(Debug, Clone, PartialEq)]
pub struct SeekPair {
    column: Expr,
    value: Expr,
}

impl SeekPair {
    pub fn new<T: RangeComparable>(column: T, value: impl Into<T>) -> Self {
        Self {
            column: column.into_expr(),
            value: value.into().into_expr(),
        }
    }

    fn compare(&self, op: Op) -> Option<BooleanExpression> {
        if self.value.includes_null() {
            return None;
        }
        Some(BooleanExpression::from_expr(Expr::operation(
            op,
            vec![self.column.clone(), self.value.clone()],
        )))
    }

    fn equal(&self) -> BooleanExpression {
        if self.value.includes_null() {
            BooleanExpression::from_expr(Expr::operation(Op::IsNull, vec![self.column.clone()]))
        } else {
            BooleanExpression::from_expr(Expr::operation(
                Op::Equals,
                vec![self.column.clone(), self.value.clone()],
            ))
        }
    }
}

fn seek(pairs: &[SeekPair], strict: &Op, inclusive: &Op) -> Option<BooleanExpression> {
    match pairs {
        [] => None,
        [last] => Some(last.compare(inclusive.clone()).unwrap_or_else(|| last.equal())),
        [first, rest @ ..] => {
            let tail = first.equal().and(seek(rest, strict, inclusive)?);
            Some(match first.compare(strict.clone()) {
                Some(before) => before.or(tail),
                None => tail,
            })
        }
    }
}

impl BooleanExpression {
    /// Rows sorting before the pairs, in pair order
    pub fn seek_less_than(pairs: Vec<SeekPair>) -> ExpressionResult<Self> {
        seek(&pairs, &Op::LessThan, &Op::LessThanOrEqual).ok_or(ExpressionError::EmptySeek)
    }

    /// Rows sorting after the pairs, in pair order
    pub fn seek_greater_than(pairs: Vec<SeekPair>) -> ExpressionResult<Self> {
        seek(&pairs, &Op::GreaterThan, &Op::GreaterThanOrEqual)
            .ok_or(ExpressionError::EmptySeek)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::DialectProfile;
    use crate::expression::{IntegerExpression, Row};
    use crate::value::{TableRef, Value};

    fn column(name: &str) -> IntegerExpression {
        IntegerExpression::column(TableRef::new("t").column(name))
    }

    #[test]
    fn test_seek_less_than_sql() {
        let seek = BooleanExpression::seek_less_than(vec![
            SeekPair::new(column("a"), 5),
            SeekPair::new(column("b"), 10),
        ])
        .unwrap();
        assert_eq!(
            seek.to_sql(&DialectProfile::ansi()),
            "((t.a < 5) OR ((t.a = 5) AND (t.b <= 10)))"
        );
    }

    #[test]
    fn test_seek_greater_than_three_columns() {
        let seek = BooleanExpression::seek_greater_than(vec![
            SeekPair::new(column("a"), 1),
            SeekPair::new(column("b"), 2),
            SeekPair::new(column("c"), 3),
        ])
        .unwrap();
        assert_eq!(
            seek.to_sql(&DialectProfile::ansi()),
            "((t.a > 1) OR ((t.a = 1) AND ((t.b > 2) OR ((t.b = 2) AND (t.c >= 3)))))"
        );
    }

    #[test]
    fn test_single_pair() {
        let seek =
            BooleanExpression::seek_less_than(vec![SeekPair::new(column("a"), 5)]).unwrap();
        assert_eq!(seek.to_sql(&DialectProfile::ansi()), "(t.a <= 5)");
    }

    #[test]
    fn test_null_seek_value() {
        let dialect = DialectProfile::ansi();
        let seek = BooleanExpression::seek_less_than(vec![
            SeekPair::new(column("a"), None::<i64>),
            SeekPair::new(column("b"), 10),
        ])
        .unwrap();
        assert_eq!(seek.to_sql(&dialect), "((t.a IS NULL) AND (t.b <= 10))");

        let last = BooleanExpression::seek_greater_than(vec![
            SeekPair::new(column("a"), 1),
            SeekPair::new(column("b"), None::<i64>),
        ])
        .unwrap();
        assert_eq!(
            last.to_sql(&dialect),
            "((t.a > 1) OR ((t.a = 1) AND (t.b IS NULL)))"
        );

        let row = Row::new()
            .with(TableRef::new("t").column("a"), Value::Null)
            .with(TableRef::new("t").column("b"), 9);
        assert!(seek.matches(&dialect, &row).unwrap());
        let row = Row::new()
            .with(TableRef::new("t").column("a"), 4)
            .with(TableRef::new("t").column("b"), 9);
        assert!(!seek.matches(&dialect, &row).unwrap());
    }

    #[test]
    fn test_empty_seek_is_an_error() {
        assert_eq!(
            BooleanExpression::seek_less_than(vec![]),
            Err(ExpressionError::EmptySeek)
        );
    }

    #[test]
    fn test_seek_matches_lexicographic_order() {
        let dialect = DialectProfile::ansi();
        let seek = BooleanExpression::seek_less_than(vec![
            SeekPair::new(column("a"), 5),
            SeekPair::new(column("b"), 10),
        ])
        .unwrap();
        for a in 3..=7 {
            for b in 8..=12 {
                let row = Row::new()
                    .with(TableRef::new("t").column("a"), a)
                    .with(TableRef::new("t").column("b"), b);
                let expected = a < 5 || (a == 5 && b <= 10);
                assert_eq!(
                    seek.matches(&dialect, &row).unwrap(),
                    expected,
                    "a={} b={}",
                    a,
                    b
                );
            }
        }
    }
}
