//! String expressions.
//!
//! Positions are 0-based for [`StringExpression::substring`] and 1-based for
//! [`StringExpression::location_of`], where 0 means "not found".

use crate::expression::typed::{binary, operation, typed_expression, unary};
use crate::expression::{
    BooleanExpression, EqualComparable, Expr, IntegerExpression, NumberExpression, Op,
    RangeComparable, SqlExpression,
};
use crate::value::{ColumnRef, Value};

typed_expression!(
    /// A character string valued expression
    StringExpression
);

impl EqualComparable for StringExpression {}

impl RangeComparable for StringExpression {}

impl StringExpression {
    pub fn value(value: impl Into<String>) -> Self {
        Self::from_expr(Expr::literal(value.into()))
    }

    pub fn column(column: ColumnRef) -> Self {
        Self::from_expr(Expr::column(column))
    }

    /// Concatenate every item. Nested concatenations are flattened; no items
    /// is the empty string.
    pub fn concat_all(items: impl IntoIterator<Item = StringExpression>) -> Self {
        let mut operands = Vec::new();
        for item in items {
            let expr = item.into_expr();
            if expr.op() == Some(&Op::Concat) {
                operands.extend(expr.operands().iter().cloned());
            } else {
                operands.push(expr);
            }
        }
        match operands.len() {
            0 => Self::value(""),
            1 => Self::from_expr(operands.remove(0)),
            _ => operation(Op::Concat, operands),
        }
    }

    pub fn append(&self, other: impl Into<Self>) -> Self {
        Self::concat_all([self.clone(), other.into()])
    }

    pub fn lowercase(&self) -> Self {
        unary(Op::Lower, self)
    }

    pub fn uppercase(&self) -> Self {
        unary(Op::Upper, self)
    }

    /// Remove leading and trailing spaces
    pub fn trim(&self) -> Self {
        unary(Op::Trim, self)
    }

    pub fn left_trim(&self) -> Self {
        unary(Op::LeftTrim, self)
    }

    pub fn right_trim(&self) -> Self {
        unary(Op::RightTrim, self)
    }

    /// Number of characters
    pub fn length(&self) -> IntegerExpression {
        unary(Op::Length, self)
    }

    /// Characters from `start` up to, not including, `end`
    pub fn substring(
        &self,
        start: impl Into<IntegerExpression>,
        end: impl Into<IntegerExpression>,
    ) -> Self {
        operation(
            Op::Substring,
            vec![
                self.as_expr().clone(),
                start.into().into_expr(),
                end.into().into_expr(),
            ],
        )
    }

    /// Characters from `start` to the end of the string
    pub fn substring_from(&self, start: impl Into<IntegerExpression>) -> Self {
        binary(Op::SubstringFrom, self, &start.into())
    }

    /// 1-based position of the first occurrence of `search`, 0 if absent
    pub fn location_of(&self, search: impl Into<Self>) -> IntegerExpression {
        binary(Op::LocationOf, self, &search.into())
    }

    /// Text before the first `separator`; empty when it does not occur
    pub fn substring_before(&self, separator: impl Into<Self>) -> Self {
        binary(Op::SubstringBefore, self, &separator.into())
    }

    /// Text after the first `separator`; empty when it does not occur
    pub fn substring_after(&self, separator: impl Into<Self>) -> Self {
        binary(Op::SubstringAfter, self, &separator.into())
    }

    /// Text between the first `before` and the next `after`
    pub fn substring_between(&self, before: impl Into<Self>, after: impl Into<Self>) -> Self {
        self.substring_after(before).substring_before(after)
    }

    /// Replace every occurrence of `find`
    pub fn replace(&self, find: impl Into<Self>, replacement: impl Into<Self>) -> Self {
        operation(
            Op::Replace,
            vec![
                self.as_expr().clone(),
                find.into().into_expr(),
                replacement.into().into_expr(),
            ],
        )
    }

    /// SQL `LIKE` with `%` and `_` wildcards
    pub fn is_like(&self, pattern: impl Into<Self>) -> BooleanExpression {
        binary(Op::Like, self, &pattern.into())
    }

    pub fn is_like_ignore_case(&self, pattern: impl Into<Self>) -> BooleanExpression {
        self.lowercase().is_like(pattern.into().lowercase())
    }

    /// Case-insensitive equality, NULL-aware like [`EqualComparable::is`]
    pub fn is_ignore_case(&self, other: impl Into<Self>) -> BooleanExpression {
        let other = other.into();
        if other.includes_null() {
            return self.is_null();
        }
        self.lowercase().is(other.lowercase())
    }

    pub fn to_number(&self) -> NumberExpression {
        unary(Op::ToNumber, self)
    }

    pub fn to_integer(&self) -> IntegerExpression {
        unary(Op::ToInteger, self)
    }
}

impl From<&str> for StringExpression {
    fn from(value: &str) -> Self {
        StringExpression::value(value)
    }
}

impl From<String> for StringExpression {
    fn from(value: String) -> Self {
        StringExpression::value(value)
    }
}

impl From<Option<String>> for StringExpression {
    fn from(value: Option<String>) -> Self {
        StringExpression::from_expr(Expr::literal(Value::from(value)))
    }
}

impl<T: Into<StringExpression>> std::ops::Add<T> for StringExpression {
    type Output = StringExpression;

    fn add(self, rhs: T) -> Self::Output {
        self.append(rhs)
    }
}
