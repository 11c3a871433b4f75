//! Boolean algebra over three-valued logic.

use crate::dialect::Dialect;
use crate::expression::eval::{ExpressionEvaluator, Row};
use crate::expression::typed::{binary, operation, typed_expression, unary};
use crate::expression::{
    EqualComparable, Expr, ExpressionResult, IntegerExpression, NumericExpression, Op,
    SqlExpression,
};
use crate::value::{ColumnRef, Value};

typed_expression!(
    /// A TRUE / FALSE / NULL valued expression
    BooleanExpression
);

impl EqualComparable for BooleanExpression {}

impl BooleanExpression {
    pub fn value(value: bool) -> Self {
        Self::from_expr(Expr::literal(value))
    }

    pub fn true_value() -> Self {
        Self::value(true)
    }

    pub fn false_value() -> Self {
        Self::value(false)
    }

    pub fn column(column: ColumnRef) -> Self {
        Self::from_expr(Expr::column(column))
    }

    pub fn and(&self, other: impl Into<Self>) -> Self {
        Self::all_of([self.clone(), other.into()])
    }

    pub fn or(&self, other: impl Into<Self>) -> Self {
        Self::any_of([self.clone(), other.into()])
    }

    /// NULL stays NULL
    pub fn not(&self) -> Self {
        unary(Op::Not, self)
    }

    pub fn xor(&self, other: impl Into<Self>) -> Self {
        binary(Op::Xor, self, &other.into())
    }

    /// Conjunction of every item. Nested conjunctions are flattened;
    /// no items is TRUE, a single item is returned as is.
    pub fn all_of(items: impl IntoIterator<Item = BooleanExpression>) -> Self {
        Self::junction(Op::And, items, true)
    }

    /// Disjunction of every item; no items is FALSE
    pub fn any_of(items: impl IntoIterator<Item = BooleanExpression>) -> Self {
        Self::junction(Op::Or, items, false)
    }

    /// `NOT (a OR b OR ...)`
    pub fn none_of(items: impl IntoIterator<Item = BooleanExpression>) -> Self {
        Self::any_of(items).not()
    }

    /// At least one item holds, but not every item
    pub fn some_but_not_all_of(items: impl IntoIterator<Item = BooleanExpression>) -> Self {
        let items: Vec<_> = items.into_iter().collect();
        let all = Self::all_of(items.iter().cloned());
        let none = Self::none_of(items);
        all.not().and(none.not())
    }

    fn junction(
        op: Op,
        items: impl IntoIterator<Item = BooleanExpression>,
        identity: bool,
    ) -> Self {
        let mut operands = Vec::new();
        for item in items {
            let expr = item.into_expr();
            if expr.op() == Some(&op) {
                operands.extend(expr.operands().iter().cloned());
            } else {
                operands.push(expr);
            }
        }
        match operands.len() {
            0 => Self::value(identity),
            1 => Self::from_expr(operands.remove(0)),
            _ => operation(op, operands),
        }
    }

    /// `CASE WHEN self THEN then ELSE otherwise END`; NULL selects `otherwise`
    pub fn if_then_else<T: SqlExpression>(&self, then: T, otherwise: impl Into<T>) -> T {
        operation(
            Op::IfThenElse,
            vec![
                self.as_expr().clone(),
                then.into_expr(),
                otherwise.into().into_expr(),
            ],
        )
    }

    /// True when the expression spans more than one table
    pub fn is_relationship(&self) -> bool {
        self.as_expr().is_relationship()
    }

    /// Number of rows for which the condition holds
    pub fn count_if(&self) -> IntegerExpression {
        let indicator: IntegerExpression = self.if_then_else(IntegerExpression::value(1), 0);
        indicator.sum()
    }

    /// WHERE-clause test of the condition against `row`; NULL does not match
    pub fn matches(&self, dialect: &dyn Dialect, row: &Row) -> ExpressionResult<bool> {
        ExpressionEvaluator::new(dialect, row).matches(self.as_expr())
    }
}

impl From<bool> for BooleanExpression {
    fn from(value: bool) -> Self {
        BooleanExpression::value(value)
    }
}

impl From<Option<bool>> for BooleanExpression {
    fn from(value: Option<bool>) -> Self {
        BooleanExpression::from_expr(Expr::literal(Value::from(value)))
    }
}

impl std::ops::Not for BooleanExpression {
    type Output = BooleanExpression;

    fn not(self) -> Self::Output {
        BooleanExpression::not(&self)
    }
}

impl<T: Into<BooleanExpression>> std::ops::BitAnd<T> for BooleanExpression {
    type Output = BooleanExpression;

    fn bitand(self, rhs: T) -> Self::Output {
        self.and(rhs)
    }
}

impl<T: Into<BooleanExpression>> std::ops::BitOr<T> for BooleanExpression {
    type Output = BooleanExpression;

    fn bitor(self, rhs: T) -> Self::Output {
        self.or(rhs)
    }
}

impl<T: Into<BooleanExpression>> std::ops::BitXor<T> for BooleanExpression {
    type Output = BooleanExpression;

    fn bitxor(self, rhs: T) -> Self::Output {
        self.xor(rhs)
    }
}
