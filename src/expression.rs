//! Typed, dialect-portable SQL expressions.
//!
//! This module provides:
//! - The untyped expression tree ([`Expr`]) and its derived metadata
//! - Operator definitions and algebraic fallback formulas
//! - Capability validation against a dialect
//! - A reference evaluator that computes a tree the way a dialect would
//! - Typed algebras for booleans, numbers, integers, dates, date repeats,
//!   strings and points

pub mod boolean;
pub mod date;
pub mod error;
pub mod eval;
pub mod expr;
pub mod fallback;
pub mod integer;
pub mod number;
pub mod numeric;
pub mod operator;
pub mod point;
pub mod repeat;
pub mod seek;
pub mod string;
pub mod typed;
pub mod validate;

pub use boolean::BooleanExpression;
pub use date::DateExpression;
pub use error::{ExpressionError, ExpressionResult};
pub use eval::{evaluate_expression, expression_to_predicate, ExpressionEvaluator, Predicate, Row};
pub use expr::{Expr, Operation};
pub use integer::IntegerExpression;
pub use number::NumberExpression;
pub use numeric::NumericExpression;
pub use operator::{Arity, NullPolicy, Op};
pub use point::PointExpression;
pub use repeat::DateRepeatExpression;
pub use seek::SeekPair;
pub use string::StringExpression;
pub use typed::{EqualComparable, RangeComparable, SqlExpression};
