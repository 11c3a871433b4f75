//! Operations shared by the number and integer algebras.
//!
//! Functions that some engines lack (MOD, SIGN, LOG10, COT, the inverse and
//! hyperbolic trigonometric functions, DEGREES/RADIANS, STDDEV/VARIANCE) are
//! gated by a [`Capability`](crate::dialect::Capability); the renderer
//! substitutes an equivalent formula when the dialect does not support them.

use crate::expression::typed::{binary, unary};
use crate::expression::{
    BooleanExpression, IntegerExpression, NumberExpression, Op, RangeComparable,
    StringExpression,
};

pub trait NumericExpression: RangeComparable + From<i64> {
    fn plus(&self, other: impl Into<Self>) -> Self {
        binary(Op::Plus, self, &other.into())
    }

    fn minus(&self, other: impl Into<Self>) -> Self {
        binary(Op::Minus, self, &other.into())
    }

    fn times(&self, other: impl Into<Self>) -> Self {
        binary(Op::Times, self, &other.into())
    }

    /// `MOD(self, divisor)`. The sign of a negative result is left to the
    /// engine.
    fn modulus(&self, divisor: impl Into<Self>) -> Self {
        binary(Op::Modulus, self, &divisor.into())
    }

    fn negate(&self) -> Self {
        unary(Op::Negate, self)
    }

    fn abs(&self) -> Self {
        unary(Op::Abs, self)
    }

    /// -1, 0 or 1
    fn sign(&self) -> IntegerExpression {
        unary(Op::Sign, self)
    }

    fn square(&self) -> Self {
        self.times(self.clone())
    }

    fn cube(&self) -> Self {
        self.square().times(self.clone())
    }

    fn sqrt(&self) -> NumberExpression {
        unary(Op::Sqrt, self)
    }

    fn power(&self, exponent: impl Into<NumberExpression>) -> NumberExpression {
        binary(Op::Power, self, &exponent.into())
    }

    fn exp(&self) -> NumberExpression {
        unary(Op::Exp, self)
    }

    /// Natural logarithm
    fn ln(&self) -> NumberExpression {
        unary(Op::Ln, self)
    }

    fn log10(&self) -> NumberExpression {
        unary(Op::Log10, self)
    }

    fn sin(&self) -> NumberExpression {
        unary(Op::Sin, self)
    }

    fn cos(&self) -> NumberExpression {
        unary(Op::Cos, self)
    }

    fn tan(&self) -> NumberExpression {
        unary(Op::Tan, self)
    }

    fn cot(&self) -> NumberExpression {
        unary(Op::Cot, self)
    }

    fn arcsin(&self) -> NumberExpression {
        unary(Op::ArcSin, self)
    }

    fn arccos(&self) -> NumberExpression {
        unary(Op::ArcCos, self)
    }

    fn arctan(&self) -> NumberExpression {
        unary(Op::ArcTan, self)
    }

    /// Angle of the point `(x, self)`
    fn arctan2(&self, x: impl Into<NumberExpression>) -> NumberExpression {
        binary(Op::ArcTan2, self, &x.into())
    }

    fn sinh(&self) -> NumberExpression {
        unary(Op::Sinh, self)
    }

    fn cosh(&self) -> NumberExpression {
        unary(Op::Cosh, self)
    }

    fn tanh(&self) -> NumberExpression {
        unary(Op::Tanh, self)
    }

    /// Radians to degrees
    fn degrees(&self) -> NumberExpression {
        unary(Op::Degrees, self)
    }

    /// Degrees to radians
    fn radians(&self) -> NumberExpression {
        unary(Op::Radians, self)
    }

    fn sum(&self) -> Self {
        unary(Op::Sum, self)
    }

    fn average(&self) -> NumberExpression {
        unary(Op::Average, self)
    }

    fn stddev(&self) -> NumberExpression {
        unary(Op::StandardDeviation, self)
    }

    fn variance(&self) -> NumberExpression {
        unary(Op::Variance, self)
    }

    fn is_even(&self) -> BooleanExpression {
        self.modulus(Self::from(2)).is(Self::from(0))
    }

    fn is_odd(&self) -> BooleanExpression {
        self.modulus(Self::from(2)).is_not(Self::from(0))
    }

    fn to_text(&self) -> StringExpression {
        unary(Op::ToText, self)
    }
}
