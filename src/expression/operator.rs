//! Operator definitions for expressions.

use crate::dialect::Capability;
use crate::value::date_repeat::{DatePart, DateUnit};
use serde::{Deserialize, Serialize};

/// Every operator an operation node can carry.
///
/// An operator describes what its node computes; the text it renders to is
/// entirely the dialect's business.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Op {
    // Logical
    And,
    Or,
    Not,
    Xor,

    // Comparison
    Equals,
    NotEquals,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
    IsNull,
    IsNotNull,
    In,
    Like,

    // Conditional
    IfThenElse,
    Coalesce,

    // Arithmetic
    Plus,
    Minus,
    Times,
    Divide,
    Modulus,
    Negate,
    Abs,
    Sign,
    Round,
    RoundTo,
    RoundUp,
    RoundDown,
    Truncate,
    Sqrt,
    Power,
    Exp,
    Ln,
    Log10,
    Sin,
    Cos,
    Tan,
    Cot,
    ArcSin,
    ArcCos,
    ArcTan,
    ArcTan2,
    Sinh,
    Cosh,
    Tanh,
    Degrees,
    Radians,
    Pi,
    Random,
    Greatest,
    Least,

    // Casts
    ToNumber,
    ToInteger,
    ToText,

    // Aggregates
    Sum,
    Average,
    Min,
    Max,
    Count,
    CountAll,
    StandardDeviation,
    Variance,

    // Dates
    CurrentDate,
    CurrentTimestamp,
    DatePart(DatePart),
    DateAdd(DateUnit),
    SecondsBetween,
    MonthsBetween,
    FirstOfMonth,
    EndOfMonth,
    AtTimeZone { zone: String, offset_minutes: i32 },
    DateRepeatBetween,
    DatePlusRepeat,
    DateMinusRepeat,
    RepeatPart(DatePart),

    // Strings
    Concat,
    Lower,
    Upper,
    Trim,
    LeftTrim,
    RightTrim,
    Length,
    Substring,
    SubstringFrom,
    LocationOf,
    SubstringBefore,
    SubstringAfter,
    Replace,

    // Geometry
    MakePoint,
    PointX,
    PointY,
    Distance,
}

/// Number of operands an operator accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exactly(usize),
    AtLeast(usize),
}

impl Arity {
    pub fn accepts(&self, count: usize) -> bool {
        match self {
            Arity::Exactly(n) => count == *n,
            Arity::AtLeast(n) => count >= *n,
        }
    }
}

/// How an operator's null-inclusion follows from its operands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NullPolicy {
    /// NULL in any operand may surface in the result
    Propagate,
    /// The result is never NULL, or the operator already handles NULL itself
    Never,
}

impl Op {
    pub fn arity(&self) -> Arity {
        use Op::*;
        match self {
            And | Or | Concat => Arity::AtLeast(0),
            Greatest | Least | Coalesce => Arity::AtLeast(1),
            In => Arity::AtLeast(1),

            Pi | Random | CountAll | CurrentDate | CurrentTimestamp => Arity::Exactly(0),

            Not | IsNull | IsNotNull | Negate | Abs | Sign | Round | RoundUp | RoundDown
            | Truncate | Sqrt | Exp | Ln | Log10 | Sin | Cos | Tan | Cot | ArcSin | ArcCos
            | ArcTan | Sinh | Cosh | Tanh | Degrees | Radians | ToNumber | ToInteger | ToText
            | Sum | Average | Min | Max | Count | StandardDeviation | Variance | DatePart(_)
            | FirstOfMonth | EndOfMonth | AtTimeZone { .. } | RepeatPart(_) | Lower | Upper
            | Trim | LeftTrim | RightTrim | Length | PointX | PointY => Arity::Exactly(1),

            Xor | Equals | NotEquals | LessThan | LessThanOrEqual | GreaterThan
            | GreaterThanOrEqual | Like | Plus | Minus | Times | Divide | Modulus | RoundTo
            | Power | ArcTan2 | DateAdd(_) | SecondsBetween | MonthsBetween | DateRepeatBetween
            | DatePlusRepeat | DateMinusRepeat | SubstringFrom | LocationOf | SubstringBefore
            | SubstringAfter | MakePoint | Distance => Arity::Exactly(2),

            IfThenElse | Substring | Replace => Arity::Exactly(3),
        }
    }

    /// Capability a dialect needs to render this operator natively
    pub fn capability(&self) -> Option<Capability> {
        use Op::*;
        match self {
            Xor => Some(Capability::Xor),
            Modulus => Some(Capability::Modulus),
            Sign => Some(Capability::Sign),
            RoundTo => Some(Capability::DecimalRound),
            Truncate => Some(Capability::Truncate),
            Log10 => Some(Capability::Log10),
            Cot => Some(Capability::Cotangent),
            ArcSin | ArcCos => Some(Capability::InverseSine),
            Sinh | Cosh | Tanh => Some(Capability::Hyperbolic),
            Degrees | Radians => Some(Capability::DegreesRadians),
            StandardDeviation | Variance => Some(Capability::StandardDeviation),
            Greatest | Least => Some(Capability::GreatestLeast),
            LeftTrim | RightTrim => Some(Capability::LeftRightTrim),
            SubstringBefore | SubstringAfter => Some(Capability::SubstringBeforeAfter),
            DateRepeatBetween | DatePlusRepeat | DateMinusRepeat | RepeatPart(_) => {
                Some(Capability::DateRepeat)
            }
            FirstOfMonth | EndOfMonth => Some(Capability::MonthBoundaries),
            AtTimeZone { .. } => Some(Capability::TimeZoneConversion),
            Distance => Some(Capability::Distance),
            MakePoint | PointX | PointY => Some(Capability::Geometry),
            _ => None,
        }
    }

    /// Aggregates summarise many rows and poison every ancestor node
    pub fn is_aggregate(&self) -> bool {
        matches!(
            self,
            Op::Sum
                | Op::Average
                | Op::Min
                | Op::Max
                | Op::Count
                | Op::CountAll
                | Op::StandardDeviation
                | Op::Variance
        )
    }

    /// Volatile operators produce a fresh value on every evaluation
    pub fn is_volatile(&self) -> bool {
        matches!(self, Op::Random | Op::CurrentDate | Op::CurrentTimestamp)
    }

    pub fn null_policy(&self) -> NullPolicy {
        use Op::*;
        match self {
            Equals | NotEquals | LessThan | LessThanOrEqual | GreaterThan | GreaterThanOrEqual
            | IsNull | IsNotNull | In | Like | IfThenElse | Coalesce | Count | CountAll => {
                NullPolicy::Never
            }
            _ => NullPolicy::Propagate,
        }
    }

    /// Short name used in logs and error messages
    pub fn name(&self) -> &'static str {
        use Op::*;
        match self {
            And => "and",
            Or => "or",
            Not => "not",
            Xor => "xor",
            Equals => "equals",
            NotEquals => "not-equals",
            LessThan => "less-than",
            LessThanOrEqual => "less-than-or-equal",
            GreaterThan => "greater-than",
            GreaterThanOrEqual => "greater-than-or-equal",
            IsNull => "is-null",
            IsNotNull => "is-not-null",
            In => "in",
            Like => "like",
            IfThenElse => "if-then-else",
            Coalesce => "coalesce",
            Plus => "plus",
            Minus => "minus",
            Times => "times",
            Divide => "divide",
            Modulus => "modulus",
            Negate => "negate",
            Abs => "abs",
            Sign => "sign",
            Round => "round",
            RoundTo => "round-to",
            RoundUp => "round-up",
            RoundDown => "round-down",
            Truncate => "truncate",
            Sqrt => "sqrt",
            Power => "power",
            Exp => "exp",
            Ln => "ln",
            Log10 => "log10",
            Sin => "sin",
            Cos => "cos",
            Tan => "tan",
            Cot => "cot",
            ArcSin => "arcsin",
            ArcCos => "arccos",
            ArcTan => "arctan",
            ArcTan2 => "arctan2",
            Sinh => "sinh",
            Cosh => "cosh",
            Tanh => "tanh",
            Degrees => "degrees",
            Radians => "radians",
            Pi => "pi",
            Random => "random",
            Greatest => "greatest",
            Least => "least",
            ToNumber => "to-number",
            ToInteger => "to-integer",
            ToText => "to-text",
            Sum => "sum",
            Average => "average",
            Min => "min",
            Max => "max",
            Count => "count",
            CountAll => "count-all",
            StandardDeviation => "stddev",
            Variance => "variance",
            CurrentDate => "current-date",
            CurrentTimestamp => "current-timestamp",
            DatePart(_) => "date-part",
            DateAdd(_) => "date-add",
            SecondsBetween => "seconds-between",
            MonthsBetween => "months-between",
            FirstOfMonth => "first-of-month",
            EndOfMonth => "end-of-month",
            AtTimeZone { .. } => "at-time-zone",
            DateRepeatBetween => "date-repeat",
            DatePlusRepeat => "date-plus-repeat",
            DateMinusRepeat => "date-minus-repeat",
            RepeatPart(_) => "repeat-part",
            Concat => "concat",
            Lower => "lower",
            Upper => "upper",
            Trim => "trim",
            LeftTrim => "left-trim",
            RightTrim => "right-trim",
            Length => "length",
            Substring => "substring",
            SubstringFrom => "substring-from",
            LocationOf => "location-of",
            SubstringBefore => "substring-before",
            SubstringAfter => "substring-after",
            Replace => "replace",
            MakePoint => "make-point",
            PointX => "point-x",
            PointY => "point-y",
            Distance => "distance",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arity() {
        assert!(Op::And.arity().accepts(0));
        assert!(Op::And.arity().accepts(5));
        assert!(Op::Not.arity().accepts(1));
        assert!(!Op::Not.arity().accepts(2));
        assert!(Op::IfThenElse.arity().accepts(3));
        assert!(!Op::Substring.arity().accepts(2));
        assert!(Op::Pi.arity().accepts(0));
        assert!(!Op::In.arity().accepts(0));
    }

    #[test]
    fn test_capabilities() {
        assert_eq!(Op::Xor.capability(), Some(Capability::Xor));
        assert_eq!(Op::Tanh.capability(), Some(Capability::Hyperbolic));
        assert_eq!(
            Op::AtTimeZone {
                zone: "UTC".to_string(),
                offset_minutes: 0
            }
            .capability(),
            Some(Capability::TimeZoneConversion)
        );
        assert_eq!(Op::Plus.capability(), None);
        assert_eq!(Op::And.capability(), None);
    }

    #[test]
    fn test_aggregate_and_volatile() {
        assert!(Op::Sum.is_aggregate());
        assert!(Op::StandardDeviation.is_aggregate());
        assert!(!Op::Plus.is_aggregate());
        assert!(Op::Random.is_volatile());
        assert!(Op::CurrentTimestamp.is_volatile());
        assert!(!Op::Sum.is_volatile());
    }

    #[test]
    fn test_null_policy() {
        assert_eq!(Op::LessThan.null_policy(), NullPolicy::Never);
        assert_eq!(Op::IsNull.null_policy(), NullPolicy::Never);
        assert_eq!(Op::IfThenElse.null_policy(), NullPolicy::Never);
        assert_eq!(Op::Plus.null_policy(), NullPolicy::Propagate);
        assert_eq!(Op::Not.null_policy(), NullPolicy::Propagate);
    }

    #[test]
    fn test_operator_names() {
        assert_eq!(Op::Xor.name(), "xor");
        assert_eq!(Op::DatePart(DatePart::Year).name(), "date-part");
        assert_eq!(Op::SubstringBefore.name(), "substring-before");
    }
}
