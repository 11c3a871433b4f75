//! Native-support flags a dialect can advertise.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A native function or operator that not every engine provides.
///
/// Every capability except [`Capability::Geometry`] has an algebraic fallback,
/// so a missing capability changes the rendered SQL, never whether it renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Boolean `XOR`
    Xor,
    /// `MOD(a, b)` or `a % b`
    Modulus,
    /// `SIGN(x)`
    Sign,
    /// `ROUND(x, n)`
    DecimalRound,
    /// `TRUNC(x)`
    Truncate,
    /// `LOG10(x)`
    Log10,
    /// `COT(x)`
    Cotangent,
    /// `ASIN(x)` and `ACOS(x)`
    InverseSine,
    /// `SINH`, `COSH` and `TANH`
    Hyperbolic,
    /// `DEGREES(x)` and `RADIANS(x)`
    DegreesRadians,
    /// `STDDEV(x)` and `VARIANCE(x)`
    StandardDeviation,
    /// `GREATEST(...)` and `LEAST(...)`
    GreatestLeast,
    /// `LTRIM(s)` and `RTRIM(s)`
    LeftRightTrim,
    /// Substring before/after a separator
    SubstringBeforeAfter,
    /// An interval type able to hold a date repeat
    DateRepeat,
    /// First and last day of a date's month
    MonthBoundaries,
    /// `AT TIME ZONE`
    TimeZoneConversion,
    /// Distance between two points
    Distance,
    /// A point type with coordinate accessors
    Geometry,
}

impl Capability {
    pub const ALL: [Capability; 19] = [
        Capability::Xor,
        Capability::Modulus,
        Capability::Sign,
        Capability::DecimalRound,
        Capability::Truncate,
        Capability::Log10,
        Capability::Cotangent,
        Capability::InverseSine,
        Capability::Hyperbolic,
        Capability::DegreesRadians,
        Capability::StandardDeviation,
        Capability::GreatestLeast,
        Capability::LeftRightTrim,
        Capability::SubstringBeforeAfter,
        Capability::DateRepeat,
        Capability::MonthBoundaries,
        Capability::TimeZoneConversion,
        Capability::Distance,
        Capability::Geometry,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::Xor => "xor",
            Capability::Modulus => "modulus",
            Capability::Sign => "sign",
            Capability::DecimalRound => "decimal_round",
            Capability::Truncate => "truncate",
            Capability::Log10 => "log10",
            Capability::Cotangent => "cotangent",
            Capability::InverseSine => "inverse_sine",
            Capability::Hyperbolic => "hyperbolic",
            Capability::DegreesRadians => "degrees_radians",
            Capability::StandardDeviation => "standard_deviation",
            Capability::GreatestLeast => "greatest_least",
            Capability::LeftRightTrim => "left_right_trim",
            Capability::SubstringBeforeAfter => "substring_before_after",
            Capability::DateRepeat => "date_repeat",
            Capability::MonthBoundaries => "month_boundaries",
            Capability::TimeZoneConversion => "time_zone_conversion",
            Capability::Distance => "distance",
            Capability::Geometry => "geometry",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_match_serde() {
        for capability in Capability::ALL {
            let json = serde_json::to_string(&capability).unwrap();
            assert_eq!(json, format!("\"{}\"", capability.as_str()));
        }
    }

    #[test]
    fn test_all_is_distinct() {
        let mut all = Capability::ALL.to_vec();
        all.sort();
        all.dedup();
        assert_eq!(all.len(), Capability::ALL.len());
    }
}
