//! Algebraic fallback formulas.
//!
//! When a dialect lacks a capability, the operator is replaced by an
//! equivalent tree of more primitive operators. A fallback tree may itself
//! contain gated operators (e.g. `MOD` falls back through `TRUNC`); those are
//! resolved the same way when the tree is rendered or evaluated.

use crate::expression::{Expr, Op};
use crate::value::date_repeat::{DatePart, DateUnit, REPEAT_PREFIX};
use crate::value::Value;

fn call(op: Op, operands: Vec<Expr>) -> Expr {
    Expr::operation(op, operands)
}

fn unary(op: Op, operand: &Expr) -> Expr {
    call(op, vec![operand.clone()])
}

fn binary(op: Op, left: Expr, right: Expr) -> Expr {
    call(op, vec![left, right])
}

fn if_then_else(condition: Expr, then: Expr, otherwise: Expr) -> Expr {
    call(Op::IfThenElse, vec![condition, then, otherwise])
}

fn int(value: i64) -> Expr {
    Expr::literal(value)
}

fn num(value: f64) -> Expr {
    Expr::literal(value)
}

fn text(value: &str) -> Expr {
    Expr::literal(value)
}

/// `atan(x / sqrt(1 - x²))`
fn arcsin_formula(x: &Expr) -> Expr {
    let one_minus_square = binary(
        Op::Minus,
        num(1.0),
        binary(Op::Times, x.clone(), x.clone()),
    );
    unary(
        Op::ArcTan,
        &binary(Op::Divide, x.clone(), unary(Op::Sqrt, &one_minus_square)),
    )
}

/// `avg(x²) - avg(x)²`
fn variance_formula(x: &Expr) -> Expr {
    let mean = unary(Op::Average, x);
    binary(
        Op::Minus,
        unary(Op::Average, &binary(Op::Times, x.clone(), x.clone())),
        binary(Op::Times, mean.clone(), mean),
    )
}

/// `add_days(d, 1 - day(d))`
fn first_of_month_formula(date: &Expr) -> Expr {
    binary(
        Op::DateAdd(DateUnit::Day),
        date.clone(),
        binary(Op::Minus, int(1), unary(Op::DatePart(DatePart::Day), date)),
    )
}

/// Pick the extreme of `values` pairwise through conditionals
fn extreme_formula(values: &[Expr], keep_left: Op) -> Option<Expr> {
    let (first, rest) = values.split_first()?;
    Some(rest.iter().fold(first.clone(), |best, candidate| {
        if_then_else(
            binary(keep_left.clone(), best.clone(), candidate.clone()),
            best,
            candidate.clone(),
        )
    }))
}

/// Result of a not-found search: empty string, or NULL when the search itself was NULL
fn when_found(location: &Expr, found: Expr) -> Expr {
    if_then_else(
        binary(Op::GreaterThan, location.clone(), int(0)),
        found,
        if_then_else(
            binary(Op::Equals, location.clone(), int(0)),
            text(""),
            Expr::null(),
        ),
    )
}

fn date_unit(part: DatePart) -> Option<DateUnit> {
    match part {
        DatePart::Year => Some(DateUnit::Year),
        DatePart::Month => Some(DateUnit::Month),
        DatePart::Day => Some(DateUnit::Day),
        DatePart::Hour => Some(DateUnit::Hour),
        DatePart::Minute => Some(DateUnit::Minute),
        DatePart::Second => Some(DateUnit::Second),
        DatePart::SubSecond | DatePart::DayOfWeek => None,
    }
}

/// Tagged composite `P{y}Y{m}M{d}D{h}h{n}n{s}s` of field differences
fn date_repeat_formula(from: &Expr, to: &Expr) -> Expr {
    let mut pieces = vec![text(REPEAT_PREFIX)];
    for part in DatePart::REPEAT_FIELDS {
        let difference = binary(
            Op::Minus,
            unary(Op::DatePart(part), to),
            unary(Op::DatePart(part), from),
        );
        pieces.push(unary(Op::ToText, &difference));
        if let Some(tag) = part.repeat_tag() {
            pieces.push(text(tag));
        }
    }
    call(Op::Concat, pieces)
}

/// Pull one field back out of the composite form
fn repeat_part_formula(part: DatePart, repeat: &Expr) -> Option<Expr> {
    let before = part.preceding_tag()?;
    let after = part.repeat_tag()?;
    let tail = binary(Op::SubstringAfter, repeat.clone(), text(before));
    let field = binary(Op::SubstringBefore, tail, text(after));
    Some(unary(Op::ToInteger, &field))
}

fn shift_by_repeat(date: &Expr, repeat: &Expr, negate: bool) -> Expr {
    DatePart::REPEAT_FIELDS
        .iter()
        .filter_map(|part| Some((date_unit(*part)?, *part)))
        .fold(date.clone(), |shifted, (unit, part)| {
            let amount = call(Op::RepeatPart(part), vec![repeat.clone()]);
            let amount = if negate {
                unary(Op::Negate, &amount)
            } else {
                amount
            };
            binary(Op::DateAdd(unit), shifted, amount)
        })
}

fn coordinate_difference(axis: Op, p: &Expr, q: &Expr) -> Expr {
    binary(Op::Minus, unary(axis.clone(), p), unary(axis, q))
}

/// Equivalent tree for `op` built from more primitive operators.
///
/// Returns `None` when no formula exists (or the operands do not fit the
/// operator), in which case the native form is the only rendering.
pub fn expand(op: &Op, operands: &[Expr]) -> Option<Expr> {
    match (op, operands) {
        (Op::Xor, [a, b]) => Some(call(
            Op::Or,
            vec![
                call(Op::And, vec![a.clone(), unary(Op::Not, b)]),
                call(Op::And, vec![unary(Op::Not, a), b.clone()]),
            ],
        )),

        (Op::Modulus, [a, b]) => Some(binary(
            Op::Minus,
            a.clone(),
            binary(
                Op::Times,
                b.clone(),
                unary(Op::Truncate, &binary(Op::Divide, a.clone(), b.clone())),
            ),
        )),

        (Op::Sign, [x]) => Some(if_then_else(
            unary(Op::IsNull, x),
            Expr::null(),
            if_then_else(
                binary(Op::GreaterThan, x.clone(), int(0)),
                int(1),
                if_then_else(binary(Op::LessThan, x.clone(), int(0)), int(-1), int(0)),
            ),
        )),

        (Op::RoundTo, [x, places]) => {
            let scale = binary(Op::Power, num(10.0), places.clone());
            Some(binary(
                Op::Divide,
                unary(Op::Round, &binary(Op::Times, x.clone(), scale.clone())),
                scale,
            ))
        }

        (Op::Truncate, [x]) => Some(if_then_else(
            binary(Op::GreaterThanOrEqual, x.clone(), int(0)),
            unary(Op::RoundDown, x),
            unary(Op::RoundUp, x),
        )),

        (Op::Log10, [x]) => Some(binary(
            Op::Divide,
            unary(Op::Ln, x),
            unary(Op::Ln, &num(10.0)),
        )),

        (Op::Cot, [x]) => Some(binary(Op::Divide, unary(Op::Cos, x), unary(Op::Sin, x))),

        (Op::ArcSin, [x]) => Some(arcsin_formula(x)),

        (Op::ArcCos, [x]) => Some(binary(
            Op::Minus,
            binary(Op::Divide, call(Op::Pi, vec![]), num(2.0)),
            arcsin_formula(x),
        )),

        (Op::Sinh | Op::Cosh | Op::Tanh, [x]) => {
            let exp_x = unary(Op::Exp, x);
            let exp_neg_x = unary(Op::Exp, &unary(Op::Negate, x));
            let difference = binary(Op::Minus, exp_x.clone(), exp_neg_x.clone());
            let sum = binary(Op::Plus, exp_x, exp_neg_x);
            Some(match op {
                Op::Sinh => binary(Op::Divide, difference, num(2.0)),
                Op::Cosh => binary(Op::Divide, sum, num(2.0)),
                _ => binary(Op::Divide, difference, sum),
            })
        }

        (Op::Degrees, [x]) => Some(binary(
            Op::Divide,
            binary(Op::Times, x.clone(), num(180.0)),
            call(Op::Pi, vec![]),
        )),

        (Op::Radians, [x]) => Some(binary(
            Op::Divide,
            binary(Op::Times, x.clone(), call(Op::Pi, vec![])),
            num(180.0),
        )),

        (Op::Variance, [x]) => Some(variance_formula(x)),

        (Op::StandardDeviation, [x]) => Some(unary(Op::Sqrt, &variance_formula(x))),

        (Op::Greatest, values) => extreme_formula(values, Op::GreaterThanOrEqual),

        (Op::Least, values) => extreme_formula(values, Op::LessThanOrEqual),

        (Op::LeftTrim, [s]) => {
            let trimmed = unary(Op::Trim, &call(Op::Concat, vec![s.clone(), text("|")]));
            Some(call(
                Op::Substring,
                vec![
                    trimmed.clone(),
                    int(0),
                    binary(Op::Minus, unary(Op::Length, &trimmed), int(1)),
                ],
            ))
        }

        (Op::RightTrim, [s]) => {
            let trimmed = unary(Op::Trim, &call(Op::Concat, vec![text("|"), s.clone()]));
            Some(binary(Op::SubstringFrom, trimmed, int(1)))
        }

        (Op::SubstringBefore, [s, separator]) => {
            let location = binary(Op::LocationOf, s.clone(), separator.clone());
            let before = call(
                Op::Substring,
                vec![
                    s.clone(),
                    int(0),
                    binary(Op::Minus, location.clone(), int(1)),
                ],
            );
            Some(when_found(&location, before))
        }

        (Op::SubstringAfter, [s, separator]) => {
            let location = binary(Op::LocationOf, s.clone(), separator.clone());
            let start = binary(
                Op::Plus,
                binary(Op::Minus, location.clone(), int(1)),
                unary(Op::Length, separator),
            );
            let after = binary(Op::SubstringFrom, s.clone(), start);
            Some(when_found(&location, after))
        }

        (Op::DateRepeatBetween, [from, to]) => Some(date_repeat_formula(from, to)),

        (Op::RepeatPart(part), [repeat]) => repeat_part_formula(*part, repeat),

        (Op::DatePlusRepeat, [date, repeat]) => Some(shift_by_repeat(date, repeat, false)),

        (Op::DateMinusRepeat, [date, repeat]) => Some(shift_by_repeat(date, repeat, true)),

        (Op::FirstOfMonth, [date]) => Some(first_of_month_formula(date)),

        (Op::EndOfMonth, [date]) => {
            let next_month = binary(
                Op::DateAdd(DateUnit::Month),
                first_of_month_formula(date),
                int(1),
            );
            Some(binary(Op::DateAdd(DateUnit::Day), next_month, int(-1)))
        }

        (Op::AtTimeZone { offset_minutes, .. }, [date]) => Some(binary(
            Op::DateAdd(DateUnit::Minute),
            date.clone(),
            Expr::literal(Value::Integer(*offset_minutes as i64)),
        )),

        (Op::Distance, [p, q]) => {
            let dx = coordinate_difference(Op::PointX, p, q);
            let dy = coordinate_difference(Op::PointY, p, q);
            Some(unary(
                Op::Sqrt,
                &binary(
                    Op::Plus,
                    binary(Op::Times, dx.clone(), dx),
                    binary(Op::Times, dy.clone(), dy),
                ),
            ))
        }

        _ => None,
    }
}
