//! Expression evaluation implementation.
//!
//! The evaluator computes what a dialect would compute for a tree against a
//! single row: wherever the dialect lacks a capability it evaluates the
//! fallback formula instead of the native operator, so the result reflects
//! the SQL actually rendered for that dialect.

use crate::dialect::{Capability, Dialect};
use crate::expression::{fallback, Expr, ExpressionError, ExpressionResult, Op};
use crate::value::date_repeat::{add_months, DatePart, DateUnit};
use crate::value::{ColumnRef, DateRepeat, Point2D, Value};
use chrono::{Datelike, Duration, NaiveDateTime, NaiveTime, Timelike, Utc};
use log::trace;
use regex::Regex;
use std::cmp::Ordering;
use std::collections::HashMap;

/// Column bindings for one row
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    values: HashMap<ColumnRef, Value>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a column, builder style
    pub fn with(mut self, column: ColumnRef, value: impl Into<Value>) -> Self {
        self.bind(column, value);
        self
    }

    pub fn bind(&mut self, column: ColumnRef, value: impl Into<Value>) {
        self.values.insert(column, value.into());
    }

    pub fn get(&self, column: &ColumnRef) -> Option<&Value> {
        self.values.get(column)
    }
}

/// Evaluator for expressions
pub struct ExpressionEvaluator<'a> {
    dialect: &'a dyn Dialect,
    row: &'a Row,
}

impl<'a> ExpressionEvaluator<'a> {
    pub fn new(dialect: &'a dyn Dialect, row: &'a Row) -> Self {
        Self { dialect, row }
    }

    /// Evaluate an expression and return the result
    pub fn evaluate(&self, expr: &Expr) -> ExpressionResult<Value> {
        match expr {
            // Rendered as its composite text where intervals are unavailable
            Expr::Literal(Value::DateRepeat(repeat))
                if !self.dialect.supports(Capability::DateRepeat) =>
            {
                Ok(Value::String(repeat.to_string()))
            }
            Expr::Literal(value) => Ok(value.clone()),
            Expr::Column(column) => {
                self.row
                    .get(column)
                    .cloned()
                    .ok_or_else(|| ExpressionError::ColumnNotBound {
                        column: column.to_string(),
                    })
            }
            Expr::Operation(node) => self.evaluate_operation(node.op(), node.operands()),
        }
    }

    /// WHERE-clause semantics: only TRUE matches, NULL does not
    pub fn matches(&self, expr: &Expr) -> ExpressionResult<bool> {
        match self.evaluate(expr)? {
            Value::Boolean(b) => Ok(b),
            Value::Null => Ok(false),
            other => Err(type_error(&Op::And, &[other])),
        }
    }

    fn evaluate_operation(&self, op: &Op, operands: &[Expr]) -> ExpressionResult<Value> {
        if !op.arity().accepts(operands.len()) {
            return Err(ExpressionError::OperandCount {
                operator: op.name().to_string(),
                actual: operands.len(),
            });
        }
        if op.is_aggregate() {
            return Err(ExpressionError::AggregateInRowContext {
                operator: op.name().to_string(),
            });
        }

        if let Some(capability) = op.capability() {
            if !self.dialect.supports(capability) {
                if let Some(alternative) = fallback::expand(op, operands) {
                    trace!(
                        "{}: evaluating {} through fallback",
                        self.dialect.name(),
                        op.name()
                    );
                    return self.evaluate(&alternative);
                }
            }
        }

        match op {
            Op::And => self.evaluate_junction(operands, false),
            Op::Or => self.evaluate_junction(operands, true),
            Op::IfThenElse => match self.evaluate(&operands[0])? {
                Value::Boolean(true) => self.evaluate(&operands[1]),
                Value::Boolean(false) | Value::Null => self.evaluate(&operands[2]),
                other => Err(type_error(op, &[other])),
            },
            Op::Coalesce => {
                for operand in operands {
                    let value = self.evaluate(operand)?;
                    if !value.is_null() {
                        return Ok(value);
                    }
                }
                Ok(Value::Null)
            }
            _ => {
                let values = operands
                    .iter()
                    .map(|operand| self.evaluate(operand))
                    .collect::<ExpressionResult<Vec<_>>>()?;
                apply(op, &values)
            }
        }
    }

    /// AND (`decisive == false`) or OR (`decisive == true`) under three-valued logic
    fn evaluate_junction(&self, operands: &[Expr], decisive: bool) -> ExpressionResult<Value> {
        let mut unknown = false;
        for operand in operands {
            match self.evaluate(operand)? {
                Value::Boolean(b) if b == decisive => return Ok(Value::Boolean(decisive)),
                Value::Boolean(_) => {}
                Value::Null => unknown = true,
                other => {
                    let op = if decisive { Op::Or } else { Op::And };
                    return Err(type_error(&op, &[other]));
                }
            }
        }
        Ok(if unknown {
            Value::Null
        } else {
            Value::Boolean(!decisive)
        })
    }
}

/// Helper function to evaluate an expression against a row
pub fn evaluate_expression(
    expr: &Expr,
    dialect: &dyn Dialect,
    row: &Row,
) -> ExpressionResult<Value> {
    ExpressionEvaluator::new(dialect, row).evaluate(expr)
}

/// Type alias for predicate functions
pub type Predicate<'a> = Box<dyn Fn(&Row) -> bool + 'a>;

/// Helper function to create a predicate function from an expression
pub fn expression_to_predicate(expr: Expr, dialect: &dyn Dialect) -> Predicate<'_> {
    Box::new(move |row| {
        ExpressionEvaluator::new(dialect, row)
            .matches(&expr)
            .unwrap_or(false)
    })
}

fn type_error(op: &Op, values: &[Value]) -> ExpressionError {
    ExpressionError::InvalidOperandTypes {
        operator: op.name().to_string(),
        actual: values.iter().map(Value::data_type).collect(),
    }
}

fn boolean(op: &Op, value: &Value) -> ExpressionResult<bool> {
    value
        .as_bool()
        .ok_or_else(|| type_error(op, std::slice::from_ref(value)))
}

fn number(op: &Op, value: &Value) -> ExpressionResult<f64> {
    value
        .as_f64()
        .ok_or_else(|| type_error(op, std::slice::from_ref(value)))
}

/// Integral view; floating values truncate toward zero
fn integer(op: &Op, value: &Value) -> ExpressionResult<i64> {
    match value {
        Value::Integer(i) => Ok(*i),
        Value::Number(n) => Ok(n.trunc() as i64),
        other => Err(type_error(op, std::slice::from_ref(other))),
    }
}

fn string<'v>(op: &Op, value: &'v Value) -> ExpressionResult<&'v str> {
    value
        .as_str()
        .ok_or_else(|| type_error(op, std::slice::from_ref(value)))
}

fn date(op: &Op, value: &Value) -> ExpressionResult<NaiveDateTime> {
    value
        .as_date()
        .ok_or_else(|| type_error(op, std::slice::from_ref(value)))
}

fn point(op: &Op, value: &Value) -> ExpressionResult<Point2D> {
    value
        .as_point()
        .ok_or_else(|| type_error(op, std::slice::from_ref(value)))
}

/// A repeat arrives natively or as its tagged composite text
fn repeat(op: &Op, value: &Value) -> ExpressionResult<DateRepeat> {
    match value {
        Value::DateRepeat(r) => Ok(*r),
        Value::String(s) => s.parse(),
        other => Err(type_error(op, std::slice::from_ref(other))),
    }
}

fn text_of(op: &Op, value: &Value) -> ExpressionResult<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Integer(i) => Ok(i.to_string()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Boolean(b) => Ok(b.to_string()),
        Value::Date(d) => Ok(d.format("%Y-%m-%d %H:%M:%S").to_string()),
        Value::DateRepeat(r) => Ok(r.to_string()),
        Value::Point(p) => Ok(p.to_string()),
        Value::Null => Err(type_error(op, &[Value::Null])),
    }
}

fn out_of_range(op: &Op) -> ExpressionError {
    ExpressionError::EvaluationError {
        message: format!("result of {} is out of range", op.name()),
    }
}

fn arithmetic(
    op: &Op,
    values: &[Value],
    int_op: fn(i64, i64) -> Option<i64>,
    float_op: fn(f64, f64) -> f64,
) -> ExpressionResult<Value> {
    match (&values[0], &values[1]) {
        (Value::Integer(_), Value::Integer(0)) if matches!(op, Op::Divide | Op::Modulus) => {
            Err(ExpressionError::DivisionByZero)
        }
        (Value::Integer(a), Value::Integer(b)) => int_op(*a, *b)
            .map(Value::Integer)
            .ok_or_else(|| out_of_range(op)),
        (a, b) => match (a.as_f64(), b.as_f64()) {
            (Some(a), Some(b)) => Ok(Value::Number(float_op(a, b))),
            _ => Err(type_error(op, values)),
        },
    }
}

fn float_function(op: &Op, values: &[Value], f: fn(f64) -> f64) -> ExpressionResult<Value> {
    Ok(Value::Number(f(number(op, &values[0])?)))
}

/// Integers stay integral, floats go through `f`
fn rounding(op: &Op, values: &[Value], f: fn(f64) -> f64) -> ExpressionResult<Value> {
    match &values[0] {
        Value::Integer(i) => Ok(Value::Integer(*i)),
        other => Ok(Value::Number(f(number(op, other)?))),
    }
}

fn compare(op: &Op, a: &Value, b: &Value) -> ExpressionResult<Ordering> {
    match (a, b) {
        (Value::Integer(x), Value::Integer(y)) => Ok(x.cmp(y)),
        (Value::String(x), Value::String(y)) => Ok(x.cmp(y)),
        (Value::Boolean(x), Value::Boolean(y)) => Ok(x.cmp(y)),
        (Value::Date(x), Value::Date(y)) => Ok(x.cmp(y)),
        _ => match (a.as_f64(), b.as_f64()) {
            (Some(x), Some(y)) => x.partial_cmp(&y).ok_or_else(|| {
                ExpressionError::EvaluationError {
                    message: "cannot compare NaN".to_string(),
                }
            }),
            _ => Err(type_error(op, &[a.clone(), b.clone()])),
        },
    }
}

fn equal(op: &Op, a: &Value, b: &Value) -> ExpressionResult<bool> {
    match (a, b) {
        (Value::Point(x), Value::Point(y)) => Ok(x == y),
        (Value::DateRepeat(_), Value::DateRepeat(_) | Value::String(_))
        | (Value::String(_), Value::DateRepeat(_)) => {
            Ok(repeat(op, a).ok().zip(repeat(op, b).ok()).map(|(x, y)| x == y) == Some(true))
        }
        _ => Ok(compare(op, a, b)? == Ordering::Equal),
    }
}

fn in_list(op: &Op, values: &[Value]) -> ExpressionResult<Value> {
    let (needle, list) = match values.split_first() {
        Some((needle, list)) => (needle, list),
        None => return Ok(Value::Null),
    };
    if needle.is_null() {
        return Ok(Value::Null);
    }
    let mut unknown = false;
    for candidate in list {
        if candidate.is_null() {
            unknown = true;
        } else if equal(op, needle, candidate)? {
            return Ok(Value::Boolean(true));
        }
    }
    Ok(if unknown {
        Value::Null
    } else {
        Value::Boolean(false)
    })
}

/// Anchored regex for a LIKE pattern; only `%` and `_` are wildcards
fn like_to_regex(pattern: &str) -> String {
    let mut result = String::with_capacity(pattern.len() * 2 + 6);
    result.push_str("(?s)^");
    for c in pattern.chars() {
        match c {
            '%' => result.push_str(".*"),
            '_' => result.push('.'),
            _ => result.push_str(&regex::escape(c.encode_utf8(&mut [0; 4]))),
        }
    }
    result.push('$');
    result
}

fn like_matches(text: &str, pattern: &str) -> ExpressionResult<bool> {
    let regex = Regex::new(&like_to_regex(pattern)).map_err(|e| {
        ExpressionError::EvaluationError {
            message: format!("invalid LIKE pattern '{}': {}", pattern, e),
        }
    })?;
    Ok(regex.is_match(text))
}

/// Characters `[start, end)`, 0-based; `end == None` runs to the end
fn substring(s: &str, start: i64, end: Option<i64>) -> String {
    let skip = start.max(0);
    let chars = s.chars().skip(skip as usize);
    match end {
        Some(end) => chars.take((end - skip).max(0) as usize).collect(),
        None => chars.collect(),
    }
}

/// 1-based character position of `needle`, 0 when absent
fn location_of(s: &str, needle: &str) -> i64 {
    s.find(needle)
        .map(|index| s[..index].chars().count() as i64 + 1)
        .unwrap_or(0)
}

fn date_part(part: DatePart, d: &NaiveDateTime) -> Value {
    match part {
        DatePart::Year => Value::Integer(d.year() as i64),
        DatePart::Month => Value::Integer(d.month() as i64),
        DatePart::Day => Value::Integer(d.day() as i64),
        DatePart::Hour => Value::Integer(d.hour() as i64),
        DatePart::Minute => Value::Integer(d.minute() as i64),
        DatePart::Second => Value::Integer(d.second() as i64),
        DatePart::SubSecond => Value::Number(d.nanosecond() as f64 / 1_000_000_000.0),
        DatePart::DayOfWeek => Value::Integer(d.weekday().number_from_sunday() as i64),
    }
}

fn date_add(unit: DateUnit, d: &NaiveDateTime, amount: i64) -> Option<NaiveDateTime> {
    match unit {
        DateUnit::Second => d.checked_add_signed(Duration::try_seconds(amount)?),
        DateUnit::Minute => d.checked_add_signed(Duration::try_minutes(amount)?),
        DateUnit::Hour => d.checked_add_signed(Duration::try_hours(amount)?),
        DateUnit::Day => d.checked_add_signed(Duration::try_days(amount)?),
        DateUnit::Month => add_months(d, amount),
        DateUnit::Year => add_months(d, amount.checked_mul(12)?),
    }
}

fn months_between(from: &NaiveDateTime, to: &NaiveDateTime) -> i64 {
    (to.year() as i64 * 12 + to.month() as i64) - (from.year() as i64 * 12 + from.month() as i64)
}

fn first_of_month(d: &NaiveDateTime) -> Option<NaiveDateTime> {
    d.with_day(1)
}

fn end_of_month(d: &NaiveDateTime) -> Option<NaiveDateTime> {
    let next = add_months(&first_of_month(d)?, 1)?;
    next.checked_add_signed(Duration::try_days(-1)?)
}

fn to_number(op: &Op, value: &Value) -> ExpressionResult<Value> {
    match value {
        Value::Integer(i) => Ok(Value::Number(*i as f64)),
        Value::Number(n) => Ok(Value::Number(*n)),
        Value::String(s) => s.trim().parse().map(Value::Number).map_err(|_| {
            ExpressionError::EvaluationError {
                message: format!("cannot convert '{}' to a number", s),
            }
        }),
        other => Err(type_error(op, std::slice::from_ref(other))),
    }
}

fn to_integer(op: &Op, value: &Value) -> ExpressionResult<Value> {
    match value {
        Value::Integer(i) => Ok(Value::Integer(*i)),
        Value::Number(n) => Ok(Value::Integer(n.trunc() as i64)),
        Value::String(s) => {
            let trimmed = s.trim();
            trimmed
                .parse::<i64>()
                .or_else(|_| trimmed.parse::<f64>().map(|n| n.trunc() as i64))
                .map(Value::Integer)
                .map_err(|_| ExpressionError::EvaluationError {
                    message: format!("cannot convert '{}' to an integer", s),
                })
        }
        other => Err(type_error(op, std::slice::from_ref(other))),
    }
}

/// Apply a non-short-circuiting operator to evaluated operands
fn apply(op: &Op, values: &[Value]) -> ExpressionResult<Value> {
    match op {
        Op::IsNull => return Ok(Value::Boolean(values[0].is_null())),
        Op::IsNotNull => return Ok(Value::Boolean(!values[0].is_null())),
        Op::In => return in_list(op, values),
        _ => {}
    }

    // Every remaining operator is NULL in, NULL out
    if values.iter().any(Value::is_null) {
        return Ok(Value::Null);
    }

    let overflow = || out_of_range(op);

    match op {
        Op::Not => Ok(Value::Boolean(!boolean(op, &values[0])?)),
        Op::Xor => Ok(Value::Boolean(
            boolean(op, &values[0])? != boolean(op, &values[1])?,
        )),

        Op::Equals => Ok(Value::Boolean(equal(op, &values[0], &values[1])?)),
        Op::NotEquals => Ok(Value::Boolean(!equal(op, &values[0], &values[1])?)),
        Op::LessThan => Ok(Value::Boolean(compare(op, &values[0], &values[1])?.is_lt())),
        Op::LessThanOrEqual => Ok(Value::Boolean(compare(op, &values[0], &values[1])?.is_le())),
        Op::GreaterThan => Ok(Value::Boolean(compare(op, &values[0], &values[1])?.is_gt())),
        Op::GreaterThanOrEqual => {
            Ok(Value::Boolean(compare(op, &values[0], &values[1])?.is_ge()))
        }
        Op::Like => {
            let text = string(op, &values[0])?;
            let pattern = string(op, &values[1])?;
            Ok(Value::Boolean(like_matches(&text, &pattern)?))
        }

        Op::Plus => arithmetic(op, values, i64::checked_add, |a, b| a + b),
        Op::Minus => arithmetic(op, values, i64::checked_sub, |a, b| a - b),
        Op::Times => arithmetic(op, values, i64::checked_mul, |a, b| a * b),
        Op::Divide => arithmetic(op, values, i64::checked_div, |a, b| a / b),
        Op::Modulus => arithmetic(op, values, i64::checked_rem, |a, b| a % b),
        Op::Negate => match &values[0] {
            Value::Integer(i) => i.checked_neg().map(Value::Integer).ok_or_else(overflow),
            other => Ok(Value::Number(-number(op, other)?)),
        },
        Op::Abs => match &values[0] {
            Value::Integer(i) => i.checked_abs().map(Value::Integer).ok_or_else(overflow),
            other => Ok(Value::Number(number(op, other)?.abs())),
        },
        Op::Sign => match &values[0] {
            Value::Integer(i) => Ok(Value::Integer(i.signum())),
            other => {
                let n = number(op, other)?;
                Ok(Value::Integer(if n > 0.0 {
                    1
                } else if n < 0.0 {
                    -1
                } else {
                    0
                }))
            }
        },
        Op::Round => rounding(op, values, f64::round),
        Op::RoundTo => {
            let x = number(op, &values[0])?;
            let scale = 10f64.powf(number(op, &values[1])?);
            Ok(Value::Number((x * scale).round() / scale))
        }
        Op::RoundUp => rounding(op, values, f64::ceil),
        Op::RoundDown => rounding(op, values, f64::floor),
        Op::Truncate => rounding(op, values, f64::trunc),
        Op::Sqrt => float_function(op, values, f64::sqrt),
        Op::Power => Ok(Value::Number(
            number(op, &values[0])?.powf(number(op, &values[1])?),
        )),
        Op::Exp => float_function(op, values, f64::exp),
        Op::Ln => float_function(op, values, f64::ln),
        Op::Log10 => float_function(op, values, f64::log10),
        Op::Sin => float_function(op, values, f64::sin),
        Op::Cos => float_function(op, values, f64::cos),
        Op::Tan => float_function(op, values, f64::tan),
        Op::Cot => float_function(op, values, |x| 1.0 / x.tan()),
        Op::ArcSin => float_function(op, values, f64::asin),
        Op::ArcCos => float_function(op, values, f64::acos),
        Op::ArcTan => float_function(op, values, f64::atan),
        Op::ArcTan2 => Ok(Value::Number(
            number(op, &values[0])?.atan2(number(op, &values[1])?),
        )),
        Op::Sinh => float_function(op, values, f64::sinh),
        Op::Cosh => float_function(op, values, f64::cosh),
        Op::Tanh => float_function(op, values, f64::tanh),
        Op::Degrees => float_function(op, values, f64::to_degrees),
        Op::Radians => float_function(op, values, f64::to_radians),
        Op::Pi => Ok(Value::Number(std::f64::consts::PI)),
        Op::Random => Ok(Value::Number(rand::random::<f64>())),
        Op::Greatest | Op::Least => {
            let mut best = &values[0];
            for candidate in &values[1..] {
                let ordering = compare(op, candidate, best)?;
                let better = if matches!(op, Op::Greatest) {
                    ordering.is_gt()
                } else {
                    ordering.is_lt()
                };
                if better {
                    best = candidate;
                }
            }
            Ok(best.clone())
        }

        Op::ToNumber => to_number(op, &values[0]),
        Op::ToInteger => to_integer(op, &values[0]),
        Op::ToText => Ok(Value::String(text_of(op, &values[0])?)),

        Op::CurrentDate => Ok(Value::Date(Utc::now().date_naive().and_time(NaiveTime::MIN))),
        Op::CurrentTimestamp => Ok(Value::Date(Utc::now().naive_utc())),
        Op::DatePart(part) => Ok(date_part(*part, &date(op, &values[0])?)),
        Op::DateAdd(unit) => {
            let shifted = date_add(*unit, &date(op, &values[0])?, integer(op, &values[1])?);
            shifted.map(Value::Date).ok_or_else(overflow)
        }
        Op::SecondsBetween => {
            let elapsed = date(op, &values[1])?.signed_duration_since(date(op, &values[0])?);
            Ok(Value::Integer(elapsed.num_seconds()))
        }
        Op::MonthsBetween => Ok(Value::Integer(months_between(
            &date(op, &values[0])?,
            &date(op, &values[1])?,
        ))),
        Op::FirstOfMonth => first_of_month(&date(op, &values[0])?)
            .map(Value::Date)
            .ok_or_else(overflow),
        Op::EndOfMonth => end_of_month(&date(op, &values[0])?)
            .map(Value::Date)
            .ok_or_else(overflow),
        Op::AtTimeZone { offset_minutes, .. } => {
            date_add(DateUnit::Minute, &date(op, &values[0])?, *offset_minutes as i64)
                .map(Value::Date)
                .ok_or_else(overflow)
        }
        Op::DateRepeatBetween => Ok(Value::DateRepeat(DateRepeat::between(
            &date(op, &values[0])?,
            &date(op, &values[1])?,
        ))),
        Op::DatePlusRepeat => repeat(op, &values[1])?
            .add_to(&date(op, &values[0])?)
            .map(Value::Date)
            .ok_or_else(overflow),
        Op::DateMinusRepeat => repeat(op, &values[1])?
            .negated()
            .add_to(&date(op, &values[0])?)
            .map(Value::Date)
            .ok_or_else(overflow),
        Op::RepeatPart(part) => repeat(op, &values[0])?
            .field(*part)
            .map(Value::Integer)
            .ok_or_else(|| type_error(op, values)),

        Op::Concat => values
            .iter()
            .map(|value| text_of(op, value))
            .collect::<ExpressionResult<String>>()
            .map(Value::String),
        Op::Lower => Ok(Value::String(string(op, &values[0])?.to_lowercase())),
        Op::Upper => Ok(Value::String(string(op, &values[0])?.to_uppercase())),
        Op::Trim => Ok(Value::String(
            string(op, &values[0])?.trim_matches(' ').to_string(),
        )),
        Op::LeftTrim => Ok(Value::String(
            string(op, &values[0])?.trim_start_matches(' ').to_string(),
        )),
        Op::RightTrim => Ok(Value::String(
            string(op, &values[0])?.trim_end_matches(' ').to_string(),
        )),
        Op::Length => Ok(Value::Integer(string(op, &values[0])?.chars().count() as i64)),
        Op::Substring => Ok(Value::String(substring(
            string(op, &values[0])?,
            integer(op, &values[1])?,
            Some(integer(op, &values[2])?),
        ))),
        Op::SubstringFrom => Ok(Value::String(substring(
            string(op, &values[0])?,
            integer(op, &values[1])?,
            None,
        ))),
        Op::LocationOf => Ok(Value::Integer(location_of(
            string(op, &values[0])?,
            string(op, &values[1])?,
        ))),
        Op::SubstringBefore => {
            let s = string(op, &values[0])?;
            let separator = string(op, &values[1])?;
            Ok(Value::String(
                s.split_once(separator)
                    .map(|(before, _)| before.to_string())
                    .unwrap_or_default(),
            ))
        }
        Op::SubstringAfter => {
            let s = string(op, &values[0])?;
            let separator = string(op, &values[1])?;
            Ok(Value::String(
                s.split_once(separator)
                    .map(|(_, after)| after.to_string())
                    .unwrap_or_default(),
            ))
        }
        Op::Replace => {
            let s = string(op, &values[0])?;
            let find = string(op, &values[1])?;
            let replacement = string(op, &values[2])?;
            if find.is_empty() {
                Ok(Value::String(s.to_string()))
            } else {
                Ok(Value::String(s.replace(find, replacement)))
            }
        }

        Op::MakePoint => Ok(Value::Point(Point2D::new(
            number(op, &values[0])?,
            number(op, &values[1])?,
        ))),
        Op::PointX => Ok(Value::Number(point(op, &values[0])?.x)),
        Op::PointY => Ok(Value::Number(point(op, &values[0])?.y)),
        Op::Distance => Ok(Value::Number(
            point(op, &values[0])?.distance_to(&point(op, &values[1])?),
        )),

        Op::And
        | Op::Or
        | Op::IfThenElse
        | Op::Coalesce
        | Op::IsNull
        | Op::IsNotNull
        | Op::In
        | Op::Sum
        | Op::Average
        | Op::Min
        | Op::Max
        | Op::Count
        | Op::CountAll
        | Op::StandardDeviation
        | Op::Variance => Err(ExpressionError::EvaluationError {
            message: format!("{} is not evaluated operand-wise", op.name()),
        }),
    }
}
