//! Default ANSI-flavoured SQL text for values, columns and operators.
//!
//! These are the bodies behind the [`Dialect`](super::Dialect) default
//! methods. Operands arrive already rendered; a missing operand renders as
//! `NULL` so a malformed tree still produces text instead of panicking.

use crate::expression::Op;
use crate::value::date_repeat::DatePart;
use crate::value::{ColumnRef, DateRepeat, Value};

/// Quote a string literal, doubling embedded single quotes
pub fn quote_string(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

/// Render a float so it always reads back as a floating-point literal
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "CAST('NaN' AS DOUBLE PRECISION)".to_string()
    } else if n.is_infinite() {
        let sign = if n > 0.0 { "" } else { "-" };
        format!("CAST('{}Infinity' AS DOUBLE PRECISION)", sign)
    } else if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{:.1}", n)
    } else {
        format!("{}", n)
    }
}

pub fn render_interval(repeat: &DateRepeat) -> String {
    format!(
        "INTERVAL '{} years {} months {} days {} hours {} minutes {} seconds'",
        repeat.years, repeat.months, repeat.days, repeat.hours, repeat.minutes, repeat.seconds
    )
}

/// Render a non-NULL, non-boolean literal
pub fn render_value(value: &Value) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::Boolean(true) => "TRUE".to_string(),
        Value::Boolean(false) => "FALSE".to_string(),
        Value::Integer(i) => i.to_string(),
        Value::Number(n) => format_number(*n),
        Value::String(s) => quote_string(s),
        Value::Date(d) => format!("TIMESTAMP '{}'", d.format("%Y-%m-%d %H:%M:%S%.f")),
        Value::DateRepeat(r) => render_interval(r),
        Value::Point(p) => format!("ST_GeomFromText({})", quote_string(&p.to_string())),
    }
}

pub fn render_column(column: &ColumnRef) -> String {
    format!("{}.{}", column.table.qualifier(), column.name)
}

fn operand(operands: &[String], index: usize) -> &str {
    operands.get(index).map(String::as_str).unwrap_or("NULL")
}

fn infix(operands: &[String], operator: &str) -> String {
    format!(
        "({} {} {})",
        operand(operands, 0),
        operator,
        operand(operands, 1)
    )
}

fn function(name: &str, operands: &[String]) -> String {
    format!("{}({})", name, operands.join(", "))
}

fn joined(operands: &[String], separator: &str, empty: &str) -> String {
    match operands {
        [] => empty.to_string(),
        [single] => single.clone(),
        _ => format!("({})", operands.join(separator)),
    }
}

fn date_part(part: DatePart, date: &str) -> String {
    match part {
        DatePart::SubSecond => format!(
            "(EXTRACT(SECOND FROM {0}) - FLOOR(EXTRACT(SECOND FROM {0})))",
            date
        ),
        DatePart::Second => format!("FLOOR(EXTRACT(SECOND FROM {}))", date),
        DatePart::DayOfWeek => format!("(EXTRACT(DOW FROM {}) + 1)", date),
        _ => format!("EXTRACT({} FROM {})", part.sql_name(), date),
    }
}

fn months_between(from: &str, to: &str) -> String {
    format!(
        "((EXTRACT(YEAR FROM {1}) - EXTRACT(YEAR FROM {0})) * 12 + (EXTRACT(MONTH FROM {1}) - EXTRACT(MONTH FROM {0})))",
        from, to
    )
}

/// Render an operator applied to already-rendered operands
pub fn render_operator(op: &Op, operands: &[String]) -> String {
    let a = operand(operands, 0);
    let b = operand(operands, 1);
    let c = operand(operands, 2);

    match op {
        Op::And => joined(operands, " AND ", "TRUE"),
        Op::Or => joined(operands, " OR ", "FALSE"),
        Op::Not => format!("(NOT {})", a),
        Op::Xor => infix(operands, "XOR"),

        Op::Equals => infix(operands, "="),
        Op::NotEquals => infix(operands, "<>"),
        Op::LessThan => infix(operands, "<"),
        Op::LessThanOrEqual => infix(operands, "<="),
        Op::GreaterThan => infix(operands, ">"),
        Op::GreaterThanOrEqual => infix(operands, ">="),
        Op::IsNull => format!("({} IS NULL)", a),
        Op::IsNotNull => format!("({} IS NOT NULL)", a),
        Op::In => format!("({} IN ({}))", a, operands[1.min(operands.len())..].join(", ")),
        Op::Like => infix(operands, "LIKE"),

        Op::IfThenElse => format!("(CASE WHEN {} THEN {} ELSE {} END)", a, b, c),
        Op::Coalesce => function("COALESCE", operands),

        Op::Plus => infix(operands, "+"),
        Op::Minus => infix(operands, "-"),
        Op::Times => infix(operands, "*"),
        Op::Divide => infix(operands, "/"),
        Op::Modulus => function("MOD", operands),
        Op::Negate => format!("(-{})", a),
        Op::Abs => function("ABS", operands),
        Op::Sign => function("SIGN", operands),
        Op::Round | Op::RoundTo => function("ROUND", operands),
        Op::RoundUp => function("CEIL", operands),
        Op::RoundDown => function("FLOOR", operands),
        Op::Truncate => function("TRUNC", operands),
        Op::Sqrt => function("SQRT", operands),
        Op::Power => function("POWER", operands),
        Op::Exp => function("EXP", operands),
        Op::Ln => function("LN", operands),
        Op::Log10 => function("LOG10", operands),
        Op::Sin => function("SIN", operands),
        Op::Cos => function("COS", operands),
        Op::Tan => function("TAN", operands),
        Op::Cot => function("COT", operands),
        Op::ArcSin => function("ASIN", operands),
        Op::ArcCos => function("ACOS", operands),
        Op::ArcTan => function("ATAN", operands),
        Op::ArcTan2 => function("ATAN2", operands),
        Op::Sinh => function("SINH", operands),
        Op::Cosh => function("COSH", operands),
        Op::Tanh => function("TANH", operands),
        Op::Degrees => function("DEGREES", operands),
        Op::Radians => function("RADIANS", operands),
        Op::Pi => "PI()".to_string(),
        Op::Random => "RANDOM()".to_string(),
        Op::Greatest => function("GREATEST", operands),
        Op::Least => function("LEAST", operands),

        Op::ToNumber => format!("CAST({} AS DOUBLE PRECISION)", a),
        Op::ToInteger => format!("CAST({} AS BIGINT)", a),
        Op::ToText => format!("CAST({} AS VARCHAR(1000))", a),

        Op::Sum => function("SUM", operands),
        Op::Average => function("AVG", operands),
        Op::Min => function("MIN", operands),
        Op::Max => function("MAX", operands),
        Op::Count => function("COUNT", operands),
        Op::CountAll => "COUNT(*)".to_string(),
        Op::StandardDeviation => function("STDDEV", operands),
        Op::Variance => function("VARIANCE", operands),

        Op::CurrentDate => "CURRENT_DATE".to_string(),
        Op::CurrentTimestamp => "CURRENT_TIMESTAMP".to_string(),
        Op::DatePart(part) => date_part(*part, a),
        Op::DateAdd(unit) => format!("({} + ({}) * INTERVAL '1 {}')", a, b, unit.sql_name()),
        Op::SecondsBetween => format!("EXTRACT(EPOCH FROM ({} - {}))", b, a),
        Op::MonthsBetween => months_between(a, b),
        Op::FirstOfMonth => format!(
            "(DATE_TRUNC('MONTH', {0}) + ({0} - DATE_TRUNC('DAY', {0})))",
            a
        ),
        Op::EndOfMonth => format!(
            "(DATE_TRUNC('MONTH', {0}) + INTERVAL '1 MONTH' - INTERVAL '1 DAY' + ({0} - DATE_TRUNC('DAY', {0})))",
            a
        ),
        Op::AtTimeZone { zone, .. } => format!("({} AT TIME ZONE {})", a, quote_string(zone)),
        Op::DateRepeatBetween => format!("({} - {})", b, a),
        Op::DatePlusRepeat => infix(operands, "+"),
        Op::DateMinusRepeat => infix(operands, "-"),
        Op::RepeatPart(part) => format!("EXTRACT({} FROM {})", part.sql_name(), a),

        Op::Concat => joined(operands, " || ", "''"),
        Op::Lower => function("LOWER", operands),
        Op::Upper => function("UPPER", operands),
        Op::Trim => function("TRIM", operands),
        Op::LeftTrim => function("LTRIM", operands),
        Op::RightTrim => function("RTRIM", operands),
        Op::Length => function("CHAR_LENGTH", operands),
        Op::Substring => format!("SUBSTRING({} FROM ({}) + 1 FOR ({}) - ({}))", a, b, c, b),
        Op::SubstringFrom => format!("SUBSTRING({} FROM ({}) + 1)", a, b),
        Op::LocationOf => format!("POSITION({} IN {})", b, a),
        Op::SubstringBefore => function("SUBSTRING_BEFORE", operands),
        Op::SubstringAfter => function("SUBSTRING_AFTER", operands),
        Op::Replace => function("REPLACE", operands),

        Op::MakePoint => function("ST_MakePoint", operands),
        Op::PointX => function("ST_X", operands),
        Op::PointY => function("ST_Y", operands),
        Op::Distance => function("ST_Distance", operands),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::date_repeat::DateUnit;
    use crate::value::TableRef;
    use chrono::NaiveDate;

    fn texts(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_literals() {
        assert_eq!(render_value(&Value::Integer(-7)), "-7");
        assert_eq!(render_value(&Value::Number(0.0)), "0.0");
        assert_eq!(render_value(&Value::Number(3.14159)), "3.14159");
        assert_eq!(render_value(&Value::String("O'Neil".to_string())), "'O''Neil'");

        let date = NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(14, 5, 0)
            .unwrap();
        assert_eq!(
            render_value(&Value::Date(date)),
            "TIMESTAMP '2024-03-09 14:05:00'"
        );
        assert_eq!(
            render_value(&Value::DateRepeat(DateRepeat::new(1, 0, 2, 0, 0, -3))),
            "INTERVAL '1 years 0 months 2 days 0 hours 0 minutes -3 seconds'"
        );
    }

    #[test]
    fn test_column() {
        let column = TableRef::new("marque").column("name");
        assert_eq!(render_column(&column), "marque.name");
    }

    #[test]
    fn test_infix_and_functions() {
        assert_eq!(render_operator(&Op::Equals, &texts(&["a", "b"])), "(a = b)");
        assert_eq!(render_operator(&Op::NotEquals, &texts(&["a", "b"])), "(a <> b)");
        assert_eq!(render_operator(&Op::Not, &texts(&["a"])), "(NOT a)");
        assert_eq!(
            render_operator(&Op::And, &texts(&["a", "b", "c"])),
            "(a AND b AND c)"
        );
        assert_eq!(render_operator(&Op::And, &[]), "TRUE");
        assert_eq!(render_operator(&Op::Or, &[]), "FALSE");
        assert_eq!(render_operator(&Op::RoundTo, &texts(&["x", "2"])), "ROUND(x, 2)");
        assert_eq!(render_operator(&Op::In, &texts(&["x", "1", "2"])), "(x IN (1, 2))");
        assert_eq!(
            render_operator(&Op::IfThenElse, &texts(&["c", "t", "e"])),
            "(CASE WHEN c THEN t ELSE e END)"
        );
    }

    #[test]
    fn test_strings() {
        assert_eq!(
            render_operator(&Op::Substring, &texts(&["s", "1", "3"])),
            "SUBSTRING(s FROM (1) + 1 FOR (3) - (1))"
        );
        assert_eq!(
            render_operator(&Op::LocationOf, &texts(&["s", "'-'"])),
            "POSITION('-' IN s)"
        );
        assert_eq!(
            render_operator(&Op::Concat, &texts(&["a", "b"])),
            "(a || b)"
        );
    }

    #[test]
    fn test_dates() {
        assert_eq!(
            render_operator(&Op::DatePart(DatePart::Year), &texts(&["d"])),
            "EXTRACT(YEAR FROM d)"
        );
        assert_eq!(
            render_operator(&Op::DateAdd(DateUnit::Day), &texts(&["d", "3"])),
            "(d + (3) * INTERVAL '1 DAY')"
        );
        assert_eq!(
            render_operator(&Op::SecondsBetween, &texts(&["a", "b"])),
            "EXTRACT(EPOCH FROM (b - a))"
        );
        assert_eq!(
            render_operator(&Op::MonthsBetween, &texts(&["a", "b"])),
            "((EXTRACT(YEAR FROM b) - EXTRACT(YEAR FROM a)) * 12 + (EXTRACT(MONTH FROM b) - EXTRACT(MONTH FROM a)))"
        );
        assert_eq!(
            render_operator(
                &Op::AtTimeZone {
                    zone: "Europe/Paris".to_string(),
                    offset_minutes: 60
                },
                &texts(&["d"])
            ),
            "(d AT TIME ZONE 'Europe/Paris')"
        );
    }

    #[test]
    fn test_missing_operand_does_not_panic() {
        assert_eq!(render_operator(&Op::Equals, &texts(&["a"])), "(a = NULL)");
        assert_eq!(render_operator(&Op::In, &[]), "(NULL IN ())");
    }
}
