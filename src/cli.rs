//! Command-line front end: render serialized expression trees for a dialect.

use crate::dialect::{Capability, Dialect, DialectProfile};
use crate::expression::Expr;
use anyhow::{Context, Result};
use std::path::Path;

/// Profile at `path`, or the built-in ANSI profile
pub fn load_profile(path: Option<&Path>) -> Result<DialectProfile> {
    match path {
        Some(path) => DialectProfile::from_path(path)
            .with_context(|| format!("Failed to load dialect profile {}", path.display())),
        None => Ok(DialectProfile::ansi()),
    }
}

/// Read a JSON-serialized expression tree
pub fn load_expression(path: &Path) -> Result<Expr> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read expression file {}", path.display()))?;
    let expr = serde_json::from_str(&json)
        .with_context(|| format!("Failed to parse expression tree in {}", path.display()))?;
    log::debug!("loaded expression tree from {}", path.display());
    Ok(expr)
}

/// SQL text of `expr`; `checked` rejects trees the dialect cannot express
pub fn render(expr: &Expr, dialect: &dyn Dialect, checked: bool) -> Result<String> {
    if checked {
        expr.try_to_sql(dialect)
            .with_context(|| format!("Expression cannot be rendered for {}", dialect.name()))
    } else {
        Ok(expr.to_sql(dialect))
    }
}

/// One line per capability: name and whether the dialect supports it
pub fn describe_capabilities(dialect: &dyn Dialect) -> String {
    Capability::ALL
        .iter()
        .map(|capability| {
            let support = if dialect.supports(*capability) {
                "native"
            } else {
                "fallback"
            };
            format!("{:<24} {}\n", capability.as_str(), support)
        })
        .collect()
}

/// Derived metadata of `expr`, one property per line
pub fn describe_expression(expr: &Expr) -> String {
    let tables: Vec<String> = expr
        .tables_involved()
        .iter()
        .map(ToString::to_string)
        .collect();
    let mut out = String::new();
    out.push_str(&format!("includes_null:        {}\n", expr.includes_null()));
    out.push_str(&format!("aggregator:           {}\n", expr.is_aggregator()));
    out.push_str(&format!("purely_functional:    {}\n", expr.is_purely_functional()));
    out.push_str(&format!("relationship:         {}\n", expr.is_relationship()));
    out.push_str(&format!("tables:               {}\n", tables.join(", ")));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expression::{
        BooleanExpression, EqualComparable, NumberExpression, RangeComparable, SqlExpression,
    };
    use crate::value::TableRef;
    use std::io::Write as _;
    use tempfile::NamedTempFile;

    fn join_condition() -> Expr {
        let car = TableRef::new("car");
        let marque = TableRef::with_alias("marque", "m");
        let condition: BooleanExpression = NumberExpression::column(car.column("marque_id"))
            .is(NumberExpression::column(marque.column("id")))
            .and(NumberExpression::column(car.column("price")).is_greater_than(1000.0));
        condition.into_expr()
    }

    #[test]
    fn test_load_profile_defaults_to_ansi() {
        let profile = load_profile(None).unwrap();
        assert_eq!(profile, DialectProfile::ansi());
    }

    #[test]
    fn test_load_profile_reports_missing_file() {
        let err = load_profile(Some(Path::new("/nonexistent/profile.json"))).unwrap_err();
        assert!(err.to_string().contains("Failed to load dialect profile"));
    }

    #[test]
    fn test_load_and_render_expression() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(serde_json::to_string(&join_condition()).unwrap().as_bytes())
            .unwrap();

        let expr = load_expression(file.path()).unwrap();
        assert_eq!(expr, join_condition());
        assert_eq!(
            render(&expr, &DialectProfile::ansi(), true).unwrap(),
            "((car.marque_id = m.id) AND (car.price > 1000.0))"
        );
    }

    #[test]
    fn test_load_expression_rejects_garbage() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"{ not json").unwrap();
        assert!(load_expression(file.path()).is_err());
    }

    #[test]
    fn test_checked_render_fails_without_capability() {
        let point_x = Expr::operation(
            crate::expression::Op::PointX,
            vec![Expr::column(TableRef::new("shop").column("location"))],
        );
        let bare = DialectProfile::minimal("bare");
        assert!(render(&point_x, &bare, true).is_err());
        assert_eq!(render(&point_x, &bare, false).unwrap(), "ST_X(shop.location)");
    }

    #[test]
    fn test_describe_capabilities() {
        let profile = DialectProfile::minimal("bare").with_capability(Capability::Xor);
        let text = describe_capabilities(&profile);
        assert_eq!(text.lines().count(), Capability::ALL.len());
        assert!(text.lines().any(|l| l.starts_with("xor") && l.ends_with("native")));
        assert!(text.lines().any(|l| l.starts_with("modulus") && l.ends_with("fallback")));
    }

    #[test]
    fn test_describe_expression() {
        let text = describe_expression(&join_condition());
        assert!(text.contains("relationship:         true"));
        assert!(text.contains("tables:               car, marque AS m"));
        assert!(text.contains("aggregator:           false"));
    }
}
