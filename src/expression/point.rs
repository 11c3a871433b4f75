//! Two-dimensional geometry expressions.
//!
//! Point construction and coordinate access have no portable formula, so a
//! dialect without [`Capability::Geometry`](crate::dialect::Capability::Geometry)
//! cannot render them; [`SqlExpression::try_to_sql`] reports that up front.

use crate::expression::typed::{binary, typed_expression, unary};
use crate::expression::{EqualComparable, Expr, NumberExpression, Op, SqlExpression};
use crate::value::{ColumnRef, Point2D, Value};

typed_expression!(
    /// A 2D point valued expression.
    ///
    /// Building one never fails, whatever the target dialect. Missing
    /// geometry support surfaces only when the tree is checked: `validate`
    /// and `try_to_sql` return `UnsupportedByDialect`, while plain `to_sql`
    /// logs a warning and emits the `ST_*` text anyway. Render points with
    /// `try_to_sql` when the dialect is not known to support geometry.
    PointExpression
);

impl EqualComparable for PointExpression {}

impl PointExpression {
    pub fn value(value: Point2D) -> Self {
        Self::from_expr(Expr::literal(value))
    }

    pub fn column(column: ColumnRef) -> Self {
        Self::from_expr(Expr::column(column))
    }

    pub fn from_coordinates(
        x: impl Into<NumberExpression>,
        y: impl Into<NumberExpression>,
    ) -> Self {
        let (x, y): (NumberExpression, NumberExpression) = (x.into(), y.into());
        binary(Op::MakePoint, &x, &y)
    }

    pub fn x(&self) -> NumberExpression {
        unary(Op::PointX, self)
    }

    pub fn y(&self) -> NumberExpression {
        unary(Op::PointY, self)
    }

    /// Euclidean distance
    pub fn distance_to(&self, other: impl Into<Self>) -> NumberExpression {
        binary(Op::Distance, self, &other.into())
    }
}

impl From<Point2D> for PointExpression {
    fn from(value: Point2D) -> Self {
        PointExpression::value(value)
    }
}

impl From<Option<Point2D>> for PointExpression {
    fn from(value: Option<Point2D>) -> Self {
        PointExpression::from_expr(Expr::literal(Value::from(value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::{Capability, DialectProfile};
    use crate::expression::{ExpressionError, Row};
    use crate::value::TableRef;

    fn location() -> PointExpression {
        PointExpression::column(TableRef::new("shop").column("location"))
    }

    #[test]
    fn test_native_sql() {
        let dialect = DialectProfile::ansi();
        assert_eq!(
            PointExpression::from_coordinates(1.0, 2.0).to_sql(&dialect),
            "ST_MakePoint(1.0, 2.0)"
        );
        assert_eq!(
            location().distance_to(Point2D::new(3.0, 4.0)).to_sql(&dialect),
            "ST_Distance(shop.location, ST_GeomFromText('POINT (3 4)'))"
        );
    }

    #[test]
    fn test_distance_fallback() {
        let geometry_only = DialectProfile::minimal("geo").with_capability(Capability::Geometry);
        let distance = PointExpression::value(Point2D::new(0.0, 0.0)).distance_to(Point2D::new(3.0, 4.0));
        assert_eq!(
            distance.evaluate(&geometry_only, &Row::new()).unwrap(),
            Value::Number(5.0)
        );
        assert_eq!(
            distance.evaluate(&DialectProfile::ansi(), &Row::new()).unwrap(),
            Value::Number(5.0)
        );
        assert!(distance.to_sql(&geometry_only).starts_with("SQRT("));
    }

    #[test]
    fn test_geometry_is_required() {
        let bare = DialectProfile::minimal("bare");
        let x = location().x();
        assert!(matches!(
            x.try_to_sql(&bare),
            Err(ExpressionError::UnsupportedByDialect { .. })
        ));
        assert_eq!(x.try_to_sql(&DialectProfile::ansi()).unwrap(), "ST_X(shop.location)");
        // Unchecked rendering still emits the native text
        assert_eq!(x.to_sql(&bare), "ST_X(shop.location)");
        assert!(PointExpression::from_coordinates(1.0, 2.0)
            .as_expr()
            .validate(&bare)
            .is_err());
    }

    #[test]
    fn test_coordinates() {
        let dialect = DialectProfile::ansi();
        let row = Row::new().with(TableRef::new("shop").column("location"), Point2D::new(-1.5, 2.0));
        assert_eq!(location().y().evaluate(&dialect, &row).unwrap(), Value::Number(2.0));
        assert!(location()
            .is(Point2D::new(-1.5, 2.0))
            .matches(&dialect, &row)
            .unwrap());
    }
}
