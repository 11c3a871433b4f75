//! Dialect validation for expression trees.
//!
//! Rendering never fails, so a tree that needs something the dialect cannot
//! express would silently produce SQL the engine rejects. Validation walks
//! the tree the same way the renderer does and reports such nodes up front.

use crate::dialect::{Capability, Dialect};
use crate::expression::{fallback, Expr, ExpressionError, ExpressionResult};
use crate::value::Value;

fn unsupported(dialect: &dyn Dialect, operator: &str, capability: Capability) -> ExpressionError {
    ExpressionError::UnsupportedByDialect {
        dialect: dialect.name().to_string(),
        operator: operator.to_string(),
        capability: capability.to_string(),
    }
}

/// Check that `dialect` can express every node of `expr`
pub fn validate(expr: &Expr, dialect: &dyn Dialect) -> ExpressionResult<()> {
    match expr {
        Expr::Literal(Value::Point(_)) if !dialect.supports(Capability::Geometry) => {
            Err(unsupported(dialect, "point literal", Capability::Geometry))
        }
        Expr::Literal(_) | Expr::Column(_) => Ok(()),
        Expr::Operation(node) => {
            let op = node.op();
            let operands = node.operands();

            if !op.arity().accepts(operands.len()) {
                return Err(ExpressionError::OperandCount {
                    operator: op.name().to_string(),
                    actual: operands.len(),
                });
            }

            if let Some(capability) = op.capability() {
                if !dialect.supports(capability) {
                    return match fallback::expand(op, operands) {
                        Some(alternative) => validate(&alternative, dialect),
                        None => Err(unsupported(dialect, op.name(), capability)),
                    };
                }
            }

            operands
                .iter()
                .try_for_each(|operand| validate(operand, dialect))
        }
    }
}
