//! Dialect Capability Protocol.
//!
//! Every render call is parameterised by a [`Dialect`]. The expression core
//! never writes SQL syntax itself: it asks the dialect for operator text and
//! literal text, and asks [`Dialect::supports`] before rendering any operator
//! that some engines lack. When a capability is missing the core substitutes
//! an equivalent formula built from more primitive operators.
//!
//! The default method bodies produce ANSI-flavoured SQL (see [`ansi`]), so a
//! concrete dialect only overrides what differs.

pub mod ansi;
pub mod capability;
pub mod profile;

pub use capability::Capability;
pub use profile::{ConcatStyle, DialectProfile, LiteralOverrides};

use crate::expression::Op;
use crate::value::{ColumnRef, Value};
use std::fmt;

/// A SQL dialect, as seen by the expression renderer
pub trait Dialect: fmt::Debug + Send + Sync {
    /// Name used in logs and error messages
    fn name(&self) -> &str;

    /// Whether the dialect renders an operator needing `capability` natively
    fn supports(&self, capability: Capability) -> bool;

    fn true_literal(&self) -> String {
        "TRUE".to_string()
    }

    fn false_literal(&self) -> String {
        "FALSE".to_string()
    }

    fn null_literal(&self) -> String {
        "NULL".to_string()
    }

    /// Render a literal value
    fn render_value(&self, value: &Value) -> String {
        match value {
            Value::Null => self.null_literal(),
            Value::Boolean(true) => self.true_literal(),
            Value::Boolean(false) => self.false_literal(),
            other => ansi::render_value(other),
        }
    }

    /// Render a qualified column reference
    fn render_column(&self, column: &ColumnRef) -> String {
        ansi::render_column(column)
    }

    /// Render an operator applied to already-rendered operands
    fn render_operator(&self, op: &Op, operands: &[String]) -> String {
        ansi::render_operator(op, operands)
    }
}
