//! Error types for expression construction, validation and evaluation.

use crate::value::DataType;
use thiserror::Error;

/// Errors that can occur while building, checking or evaluating expressions
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExpressionError {
    /// A seek comparison needs at least one column/value pair
    #[error("Seek comparison requires at least one column/value pair")]
    EmptySeek,

    /// An argument was rejected when the expression was built
    #[error("Invalid argument to {operation}: {reason}")]
    InvalidArgument { operation: String, reason: String },

    /// Operand count does not match the operator
    #[error("Operator {operator} does not accept {actual} operands")]
    OperandCount { operator: String, actual: usize },

    /// The dialect neither supports the operator nor admits a fallback
    #[error("Dialect {dialect} cannot express operator {operator} (missing capability {capability})")]
    UnsupportedByDialect {
        dialect: String,
        operator: String,
        capability: String,
    },

    /// Column has no value in the row being evaluated
    #[error("Column {column} is not bound in the evaluation row")]
    ColumnNotBound { column: String },

    /// Invalid operand types for operator
    #[error("Invalid operand types for operator {operator}: {actual:?}")]
    InvalidOperandTypes {
        operator: String,
        actual: Vec<Option<DataType>>,
    },

    /// Integer division by zero
    #[error("Division by zero")]
    DivisionByZero,

    /// Aggregates summarise many rows and cannot be evaluated against one
    #[error("Aggregate {operator} cannot be evaluated against a single row")]
    AggregateInRowContext { operator: String },

    #[error("Invalid date repeat: '{text}'")]
    InvalidDateRepeat { text: String },

    /// Generic evaluation error
    #[error("Expression evaluation error: {message}")]
    EvaluationError { message: String },

    /// Dialect profile could not be parsed
    #[error("Invalid dialect profile: {message}")]
    Profile { message: String },

    #[error("IO error reading {path}: {message}")]
    Io { path: String, message: String },
}

/// Result type for expression operations
pub type ExpressionResult<T> = Result<T, ExpressionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            ExpressionError::EmptySeek.to_string(),
            "Seek comparison requires at least one column/value pair"
        );

        let err = ExpressionError::UnsupportedByDialect {
            dialect: "bare".to_string(),
            operator: "point-x".to_string(),
            capability: "geometry".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Dialect bare cannot express operator point-x (missing capability geometry)"
        );

        let err = ExpressionError::InvalidOperandTypes {
            operator: "plus".to_string(),
            actual: vec![Some(DataType::Integer), Some(DataType::String)],
        };
        assert_eq!(
            err.to_string(),
            "Invalid operand types for operator plus: [Some(Integer), Some(String)]"
        );

        let err = ExpressionError::OperandCount {
            operator: "not".to_string(),
            actual: 2,
        };
        assert_eq!(err.to_string(), "Operator not does not accept 2 operands");

        assert_eq!(ExpressionError::DivisionByZero.to_string(), "Division by zero");

        let err = ExpressionError::InvalidDateRepeat {
            text: "P1Y".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid date repeat: 'P1Y'");
    }
}
