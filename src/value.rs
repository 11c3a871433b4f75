//! Value leaves: the terminal nodes of every expression tree.
//!
//! This module provides the sources an expression tree is built from:
//!
//! - **Value**: a typed literal (or an absent one, the database NULL)
//! - **TableRef / ColumnRef**: opaque references to a table and one of its columns
//! - **DateRepeat**: the structural difference between two dates
//! - **Point2D**: a planar point used by the geometry algebra
//!
//! Column leaves contribute their table to an expression's table-dependency
//! set; literals contribute nothing.

pub mod column;
pub mod date_repeat;
pub mod literal;
pub mod point;

pub use column::{ColumnRef, TableRef};
pub use date_repeat::DateRepeat;
pub use literal::{DataType, Value};
pub use point::Point2D;
