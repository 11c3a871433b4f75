pub mod cli;
pub mod dialect;
pub mod expression;
pub mod value;
