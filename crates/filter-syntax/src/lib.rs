//! Typed AST for memo and attachment filter expressions.
//!
//! The tree is produced by an external parser and consumed read-only by the
//! SQL compiler. Besides the node types this crate owns the function-symbol
//! table and the coercion of literal constants into bind values.

pub mod ast;
pub mod builder;
pub mod coerce;
pub mod error;

pub use ast::{
    expr::{Call, Expr},
    literal::Literal,
    operator::{CompareOp, Function},
};
pub use error::{Result, SyntaxError};
