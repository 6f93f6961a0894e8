//! Compiles filter expression trees into parameterized SQL `WHERE` fragments.
//!
//! A [`SqlFilterCompiler`] pairs an identifier [`Catalog`] with a [`Dialect`]
//! and turns an [`Expr`](filter_syntax::Expr) into a [`SqlFilter`]: the SQL
//! text plus the bind arguments in placeholder order.

pub mod config;
pub mod filter;
pub mod query;

pub use config::{ConfigError, FilterConfig};
pub use filter::{
    FilterCompiler,
    catalog::{Catalog, Entity},
    compiler::{SqlFilter, SqlFilterCompiler},
    error::{FilterError, Result},
};
pub use query::dialect::{Dialect, dialect_for};
