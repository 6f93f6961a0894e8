use filter_syntax::Expr;

pub mod catalog;
pub mod compiler;
pub mod error;

/// A trait for compiling filter expressions into a specific format.
pub trait FilterCompiler {
    /// The type of filter that this compiler produces.
    type Filter;

    /// Compile the AST into a filter.
    fn compile(&self, expr: &Expr) -> error::Result<Self::Filter>;
}
