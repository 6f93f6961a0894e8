use filter_sql::{Entity, FilterCompiler, FilterError, SqlFilter, SqlFilterCompiler, dialect_for};
use filter_syntax::Expr;
use model::core::{dialect::SqlDialect, value::Value};

pub fn compile(dialect: SqlDialect, entity: Entity, expr: &Expr) -> Result<SqlFilter, FilterError> {
    SqlFilterCompiler::new(entity.catalog(), dialect_for(dialect)).compile(expr)
}

pub fn mysql(expr: &Expr) -> SqlFilter {
    compile(SqlDialect::MySql, Entity::Memo, expr).unwrap()
}

pub fn postgres(expr: &Expr) -> SqlFilter {
    compile(SqlDialect::Postgres, Entity::Memo, expr).unwrap()
}

/// Compiles against the memo catalog for both dialects and expects the
/// same error from each.
pub fn memo_error(expr: &Expr) -> FilterError {
    let mysql = compile(SqlDialect::MySql, Entity::Memo, expr).unwrap_err();
    let postgres = compile(SqlDialect::Postgres, Entity::Memo, expr).unwrap_err();
    assert_eq!(mysql, postgres);
    mysql
}

pub fn strings(values: &[&str]) -> Vec<Value> {
    values.iter().map(|v| Value::from(*v)).collect()
}
