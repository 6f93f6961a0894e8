//! Defines the `Dialect` trait for database-specific filter SQL.

use crate::query::column::{Column, JsonPath};
use filter_syntax::CompareOp;
use model::core::{dialect::SqlDialect, value::Value};

/// Named SQL fragments the filter compiler stitches together.
///
/// A rendered snippet contains at most one `?` hole. The compiler replaces
/// the hole with the dialect's real placeholder token(s) while binding the
/// matching values, so hole and argument are always emitted together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Snippet<'a> {
    /// Quoted table name used to qualify columns.
    TablePrefix(&'a str),
    /// A table-qualified column reference.
    Column(&'a Column),
    /// A timestamp column projected to Unix epoch seconds.
    TimestampField(&'a Column),
    /// Substring match on a text column; one hole.
    ContentLike(&'a Column),
    /// Set membership on a column; the hole expands to a placeholder list.
    ColumnIn(&'a Column),
    /// A boolean column used as a standalone predicate.
    BoolColumnCheck(&'a Column),
    /// A JSON boolean used as a standalone predicate.
    BooleanCheck(&'a JsonPath),
    /// A JSON boolean compared against a bound value; one hole.
    BooleanCompare(&'a JsonPath, CompareOp),
    /// A JSON array holds the bound tag; one hole.
    JsonContainsTag(&'a JsonPath),
    /// A JSON array holds the bound element; one hole.
    JsonContainsElement(&'a JsonPath),
    /// Length of a JSON array, missing arrays counting as empty.
    JsonArrayLength(&'a JsonPath),
}

pub trait Dialect: Send + Sync {
    /// Which backend this descriptor renders for.
    fn kind(&self) -> SqlDialect;

    /// Returns the name of the dialect (e.g., "PostgreSQL", "MySQL").
    fn name(&self) -> String {
        self.kind().to_string()
    }

    /// Returns the placeholder for the parameter at the 1-based `index`.
    ///
    /// - PostgreSQL uses `$1`, `$2`, etc.
    /// - MySQL uses `?`
    fn get_placeholder(&self, index: usize) -> String;

    /// Renders a named snippet as a template with at most one `?` hole.
    fn snippet(&self, snippet: Snippet<'_>) -> String;

    /// The value bound when a boolean is compared against a JSON boolean.
    fn bool_param(&self, value: bool) -> Value;
}

/// Returns the shared descriptor for `kind`.
pub fn dialect_for(kind: SqlDialect) -> &'static dyn Dialect {
    match kind {
        SqlDialect::MySql => &MySql,
        SqlDialect::Postgres => &Postgres,
    }
}

#[derive(Debug, Clone)]
pub struct Postgres;

impl Postgres {
    fn column(col: &Column) -> String {
        format!("{}.{}", col.table, col.name)
    }

    /// `memo.payload->'a'->'b'`, keeping the JSON type.
    fn json(path: &JsonPath) -> String {
        let mut out = Self::column(&path.column);
        for key in path.path {
            out.push_str(&format!("->'{key}'"));
        }
        out
    }

    /// `memo.payload->'a'->>'b'`, extracting the last key as text.
    fn json_text(path: &JsonPath) -> String {
        let mut out = Self::column(&path.column);
        let last = path.path.len().saturating_sub(1);
        for (i, key) in path.path.iter().enumerate() {
            let arrow = if i == last { "->>" } else { "->" };
            out.push_str(&format!("{arrow}'{key}'"));
        }
        out
    }
}

impl Dialect for Postgres {
    fn kind(&self) -> SqlDialect {
        SqlDialect::Postgres
    }

    fn get_placeholder(&self, index: usize) -> String {
        format!("${index}")
    }

    fn snippet(&self, snippet: Snippet<'_>) -> String {
        match snippet {
            Snippet::TablePrefix(table) => table.to_string(),
            // Timestamps are stored as epoch BIGINTs already.
            Snippet::Column(col) | Snippet::TimestampField(col) => Self::column(col),
            Snippet::ContentLike(col) => format!("{} ILIKE ?", Self::column(col)),
            Snippet::ColumnIn(col) => format!("{} IN (?)", Self::column(col)),
            Snippet::BoolColumnCheck(col) => format!("{} IS TRUE", Self::column(col)),
            Snippet::BooleanCheck(path) => {
                format!("({})::boolean IS TRUE", Self::json_text(path))
            }
            Snippet::BooleanCompare(path, op) => {
                format!("({})::boolean {} ?", Self::json_text(path), op.sql())
            }
            Snippet::JsonContainsTag(path) | Snippet::JsonContainsElement(path) => {
                format!("{} @> jsonb_build_array(?)", Self::json(path))
            }
            Snippet::JsonArrayLength(path) => {
                format!("jsonb_array_length(COALESCE({}, '[]'::jsonb))", Self::json(path))
            }
        }
    }

    fn bool_param(&self, value: bool) -> Value {
        Value::Boolean(value)
    }
}

#[derive(Debug, Clone)]
pub struct MySql;

impl MySql {
    fn quote_identifier(ident: &str) -> String {
        format!(r#"`{ident}`"#)
    }

    fn column(col: &Column) -> String {
        format!(
            "{}.{}",
            Self::quote_identifier(col.table),
            Self::quote_identifier(col.name)
        )
    }

    fn json_extract(path: &JsonPath) -> String {
        format!(
            "JSON_EXTRACT({}, '{}')",
            Self::column(&path.column),
            path.dollar_path()
        )
    }
}

impl Dialect for MySql {
    fn kind(&self) -> SqlDialect {
        SqlDialect::MySql
    }

    fn get_placeholder(&self, _index: usize) -> String {
        // MySQL binds by occurrence order
        "?".into()
    }

    fn snippet(&self, snippet: Snippet<'_>) -> String {
        match snippet {
            Snippet::TablePrefix(table) => Self::quote_identifier(table),
            Snippet::Column(col) => Self::column(col),
            // DATETIME columns need converting before comparing with epoch seconds.
            Snippet::TimestampField(col) => format!("UNIX_TIMESTAMP({})", Self::column(col)),
            Snippet::ContentLike(col) => format!("{} LIKE ?", Self::column(col)),
            Snippet::ColumnIn(col) => format!("{} IN (?)", Self::column(col)),
            Snippet::BoolColumnCheck(col) => format!("{} IS TRUE", Self::column(col)),
            Snippet::BooleanCheck(path) => {
                format!("{} = CAST('true' AS JSON)", Self::json_extract(path))
            }
            Snippet::BooleanCompare(path, op) => {
                format!("{} {} CAST(? AS JSON)", Self::json_extract(path), op.sql())
            }
            Snippet::JsonContainsTag(path) | Snippet::JsonContainsElement(path) => {
                format!("JSON_CONTAINS({}, ?)", Self::json_extract(path))
            }
            Snippet::JsonArrayLength(path) => format!(
                "JSON_LENGTH(COALESCE({}, JSON_ARRAY()))",
                Self::json_extract(path)
            ),
        }
    }

    fn bool_param(&self, value: bool) -> Value {
        // CAST(? AS JSON) wants the JSON text, not a driver boolean.
        Value::String(value.to_string())
    }
}
