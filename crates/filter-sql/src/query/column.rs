//! Physical locations a filter identifier projects onto.

use std::fmt;

/// A table-qualified column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Column {
    pub table: &'static str,
    pub name: &'static str,
}

impl Column {
    pub const fn new(table: &'static str, name: &'static str) -> Self {
        Column { table, name }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.table, self.name)
    }
}

/// A path into a JSON document stored in `column`.
///
/// e.g. `payload` + `["property", "hasTaskList"]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct JsonPath {
    pub column: Column,
    pub path: &'static [&'static str],
}

impl JsonPath {
    pub const fn new(column: Column, path: &'static [&'static str]) -> Self {
        JsonPath { column, path }
    }

    /// The `$.a.b` form used by MySQL's JSON functions.
    pub fn dollar_path(&self) -> String {
        format!("$.{}", self.path.join("."))
    }
}
