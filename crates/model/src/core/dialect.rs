use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

/// The SQL backends a filter can be compiled for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SqlDialect {
    MySql,
    Postgres,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unsupported SQL dialect: {0}")]
pub struct UnknownDialect(pub String);

impl FromStr for SqlDialect {
    type Err = UnknownDialect;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mysql" => Ok(SqlDialect::MySql),
            "postgres" | "postgresql" | "pg" => Ok(SqlDialect::Postgres),
            other => Err(UnknownDialect(other.to_string())),
        }
    }
}

impl fmt::Display for SqlDialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlDialect::MySql => write!(f, "MySQL"),
            SqlDialect::Postgres => write!(f, "PostgreSQL"),
        }
    }
}
