use crate::error::{Result, SyntaxError};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompareOp {
    Equal,
    NotEqual,
    LessThan,
    GreaterThan,
    LessOrEqual,
    GreaterOrEqual,
}

impl CompareOp {
    pub const ALL: [CompareOp; 6] = [
        CompareOp::Equal,
        CompareOp::NotEqual,
        CompareOp::LessThan,
        CompareOp::GreaterThan,
        CompareOp::LessOrEqual,
        CompareOp::GreaterOrEqual,
    ];

    /// The SQL token for this comparison.
    pub fn sql(&self) -> &'static str {
        match self {
            CompareOp::Equal => "=",
            CompareOp::NotEqual => "!=",
            CompareOp::LessThan => "<",
            CompareOp::GreaterThan => ">",
            CompareOp::LessOrEqual => "<=",
            CompareOp::GreaterOrEqual => ">=",
        }
    }

    pub fn is_equality(&self) -> bool {
        matches!(self, CompareOp::Equal | CompareOp::NotEqual)
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompareOp::Equal => write!(f, "=="),
            CompareOp::NotEqual => write!(f, "!="),
            CompareOp::LessThan => write!(f, "<"),
            CompareOp::GreaterThan => write!(f, ">"),
            CompareOp::LessOrEqual => write!(f, "<="),
            CompareOp::GreaterOrEqual => write!(f, ">="),
        }
    }
}

/// Every call symbol the filter language knows.
///
/// Symbols arrive either in the parser's mangled spelling (`_&&_`, `!_`,
/// `@in`) or in their plain form (`&&`, `!`, `in`); both map to the same
/// variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Function {
    And,
    Or,
    Not,
    Compare(CompareOp),
    In,
    Contains,
    Size,
}

impl Function {
    pub fn from_symbol(symbol: &str) -> Result<Self> {
        let function = match symbol {
            "_&&_" | "&&" => Function::And,
            "_||_" | "||" => Function::Or,
            "!_" | "!" => Function::Not,
            "_==_" | "==" => Function::Compare(CompareOp::Equal),
            "_!=_" | "!=" => Function::Compare(CompareOp::NotEqual),
            "_<_" | "<" => Function::Compare(CompareOp::LessThan),
            "_>_" | ">" => Function::Compare(CompareOp::GreaterThan),
            "_<=_" | "<=" => Function::Compare(CompareOp::LessOrEqual),
            "_>=_" | ">=" => Function::Compare(CompareOp::GreaterOrEqual),
            "@in" | "in" => Function::In,
            "contains" => Function::Contains,
            "size" => Function::Size,
            other => return Err(SyntaxError::UnknownFunction(other.to_string())),
        };
        Ok(function)
    }

    /// The mangled symbol the parser emits for this function.
    pub fn symbol(&self) -> &'static str {
        match self {
            Function::And => "_&&_",
            Function::Or => "_||_",
            Function::Not => "!_",
            Function::Compare(CompareOp::Equal) => "_==_",
            Function::Compare(CompareOp::NotEqual) => "_!=_",
            Function::Compare(CompareOp::LessThan) => "_<_",
            Function::Compare(CompareOp::GreaterThan) => "_>_",
            Function::Compare(CompareOp::LessOrEqual) => "_<=_",
            Function::Compare(CompareOp::GreaterOrEqual) => "_>=_",
            Function::In => "@in",
            Function::Contains => "contains",
            Function::Size => "size",
        }
    }
}

impl FromStr for Function {
    type Err = SyntaxError;

    fn from_str(s: &str) -> Result<Self> {
        Function::from_symbol(s)
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Function::And => write!(f, "&&"),
            Function::Or => write!(f, "||"),
            Function::Not => write!(f, "!"),
            Function::Compare(op) => write!(f, "{op}"),
            Function::In => write!(f, "in"),
            Function::Contains => write!(f, "contains"),
            Function::Size => write!(f, "size"),
        }
    }
}
