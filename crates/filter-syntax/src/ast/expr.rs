use crate::{
    ast::{literal::Literal, operator::Function},
    error::Result,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A filter expression node.
///
/// Operators, membership tests and method calls are all `Call`s keyed by
/// their function symbol; see [`Function`] for the known set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expr {
    Call(Call),
    Ident(String),
    List(Vec<Expr>),
    Const(Literal),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Call {
    pub function: String,
    /// Receiver of a method-style call such as `content.contains(...)`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<Box<Expr>>,
    #[serde(default)]
    pub args: Vec<Expr>,
}

impl Call {
    /// Resolves the call symbol against the known function table.
    pub fn resolve(&self) -> Result<Function> {
        Function::from_symbol(&self.function)
    }
}

impl Expr {
    /// Decodes an expression tree from its JSON form.
    pub fn from_json(source: &str) -> Result<Self> {
        Ok(serde_json::from_str(source)?)
    }

    pub fn as_ident(&self) -> Option<&str> {
        match self {
            Expr::Ident(name) => Some(name),
            _ => None,
        }
    }

    pub fn as_const(&self) -> Option<&Literal> {
        match self {
            Expr::Const(lit) => Some(lit),
            _ => None,
        }
    }

    pub fn as_call(&self) -> Option<&Call> {
        match self {
            Expr::Call(call) => Some(call),
            _ => None,
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Ident(name) => write!(f, "{name}"),
            Expr::Const(lit) => write!(f, "{lit}"),
            Expr::List(elements) => {
                write!(f, "[")?;
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{element}")?;
                }
                write!(f, "]")
            }
            Expr::Call(call) => write!(f, "{call}"),
        }
    }
}

impl fmt::Display for Call {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let function = match self.resolve() {
            Ok(function) => function,
            Err(_) => return write_plain_call(f, &self.function, self.target.as_deref(), &self.args),
        };

        match (function, self.args.as_slice()) {
            (Function::Not, [operand]) => write!(f, "!({operand})"),
            (Function::And | Function::Or | Function::Compare(_) | Function::In, [l, r]) => {
                write!(f, "({l} {function} {r})")
            }
            _ => write_plain_call(f, &self.function, self.target.as_deref(), &self.args),
        }
    }
}

fn write_plain_call(
    f: &mut fmt::Formatter<'_>,
    name: &str,
    target: Option<&Expr>,
    args: &[Expr],
) -> fmt::Result {
    if let Some(target) = target {
        write!(f, "{target}.")?;
    }
    write!(f, "{name}(")?;
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{arg}")?;
    }
    write!(f, ")")
}
