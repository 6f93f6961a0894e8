//! Shorthand constructors for building filter trees by hand.
//!
//! Calls are emitted with the parser's mangled symbols so hand-built trees
//! look exactly like parsed ones.

use crate::ast::{
    expr::{Call, Expr},
    literal::Literal,
    operator::{CompareOp, Function},
};

pub fn ident(name: &str) -> Expr {
    Expr::Ident(name.to_string())
}

pub fn string(value: &str) -> Expr {
    Expr::Const(Literal::String(value.to_string()))
}

pub fn int(value: i64) -> Expr {
    Expr::Const(Literal::Int(value))
}

pub fn boolean(value: bool) -> Expr {
    Expr::Const(Literal::Bool(value))
}

pub fn list(elements: Vec<Expr>) -> Expr {
    Expr::List(elements)
}

pub fn call(function: Function, args: Vec<Expr>) -> Expr {
    Expr::Call(Call {
        function: function.symbol().to_string(),
        target: None,
        args,
    })
}

pub fn method(target: Expr, function: Function, args: Vec<Expr>) -> Expr {
    Expr::Call(Call {
        function: function.symbol().to_string(),
        target: Some(Box::new(target)),
        args,
    })
}

pub fn and(left: Expr, right: Expr) -> Expr {
    call(Function::And, vec![left, right])
}

pub fn or(left: Expr, right: Expr) -> Expr {
    call(Function::Or, vec![left, right])
}

pub fn not(operand: Expr) -> Expr {
    call(Function::Not, vec![operand])
}

pub fn compare(left: Expr, op: CompareOp, right: Expr) -> Expr {
    call(Function::Compare(op), vec![left, right])
}

pub fn eq(left: Expr, right: Expr) -> Expr {
    compare(left, CompareOp::Equal, right)
}

pub fn is_in(element: Expr, collection: Expr) -> Expr {
    call(Function::In, vec![element, collection])
}

pub fn contains(target: Expr, needle: Expr) -> Expr {
    method(target, Function::Contains, vec![needle])
}

pub fn size(collection: Expr) -> Expr {
    call(Function::Size, vec![collection])
}
