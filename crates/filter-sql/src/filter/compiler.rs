use super::{
    FilterCompiler,
    catalog::{Catalog, Field, FieldKind, FieldType, Ops},
    error::{FilterError, Result},
};
use crate::query::{
    context::ConvertContext,
    dialect::{Dialect, Snippet},
};
use filter_syntax::{
    Call, CompareOp, Expr, Function, Literal,
    coerce::{like_pattern, timestamp_value},
};
use model::core::value::Value;
use tracing::{debug, warn};

/// A compiled `WHERE` fragment and its positional bind arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlFilter {
    pub sql: String,
    pub args: Vec<Value>,
    /// First placeholder index still free after this fragment.
    pub next_param_index: usize,
}

/// Compiles filter trees into SQL for one catalog and one dialect.
///
/// Holds only shared, immutable state; every call to `compile` builds a
/// fresh [`ConvertContext`], so one compiler can serve concurrent callers.
#[derive(Clone, Copy)]
pub struct SqlFilterCompiler<'a> {
    catalog: &'a Catalog,
    dialect: &'a dyn Dialect,
    start_index: usize,
}

impl<'a> SqlFilterCompiler<'a> {
    pub fn new(catalog: &'a Catalog, dialect: &'a dyn Dialect) -> Self {
        Self {
            catalog,
            dialect,
            start_index: 1,
        }
    }

    /// Numbers placeholders from `start_index`, for splicing after other
    /// numbered parameters.
    pub fn with_start_index(mut self, start_index: usize) -> Self {
        self.start_index = start_index.max(1);
        self
    }

    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    pub fn dialect(&self) -> &'a dyn Dialect {
        self.dialect
    }

    /// Appends the SQL for `expr` to `ctx`.
    ///
    /// Children are converted strictly left to right and each finishes its
    /// own placeholders before the next starts. On error `ctx` holds a
    /// partial fragment and must be discarded.
    pub fn convert(&self, expr: &Expr, ctx: &mut ConvertContext<'_>) -> Result<()> {
        match expr {
            Expr::Call(call) => self.convert_call(call, ctx),
            Expr::Ident(name) => self.convert_standalone(name, ctx),
            Expr::List(_) | Expr::Const(_) => Err(FilterError::InvalidOperand {
                function: "filter".into(),
                expected: "a predicate",
            }),
        }
    }

    fn convert_call(&self, call: &Call, ctx: &mut ConvertContext<'_>) -> Result<()> {
        let function = call
            .resolve()
            .map_err(|_| FilterError::UnsupportedFunction(call.function.clone()))?;

        match function {
            Function::And | Function::Or => {
                let [left, right] = operands(call, function)?;
                let joiner = if function == Function::And {
                    " AND "
                } else {
                    " OR "
                };

                ctx.push_str("(");
                self.convert(left, ctx)?;
                ctx.push_str(joiner);
                self.convert(right, ctx)?;
                ctx.push_str(")");
                Ok(())
            }
            Function::Not => {
                let [operand] = operands(call, function)?;
                ctx.push_str("NOT (");
                self.convert(operand, ctx)?;
                ctx.push_str(")");
                Ok(())
            }
            Function::Compare(op) => {
                let [left, right] = operands(call, function)?;
                self.convert_comparison(left, op, right, ctx)
            }
            Function::In => {
                let [element, collection] = operands(call, function)?;
                self.convert_in(element, collection, ctx)
            }
            Function::Contains => {
                let [target, needle] = operands(call, function)?;
                self.convert_contains(target, needle, ctx)
            }
            // size() only has meaning as the left side of a comparison
            Function::Size => Err(FilterError::InvalidOperand {
                function: function.to_string(),
                expected: "a comparison against an int",
            }),
        }
    }

    fn convert_comparison(
        &self,
        left: &Expr,
        op: CompareOp,
        right: &Expr,
        ctx: &mut ConvertContext<'_>,
    ) -> Result<()> {
        let name = match left {
            Expr::Ident(name) => name,
            Expr::Call(call) => {
                let function = call
                    .resolve()
                    .map_err(|_| FilterError::UnsupportedFunction(call.function.clone()))?;
                if function != Function::Size {
                    return Err(FilterError::InvalidOperand {
                        function: op.to_string(),
                        expected: "an identifier or size() on the left",
                    });
                }

                let [collection] = operands(call, function)?;
                return self.convert_size_comparison(collection, op, right, ctx);
            }
            _ => {
                return Err(FilterError::InvalidOperand {
                    function: op.to_string(),
                    expected: "an identifier or size() on the left",
                });
            }
        };

        let field = self.lookup(name)?;
        if !field.allows(Ops::from(op)) {
            return Err(FilterError::DisallowedOperator {
                identifier: name.clone(),
                operator: op.to_string(),
            });
        }

        let lit = expect_const(right, op.to_string())?;
        if let FieldKind::Timestamp = field.kind {
            let value = timestamp_value(lit)
                .map_err(|e| FilterError::InvalidTimestamp {
                    identifier: name.clone(),
                    reason: e.to_string(),
                })?
                .ok_or_else(|| type_mismatch(name, field.ty, lit))?;

            let projection = self.dialect.snippet(Snippet::TimestampField(&field.column));
            ctx.push_str(&format!("{projection} {} ", op.sql()));
            ctx.add_param(value);
            return Ok(());
        }

        check_type(name, field, lit)?;
        match field.kind {
            FieldKind::Text if op.is_equality() => {
                let like = self.dialect.snippet(Snippet::ContentLike(&field.column));
                if op == CompareOp::NotEqual {
                    ctx.push_str("NOT (");
                    ctx.push_template(&like, vec![like_pattern(lit)]);
                    ctx.push_str(")");
                } else {
                    ctx.push_template(&like, vec![like_pattern(lit)]);
                }
            }
            FieldKind::JsonBool(ref path) => {
                let template = self.dialect.snippet(Snippet::BooleanCompare(path, op));
                let value = match lit {
                    Literal::Bool(b) => self.dialect.bool_param(*b),
                    other => Value::from(other),
                };
                ctx.push_template(&template, vec![value]);
            }
            FieldKind::JsonList(_) => {
                return Err(FilterError::DisallowedOperator {
                    identifier: name.clone(),
                    operator: op.to_string(),
                });
            }
            FieldKind::Scalar | FieldKind::Text | FieldKind::BoolColumn | FieldKind::Timestamp => {
                let column = self.dialect.snippet(Snippet::Column(&field.column));
                ctx.push_str(&format!("{column} {} ", op.sql()));
                ctx.add_param(Value::from(lit));
            }
        }
        Ok(())
    }

    /// `size(tags) <op> int`
    fn convert_size_comparison(
        &self,
        collection: &Expr,
        op: CompareOp,
        right: &Expr,
        ctx: &mut ConvertContext<'_>,
    ) -> Result<()> {
        let name = collection.as_ident().ok_or_else(|| FilterError::InvalidOperand {
            function: Function::Size.to_string(),
            expected: "an identifier",
        })?;

        let field = self.lookup(name)?;
        let path = match field.kind {
            FieldKind::JsonList(ref path) if field.allows(Ops::SIZE) => path,
            _ => {
                return Err(FilterError::InvalidCollectionTarget {
                    function: Function::Size.to_string(),
                    identifier: name.to_string(),
                });
            }
        };

        let lit = expect_const(right, op.to_string())?;
        let Literal::Int(len) = lit else {
            return Err(FilterError::TypeMismatch {
                identifier: format!("size({name})"),
                expected: FieldType::Int.to_string(),
                actual: lit.type_name().to_string(),
            });
        };

        let length = self.dialect.snippet(Snippet::JsonArrayLength(path));
        ctx.push_str(&format!("{length} {} ", op.sql()));
        ctx.add_param(Value::Int(*len));
        Ok(())
    }

    fn convert_in(
        &self,
        element: &Expr,
        collection: &Expr,
        ctx: &mut ConvertContext<'_>,
    ) -> Result<()> {
        let function = Function::In.to_string();

        match (element, collection) {
            // identifier in [c1, c2, ...]
            (Expr::Ident(name), Expr::List(items)) => {
                let field = self.lookup(name)?;
                if !field.allows(Ops::IN) {
                    return Err(FilterError::InvalidCollectionTarget {
                        function,
                        identifier: name.clone(),
                    });
                }
                if items.is_empty() {
                    return Err(FilterError::InvalidOperand {
                        function,
                        expected: "a non-empty list",
                    });
                }

                let mut values = Vec::with_capacity(items.len());
                for item in items {
                    let lit = expect_const(item, function.clone())?;
                    check_type(name, field, lit)?;
                    values.push(Value::from(lit));
                }

                match field.kind {
                    FieldKind::JsonList(ref path) => {
                        let template = self.dialect.snippet(Snippet::JsonContainsTag(path));
                        let grouped = values.len() > 1;
                        if grouped {
                            ctx.push_str("(");
                        }
                        for (i, value) in values.into_iter().enumerate() {
                            if i > 0 {
                                ctx.push_str(" OR ");
                            }
                            ctx.push_template(&template, vec![value]);
                        }
                        if grouped {
                            ctx.push_str(")");
                        }
                    }
                    _ => {
                        let template = self.dialect.snippet(Snippet::ColumnIn(&field.column));
                        ctx.push_template(&template, values);
                    }
                }
                Ok(())
            }

            // constant in identifier
            (Expr::Const(lit), Expr::Ident(name)) => {
                let field = self.lookup(name)?;
                let path = match field.kind {
                    FieldKind::JsonList(ref path) if field.allows(Ops::ELEMENT_IN) => path,
                    _ => {
                        return Err(FilterError::InvalidCollectionTarget {
                            function,
                            identifier: name.clone(),
                        });
                    }
                };
                check_type(name, field, lit)?;

                let template = self.dialect.snippet(Snippet::JsonContainsElement(path));
                ctx.push_template(&template, vec![Value::from(lit)]);
                Ok(())
            }

            _ => Err(FilterError::InvalidOperand {
                function,
                expected: "`identifier in [list]` or `constant in identifier`",
            }),
        }
    }

    fn convert_contains(
        &self,
        target: &Expr,
        needle: &Expr,
        ctx: &mut ConvertContext<'_>,
    ) -> Result<()> {
        let function = Function::Contains.to_string();
        let name = target.as_ident().ok_or_else(|| FilterError::InvalidOperand {
            function: function.clone(),
            expected: "an identifier as target",
        })?;

        let field = self.lookup(name)?;
        if !field.allows(Ops::CONTAINS) {
            return Err(FilterError::DisallowedOperator {
                identifier: name.to_string(),
                operator: function,
            });
        }

        let lit = expect_const(needle, function)?;
        check_type(name, field, lit)?;

        let template = self.dialect.snippet(Snippet::ContentLike(&field.column));
        ctx.push_template(&template, vec![like_pattern(lit)]);
        Ok(())
    }

    /// A bare identifier used as a boolean predicate.
    fn convert_standalone(&self, name: &str, ctx: &mut ConvertContext<'_>) -> Result<()> {
        let field = self.lookup(name)?;
        let template = match field.kind {
            FieldKind::BoolColumn if field.allows(Ops::STANDALONE) => {
                self.dialect.snippet(Snippet::BoolColumnCheck(&field.column))
            }
            FieldKind::JsonBool(ref path) if field.allows(Ops::STANDALONE) => {
                self.dialect.snippet(Snippet::BooleanCheck(path))
            }
            _ => {
                return Err(FilterError::DisallowedOperator {
                    identifier: name.to_string(),
                    operator: "standalone predicate".into(),
                });
            }
        };

        ctx.push_template(&template, Vec::new());
        Ok(())
    }

    fn lookup(&self, name: &str) -> Result<&'a Field> {
        self.catalog
            .lookup(name)
            .ok_or_else(|| FilterError::UnknownIdentifier(name.to_string()))
    }
}

impl FilterCompiler for SqlFilterCompiler<'_> {
    type Filter = SqlFilter;

    fn compile(&self, expr: &Expr) -> Result<Self::Filter> {
        let mut ctx = ConvertContext::with_start_index(self.dialect, self.start_index);

        if let Err(err) = self.convert(expr, &mut ctx) {
            warn!(
                "Rejected {} filter `{}`: {}",
                self.catalog.entity(),
                expr,
                err
            );
            return Err(err);
        }

        let next_param_index = ctx.next_param_index();
        let (sql, args) = ctx.finish();
        debug!(
            "Compiled {} filter for {}: {} ({} args)",
            self.catalog.entity(),
            self.dialect.name(),
            sql,
            args.len()
        );

        Ok(SqlFilter {
            sql,
            args,
            next_param_index,
        })
    }
}

/// Splits a call into exactly `N` operands, a method receiver counting as
/// the first one.
///
/// Arity errors count only the written arguments, so `content.contains()`
/// expects 1 and got 0.
fn operands<const N: usize>(call: &Call, function: Function) -> Result<[&Expr; N]> {
    let receiver = usize::from(call.target.is_some());
    let operands: Vec<&Expr> = call
        .target
        .as_deref()
        .into_iter()
        .chain(call.args.iter())
        .collect();

    <[&Expr; N]>::try_from(operands).map_err(|_| FilterError::ArityMismatch {
        function: function.to_string(),
        expected: N.saturating_sub(receiver),
        actual: call.args.len(),
    })
}

fn expect_const(expr: &Expr, function: String) -> Result<&Literal> {
    expr.as_const().ok_or(FilterError::InvalidOperand {
        function,
        expected: "a constant",
    })
}

fn check_type(name: &str, field: &Field, lit: &Literal) -> Result<()> {
    if field.ty.accepts(lit) {
        Ok(())
    } else {
        Err(type_mismatch(name, field.ty, lit))
    }
}

fn type_mismatch(name: &str, expected: FieldType, lit: &Literal) -> FilterError {
    FilterError::TypeMismatch {
        identifier: name.to_string(),
        expected: expected.to_string(),
        actual: lit.type_name().to_string(),
    }
}
