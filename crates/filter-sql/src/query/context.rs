//! Accumulator for the SQL text and bind arguments of one compile.

use crate::query::dialect::Dialect;
use model::core::value::Value;

/// Holds the state of a single filter compilation.
///
/// The Nth placeholder written into `sql` always binds `args[N-1]`: the only
/// way to emit a placeholder is [`ConvertContext::add_param`], which pushes
/// the value and its token in one step. Numbered dialects derive each
/// token's index from the number of values bound so far.
pub struct ConvertContext<'a> {
    pub sql: String,
    pub args: Vec<Value>,
    pub dialect: &'a dyn Dialect,
    start_index: usize,
}

impl<'a> ConvertContext<'a> {
    pub fn new(dialect: &'a dyn Dialect) -> Self {
        Self::with_start_index(dialect, 1)
    }

    /// Starts numbering placeholders at `start_index` (1-based).
    pub fn with_start_index(dialect: &'a dyn Dialect, start_index: usize) -> Self {
        Self {
            sql: String::new(),
            args: Vec::new(),
            dialect,
            start_index: start_index.max(1),
        }
    }

    /// Consumes the context and returns the final SQL string and parameters.
    pub fn finish(self) -> (String, Vec<Value>) {
        (self.sql, self.args)
    }

    /// Index the next bound parameter will receive.
    pub fn next_param_index(&self) -> usize {
        self.start_index + self.args.len()
    }

    pub fn push_str(&mut self, s: &str) {
        self.sql.push_str(s);
    }

    pub fn add_param(&mut self, value: Value) {
        let placeholder = self.dialect.get_placeholder(self.next_param_index());
        self.args.push(value);
        self.sql.push_str(&placeholder);
    }

    /// Writes a snippet template, binding `values` at its `?` hole.
    ///
    /// Several values expand the hole into a comma separated placeholder
    /// list. A template without a hole is written verbatim and binds nothing.
    pub fn push_template(&mut self, template: &str, values: Vec<Value>) {
        let Some((head, tail)) = template.split_once('?') else {
            debug_assert!(values.is_empty(), "template `{template}` has no hole");
            self.sql.push_str(template);
            return;
        };

        self.sql.push_str(head);
        for (i, value) in values.into_iter().enumerate() {
            if i > 0 {
                self.sql.push(',');
            }
            self.add_param(value);
        }
        self.sql.push_str(tail);
    }
}
