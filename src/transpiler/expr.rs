//! Recursive-descent rendering, one arm per node kind.

use crate::ast::{BinaryOp, CompareOp, Expr, MethodKind, UnaryOp, Value};
use crate::dialect::SqlDialect;
use crate::error::{MintError, MintResult};
use crate::schema::{ColumnSet, ValueKind};

use super::methods;

pub(crate) struct Translator<'a> {
    pub(crate) dialect: &'a dyn SqlDialect,
    pub(crate) columns: &'a ColumnSet,
    params: Vec<(String, Value)>,
}

impl<'a> Translator<'a> {
    pub(crate) fn new(dialect: &'a dyn SqlDialect, columns: &'a ColumnSet) -> Self {
        Self {
            dialect,
            columns,
            params: Vec::new(),
        }
    }

    pub(crate) fn into_params(self) -> Vec<(String, Value)> {
        self.params
    }

    /// Render in value context.
    pub(crate) fn render(&mut self, expr: &Expr) -> MintResult<String> {
        match expr {
            Expr::Value(v) => Ok(self.render_value(v)),
            Expr::Column { name, .. } => Ok(self.quote_column(name)),
            Expr::Unary { op, expr } => self.render_unary(*op, expr),
            Expr::Binary { left, op, right } => self.render_binary(left, *op, right),
            Expr::Compare { left, op, right } => self.render_compare(left, *op, right),
            Expr::Logical { left, op, right } => {
                let l = self.render_predicate(left)?;
                let r = self.render_predicate(right)?;
                Ok(format!("({} {} {})", l, op, r))
            }
            Expr::Method { kind, target, args } => {
                methods::render_method(self, *kind, target, args)
            }
            Expr::Conditional {
                cond,
                then_expr,
                else_expr,
            } => {
                let c = self.render_predicate(cond)?;
                let t = self.render(then_expr)?;
                let e = self.render(else_expr)?;
                Ok(format!("CASE WHEN {} THEN {} ELSE {} END", c, t, e))
            }
            Expr::Coalesce { left, right } => {
                let l = self.render(left)?;
                let r = self.render(right)?;
                Ok(format!("COALESCE({}, {})", l, r))
            }
            Expr::Aggregate { func, arg } => match arg {
                Some(inner) => {
                    let inner = self.render(inner)?;
                    Ok(format!("{}({})", func, inner))
                }
                None if *func == crate::ast::AggregateFunc::Count => Ok("COUNT(*)".to_string()),
                None => Err(MintError::InvalidExpression(format!(
                    "{} requires an argument",
                    func
                ))),
            },
        }
    }

    /// Render in boolean context: a bare boolean column becomes an explicit
    /// `= 1` comparison instead of standing alone.
    pub(crate) fn render_predicate(&mut self, expr: &Expr) -> MintResult<String> {
        if let Some((name, declared)) = expr.as_column() {
            if self.column_kind(name, declared) == Some(ValueKind::Boolean) {
                return Ok(format!("{} = 1", self.quote_column(name)));
            }
        }
        self.render(expr)
    }

    fn render_value(&mut self, value: &Value) -> String {
        if let Value::Param(name) = value {
            let rendered = self.dialect.parameter(name);
            if !self.params.iter().any(|(n, _)| n == name) {
                self.params.push((name.clone(), Value::Null));
            }
            return rendered;
        }
        self.dialect.literal(value)
    }

    fn render_unary(&mut self, op: UnaryOp, inner: &Expr) -> MintResult<String> {
        match op {
            UnaryOp::Not => {
                // NOT over a bare boolean column flips to `= 0`.
                if let Some((name, declared)) = inner.as_column() {
                    if self.column_kind(name, declared) == Some(ValueKind::Boolean) {
                        return Ok(format!("{} = 0", self.quote_column(name)));
                    }
                }
                let sql = self.render_predicate(inner)?;
                Ok(format!("NOT ({})", sql))
            }
            UnaryOp::Neg => {
                let sql = self.render(inner)?;
                Ok(format!("-({})", sql))
            }
        }
    }

    fn render_binary(&mut self, left: &Expr, op: BinaryOp, right: &Expr) -> MintResult<String> {
        let l = self.render(left)?;
        let r = self.render(right)?;
        if op == BinaryOp::Add && (self.is_textual(left) || self.is_textual(right)) {
            return Ok(self.dialect.concat(&[l, r]));
        }
        Ok(format!("({} {} {})", l, op, r))
    }

    fn render_compare(&mut self, left: &Expr, op: CompareOp, right: &Expr) -> MintResult<String> {
        // NULL under =/<> rewrites to IS [NOT] NULL; a literal comparison
        // against NULL would never match anything.
        let (operand, null_side) = if right.is_null_value() {
            (left, true)
        } else if left.is_null_value() {
            (right, true)
        } else {
            (left, false)
        };
        if null_side && matches!(op, CompareOp::Eq | CompareOp::Ne) {
            let sql = self.render(operand)?;
            return Ok(match op {
                CompareOp::Eq => format!("{} IS NULL", sql),
                _ => format!("{} IS NOT NULL", sql),
            });
        }

        let l = self.render(left)?;
        let r = self.render(right)?;
        Ok(format!("{} {} {}", l, op, r))
    }

    /// Physical name when metadata is in scope; the declared name verbatim
    /// otherwise.
    pub(crate) fn quote_column(&self, logical: &str) -> String {
        self.dialect
            .quote_identifier(&self.columns.physical_of(logical))
    }

    fn column_kind(&self, logical: &str, declared: Option<ValueKind>) -> Option<ValueKind> {
        declared.or_else(|| self.columns.get(logical).map(|c| c.kind))
    }

    /// Whether an expression yields text, for routing `+` through the
    /// dialect's concatenation.
    pub(crate) fn is_textual(&self, expr: &Expr) -> bool {
        match expr {
            Expr::Value(Value::Str(_)) => true,
            Expr::Column { name, kind } => {
                self.column_kind(name, *kind) == Some(ValueKind::Text)
            }
            Expr::Binary {
                left,
                op: BinaryOp::Add,
                right,
            } => self.is_textual(left) || self.is_textual(right),
            Expr::Method { kind, .. } => matches!(
                kind,
                MethodKind::ToUpper
                    | MethodKind::ToLower
                    | MethodKind::Trim
                    | MethodKind::Substring
            ),
            Expr::Coalesce { left, right } => self.is_textual(left) || self.is_textual(right),
            Expr::Conditional {
                then_expr,
                else_expr,
                ..
            } => self.is_textual(then_expr) || self.is_textual(else_expr),
            _ => false,
        }
    }
}
