use crate::ast::{AggregateFunc, BinaryOp, CompareOp, LogicalOp, MethodKind, UnaryOp, Value};
use crate::schema::ValueKind;
use serde::{Deserialize, Serialize};

/// One node of a predicate/projection tree.
///
/// Column references carry logical names; physical (snake_case) conversion
/// happens during translation against the entity's column metadata.
#[derive(Debug, Clone, PartialEq, Hash, Serialize, Deserialize)]
pub enum Expr {
    /// Constant leaf.
    Value(Value),
    /// Column reference by logical name, with an optionally declared value
    /// kind. The kind drives boolean-context rewrites when no column
    /// metadata is in scope.
    Column {
        name: String,
        kind: Option<ValueKind>,
    },
    Unary {
        op: UnaryOp,
        expr: Box<Expr>,
    },
    /// Arithmetic (or string concatenation when both sides are textual).
    Binary {
        left: Box<Expr>,
        op: BinaryOp,
        right: Box<Expr>,
    },
    Compare {
        left: Box<Expr>,
        op: CompareOp,
        right: Box<Expr>,
    },
    Logical {
        left: Box<Expr>,
        op: LogicalOp,
        right: Box<Expr>,
    },
    /// Method-style call from the fixed dispatch table: `target.kind(args)`.
    Method {
        kind: MethodKind,
        target: Box<Expr>,
        args: Vec<Expr>,
    },
    /// Ternary: CASE WHEN cond THEN then_expr ELSE else_expr END.
    Conditional {
        cond: Box<Expr>,
        then_expr: Box<Expr>,
        else_expr: Box<Expr>,
    },
    /// Null coalescing: COALESCE(left, right).
    Coalesce {
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// Aggregate call; `None` argument means `*` (COUNT only).
    Aggregate {
        func: AggregateFunc,
        arg: Option<Box<Expr>>,
    },
}

impl Expr {
    /// True for a bare column reference (used for boolean-context rewrites).
    pub fn as_column(&self) -> Option<(&str, Option<ValueKind>)> {
        match self {
            Expr::Column { name, kind } => Some((name, *kind)),
            _ => None,
        }
    }

    pub fn is_null_value(&self) -> bool {
        matches!(self, Expr::Value(Value::Null))
    }
}

impl std::fmt::Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expr::Value(v) => write!(f, "{}", v),
            Expr::Column { name, .. } => write!(f, "{}", name),
            Expr::Unary { op, expr } => match op {
                UnaryOp::Not => write!(f, "NOT ({})", expr),
                UnaryOp::Neg => write!(f, "-({})", expr),
            },
            Expr::Binary { left, op, right } => write!(f, "({} {} {})", left, op, right),
            Expr::Compare { left, op, right } => write!(f, "{} {} {}", left, op, right),
            Expr::Logical { left, op, right } => write!(f, "({} {} {})", left, op, right),
            Expr::Method { kind, target, args } => {
                write!(f, "{}.{}(", target, kind)?;
                for (i, a) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", a)?;
                }
                write!(f, ")")
            }
            Expr::Conditional {
                cond,
                then_expr,
                else_expr,
            } => write!(
                f,
                "CASE WHEN {} THEN {} ELSE {} END",
                cond, then_expr, else_expr
            ),
            Expr::Coalesce { left, right } => write!(f, "COALESCE({}, {})", left, right),
            Expr::Aggregate { func, arg } => match arg {
                Some(a) => write!(f, "{}({})", func, a),
                None => write!(f, "{}(*)", func),
            },
        }
    }
}
