//! Fluent constructors for expression trees.
//!
//! ```
//! use sqlmint::ast::col;
//!
//! let predicate = col("Age").gt(18).and(col("IsActive"));
//! let projection = col("Salary").mul(1.2).round_to(2).sum();
//! let _ = (predicate, projection);
//! ```

use crate::ast::{
    AggregateFunc, BinaryOp, CompareOp, Expr, LogicalOp, MethodKind, UnaryOp, Value,
};
use crate::schema::ValueKind;

/// Column reference by logical name.
pub fn col(name: impl Into<String>) -> Expr {
    Expr::Column {
        name: name.into(),
        kind: None,
    }
}

/// Column reference with a declared value kind.
pub fn typed_col(name: impl Into<String>, kind: ValueKind) -> Expr {
    Expr::Column {
        name: name.into(),
        kind: Some(kind),
    }
}

/// Boolean column reference; rewrites to `= 1` / `= 0` in boolean context.
pub fn bool_col(name: impl Into<String>) -> Expr {
    typed_col(name, ValueKind::Boolean)
}

/// Constant leaf.
pub fn val(v: impl Into<Value>) -> Expr {
    Expr::Value(v.into())
}

/// Named parameter hole (`@name`, `$name`, ... per dialect).
pub fn param(name: impl Into<String>) -> Expr {
    Expr::Value(Value::Param(name.into()))
}

/// `CASE WHEN cond THEN then_expr ELSE else_expr END`.
pub fn case_when(cond: Expr, then_expr: Expr, else_expr: Expr) -> Expr {
    Expr::Conditional {
        cond: Box::new(cond),
        then_expr: Box::new(then_expr),
        else_expr: Box::new(else_expr),
    }
}

/// `COUNT(*)`.
pub fn count_all() -> Expr {
    Expr::Aggregate {
        func: AggregateFunc::Count,
        arg: None,
    }
}

impl Expr {
    fn compare(self, op: CompareOp, right: Expr) -> Expr {
        Expr::Compare {
            left: Box::new(self),
            op,
            right: Box::new(right),
        }
    }

    fn binary(self, op: BinaryOp, right: Expr) -> Expr {
        Expr::Binary {
            left: Box::new(self),
            op,
            right: Box::new(right),
        }
    }

    fn method(self, kind: MethodKind, args: Vec<Expr>) -> Expr {
        Expr::Method {
            kind,
            target: Box::new(self),
            args,
        }
    }

    fn aggregate(self, func: AggregateFunc) -> Expr {
        Expr::Aggregate {
            func,
            arg: Some(Box::new(self)),
        }
    }

    // -- comparisons -------------------------------------------------------

    pub fn eq(self, v: impl Into<Value>) -> Expr {
        self.compare(CompareOp::Eq, Expr::Value(v.into()))
    }

    pub fn ne(self, v: impl Into<Value>) -> Expr {
        self.compare(CompareOp::Ne, Expr::Value(v.into()))
    }

    pub fn gt(self, v: impl Into<Value>) -> Expr {
        self.compare(CompareOp::Gt, Expr::Value(v.into()))
    }

    pub fn gte(self, v: impl Into<Value>) -> Expr {
        self.compare(CompareOp::Gte, Expr::Value(v.into()))
    }

    pub fn lt(self, v: impl Into<Value>) -> Expr {
        self.compare(CompareOp::Lt, Expr::Value(v.into()))
    }

    pub fn lte(self, v: impl Into<Value>) -> Expr {
        self.compare(CompareOp::Lte, Expr::Value(v.into()))
    }

    /// Compare against another expression instead of a constant.
    pub fn eq_expr(self, e: Expr) -> Expr {
        self.compare(CompareOp::Eq, e)
    }

    pub fn ne_expr(self, e: Expr) -> Expr {
        self.compare(CompareOp::Ne, e)
    }

    pub fn gt_expr(self, e: Expr) -> Expr {
        self.compare(CompareOp::Gt, e)
    }

    pub fn lt_expr(self, e: Expr) -> Expr {
        self.compare(CompareOp::Lt, e)
    }

    pub fn is_null(self) -> Expr {
        self.compare(CompareOp::Eq, Expr::Value(Value::Null))
    }

    pub fn is_not_null(self) -> Expr {
        self.compare(CompareOp::Ne, Expr::Value(Value::Null))
    }

    // -- boolean logic -----------------------------------------------------

    pub fn and(self, right: Expr) -> Expr {
        Expr::Logical {
            left: Box::new(self),
            op: LogicalOp::And,
            right: Box::new(right),
        }
    }

    pub fn or(self, right: Expr) -> Expr {
        Expr::Logical {
            left: Box::new(self),
            op: LogicalOp::Or,
            right: Box::new(right),
        }
    }

    pub fn not(self) -> Expr {
        Expr::Unary {
            op: UnaryOp::Not,
            expr: Box::new(self),
        }
    }

    pub fn neg(self) -> Expr {
        Expr::Unary {
            op: UnaryOp::Neg,
            expr: Box::new(self),
        }
    }

    // -- arithmetic --------------------------------------------------------

    pub fn add(self, v: impl Into<Value>) -> Expr {
        self.binary(BinaryOp::Add, Expr::Value(v.into()))
    }

    pub fn sub(self, v: impl Into<Value>) -> Expr {
        self.binary(BinaryOp::Sub, Expr::Value(v.into()))
    }

    pub fn mul(self, v: impl Into<Value>) -> Expr {
        self.binary(BinaryOp::Mul, Expr::Value(v.into()))
    }

    pub fn div(self, v: impl Into<Value>) -> Expr {
        self.binary(BinaryOp::Div, Expr::Value(v.into()))
    }

    pub fn rem(self, v: impl Into<Value>) -> Expr {
        self.binary(BinaryOp::Rem, Expr::Value(v.into()))
    }

    pub fn add_expr(self, e: Expr) -> Expr {
        self.binary(BinaryOp::Add, e)
    }

    pub fn sub_expr(self, e: Expr) -> Expr {
        self.binary(BinaryOp::Sub, e)
    }

    pub fn mul_expr(self, e: Expr) -> Expr {
        self.binary(BinaryOp::Mul, e)
    }

    pub fn div_expr(self, e: Expr) -> Expr {
        self.binary(BinaryOp::Div, e)
    }

    // -- string methods ----------------------------------------------------

    pub fn contains(self, pattern: impl Into<Value>) -> Expr {
        self.method(MethodKind::Contains, vec![Expr::Value(pattern.into())])
    }

    pub fn starts_with(self, pattern: impl Into<Value>) -> Expr {
        self.method(MethodKind::StartsWith, vec![Expr::Value(pattern.into())])
    }

    pub fn ends_with(self, pattern: impl Into<Value>) -> Expr {
        self.method(MethodKind::EndsWith, vec![Expr::Value(pattern.into())])
    }

    pub fn to_upper(self) -> Expr {
        self.method(MethodKind::ToUpper, vec![])
    }

    pub fn to_lower(self) -> Expr {
        self.method(MethodKind::ToLower, vec![])
    }

    pub fn trim(self) -> Expr {
        self.method(MethodKind::Trim, vec![])
    }

    pub fn length(self) -> Expr {
        self.method(MethodKind::Length, vec![])
    }

    pub fn substring(self, start: impl Into<Value>) -> Expr {
        self.method(MethodKind::Substring, vec![Expr::Value(start.into())])
    }

    pub fn substring_len(self, start: impl Into<Value>, len: impl Into<Value>) -> Expr {
        self.method(
            MethodKind::Substring,
            vec![Expr::Value(start.into()), Expr::Value(len.into())],
        )
    }

    // -- math methods ------------------------------------------------------

    pub fn abs(self) -> Expr {
        self.method(MethodKind::Abs, vec![])
    }

    pub fn round(self) -> Expr {
        self.method(MethodKind::Round, vec![])
    }

    pub fn round_to(self, digits: impl Into<Value>) -> Expr {
        self.method(MethodKind::Round, vec![Expr::Value(digits.into())])
    }

    pub fn floor(self) -> Expr {
        self.method(MethodKind::Floor, vec![])
    }

    pub fn ceiling(self) -> Expr {
        self.method(MethodKind::Ceiling, vec![])
    }

    pub fn sqrt(self) -> Expr {
        self.method(MethodKind::Sqrt, vec![])
    }

    pub fn pow(self, exponent: impl Into<Value>) -> Expr {
        self.method(MethodKind::Pow, vec![Expr::Value(exponent.into())])
    }

    // -- date methods ------------------------------------------------------

    pub fn add_days(self, n: impl Into<Value>) -> Expr {
        self.method(MethodKind::AddDays, vec![Expr::Value(n.into())])
    }

    pub fn add_months(self, n: impl Into<Value>) -> Expr {
        self.method(MethodKind::AddMonths, vec![Expr::Value(n.into())])
    }

    pub fn add_years(self, n: impl Into<Value>) -> Expr {
        self.method(MethodKind::AddYears, vec![Expr::Value(n.into())])
    }

    // -- membership --------------------------------------------------------

    /// `self IN (values...)`. An empty iterator renders as `IN (NULL)`.
    pub fn in_list<I, V>(self, values: I) -> Expr
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let args = values
            .into_iter()
            .map(|v| Expr::Value(v.into()))
            .collect();
        self.method(MethodKind::In, args)
    }

    // -- coalescing and aggregates ----------------------------------------

    pub fn coalesce(self, fallback: Expr) -> Expr {
        Expr::Coalesce {
            left: Box::new(self),
            right: Box::new(fallback),
        }
    }

    pub fn sum(self) -> Expr {
        self.aggregate(AggregateFunc::Sum)
    }

    pub fn avg(self) -> Expr {
        self.aggregate(AggregateFunc::Avg)
    }

    pub fn min(self) -> Expr {
        self.aggregate(AggregateFunc::Min)
    }

    pub fn max(self) -> Expr {
        self.aggregate(AggregateFunc::Max)
    }

    pub fn count(self) -> Expr {
        self.aggregate(AggregateFunc::Count)
    }
}
