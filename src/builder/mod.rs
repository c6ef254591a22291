//! Fluent query assembly.
//!
//! A [`QueryBuilder`] accumulates clause fragments and emits the final
//! statement in one fixed order. The statement kind is inferred from the
//! first structural call (`set` implies UPDATE, `delete` DELETE, `insert`
//! INSERT); DELETE and UPDATE refuse to render without a WHERE predicate.
//!
//! ```
//! use sqlmint::ast::col;
//! use sqlmint::builder::QueryBuilder;
//! use sqlmint::dialect::Dialect;
//! use sqlmint::schema::ColumnSet;
//!
//! let sql = QueryBuilder::new("users", ColumnSet::default(), Dialect::SqlServer)
//!     .select(["Id", "Name"])
//!     .where_(col("Age").gt(18))
//!     .order_asc("Name")
//!     .limit(10)
//!     .to_sql()
//!     .unwrap();
//! assert_eq!(
//!     sql,
//!     "SELECT [Id], [Name] FROM [users] WHERE [Age] > 18 \
//!      ORDER BY [Name] ASC OFFSET 0 ROWS FETCH NEXT 10 ROWS ONLY"
//! );
//! ```

pub mod params;

#[cfg(test)]
mod tests;

use crate::ast::{col, Expr, SortOrder, Value};
use crate::dialect::Dialect;
use crate::error::{MintError, MintResult};
use crate::schema::ColumnSet;
use crate::transpiler::{translate, translate_predicate};
pub use params::ParamContext;

/// Statement kind, inferred from the first structural call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatementKind {
    #[default]
    Unset,
    Select,
    Insert,
    Update,
    Delete,
}

impl StatementKind {
    fn name(self) -> &'static str {
        match self {
            StatementKind::Unset => "UNSET",
            StatementKind::Select => "SELECT",
            StatementKind::Insert => "INSERT",
            StatementKind::Update => "UPDATE",
            StatementKind::Delete => "DELETE",
        }
    }
}

/// Mutable accumulator for one logical query. Not safe for concurrent
/// mutation; confine an instance to one call chain.
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    dialect: Dialect,
    table: String,
    columns: ColumnSet,
    kind: StatementKind,
    projection: Vec<Expr>,
    where_tree: Option<Expr>,
    assignments: Vec<String>,
    group_by: Vec<String>,
    having: Option<Expr>,
    order_by: Vec<(String, SortOrder)>,
    limit: Option<u64>,
    offset: Option<u64>,
    params: ParamContext,
    error: Option<MintError>,
    closed: bool,
}

impl QueryBuilder {
    pub fn new(table: impl Into<String>, columns: ColumnSet, dialect: Dialect) -> Self {
        Self {
            dialect,
            table: table.into(),
            columns,
            kind: StatementKind::Unset,
            projection: Vec::new(),
            where_tree: None,
            assignments: Vec::new(),
            group_by: Vec::new(),
            having: None,
            order_by: Vec::new(),
            limit: None,
            offset: None,
            params: ParamContext::new(),
            error: None,
            closed: false,
        }
    }

    fn imply(mut self, kind: StatementKind, call: &'static str) -> Self {
        match self.kind {
            StatementKind::Unset => self.kind = kind,
            current if current == kind => {}
            // set() composes with INSERT: it supplies the column/value list.
            StatementKind::Insert if kind == StatementKind::Update => {}
            current => {
                if self.error.is_none() {
                    self.error = Some(MintError::InvalidCall {
                        call,
                        kind: current.name(),
                    });
                }
            }
        }
        self
    }

    // -- structural calls --------------------------------------------------

    /// Project the named columns; implies SELECT.
    pub fn select<I, S>(mut self, cols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.projection
            .extend(cols.into_iter().map(|c| col(c.as_ref())));
        self.imply(StatementKind::Select, "select")
    }

    /// Project an arbitrary expression (aggregates, arithmetic); implies SELECT.
    pub fn project(mut self, expr: Expr) -> Self {
        self.projection.push(expr);
        self.imply(StatementKind::Select, "project")
    }

    /// Assign a column; the first `set` implies UPDATE. On an INSERT builder
    /// the assignments become the inserted column list.
    pub fn set(mut self, column: impl AsRef<str>, value: impl Into<Value>) -> Self {
        let logical = column.as_ref().to_string();
        let param = self.columns.physical_of(&logical).to_lowercase();
        self.params.bind(&param, value.into());
        self.assignments.push(logical);
        self.imply(StatementKind::Update, "set")
    }

    /// Mark this builder as an INSERT.
    pub fn insert(self) -> Self {
        self.imply(StatementKind::Insert, "insert")
    }

    /// Mark this builder as a DELETE.
    pub fn delete(self) -> Self {
        self.imply(StatementKind::Delete, "delete")
    }

    // -- predicates (legal for every statement kind) -----------------------

    /// AND-conjunct a predicate into the WHERE tree.
    pub fn where_(mut self, predicate: Expr) -> Self {
        self.where_tree = Some(match self.where_tree.take() {
            Some(existing) => existing.and(predicate),
            None => predicate,
        });
        self
    }

    /// OR-conjunct a predicate into the WHERE tree.
    pub fn or_where(mut self, predicate: Expr) -> Self {
        self.where_tree = Some(match self.where_tree.take() {
            Some(existing) => existing.or(predicate),
            None => predicate,
        });
        self
    }

    pub fn where_eq(self, column: impl AsRef<str>, value: impl Into<Value>) -> Self {
        self.where_(col(column.as_ref()).eq(value))
    }

    /// Bind a value for a named parameter hole referenced by the predicates.
    pub fn bind(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.bind(name, value.into());
        self
    }

    // -- grouping, ordering, paging ---------------------------------------

    pub fn group_by<I, S>(mut self, cols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.group_by
            .extend(cols.into_iter().map(|c| c.as_ref().to_string()));
        self
    }

    /// AND-conjunct a predicate into HAVING.
    pub fn having(mut self, predicate: Expr) -> Self {
        self.having = Some(match self.having.take() {
            Some(existing) => existing.and(predicate),
            None => predicate,
        });
        self
    }

    pub fn order_by(mut self, column: impl AsRef<str>, order: SortOrder) -> Self {
        self.order_by.push((column.as_ref().to_string(), order));
        self
    }

    pub fn order_asc(self, column: impl AsRef<str>) -> Self {
        self.order_by(column, SortOrder::Asc)
    }

    pub fn order_desc(self, column: impl AsRef<str>) -> Self {
        self.order_by(column, SortOrder::Desc)
    }

    pub fn limit(mut self, n: u64) -> Self {
        self.limit = Some(n);
        self
    }

    pub fn offset(mut self, n: u64) -> Self {
        self.offset = Some(n);
        self
    }

    // -- composition -------------------------------------------------------

    /// Conjunct another builder's WHERE tree and union its parameter set.
    pub fn merge_from(mut self, other: &QueryBuilder) -> Self {
        if let Some(theirs) = other.where_tree.clone() {
            self = self.where_(theirs);
        }
        self.params.merge(&other.params);
        self
    }

    // -- output ------------------------------------------------------------

    /// Bound parameters in bind order.
    pub fn parameters(&self) -> &[(String, Value)] {
        self.params.as_slice()
    }

    /// Assemble the statement. Clause order is fixed: head, SET, WHERE,
    /// GROUP BY, HAVING, ORDER BY, LIMIT/OFFSET.
    pub fn to_sql(&self) -> MintResult<String> {
        if self.closed {
            return Err(MintError::BuilderClosed);
        }
        if let Some(err) = &self.error {
            return Err(err.clone());
        }
        if self.table.is_empty() {
            return Err(MintError::MissingArgument("table"));
        }
        let provider = self.dialect.provider()?;
        let table = provider.quote_identifier(&self.table);

        let mut sql = match self.kind {
            StatementKind::Unset | StatementKind::Select => {
                format!("SELECT {} FROM {}", self.projection_sql()?, table)
            }
            StatementKind::Insert => {
                if self.assignments.is_empty() {
                    return Err(MintError::MissingArgument("insert values"));
                }
                let cols: Vec<String> = self
                    .assignments
                    .iter()
                    .map(|c| provider.quote_identifier(&self.columns.physical_of(c)))
                    .collect();
                let vals: Vec<String> = self
                    .assignments
                    .iter()
                    .map(|c| provider.parameter(&self.columns.physical_of(c).to_lowercase()))
                    .collect();
                format!(
                    "INSERT INTO {} ({}) VALUES ({})",
                    table,
                    cols.join(", "),
                    vals.join(", ")
                )
            }
            StatementKind::Update => {
                self.require_where()?;
                if self.assignments.is_empty() {
                    return Err(MintError::MissingArgument("set assignments"));
                }
                let sets: Vec<String> = self
                    .assignments
                    .iter()
                    .map(|c| {
                        let physical = self.columns.physical_of(c);
                        format!(
                            "{} = {}",
                            provider.quote_identifier(&physical),
                            provider.parameter(&physical.to_lowercase())
                        )
                    })
                    .collect();
                format!("UPDATE {} SET {}", table, sets.join(", "))
            }
            StatementKind::Delete => {
                self.require_where()?;
                format!("DELETE FROM {}", table)
            }
        };

        if let Some(tree) = &self.where_tree {
            let fragment = translate_predicate(tree, &self.columns, self.dialect)?;
            sql.push_str(" WHERE ");
            sql.push_str(strip_outer_parens(&fragment.sql));
        }

        if !self.group_by.is_empty() {
            let cols: Vec<String> = self
                .group_by
                .iter()
                .map(|c| provider.quote_identifier(&self.columns.physical_of(c)))
                .collect();
            sql.push_str(" GROUP BY ");
            sql.push_str(&cols.join(", "));
        }

        if let Some(tree) = &self.having {
            let fragment = translate_predicate(tree, &self.columns, self.dialect)?;
            sql.push_str(" HAVING ");
            sql.push_str(strip_outer_parens(&fragment.sql));
        }

        if !self.order_by.is_empty() {
            let cols: Vec<String> = self
                .order_by
                .iter()
                .map(|(c, order)| {
                    format!(
                        "{} {}",
                        provider.quote_identifier(&self.columns.physical_of(c)),
                        order
                    )
                })
                .collect();
            sql.push_str(" ORDER BY ");
            sql.push_str(&cols.join(", "));
        }

        let paging = provider.limit_clause(self.limit, self.offset);
        if !paging.is_empty() {
            sql.push(' ');
            sql.push_str(&paging);
        }

        Ok(sql)
    }

    /// Release retained state. Safe to call any number of times.
    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        self.projection.clear();
        self.where_tree = None;
        self.having = None;
        self.assignments.clear();
        self.params.clear();
        self.closed = true;
    }

    fn projection_sql(&self) -> MintResult<String> {
        if self.projection.is_empty() {
            return Ok("*".to_string());
        }
        let parts: MintResult<Vec<String>> = self
            .projection
            .iter()
            .map(|e| translate(e, &self.columns, self.dialect).map(|f| f.sql))
            .collect();
        Ok(parts?.join(", "))
    }

    fn require_where(&self) -> MintResult<()> {
        if self.where_tree.is_none() {
            return Err(MintError::MissingWhere {
                statement: self.kind.name(),
            });
        }
        Ok(())
    }
}

/// Strip redundant outer parentheses, leaving paired inner ones intact.
fn strip_outer_parens(sql: &str) -> &str {
    let mut out = sql;
    while wrapped_in_parens(out) {
        out = &out[1..out.len() - 1];
    }
    out
}

/// True when the first byte's `(` closes at the last byte, outside any
/// string literal.
fn wrapped_in_parens(sql: &str) -> bool {
    if !sql.starts_with('(') || !sql.ends_with(')') {
        return false;
    }
    let mut depth = 0usize;
    let mut in_string = false;
    for (i, c) in sql.char_indices() {
        match c {
            '\'' => in_string = !in_string,
            '(' if !in_string => depth += 1,
            ')' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return i == sql.len() - 1;
                }
            }
            _ => {}
        }
    }
    false
}
